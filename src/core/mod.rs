//! Core module - data model and the pure building blocks of the pipeline
//!
//! This module provides:
//! - The run data model (source items, outcomes, file map)
//! - Typed skip/fatal errors
//! - zlib compression and base64 text encoding
//! - Identifier derivation from paths

pub mod codec;
pub mod error;
pub mod model;
pub mod paths;
