//! Flows module - end-to-end operations
//!
//! Provides:
//! - encode: collect, compress, encode and emit the bundle

pub mod encode;
