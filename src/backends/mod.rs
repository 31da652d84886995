//! Backends module - filesystem access
//!
//! Provides:
//! - collect: directory walk and explicit file resolution

pub mod collect;
