//! Shared utilities for hapticd
//!
//! This crate provides:
//! - The caller-facing error taxonomy with stable numeric codes
//! - Strongly-typed session identifiers

mod error;
mod ids;

pub use error::*;
pub use ids::*;
