//! Value types for hapticd
//!
//! This crate defines the stable vocabulary between callers and the
//! vibration service:
//! - Event and pattern types (curve points, continuous/transient events)
//! - The insertion-validating pattern builder
//! - Effect descriptors and usage classification
//! - Configurable validation bounds

mod builder;
mod limits;
mod pattern;
mod types;

pub use builder::*;
pub use limits::*;
pub use pattern::*;
pub use types::*;
