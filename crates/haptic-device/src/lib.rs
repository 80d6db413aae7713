//! Vibrator device seam for hapticd
//!
//! This crate defines the boundary between the core and the
//! hardware/firmware collaborator:
//! - Capability description and per-class support queries
//! - The async `VibratorDevice` trait (drive primitives)
//! - The clamped file-segment value type
//! - A mock device for unit/integration testing

mod capabilities;
mod mock;
mod segment;
mod traits;

pub use capabilities::*;
pub use mock::*;
pub use segment::*;
pub use traits::*;
