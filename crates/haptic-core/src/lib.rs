//! Effect gate and vibration session manager for hapticd
//!
//! This crate is the heart of hapticd, containing:
//! - The capability & permission gate (shape -> permission -> capability)
//! - The usage-priority arbitration rule
//! - The single-slot session state (Idle -> Active -> Idle/Preempted)
//! - The session manager driving at most one vibration at a time

mod arbitration;
mod events;
mod gate;
mod manager;
mod session;

pub use arbitration::*;
pub use events::*;
pub use gate::*;
pub use manager::*;
pub use session::*;
