//! Validation bounds for event and pattern fields
//!
//! The canonical ranges vary between device generations, so every bound is
//! configurable; the defaults match the reference firmware.

use serde::{Deserialize, Serialize};

/// Bounds applied by the pattern builder and the effect gate.
///
/// Times and durations are milliseconds. Event `intensity`/`frequency` are
/// absolute values; curve-point `intensity` is a relative gain in
/// `[0.0, 1.0]` and curve-point `frequency` a relative adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Largest allowed event start delay
    pub event_start_time_max: i32,

    /// Largest allowed continuous event duration
    pub continuous_duration_max: i32,

    /// Largest allowed raw timed buzz duration
    pub time_duration_max: i32,

    /// Absolute intensity range for events
    pub intensity_min: i32,
    pub intensity_max: i32,

    /// Absolute frequency range for events
    pub frequency_min: i32,
    pub frequency_max: i32,

    /// Relative frequency range for curve points
    pub curve_frequency_min: i32,
    pub curve_frequency_max: i32,

    /// Curve point count bounds for a non-empty curve
    pub curve_point_num_min: usize,
    pub curve_point_num_max: usize,

    /// Largest allowed event index (actuator selector)
    pub event_index_max: i32,

    /// Largest number of events one pattern may hold
    pub pattern_event_max: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            event_start_time_max: 1_800_000,
            continuous_duration_max: 5_000,
            time_duration_max: 1_800_000,
            intensity_min: 0,
            intensity_max: 100,
            frequency_min: 0,
            frequency_max: 100,
            curve_frequency_min: -100,
            curve_frequency_max: 100,
            curve_point_num_min: 4,
            curve_point_num_max: 16,
            event_index_max: 2,
            pattern_event_max: 16,
        }
    }
}
