//! Configuration validation

use crate::schema::RawConfig;
use std::collections::HashSet;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Limit '{name}': {message}")]
    LimitError { name: String, message: String },

    #[error("Duplicate preset effect id: {0}")]
    DuplicatePreset(String),

    #[error("Preset effect id cannot be empty")]
    EmptyPreset,
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    validate_limits(config, &mut errors);

    let mut seen = HashSet::new();
    for preset in &config.device.presets {
        if preset.is_empty() {
            errors.push(ValidationError::EmptyPreset);
        } else if !seen.insert(preset) {
            errors.push(ValidationError::DuplicatePreset(preset.clone()));
        }
    }

    errors
}

fn validate_limits(config: &RawConfig, errors: &mut Vec<ValidationError>) {
    let limits = &config.limits;

    let mut limit_error = |name: &str, message: String| {
        errors.push(ValidationError::LimitError {
            name: name.into(),
            message,
        });
    };

    if limits.event_start_time_max <= 0 {
        limit_error("event_start_time_max", "must be positive".into());
    }
    if limits.continuous_duration_max <= 0 {
        limit_error("continuous_duration_max", "must be positive".into());
    }
    if limits.time_duration_max <= 0 {
        limit_error("time_duration_max", "must be positive".into());
    }
    if limits.intensity_min > limits.intensity_max {
        limit_error(
            "intensity_min",
            format!("{} exceeds intensity_max {}", limits.intensity_min, limits.intensity_max),
        );
    }
    if limits.frequency_min > limits.frequency_max {
        limit_error(
            "frequency_min",
            format!("{} exceeds frequency_max {}", limits.frequency_min, limits.frequency_max),
        );
    }
    if limits.curve_frequency_min > limits.curve_frequency_max {
        limit_error(
            "curve_frequency_min",
            format!(
                "{} exceeds curve_frequency_max {}",
                limits.curve_frequency_min, limits.curve_frequency_max
            ),
        );
    }
    // A curve with fewer than two samples cannot describe a shape
    if limits.curve_point_num_min < 2 {
        limit_error("curve_point_num_min", "must be at least 2".into());
    }
    if limits.curve_point_num_min > limits.curve_point_num_max {
        limit_error(
            "curve_point_num_min",
            format!(
                "{} exceeds curve_point_num_max {}",
                limits.curve_point_num_min, limits.curve_point_num_max
            ),
        );
    }
    if limits.event_index_max < 0 {
        limit_error("event_index_max", "must be non-negative".into());
    }
    if limits.pattern_event_max == 0 {
        limit_error("pattern_event_max", "must be at least 1".into());
    }
}
