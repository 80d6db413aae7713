//! Insertion-validating pattern builder
//!
//! Every event is validated at the call that adds it, so the builder's
//! invariant is that every held event is valid; `build` only has to check
//! that at least one event exists. A rejected call leaves the event list
//! untouched.

use haptic_util::{HapticError, Result};
use serde::{Deserialize, Serialize};

use crate::{
    ContinuousEvent, CurvePoint, DEFAULT_CONTINUOUS_FREQUENCY, DEFAULT_EVENT_INTENSITY,
    DEFAULT_TRANSIENT_FREQUENCY, Limits, PatternEvent, TransientEvent, VibratePattern,
};

/// Optional fields of a continuous event, defaulted independently when omitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuousEventOptions {
    pub intensity: Option<i32>,
    pub frequency: Option<i32>,
    pub points: Option<Vec<CurvePoint>>,
    pub index: Option<i32>,
}

/// Optional fields of a transient event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransientEventOptions {
    pub intensity: Option<i32>,
    pub frequency: Option<i32>,
    pub index: Option<i32>,
}

/// Accumulates an ordered event sequence into an immutable pattern.
///
/// Owned exclusively by the caller assembling a pattern; chained through a
/// unique reference:
///
/// ```
/// # use haptic_api::VibratorPatternBuilder;
/// let mut builder = VibratorPatternBuilder::new();
/// let pattern = builder
///     .add_continuous_event(0, 400, None)?
///     .add_transient_event(500, None)?
///     .build()?;
/// assert_eq!(pattern.len(), 2);
/// # Ok::<(), haptic_util::HapticError>(())
/// ```
#[derive(Debug, Clone)]
pub struct VibratorPatternBuilder {
    limits: Limits,
    events: Vec<PatternEvent>,
}

impl VibratorPatternBuilder {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            events: Vec::new(),
        }
    }

    /// Events accumulated so far, in insertion order
    pub fn events(&self) -> &[PatternEvent] {
        &self.events
    }

    /// Append a sustained, optionally curve-shaped segment.
    ///
    /// Validation order: positional scalars, then optional fields, then the
    /// curve. The first failing check wins and nothing is appended.
    pub fn add_continuous_event(
        &mut self,
        start_delay: i32,
        duration: i32,
        options: Option<ContinuousEventOptions>,
    ) -> Result<&mut Self> {
        self.check_capacity()?;
        self.check_start_delay(start_delay)?;
        if duration <= 0 || duration > self.limits.continuous_duration_max {
            return Err(HapticError::invalid_parameter(format!(
                "duration {} out of range (0, {}]",
                duration, self.limits.continuous_duration_max
            )));
        }

        let options = options.unwrap_or_default();
        let intensity = self.check_intensity(options.intensity)?;
        let frequency = self.check_frequency(options.frequency, DEFAULT_CONTINUOUS_FREQUENCY)?;
        let index = self.check_index(options.index)?;

        let points = options.points.unwrap_or_default();
        if !points.is_empty() {
            self.check_curve(&points, duration)?;
        }

        self.events.push(PatternEvent::Continuous(ContinuousEvent {
            start_delay,
            duration,
            intensity,
            frequency,
            index,
            points,
        }));
        Ok(self)
    }

    /// Append a single short pulse.
    pub fn add_transient_event(
        &mut self,
        start_delay: i32,
        options: Option<TransientEventOptions>,
    ) -> Result<&mut Self> {
        self.check_capacity()?;
        self.check_start_delay(start_delay)?;

        let options = options.unwrap_or_default();
        let intensity = self.check_intensity(options.intensity)?;
        let frequency = self.check_frequency(options.frequency, DEFAULT_TRANSIENT_FREQUENCY)?;
        let index = self.check_index(options.index)?;

        self.events.push(PatternEvent::Transient(TransientEvent {
            start_delay,
            intensity,
            frequency,
            index,
        }));
        Ok(self)
    }

    /// Finalize the accumulated sequence into an immutable pattern.
    ///
    /// Drains the builder, so the pattern uniquely owns its events; the
    /// emptied builder may be reused. An empty builder fails with the same
    /// invalid-parameter error kind as any other validation failure.
    pub fn build(&mut self) -> Result<VibratePattern> {
        if self.events.is_empty() {
            return Err(HapticError::invalid_parameter(
                "pattern must contain at least one event",
            ));
        }
        Ok(VibratePattern::from_events(std::mem::take(&mut self.events)))
    }

    fn check_capacity(&self) -> Result<()> {
        if self.events.len() >= self.limits.pattern_event_max {
            return Err(HapticError::invalid_parameter(format!(
                "pattern holds at most {} events",
                self.limits.pattern_event_max
            )));
        }
        Ok(())
    }

    fn check_start_delay(&self, start_delay: i32) -> Result<()> {
        if start_delay < 0 || start_delay > self.limits.event_start_time_max {
            return Err(HapticError::invalid_parameter(format!(
                "start delay {} out of range [0, {}]",
                start_delay, self.limits.event_start_time_max
            )));
        }
        Ok(())
    }

    fn check_intensity(&self, intensity: Option<i32>) -> Result<i32> {
        let intensity = intensity.unwrap_or(DEFAULT_EVENT_INTENSITY);
        if intensity < self.limits.intensity_min || intensity > self.limits.intensity_max {
            return Err(HapticError::invalid_parameter(format!(
                "intensity {} out of range [{}, {}]",
                intensity, self.limits.intensity_min, self.limits.intensity_max
            )));
        }
        Ok(intensity)
    }

    fn check_frequency(&self, frequency: Option<i32>, default: i32) -> Result<i32> {
        let frequency = frequency.unwrap_or(default);
        if frequency < self.limits.frequency_min || frequency > self.limits.frequency_max {
            return Err(HapticError::invalid_parameter(format!(
                "frequency {} out of range [{}, {}]",
                frequency, self.limits.frequency_min, self.limits.frequency_max
            )));
        }
        Ok(frequency)
    }

    fn check_index(&self, index: Option<i32>) -> Result<i32> {
        let index = index.unwrap_or(0);
        if index < 0 || index > self.limits.event_index_max {
            return Err(HapticError::invalid_parameter(format!(
                "index {} out of range [0, {}]",
                index, self.limits.event_index_max
            )));
        }
        Ok(index)
    }

    fn check_curve(&self, points: &[CurvePoint], duration: i32) -> Result<()> {
        if points.len() < self.limits.curve_point_num_min
            || points.len() > self.limits.curve_point_num_max
        {
            return Err(HapticError::invalid_parameter(format!(
                "curve needs {} to {} points, got {}",
                self.limits.curve_point_num_min,
                self.limits.curve_point_num_max,
                points.len()
            )));
        }

        let mut previous_time: Option<i32> = None;
        for point in points {
            if point.time < 0 || point.time > duration {
                return Err(HapticError::invalid_parameter(format!(
                    "curve point time {} out of range [0, {}]",
                    point.time, duration
                )));
            }
            if let Some(prev) = previous_time
                && point.time <= prev
            {
                return Err(HapticError::invalid_parameter(format!(
                    "curve point times must be strictly increasing ({} after {})",
                    point.time, prev
                )));
            }
            previous_time = Some(point.time);

            if !point.intensity.is_finite() || point.intensity < 0.0 || point.intensity > 1.0 {
                return Err(HapticError::invalid_parameter(format!(
                    "curve point intensity {} out of range [0.0, 1.0]",
                    point.intensity
                )));
            }
            if point.frequency < self.limits.curve_frequency_min
                || point.frequency > self.limits.curve_frequency_max
            {
                return Err(HapticError::invalid_parameter(format!(
                    "curve point frequency {} out of range [{}, {}]",
                    point.frequency,
                    self.limits.curve_frequency_min,
                    self.limits.curve_frequency_max
                )));
            }
        }
        Ok(())
    }
}

impl Default for VibratorPatternBuilder {
    fn default() -> Self {
        Self::new()
    }
}
