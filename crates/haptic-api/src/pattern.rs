//! Event and pattern value types
//!
//! A pattern is an ordered, immutable composition of continuous and
//! transient events. Patterns are only produced by
//! [`VibratorPatternBuilder::build`](crate::VibratorPatternBuilder::build),
//! so every pattern in circulation has passed per-event validation.

use serde::{Deserialize, Serialize};

/// Default absolute intensity applied when an event omits it
pub const DEFAULT_EVENT_INTENSITY: i32 = 100;

/// Default absolute frequency for a continuous event
pub const DEFAULT_CONTINUOUS_FREQUENCY: i32 = 50;

/// Default absolute frequency for a transient pulse
pub const DEFAULT_TRANSIENT_FREQUENCY: i32 = 31;

/// One sample of a continuous event's shaping curve.
///
/// `intensity` is a relative gain in `[0.0, 1.0]` against the event
/// intensity; `frequency` a relative adjustment against the event frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub time: i32,
    pub intensity: f32,
    pub frequency: i32,
}

impl CurvePoint {
    pub fn new(time: i32, intensity: f32, frequency: i32) -> Self {
        Self {
            time,
            intensity,
            frequency,
        }
    }
}

/// A sustained vibration segment, optionally shaped by a curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousEvent {
    /// Offset from pattern start, milliseconds
    pub start_delay: i32,

    /// Segment length, milliseconds
    pub duration: i32,

    /// Absolute intensity
    pub intensity: i32,

    /// Absolute frequency
    pub frequency: i32,

    /// Actuator index
    pub index: i32,

    /// Shaping curve; empty means flat at the event intensity/frequency
    pub points: Vec<CurvePoint>,
}

/// A single short pulse with fixed intensity and frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransientEvent {
    /// Offset from pattern start, milliseconds
    pub start_delay: i32,

    /// Absolute intensity
    pub intensity: i32,

    /// Absolute frequency
    pub frequency: i32,

    /// Actuator index
    pub index: i32,
}

/// Duration budgeted for a transient pulse when computing pattern length
const TRANSIENT_NOMINAL_DURATION: i32 = 48;

/// One entry of a pattern, in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PatternEvent {
    Continuous(ContinuousEvent),
    Transient(TransientEvent),
}

impl PatternEvent {
    pub fn start_delay(&self) -> i32 {
        match self {
            PatternEvent::Continuous(e) => e.start_delay,
            PatternEvent::Transient(e) => e.start_delay,
        }
    }

    /// End time of this event relative to pattern start
    pub fn end_time(&self) -> i32 {
        match self {
            PatternEvent::Continuous(e) => e.start_delay.saturating_add(e.duration),
            PatternEvent::Transient(e) => {
                e.start_delay.saturating_add(TRANSIENT_NOMINAL_DURATION)
            }
        }
    }
}

/// An immutable ordered sequence of vibration events.
///
/// Events appear exactly in insertion order; any change produces a new
/// pattern through a fresh builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibratePattern {
    events: Vec<PatternEvent>,
}

impl VibratePattern {
    /// Only the builder constructs patterns.
    pub(crate) fn from_events(events: Vec<PatternEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[PatternEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total pattern length: the largest event end time, milliseconds
    pub fn duration(&self) -> i32 {
        self.events.iter().map(PatternEvent::end_time).max().unwrap_or(0)
    }
}
