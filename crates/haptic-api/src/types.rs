//! Playback request descriptors and usage classification

use serde::{Deserialize, Serialize};

use crate::VibratePattern;

/// Why the caller wants to vibrate.
///
/// Used only for session arbitration priority, never for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageClass {
    Unknown,
    Alarm,
    Ring,
    Notification,
    Communication,
    Touch,
    Media,
    PhysicalFeedback,
    SimulateReality,
}

impl Default for UsageClass {
    fn default() -> Self {
        Self::Unknown
    }
}

/// File-backed waveform reference as submitted by the caller.
///
/// The descriptor borrows the handle for the duration of the call; the core
/// never opens, closes, or seeks it. `offset`/`length` are best-effort and
/// normalized by the effect gate, not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    /// Raw descriptor owned by the resource-manager collaborator
    pub fd: i32,

    /// Byte offset of the waveform inside the file
    #[serde(default)]
    pub offset: Option<i64>,

    /// Byte length of the waveform; absent means "to end of file"
    #[serde(default)]
    pub length: Option<i64>,
}

impl FileHandle {
    pub fn new(fd: i32) -> Self {
        Self {
            fd,
            offset: None,
            length: None,
        }
    }
}

/// Descriptor class, used for capability negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectClass {
    Time,
    Preset,
    Pattern,
    File,
}

/// A playback request: what to vibrate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectDescriptor {
    /// Raw timed buzz
    Time { duration: i32 },

    /// Preset effect by identifier; `count > 1` loops the effect
    Preset { effect_id: String, count: i32 },

    /// Custom waveform built through the pattern builder
    Pattern(VibratePattern),

    /// Custom waveform sourced from a file
    File(FileHandle),
}

impl EffectDescriptor {
    pub fn class(&self) -> EffectClass {
        match self {
            EffectDescriptor::Time { .. } => EffectClass::Time,
            EffectDescriptor::Preset { .. } => EffectClass::Preset,
            EffectDescriptor::Pattern(_) => EffectClass::Pattern,
            EffectDescriptor::File(_) => EffectClass::File,
        }
    }

    /// A looping preset repeats until stopped or preempted
    pub fn is_looping(&self) -> bool {
        matches!(self, EffectDescriptor::Preset { count, .. } if *count > 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_classes() {
        assert_eq!(EffectDescriptor::Time { duration: 100 }.class(), EffectClass::Time);
        assert_eq!(
            EffectDescriptor::File(FileHandle::new(3)).class(),
            EffectClass::File
        );
    }

    #[test]
    fn looping_requires_count_above_one() {
        let single = EffectDescriptor::Preset {
            effect_id: "haptic.clock.timer".into(),
            count: 1,
        };
        let looping = EffectDescriptor::Preset {
            effect_id: "haptic.clock.timer".into(),
            count: 3,
        };
        assert!(!single.is_looping());
        assert!(looping.is_looping());
        assert!(!EffectDescriptor::Time { duration: 10 }.is_looping());
    }

    #[test]
    fn descriptor_json_is_tagged() {
        let desc = EffectDescriptor::Time { duration: 500 };
        let json = serde_json::to_string(&desc).unwrap();
        assert!(json.contains(r#""type":"time""#));

        let parsed: EffectDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(desc, parsed);
    }

    #[test]
    fn file_handle_fields_default_to_absent() {
        let handle: FileHandle = serde_json::from_str(r#"{"fd": 7}"#).unwrap();
        assert_eq!(handle.fd, 7);
        assert_eq!(handle.offset, None);
        assert_eq!(handle.length, None);
    }

    #[test]
    fn malformed_descriptor_json_is_rejected() {
        // Numeric-looking strings are not coerced
        let result: Result<EffectDescriptor, _> =
            serde_json::from_str(r#"{"type":"time","duration":"500"}"#);
        assert!(result.is_err());
    }
}
