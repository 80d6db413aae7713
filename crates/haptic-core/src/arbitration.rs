//! Usage-priority arbitration
//!
//! Only one actuator exists, so a new request racing an active session must
//! resolve deterministically. The rule: an active alarm is never preempted,
//! an active looping preset is never preempted, an incoming looping preset
//! always preempts, an incoming unknown-usage request never preempts a
//! different usage, and everything else preempts.

use haptic_api::UsageClass;

use crate::VibrationMeta;

/// Why an incoming request was refused in favor of the active session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The active session is an alarm
    AlarmActive,

    /// The active session is a looping preset
    RepeatActive,

    /// Unknown usage does not outrank a different active usage
    UnknownLowPriority,
}

/// Decide whether `incoming` must yield to `current`.
///
/// `None` means the incoming request preempts the active session.
pub fn should_ignore(incoming: &VibrationMeta, current: &VibrationMeta) -> Option<IgnoreReason> {
    if incoming.looping {
        return None;
    }
    if current.usage == UsageClass::Alarm {
        return Some(IgnoreReason::AlarmActive);
    }
    if current.looping {
        return Some(IgnoreReason::RepeatActive);
    }
    if incoming.usage == UsageClass::Unknown && incoming.usage != current.usage {
        return Some(IgnoreReason::UnknownLowPriority);
    }
    None
}
