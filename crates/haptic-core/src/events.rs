//! Events emitted by the session manager

use haptic_api::{EffectClass, UsageClass};
use haptic_util::SessionId;

use crate::EndReason;

/// Lifecycle notifications for observers (logging, UIs, tests)
#[derive(Debug, Clone, PartialEq)]
pub enum VibrationEvent {
    /// A session took the active slot and playback began
    Started {
        session_id: SessionId,
        usage: UsageClass,
        class: EffectClass,
    },

    /// The active slot was vacated
    Ended {
        session_id: SessionId,
        reason: EndReason,
    },
}
