//! Active vibration session state

use chrono::{DateTime, Local};
use haptic_api::{EffectClass, UsageClass};
use haptic_util::SessionId;
use serde::Serialize;
use tokio::sync::watch;

/// The arbitration-relevant facts about one playback request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VibrationMeta {
    pub usage: UsageClass,
    pub class: EffectClass,
    pub looping: bool,
}

/// How an active session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Duration elapsed or preset finished
    Completed,

    /// Explicit caller stop
    Stopped,

    /// Superseded by a higher-priority request
    Preempted,

    /// Device fault during playback
    DeviceError,
}

/// The one active vibration, while it lasts
#[derive(Debug)]
pub struct ActiveVibration {
    pub id: SessionId,
    pub meta: VibrationMeta,

    /// Wall-clock start time, for logging
    pub started_at: DateTime<Local>,

    /// Signals the playback task to abandon its wait
    pub cancel: watch::Sender<bool>,
}

impl ActiveVibration {
    pub fn new(meta: VibrationMeta) -> (Self, watch::Receiver<bool>) {
        let (cancel, cancel_rx) = watch::channel(false);
        (
            Self {
                id: SessionId::new(),
                meta,
                started_at: Local::now(),
                cancel,
            },
            cancel_rx,
        )
    }

    /// Tell the playback task to stand down; the hardware stop is separate
    pub fn request_cancel(&self) {
        let _ = self.cancel.send(true);
    }
}

/// Point-in-time view of the active session, for status queries
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub usage: UsageClass,
    pub class: EffectClass,
    pub looping: bool,
    pub started_at: DateTime<Local>,
}

impl ActiveVibration {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.clone(),
            usage: self.meta.usage,
            class: self.meta.class,
            looping: self.meta.looping,
            started_at: self.started_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_signal_reaches_receiver() {
        let meta = VibrationMeta {
            usage: UsageClass::Touch,
            class: EffectClass::Time,
            looping: false,
        };
        let (session, cancel_rx) = ActiveVibration::new(meta);

        assert!(!*cancel_rx.borrow());
        session.request_cancel();
        assert!(*cancel_rx.borrow());
    }

    #[test]
    fn snapshot_reflects_meta() {
        let meta = VibrationMeta {
            usage: UsageClass::Alarm,
            class: EffectClass::Preset,
            looping: true,
        };
        let (session, _rx) = ActiveVibration::new(meta);
        let snapshot = session.snapshot();

        assert_eq!(snapshot.session_id, session.id);
        assert_eq!(snapshot.usage, UsageClass::Alarm);
        assert!(snapshot.looping);
    }
}
