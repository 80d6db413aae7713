//! Vibration session manager
//!
//! Owns the single active-vibration slot. All slot mutations happen under
//! one lock; the gate's capability query runs outside it so a `stop` is
//! served promptly even while a `start` is negotiating with the device.
//! Playback itself runs in a spawned task that races the device future
//! against a cancel signal.

use haptic_api::{EffectDescriptor, Limits, UsageClass};
use haptic_device::{DeviceResult, VibratorDevice};
use haptic_util::{HapticError, Result, SessionId};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, info, warn};

use crate::{
    ActiveVibration, CallerContext, EffectGate, EndReason, PermissionPolicy, PreparedEffect,
    SessionSnapshot, VibrationEvent, VibrationMeta, should_ignore,
};

/// Arbitrates playback requests onto the one physical actuator
pub struct VibrationManager {
    device: Arc<dyn VibratorDevice>,
    gate: EffectGate,
    slot: Arc<Mutex<Option<ActiveVibration>>>,

    /// Bumped by every stop; a start that observes a bump after its gate
    /// check has been cancelled by that stop.
    stop_epoch: AtomicU64,

    event_tx: mpsc::UnboundedSender<VibrationEvent>,
    event_rx: std::sync::Mutex<Option<mpsc::UnboundedReceiver<VibrationEvent>>>,
}

impl VibrationManager {
    pub fn new(
        device: Arc<dyn VibratorDevice>,
        permission: Arc<dyn PermissionPolicy>,
        limits: Limits,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Self {
            gate: EffectGate::new(device.clone(), permission, limits),
            device,
            slot: Arc::new(Mutex::new(None)),
            stop_epoch: AtomicU64::new(0),
            event_tx,
            event_rx: std::sync::Mutex::new(Some(event_rx)),
        }
    }

    /// Subscribe to session lifecycle events
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<VibrationEvent> {
        self.event_rx
            .lock()
            .unwrap()
            .take()
            .expect("subscribe() can only be called once")
    }

    /// Snapshot of the active session, if any
    pub async fn current(&self) -> Option<SessionSnapshot> {
        self.slot.lock().await.as_ref().map(ActiveVibration::snapshot)
    }

    pub async fn is_active(&self) -> bool {
        self.slot.lock().await.is_some()
    }

    /// Submit a playback request.
    ///
    /// Runs the gate first; a rejected request leaves the slot untouched.
    /// Against an active session the usage-priority rule decides: a refusal
    /// surfaces as `Unsupported`, a win stops the current session and takes
    /// the slot.
    pub async fn start(
        &self,
        descriptor: EffectDescriptor,
        usage: UsageClass,
        caller: &CallerContext,
    ) -> Result<SessionId> {
        let epoch = self.stop_epoch.load(Ordering::SeqCst);
        let meta = VibrationMeta {
            usage,
            class: descriptor.class(),
            looping: descriptor.is_looping(),
        };

        let prepared = self.gate.check(&descriptor, caller).await?;

        if self.stop_epoch.load(Ordering::SeqCst) != epoch {
            debug!("In-flight start cancelled by a concurrent stop");
            return Err(HapticError::device("start cancelled by a concurrent stop"));
        }

        let mut slot = self.slot.lock().await;

        if let Some(current) = slot.as_ref() {
            if let Some(reason) = should_ignore(&meta, &current.meta) {
                debug!(
                    session_id = %current.id,
                    ?reason,
                    incoming_usage = ?usage,
                    "Request refused, active session has priority"
                );
                return Err(HapticError::unsupported(format!(
                    "active session outranks this request ({reason:?})"
                )));
            }

            let old = slot.take().expect("slot checked non-empty");
            old.request_cancel();
            if let Err(e) = self.device.stop().await {
                warn!(error = %e, "Failed to halt preempted vibration");
            }
            info!(session_id = %old.id, "Session preempted");
            let _ = self.event_tx.send(VibrationEvent::Ended {
                session_id: old.id,
                reason: EndReason::Preempted,
            });
        }

        let (session, cancel_rx) = ActiveVibration::new(meta);
        let id = session.id.clone();

        info!(session_id = %id, usage = ?usage, class = ?meta.class, "Vibration started");
        let _ = self.event_tx.send(VibrationEvent::Started {
            session_id: id.clone(),
            usage,
            class: meta.class,
        });

        self.spawn_playback(id.clone(), prepared, cancel_rx);
        *slot = Some(session);
        Ok(id)
    }

    /// Stop whatever is playing. A no-op from idle, never an error.
    pub async fn stop(&self) -> Result<()> {
        self.stop_epoch.fetch_add(1, Ordering::SeqCst);

        let mut slot = self.slot.lock().await;
        let Some(active) = slot.take() else {
            debug!("Stop with no active session");
            return Ok(());
        };

        active.request_cancel();
        let result = self.device.stop().await;

        info!(session_id = %active.id, "Vibration stopped");
        let _ = self.event_tx.send(VibrationEvent::Ended {
            session_id: active.id,
            reason: EndReason::Stopped,
        });

        // The slot is vacated even when the hardware halt fails
        result.map_err(|e| HapticError::device(e.to_string()))
    }

    /// Callback form of [`start`](Self::start); identical semantics over
    /// the same underlying operation.
    pub fn start_with_callback<F>(
        self: &Arc<Self>,
        descriptor: EffectDescriptor,
        usage: UsageClass,
        caller: CallerContext,
        on_done: F,
    ) where
        F: FnOnce(Result<SessionId>) + Send + 'static,
    {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            on_done(manager.start(descriptor, usage, &caller).await);
        });
    }

    /// Callback form of [`stop`](Self::stop)
    pub fn stop_with_callback<F>(self: &Arc<Self>, on_done: F)
    where
        F: FnOnce(Result<()>) + Send + 'static,
    {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            on_done(manager.stop().await);
        });
    }

    fn spawn_playback(
        &self,
        id: SessionId,
        prepared: PreparedEffect,
        mut cancel_rx: watch::Receiver<bool>,
    ) {
        let device = self.device.clone();
        let slot = self.slot.clone();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let reason = tokio::select! {
                res = drive(device.as_ref(), &prepared) => match res {
                    Ok(()) => EndReason::Completed,
                    Err(e) => {
                        warn!(session_id = %id, error = %e, "Playback failed");
                        EndReason::DeviceError
                    }
                },
                // Stop and preemption paths own the slot cleanup and event
                _ = cancel_rx.changed() => return,
            };

            let mut slot = slot.lock().await;
            if slot.as_ref().is_some_and(|active| active.id == id) {
                *slot = None;
                debug!(session_id = %id, ?reason, "Playback finished");
                let _ = event_tx.send(VibrationEvent::Ended {
                    session_id: id,
                    reason,
                });
            }
        });
    }
}

/// Map a prepared effect onto the device drive primitives
async fn drive(device: &dyn VibratorDevice, prepared: &PreparedEffect) -> DeviceResult<()> {
    match prepared {
        PreparedEffect::Time { duration_ms } => device.vibrate_time(*duration_ms).await,
        PreparedEffect::Preset { effect_id, count } => {
            device.play_preset(effect_id, *count).await
        }
        PreparedEffect::Pattern(pattern) => device.play_pattern(pattern).await,
        PreparedEffect::File(segment) => device.play_file(segment).await,
    }
}
