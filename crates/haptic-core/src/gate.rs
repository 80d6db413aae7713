//! Capability & permission gate
//!
//! Decides whether a playback request is well-formed, permitted, and
//! supportable by the current device, in that order. "This request is
//! well-formed" is separated from "this device can do it" so the same
//! validation runs on every platform while the capability answer varies by
//! hardware. The gate is stateless and side-effect free except for the
//! capability query.

use haptic_api::{EffectClass, EffectDescriptor, FileHandle, Limits, VibratePattern};
use haptic_device::{FileSegment, VibratorDevice};
use haptic_util::{HapticError, Result};
use std::sync::Arc;
use tracing::debug;

/// Identity of the caller submitting a playback request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    pub package: String,
    pub uid: i32,
    pub pid: i32,
}

impl CallerContext {
    pub fn new(package: impl Into<String>, uid: i32, pid: i32) -> Self {
        Self {
            package: package.into(),
            uid,
            pid,
        }
    }
}

/// Permission collaborator: yes/no grant check for the vibration capability
pub trait PermissionPolicy: Send + Sync {
    fn has_vibrate_grant(&self, caller: &CallerContext) -> bool;
}

/// Grants every caller; for tests and trusted single-tenant deployments
pub struct AllowAll;

impl PermissionPolicy for AllowAll {
    fn has_vibrate_grant(&self, _caller: &CallerContext) -> bool {
        true
    }
}

/// Normalized playback plan produced by a passed gate check
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedEffect {
    Time { duration_ms: u32 },
    Preset { effect_id: String, count: u32 },
    Pattern(VibratePattern),
    File(FileSegment),
}

/// The capability & permission gate
pub struct EffectGate {
    device: Arc<dyn VibratorDevice>,
    permission: Arc<dyn PermissionPolicy>,
    limits: Limits,
}

impl EffectGate {
    pub fn new(
        device: Arc<dyn VibratorDevice>,
        permission: Arc<dyn PermissionPolicy>,
        limits: Limits,
    ) -> Self {
        Self {
            device,
            permission,
            limits,
        }
    }

    /// Run the full check sequence for one descriptor.
    ///
    /// May suspend on the capability query; performs no device drive calls.
    pub async fn check(
        &self,
        descriptor: &EffectDescriptor,
        caller: &CallerContext,
    ) -> Result<PreparedEffect> {
        let prepared = self.check_shape(descriptor)?;

        if !self.permission.has_vibrate_grant(caller) {
            debug!(package = %caller.package, uid = caller.uid, "Vibrate grant missing");
            return Err(HapticError::PermissionDenied);
        }

        self.check_capability(descriptor).await?;
        Ok(prepared)
    }

    /// Structural validation and normalization, no device interaction
    fn check_shape(&self, descriptor: &EffectDescriptor) -> Result<PreparedEffect> {
        match descriptor {
            EffectDescriptor::Time { duration } => {
                if *duration <= 0 || *duration > self.limits.time_duration_max {
                    return Err(HapticError::invalid_parameter(format!(
                        "time duration {} out of range (0, {}]",
                        duration, self.limits.time_duration_max
                    )));
                }
                Ok(PreparedEffect::Time {
                    duration_ms: *duration as u32,
                })
            }

            EffectDescriptor::Preset { effect_id, count } => {
                if effect_id.is_empty() {
                    return Err(HapticError::invalid_parameter("preset effect id is empty"));
                }
                if *count < 1 {
                    return Err(HapticError::invalid_parameter(format!(
                        "preset count {count} must be at least 1"
                    )));
                }
                Ok(PreparedEffect::Preset {
                    effect_id: effect_id.clone(),
                    count: *count as u32,
                })
            }

            EffectDescriptor::Pattern(pattern) => {
                if pattern.is_empty() {
                    return Err(HapticError::invalid_parameter("pattern has no events"));
                }
                if pattern.len() > self.limits.pattern_event_max {
                    return Err(HapticError::invalid_parameter(format!(
                        "pattern holds {} events, at most {} allowed",
                        pattern.len(),
                        self.limits.pattern_event_max
                    )));
                }
                Ok(PreparedEffect::Pattern(pattern.clone()))
            }

            EffectDescriptor::File(handle) => Ok(PreparedEffect::File(self.clamp_file(handle)?)),
        }
    }

    /// The fd is structural; offset/length are best-effort and never reject.
    fn clamp_file(&self, handle: &FileHandle) -> Result<FileSegment> {
        if handle.fd < 0 {
            return Err(HapticError::invalid_parameter(format!(
                "file descriptor {} is not a valid resource reference",
                handle.fd
            )));
        }
        let offset = handle.offset.unwrap_or(0).max(0);
        let length = handle.length.filter(|l| *l > 0);
        Ok(FileSegment::new(handle.fd, offset, length))
    }

    /// Capability negotiation against the device/firmware
    async fn check_capability(&self, descriptor: &EffectDescriptor) -> Result<()> {
        let class = descriptor.class();
        if !self.device.capabilities().supports_class(class) {
            debug!(?class, "Descriptor class not supported by device");
            return Err(HapticError::unsupported(format!(
                "descriptor class {class:?} not supported by this device"
            )));
        }

        if let EffectDescriptor::Preset { effect_id, .. } = descriptor {
            let supported = self
                .device
                .is_effect_supported(effect_id)
                .await
                .map_err(|e| HapticError::device(e.to_string()))?;
            if !supported {
                return Err(HapticError::unsupported(format!(
                    "preset effect '{effect_id}' not supported by this device"
                )));
            }
        }

        Ok(())
    }
}
