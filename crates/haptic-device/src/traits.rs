//! Vibrator device trait

use async_trait::async_trait;
use haptic_api::VibratePattern;
use thiserror::Error;

use crate::{DeviceCapabilities, FileSegment};

/// Errors from device operations
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Operation not supported by firmware")]
    Unsupported,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DeviceResult<T> = Result<T, DeviceError>;

/// Vibrator drive primitives - implemented by hardware-specific backends.
///
/// The `play_*` and `vibrate_time` futures resolve when the effect has
/// finished naturally; cancelling them abandons the wait, not the hardware,
/// so callers pair cancellation with [`stop`](VibratorDevice::stop).
#[async_trait]
pub trait VibratorDevice: Send + Sync {
    /// Get the capabilities of this device
    fn capabilities(&self) -> &DeviceCapabilities;

    /// Query firmware support for a single preset effect identifier
    async fn is_effect_supported(&self, effect_id: &str) -> DeviceResult<bool>;

    /// Drive a raw buzz for the given number of milliseconds
    async fn vibrate_time(&self, duration_ms: u32) -> DeviceResult<()>;

    /// Play a preset effect `count` times
    async fn play_preset(&self, effect_id: &str, count: u32) -> DeviceResult<()>;

    /// Play a custom waveform pattern
    async fn play_pattern(&self, pattern: &VibratePattern) -> DeviceResult<()>;

    /// Play a file-backed waveform
    async fn play_file(&self, segment: &FileSegment) -> DeviceResult<()>;

    /// Halt whatever is currently playing; a no-op when idle
    async fn stop(&self) -> DeviceResult<()>;

    /// Optional: check if the device transport is healthy
    fn is_healthy(&self) -> bool {
        true
    }
}
