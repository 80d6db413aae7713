//! Mock vibrator device for testing

use async_trait::async_trait;
use haptic_api::VibratePattern;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{DeviceCapabilities, DeviceError, DeviceResult, FileSegment, VibratorDevice};

/// Nominal playback time for one preset repetition
const PRESET_UNIT: Duration = Duration::from_millis(20);

/// Nominal playback time for a file-backed waveform
const FILE_UNIT: Duration = Duration::from_millis(30);

/// What the mock was asked to play, for test assertions
#[derive(Debug, Clone, PartialEq)]
pub enum PlayedEffect {
    Time(u32),
    Preset { effect_id: String, count: u32 },
    Pattern { events: usize, duration_ms: i32 },
    File(FileSegment),
    Stop,
}

/// Mock vibrator for unit/integration testing
pub struct MockVibrator {
    capabilities: DeviceCapabilities,
    supported_effects: Mutex<HashSet<String>>,
    log: Arc<Mutex<Vec<PlayedEffect>>>,

    /// Configure play calls to fail
    pub fail_play: Arc<Mutex<bool>>,

    /// Configure stop to fail
    pub fail_stop: Arc<Mutex<bool>>,

    /// Configure the preset support query to fail
    pub fail_query: Arc<Mutex<bool>>,
}

impl MockVibrator {
    pub fn new() -> Self {
        Self {
            capabilities: DeviceCapabilities::full(),
            supported_effects: Mutex::new(HashSet::new()),
            log: Arc::new(Mutex::new(Vec::new())),
            fail_play: Arc::new(Mutex::new(false)),
            fail_stop: Arc::new(Mutex::new(false)),
            fail_query: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_capabilities(mut self, caps: DeviceCapabilities) -> Self {
        self.capabilities = caps;
        self
    }

    pub fn with_supported_effects<I, S>(self, effects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut supported = self.supported_effects.lock().unwrap();
            supported.extend(effects.into_iter().map(Into::into));
        }
        self
    }

    /// Everything played so far, in order, including stops
    pub fn played(&self) -> Vec<PlayedEffect> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, effect: PlayedEffect) {
        self.log.lock().unwrap().push(effect);
    }

    fn check_play(&self) -> DeviceResult<()> {
        if *self.fail_play.lock().unwrap() {
            return Err(DeviceError::Transport("mock play failure".into()));
        }
        Ok(())
    }
}

impl Default for MockVibrator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VibratorDevice for MockVibrator {
    fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    async fn is_effect_supported(&self, effect_id: &str) -> DeviceResult<bool> {
        if *self.fail_query.lock().unwrap() {
            return Err(DeviceError::Transport("mock query failure".into()));
        }
        Ok(self.supported_effects.lock().unwrap().contains(effect_id))
    }

    async fn vibrate_time(&self, duration_ms: u32) -> DeviceResult<()> {
        self.check_play()?;
        self.record(PlayedEffect::Time(duration_ms));
        tokio::time::sleep(Duration::from_millis(u64::from(duration_ms))).await;
        Ok(())
    }

    async fn play_preset(&self, effect_id: &str, count: u32) -> DeviceResult<()> {
        self.check_play()?;
        self.record(PlayedEffect::Preset {
            effect_id: effect_id.to_string(),
            count,
        });
        tokio::time::sleep(PRESET_UNIT * count).await;
        Ok(())
    }

    async fn play_pattern(&self, pattern: &VibratePattern) -> DeviceResult<()> {
        self.check_play()?;
        let duration_ms = pattern.duration();
        self.record(PlayedEffect::Pattern {
            events: pattern.len(),
            duration_ms,
        });
        tokio::time::sleep(Duration::from_millis(duration_ms.max(0) as u64)).await;
        Ok(())
    }

    async fn play_file(&self, segment: &FileSegment) -> DeviceResult<()> {
        self.check_play()?;
        self.record(PlayedEffect::File(*segment));
        tokio::time::sleep(FILE_UNIT).await;
        Ok(())
    }

    async fn stop(&self) -> DeviceResult<()> {
        if *self.fail_stop.lock().unwrap() {
            return Err(DeviceError::Transport("mock stop failure".into()));
        }
        self.record(PlayedEffect::Stop);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_records_playback_order() {
        let device = MockVibrator::new();

        device.vibrate_time(5).await.unwrap();
        device.stop().await.unwrap();

        assert_eq!(
            device.played(),
            vec![PlayedEffect::Time(5), PlayedEffect::Stop]
        );
    }

    #[tokio::test]
    async fn mock_play_failure() {
        let device = MockVibrator::new();
        *device.fail_play.lock().unwrap() = true;

        let result = device.vibrate_time(5).await;
        assert!(matches!(result, Err(DeviceError::Transport(_))));
        assert!(device.played().is_empty());
    }

    #[tokio::test]
    async fn effect_support_query() {
        let device = MockVibrator::new().with_supported_effects(["haptic.clock.timer"]);

        assert!(device.is_effect_supported("haptic.clock.timer").await.unwrap());
        assert!(!device.is_effect_supported("haptic.unknown").await.unwrap());

        *device.fail_query.lock().unwrap() = true;
        assert!(device.is_effect_supported("haptic.clock.timer").await.is_err());
    }
}
