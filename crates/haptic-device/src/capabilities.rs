//! Device capability model

use haptic_api::EffectClass;
use serde::{Deserialize, Serialize};

/// Describes what the current vibrator hardware/firmware can do
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCapabilities {
    /// Can play high-definition custom waveforms (patterns and files)
    pub supports_hd_haptic: bool,

    /// Can map preset effect identifiers to native primitives
    pub supports_preset_mapping: bool,

    /// Can drive a raw timed buzz
    pub supports_time: bool,
}

impl DeviceCapabilities {
    /// Raw timed buzz only
    pub fn minimal() -> Self {
        Self {
            supports_hd_haptic: false,
            supports_preset_mapping: false,
            supports_time: true,
        }
    }

    /// Everything, as on HD-haptic-capable hardware
    pub fn full() -> Self {
        Self {
            supports_hd_haptic: true,
            supports_preset_mapping: true,
            supports_time: true,
        }
    }

    /// Check support for a descriptor class.
    ///
    /// Presets additionally need a per-effect query on the device, so this
    /// answers only whether the class as a whole is available.
    pub fn supports_class(&self, class: EffectClass) -> bool {
        match class {
            EffectClass::Time => self.supports_time,
            EffectClass::Preset => self.supports_preset_mapping,
            EffectClass::Pattern | EffectClass::File => self.supports_hd_haptic,
        }
    }
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self::minimal()
    }
}
