//! Configuration schema

use haptic_api::Limits;
use haptic_device::DeviceCapabilities;
use serde::Deserialize;

/// Raw TOML structure, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfig {
    pub config_version: u32,

    /// Validation bound overrides; unspecified bounds keep firmware defaults
    #[serde(default)]
    pub limits: Limits,

    #[serde(default)]
    pub device: RawDevice,
}

/// Device section of the raw config
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RawDevice {
    pub hd_haptic: bool,
    pub preset_mapping: bool,
    pub time: bool,

    /// Preset effect identifiers the device firmware knows
    pub presets: Vec<String>,
}

impl Default for RawDevice {
    fn default() -> Self {
        Self {
            hd_haptic: true,
            preset_mapping: true,
            time: true,
            presets: Vec::new(),
        }
    }
}

/// Validated service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub limits: Limits,
    pub device: DeviceConfig,
}

/// Validated device description
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    pub capabilities: DeviceCapabilities,
    pub presets: Vec<String>,
}

impl ServiceConfig {
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            limits: raw.limits,
            device: DeviceConfig {
                capabilities: DeviceCapabilities {
                    supports_hd_haptic: raw.device.hd_haptic,
                    supports_preset_mapping: raw.device.preset_mapping,
                    supports_time: raw.device.time,
                },
                presets: raw.device.presets,
            },
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from_raw(RawConfig {
            config_version: crate::CURRENT_CONFIG_VERSION,
            limits: Limits::default(),
            device: RawDevice::default(),
        })
    }
}
