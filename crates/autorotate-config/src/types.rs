use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Accelerometer source.
    pub sensor: SensorConfig,
    /// Display and touch device.
    pub display: DisplayConfig,
    /// Orientation decision parameters.
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// IIO device directory holding `in_accel_*_raw`.
    /// `None` means auto-detect under /sys/bus/iio/devices.
    pub accelerometer_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// xinput name of the touch device. `None` means auto-detect.
    pub touch_device: Option<String>,
    /// Shell command run when switching between laptop-like (normal/inverted)
    /// and side-loaded (left/right) orientations.
    pub orientation_cmd: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether the upside-down orientation may be selected.
    pub allow_inverted: bool,
    /// Stable ticks required before a new orientation is applied.
    pub debounce_ticks: u32,
    /// Polling interval in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            allow_inverted: true,
            debounce_ticks: 10,
            tick_interval_ms: 100,
        }
    }
}

impl EngineConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
