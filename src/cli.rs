use autorotate_config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// Value accepted by the device flags to request auto-detection.
const AUTO: &str = "auto";

/// Rotate the screen and touch input of a convertible from its accelerometer.
#[derive(Debug, Parser)]
#[command(name = "autorotate", version, about)]
pub struct Cli {
    /// xinput name of the touch device, or "auto".
    #[arg(long, value_name = "NAME")]
    pub touch_device: Option<String>,

    /// IIO device directory with in_accel_*_raw files, or "auto".
    #[arg(long, value_name = "DIR")]
    pub accelerometer_dir: Option<PathBuf>,

    /// Command run when switching between upright and side orientations.
    #[arg(long, value_name = "CMD")]
    pub orientation_cmd: Option<String>,

    /// Never rotate to the upside-down orientation.
    #[arg(long)]
    pub no_inverted: bool,

    /// Only log warnings and errors.
    #[arg(long, short)]
    pub quiet: bool,

    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Stable ticks required before rotating.
    #[arg(long, value_name = "TICKS")]
    pub debounce_ticks: Option<u32>,

    /// Polling interval in milliseconds.
    #[arg(long, value_name = "MS")]
    pub tick_interval_ms: Option<u64>,

    /// Write the effective settings back to the config file.
    #[arg(long)]
    pub save_config: bool,
}

impl Cli {
    /// Overlay command line values on top of the loaded config.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dev) = &self.touch_device {
            config.display.touch_device = (dev != AUTO).then(|| dev.clone());
        }
        if let Some(dir) = &self.accelerometer_dir {
            config.sensor.accelerometer_dir = (dir.as_os_str() != AUTO).then(|| dir.clone());
        }
        if let Some(cmd) = &self.orientation_cmd {
            config.display.orientation_cmd = Some(cmd.clone());
        }
        if self.no_inverted {
            config.engine.allow_inverted = false;
        }
        if let Some(ticks) = self.debounce_ticks {
            config.engine.debounce_ticks = ticks;
        }
        if let Some(ms) = self.tick_interval_ms {
            config.engine.tick_interval_ms = ms;
        }
    }
}
