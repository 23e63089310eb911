pub mod classify;
pub mod hysteresis;
pub mod iio;
pub mod types;

pub use classify::classify;
pub use hysteresis::{Commit, Hysteresis};
pub use iio::{detect_accelerometer_dir, IioAccelerometer};
pub use types::{AccelSample, Orientation};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("Not an accelerometer device directory: {0}")]
    NotADevice(PathBuf),
    #[error("Failed to read {axis} axis from {path}")]
    Axis {
        axis: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid device search pattern")]
    Pattern(#[from] glob::PatternError),
}

/// Anything that can hand out one accelerometer sample per tick.
///
/// Reading never fails: unavailable axes read as 0.0 so the polling loop keeps
/// running on a degraded sample.
pub trait SampleSource {
    fn read_sample(&mut self) -> AccelSample;
}
