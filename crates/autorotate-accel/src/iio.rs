//! Industrial I/O (sysfs) accelerometer access.
//!
//! Every axis is a small text file (`in_accel_x_raw` etc.) holding a single
//! number. The kernel regenerates the content on each read from offset 0, so
//! the file is kept open and rewound instead of being reopened every tick.

use crate::types::{finite_or_zero, AccelSample};
use crate::{SampleSource, SensorError};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Where IIO devices show up.
pub const IIO_DEVICE_GLOB: &str = "/sys/bus/iio/devices/iio:device*/in_accel*";

const AXIS_FILES: [(&str, &str); 3] = [
    ("x", "in_accel_x_raw"),
    ("y", "in_accel_y_raw"),
    ("z", "in_accel_z_raw"),
];

/// Find the first IIO device directory exposing accelerometer channels.
pub fn detect_accelerometer_dir() -> Result<Option<PathBuf>, SensorError> {
    detect_with_pattern(IIO_DEVICE_GLOB)
}

pub(crate) fn detect_with_pattern(pattern: &str) -> Result<Option<PathBuf>, SensorError> {
    let first = glob::glob(pattern)?
        .filter_map(Result::ok)
        .next();
    Ok(first.and_then(|path| path.parent().map(Path::to_path_buf)))
}

/// Parse one sysfs value from its longest leading number, the way `atof`
/// does, so "12abc" reads as 12. Anything unusable reads as 0.0.
pub fn parse_axis(text: &str) -> f64 {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(text.len());
    let number = &text[..end];
    (1..=number.len())
        .rev()
        .find_map(|n| number[..n].parse::<f64>().ok())
        .map(finite_or_zero)
        .unwrap_or(0.0)
}

/// A single axis file, reopened lazily after failures.
#[derive(Debug)]
pub struct AxisReader {
    axis: &'static str,
    path: PathBuf,
    file: Option<File>,
    failing: bool,
    buf: String,
}

impl AxisReader {
    pub fn new(axis: &'static str, path: PathBuf) -> Self {
        Self {
            axis,
            path,
            file: None,
            failing: false,
            buf: String::with_capacity(32),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current value, or 0.0 if the axis cannot be read.
    pub fn read(&mut self) -> f64 {
        match self.try_read() {
            Ok(value) => {
                if self.failing {
                    tracing::info!(axis = self.axis, path = ?self.path, "Accelerometer axis readable again");
                    self.failing = false;
                }
                value
            }
            Err(e) => {
                if !self.failing {
                    tracing::warn!(axis = self.axis, error = %e, "Accelerometer axis unavailable, reading 0.0");
                    self.failing = true;
                }
                self.file = None;
                0.0
            }
        }
    }

    fn try_read(&mut self) -> Result<f64, SensorError> {
        let file = match self.file.take() {
            Some(file) => file,
            None => File::open(&self.path).map_err(|source| SensorError::Axis {
                axis: self.axis,
                path: self.path.clone(),
                source,
            })?,
        };
        let file = self.file.insert(file);

        self.buf.clear();
        file.seek(SeekFrom::Start(0))
            .and_then(|_| file.read_to_string(&mut self.buf))
            .map_err(|source| SensorError::Axis {
                axis: self.axis,
                path: self.path.clone(),
                source,
            })?;

        Ok(parse_axis(&self.buf))
    }
}

/// Accelerometer backed by an IIO device directory.
#[derive(Debug)]
pub struct IioAccelerometer {
    x: AxisReader,
    y: AxisReader,
    z: AxisReader,
}

impl IioAccelerometer {
    /// Open the three axis readers under `dir`.
    ///
    /// Missing axis files are tolerated (they read as 0.0); a missing
    /// directory is not.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SensorError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(SensorError::NotADevice(dir));
        }

        let [x, y, z] = AXIS_FILES.map(|(axis, name)| AxisReader::new(axis, dir.join(name)));
        for reader in [&x, &y, &z] {
            if !reader.path().exists() {
                tracing::warn!(path = ?reader.path(), "Accelerometer axis file missing");
            }
        }

        tracing::debug!(?dir, "Opened IIO accelerometer");
        Ok(Self { x, y, z })
    }
}

impl SampleSource for IioAccelerometer {
    fn read_sample(&mut self) -> AccelSample {
        // y carries no weight but is still read every tick.
        let x = self.x.read();
        let y = self.y.read();
        let z = self.z.read();
        AccelSample::new(x, y, z)
    }
}
