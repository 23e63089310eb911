use glam::DVec3;

/// One accelerometer reading, in raw device units.
///
/// Only relative magnitude and sign matter, so no scale is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccelSample {
    pub accel: DVec3,
}

impl AccelSample {
    /// Build a sample, replacing NaN and infinities with 0.0.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            accel: DVec3::new(finite_or_zero(x), finite_or_zero(y), finite_or_zero(z)),
        }
    }
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Discrete screen orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Normal,
    Inverted,
    Left,
    Right,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Normal,
        Orientation::Inverted,
        Orientation::Left,
        Orientation::Right,
    ];

    /// Numeric encoding: Normal=0, Inverted=1, Left=2, Right=3.
    ///
    /// The family split in [`Orientation::is_side`] is defined on this order.
    pub fn index(self) -> u8 {
        match self {
            Orientation::Normal => 0,
            Orientation::Inverted => 1,
            Orientation::Left => 2,
            Orientation::Right => 3,
        }
    }

    /// Whether the device is side-loaded (Left or Right).
    pub fn is_side(self) -> bool {
        self.index() > 1
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Orientation::Normal => "normal",
            Orientation::Inverted => "inverted",
            Orientation::Left => "left",
            Orientation::Right => "right",
        };
        f.write_str(name)
    }
}
