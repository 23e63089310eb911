pub mod x11;

pub use autorotate_accel::Orientation;
pub use x11::{detect_touch_device, XrandrActuator};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("Failed to run `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` exited with {status}")]
    Status {
        program: String,
        status: std::process::ExitStatus,
    },
}

/// Trait for whatever applies a committed orientation to the system.
pub trait OrientationActuator {
    /// Rotate the display and remap touch input to match.
    fn apply(&mut self, orientation: Orientation) -> Result<(), ActuatorError>;
    /// Start the user's side-effect command. Must not wait for it.
    fn run_side_effect(&mut self, command: &str) -> Result<(), ActuatorError>;
}

/// `xrandr -o` rotation name.
pub fn rotation_name(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Normal => "normal",
        Orientation::Inverted => "inverted",
        Orientation::Left => "left",
        Orientation::Right => "right",
    }
}

/// Row-major coordinate transformation matrix for the touch device.
///
/// Each non-identity matrix rotates and then translates so normalized touch
/// coordinates stay within [0, 1].
pub fn coordinate_matrix(orientation: Orientation) -> [f32; 9] {
    match orientation {
        Orientation::Normal => [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        Orientation::Inverted => [-1.0, 0.0, 1.0, 0.0, -1.0, 1.0, 0.0, 0.0, 1.0],
        Orientation::Left => [0.0, -1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        Orientation::Right => [0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 1.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_text(o: Orientation) -> String {
        coordinate_matrix(o)
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn matrices_match_table() {
        assert_eq!(matrix_text(Orientation::Normal), "1 0 0 0 1 0 0 0 1");
        assert_eq!(matrix_text(Orientation::Inverted), "-1 0 1 0 -1 1 0 0 1");
        assert_eq!(matrix_text(Orientation::Left), "0 -1 1 1 0 0 0 0 1");
        assert_eq!(matrix_text(Orientation::Right), "0 1 0 -1 0 1 0 0 1");
    }

    #[test]
    fn rotation_names() {
        let names: Vec<_> = Orientation::ALL.iter().map(|&o| rotation_name(o)).collect();
        assert_eq!(names, vec!["normal", "inverted", "left", "right"]);
    }
}
