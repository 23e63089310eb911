use crate::{coordinate_matrix, rotation_name, ActuatorError, OrientationActuator};
use autorotate_accel::Orientation;
use std::process::Command;
use tracing::{debug, info};

const TOUCH_PATTERNS: [&str; 2] = ["touchscreen", "wacom"];
const MATRIX_PROP: &str = "Coordinate Transformation Matrix";

/// Applies orientations through the X11 command line tools.
///
/// `xrandr` rotates the output, `xinput` remaps the touch device. Both run to
/// completion before `apply` returns.
pub struct XrandrActuator {
    touch_device: String,
    xrandr: String,
    xinput: String,
}

impl XrandrActuator {
    pub fn new(touch_device: impl Into<String>) -> Self {
        Self::with_programs(touch_device, "xrandr", "xinput")
    }

    /// Use other executables in place of `xrandr` and `xinput`.
    pub fn with_programs(
        touch_device: impl Into<String>,
        xrandr: impl Into<String>,
        xinput: impl Into<String>,
    ) -> Self {
        Self {
            touch_device: touch_device.into(),
            xrandr: xrandr.into(),
            xinput: xinput.into(),
        }
    }

    fn xrandr_args(orientation: Orientation) -> Vec<String> {
        vec!["-o".into(), rotation_name(orientation).into()]
    }

    fn xinput_args(&self, orientation: Orientation) -> Vec<String> {
        let mut args = vec![
            "set-prop".to_string(),
            self.touch_device.clone(),
            MATRIX_PROP.to_string(),
        ];
        args.extend(coordinate_matrix(orientation).iter().map(|v| v.to_string()));
        args
    }
}

impl OrientationActuator for XrandrActuator {
    fn apply(&mut self, orientation: Orientation) -> Result<(), ActuatorError> {
        // Touch remapping is attempted even when the rotation failed.
        let rotated = run_blocking(&self.xrandr, &Self::xrandr_args(orientation));
        let remapped = run_blocking(&self.xinput, &self.xinput_args(orientation));
        rotated.and(remapped)
    }

    fn run_side_effect(&mut self, command: &str) -> Result<(), ActuatorError> {
        let child = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(command)
            .spawn()
            .map_err(|source| ActuatorError::Spawn {
                program: command.to_string(),
                source,
            })?;
        info!(command, pid = child.id(), "Orientation command started");
        // Dropping the handle detaches; the runtime reaps the process.
        drop(child);
        Ok(())
    }
}

fn run_blocking(program: &str, args: &[String]) -> Result<(), ActuatorError> {
    debug!(program, ?args, "Running");
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|source| ActuatorError::Spawn {
            program: program.to_string(),
            source,
        })?;
    if status.success() {
        Ok(())
    } else {
        Err(ActuatorError::Status {
            program: program.to_string(),
            status,
        })
    }
}

/// Find the touch device name via `xinput --list --name-only`.
pub fn detect_touch_device() -> Result<Option<String>, ActuatorError> {
    let output = Command::new("xinput")
        .args(["--list", "--name-only"])
        .output()
        .map_err(|source| ActuatorError::Spawn {
            program: "xinput".to_string(),
            source,
        })?;
    if !output.status.success() {
        return Err(ActuatorError::Status {
            program: "xinput".to_string(),
            status: output.status,
        });
    }
    let listing = String::from_utf8_lossy(&output.stdout);
    Ok(find_touch_device(listing.lines()).map(str::to_string))
}

/// First device whose name looks like a touchscreen or pen digitizer.
pub fn find_touch_device<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    names.into_iter().find(|name| {
        let lower = name.to_lowercase();
        TOUCH_PATTERNS.iter().any(|p| lower.contains(p))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xrandr_command_line() {
        assert_eq!(
            XrandrActuator::xrandr_args(Orientation::Left),
            vec!["-o", "left"]
        );
    }

    #[test]
    fn xinput_command_line_keeps_device_name_whole() {
        let actuator = XrandrActuator::new("ELAN Touchscreen Pen (0)");
        assert_eq!(
            actuator.xinput_args(Orientation::Inverted),
            vec![
                "set-prop",
                "ELAN Touchscreen Pen (0)",
                "Coordinate Transformation Matrix",
                "-1", "0", "1", "0", "-1", "1", "0", "0", "1",
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn xinput_still_runs_after_xrandr_fails() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("xinput-args");
        let script = dir.path().join("fake-xinput");
        std::fs::write(
            &script,
            format!("#!/bin/sh\necho \"$@\" > '{}'\n", marker.display()),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut actuator =
            XrandrActuator::with_programs("Wacom HID 5256 Finger", "false", script.to_str().unwrap());
        let err = actuator.apply(Orientation::Right).unwrap_err();

        assert!(matches!(
            err,
            ActuatorError::Status { ref program, .. } if program == "false"
        ));
        let written = std::fs::read_to_string(&marker).unwrap();
        assert_eq!(
            written.trim(),
            "set-prop Wacom HID 5256 Finger Coordinate Transformation Matrix 0 1 0 -1 0 1 0 0 1"
        );
    }

    #[test]
    fn apply_succeeds_when_both_commands_do() {
        let mut actuator = XrandrActuator::with_programs("touch", "true", "true");
        assert!(actuator.apply(Orientation::Left).is_ok());
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let mut actuator =
            XrandrActuator::with_programs("touch", "autorotate-no-such-tool", "true");
        assert!(matches!(
            actuator.apply(Orientation::Normal),
            Err(ActuatorError::Spawn { .. })
        ));
    }

    #[tokio::test]
    async fn side_effect_is_not_awaited() {
        let mut actuator = XrandrActuator::new("touch");
        let started = std::time::Instant::now();
        actuator.run_side_effect("sleep 5").unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn finds_touchscreen_case_insensitively() {
        let listing = "Virtual core pointer\nAT Translated Set 2 keyboard\nELAN2514:00 04F3:2817 TouchScreen\nWacom HID 5256 Finger";
        assert_eq!(
            find_touch_device(listing.lines()),
            Some("ELAN2514:00 04F3:2817 TouchScreen")
        );
    }

    #[test]
    fn falls_back_to_wacom() {
        let listing = ["Virtual core keyboard", "Wacom Pen and multitouch sensor Finger"];
        assert_eq!(
            find_touch_device(listing),
            Some("Wacom Pen and multitouch sensor Finger")
        );
    }

    #[test]
    fn no_touch_device() {
        assert_eq!(find_touch_device(["Power Button", "Video Bus"]), None);
    }
}
