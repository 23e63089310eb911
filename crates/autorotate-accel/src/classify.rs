use crate::types::{finite_or_zero, AccelSample, Orientation};

/// Weight applied to |x| before comparing against |z|.
///
/// Sideways tilt has to be three times stronger than the screen-normal
/// component before the device counts as rotated left or right.
pub const SIDEWAYS_BIAS: f64 = 3.0;

/// Map an accelerometer sample to a discrete orientation.
///
/// The y axis never takes part in the decision. Ties go to `Inverted`
/// (z == 0 on the upright branch) and `Left` (x == 0 on the sideways branch).
pub fn classify(sample: &AccelSample, allow_inverted: bool) -> Orientation {
    let x = finite_or_zero(sample.accel.x);
    let z = finite_or_zero(sample.accel.z);

    let ax = SIDEWAYS_BIAS * x.abs();
    let az = z.abs();

    if ax < az {
        if allow_inverted && z <= 0.0 {
            Orientation::Inverted
        } else {
            Orientation::Normal
        }
    } else if x > 0.0 {
        Orientation::Right
    } else {
        Orientation::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64, z: f64, allow_inverted: bool) -> Orientation {
        classify(&AccelSample::new(x, y, z), allow_inverted)
    }

    #[test]
    fn upright_and_flipped() {
        assert_eq!(at(10.0, 0.0, 500.0, true), Orientation::Normal);
        assert_eq!(at(10.0, 0.0, -500.0, true), Orientation::Inverted);
    }

    #[test]
    fn sideways_by_sign_of_x() {
        assert_eq!(at(400.0, 0.0, 100.0, true), Orientation::Right);
        assert_eq!(at(-400.0, 0.0, 100.0, true), Orientation::Left);
    }

    #[test]
    fn bias_favours_upright() {
        // 3 * 100 = 300 < 301
        assert_eq!(at(100.0, 0.0, 301.0, true), Orientation::Normal);
        // 3 * 100 = 300 >= 300
        assert_eq!(at(100.0, 0.0, 300.0, true), Orientation::Right);
    }

    #[test]
    fn tie_breaks() {
        // All zeros lands on the sideways branch (0 >= 0) with x == 0.
        assert_eq!(at(0.0, 7.0, 0.0, true), Orientation::Left);
        assert_eq!(at(0.0, 7.0, 0.0, false), Orientation::Left);
        // z == 0 on the upright branch cannot happen (|z| > 3|x| >= 0),
        // so the z <= 0 tie shows up with a tiny negative z.
        assert_eq!(at(0.0, 0.0, -0.0001, true), Orientation::Inverted);
        assert_eq!(at(0.0, 0.0, 0.0001, true), Orientation::Normal);
    }

    #[test]
    fn inverted_disabled() {
        for &z in &[-900.0, -1.0, 0.0, 1.0, 900.0] {
            for &x in &[-50.0, 0.0, 50.0] {
                assert_ne!(at(x, 0.0, z, false), Orientation::Inverted);
            }
        }
        assert_eq!(at(10.0, 0.0, -500.0, false), Orientation::Normal);
    }

    #[test]
    fn y_axis_is_ignored() {
        for &(x, z) in &[(10.0, 500.0), (10.0, -500.0), (400.0, 1.0), (-400.0, 1.0)] {
            let base = at(x, 0.0, z, true);
            for &y in &[-1e6, -1.0, 1.0, 1e6, f64::NAN] {
                assert_eq!(at(x, y, z, true), base);
            }
        }
    }

    #[test]
    fn nan_axes_read_as_zero() {
        let mut sample = AccelSample::new(0.0, 0.0, 0.0);
        sample.accel.x = f64::NAN;
        sample.accel.z = -200.0;
        assert_eq!(classify(&sample, true), Orientation::Inverted);
    }
}
