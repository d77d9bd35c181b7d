//! Compass bearings between coordinates, in degrees.
//!
//! Bearings are measured clockwise from the vertical axis (`atan2(dx, dy)`),
//! and errors against a heading are plain absolute differences: they are not
//! wrapped around the 0/360 boundary.

use super::coord::Coord;

/// Number of degrees in a full turn.
pub const FULL_TURN: f64 = 360.0;

/// Bearing from `from` to `to` in the range (-180, 180].
pub fn bearing(from: &Coord, to: &Coord) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    dx.atan2(dy).to_degrees()
}

/// Absolute difference between the bearing from `from` to `to` and `heading`.
pub fn angular_error(heading: f64, from: &Coord, to: &Coord) -> f64 {
    (bearing(from, to) - heading).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_bearing() {
        let origin = Coord::new(0.0, 0.0);

        assert_close(bearing(&origin, &Coord::new(0.0, 1.0)), 0.0);
        assert_close(bearing(&origin, &Coord::new(1.0, 1.0)), 45.0);
        assert_close(bearing(&origin, &Coord::new(1.0, 0.0)), 90.0);
        assert_close(bearing(&origin, &Coord::new(1.0, -1.0)), 135.0);
        assert_close(bearing(&origin, &Coord::new(0.0, -1.0)), 180.0);
        assert_close(bearing(&origin, &Coord::new(-1.0, -1.0)), -135.0);
        assert_close(bearing(&origin, &Coord::new(-1.0, 0.0)), -90.0);
        assert_close(bearing(&origin, &Coord::new(-1.0, 1.0)), -45.0);
    }

    #[test]
    fn test_angular_error_is_not_wrapped() {
        let origin = Coord::new(0.0, 0.0);
        let west = Coord::new(-1.0, 0.0);

        assert_close(angular_error(270.0, &origin, &west), 360.0);
        assert_close(angular_error(-90.0, &origin, &west), 0.0);
        assert_close(angular_error(0.0, &origin, &west), 90.0);
        assert_close(angular_error(10.0, &origin, &Coord::new(0.0, 3.0)), 10.0);
    }
}
