use glam::DVec2;

/// Representation of a 2D coordinate on the map.
#[derive(Debug, Copy, Clone)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl PartialEq for Coord {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Coord {}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    /// Order by x, then y. `-0.0` and `0.0` are the same position.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let ordering = canonical(self.x).total_cmp(&canonical(other.x));
        if ordering == std::cmp::Ordering::Equal {
            canonical(self.y).total_cmp(&canonical(other.y))
        } else {
            ordering
        }
    }
}

/// Turn `-0.0` into `0.0`, leaving every other value as it is.
fn canonical(value: f64) -> f64 {
    value + 0.0
}

impl From<Coord> for DVec2 {
    fn from(coord: Coord) -> Self {
        DVec2::new(coord.x, coord.y)
    }
}

impl From<DVec2> for Coord {
    fn from(vec: DVec2) -> Self {
        Self::new(vec.x, vec.y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2},{:.2})", self.x, self.y)
    }
}

impl Coord {
    /// Create a coordinate from x and y.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: canonical(x),
            y: canonical(y),
        }
    }

    /// Calculate the euclidean distance to the other coordinate.
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_2(other).sqrt()
    }

    /// Calculate the squared euclidean distance to the other coordinate.
    pub fn distance_2(&self, other: &Self) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }

    /// Calculate the coordinate moved from this one towards `other`
    /// by `fraction` of the distance between them.
    pub fn interpolate(&self, other: &Self, fraction: f64) -> Self {
        DVec2::from(*self)
            .lerp(DVec2::from(*other), fraction)
            .into()
    }

    /// Mirror the coordinate over the x axis (`y' = -y`).
    pub fn mirrored(&self) -> Self {
        Self::new(self.x, -self.y)
    }

    /// Calculate the coordinate shifted by `dx` and `dy`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let coord1 = Coord::new(0.0, 0.0);
        let coord2 = Coord::new(3.0, 4.0);
        assert_eq!(coord1.distance(&coord2), 5.0);
        assert_eq!(coord1.distance_2(&coord2), 25.0);
    }

    #[test]
    fn test_interpolate() {
        let start = Coord::new(1.0, 1.0);
        let end = Coord::new(3.0, 5.0);

        assert_eq!(start.interpolate(&end, 0.0), start);
        assert_eq!(start.interpolate(&end, 0.5), Coord::new(2.0, 3.0));
        assert!(start.interpolate(&end, 1.0).distance(&end) < 1e-9);
    }

    #[test]
    fn test_mirror_and_translate() {
        let coord = Coord::new(2.0, 3.0);
        assert_eq!(coord.mirrored(), Coord::new(2.0, -3.0));
        assert_eq!(coord.translated(-2.0, 1.0), Coord::new(0.0, 4.0));
    }

    #[test]
    fn test_negative_zero() {
        let zero = Coord::new(0.0, 0.0);
        let negative = Coord { x: -0.0, y: -0.0 };
        assert_eq!(zero, negative);
        assert_eq!(zero.cmp(&negative), std::cmp::Ordering::Equal);
        assert!(Coord::new(-0.0, 1.0).x.is_sign_positive());
    }

    #[test]
    fn test_ordering() {
        let mut coords = vec![
            Coord::new(1.0, 2.0),
            Coord::new(0.0, 5.0),
            Coord::new(1.0, -1.0),
        ];
        coords.sort();
        assert_eq!(
            coords,
            vec![
                Coord::new(0.0, 5.0),
                Coord::new(1.0, -1.0),
                Coord::new(1.0, 2.0)
            ]
        );
    }
}
