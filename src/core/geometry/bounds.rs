use super::coord::Coord;

/// Axis-aligned bounding box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    min: Coord,
    max: Coord,
}

impl Bounds {
    /// Create a bounding box from two corners.
    pub fn from_corners(corner_0: Coord, corner_1: Coord) -> Self {
        Self {
            min: Coord::new(corner_0.x.min(corner_1.x), corner_0.y.min(corner_1.y)),
            max: Coord::new(corner_0.x.max(corner_1.x), corner_0.y.max(corner_1.y)),
        }
    }

    /// Create the smallest bounding box containing all coordinates.
    ///
    /// Returns `None` if there are no coordinates.
    pub fn from_coords<I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coord>,
    {
        coords.into_iter().fold(None, |bounds, coord| match bounds {
            None => Some(Self {
                min: coord,
                max: coord,
            }),
            Some(bounds) => Some(Self::from_corners(
                Coord::new(bounds.min.x.min(coord.x), bounds.min.y.min(coord.y)),
                Coord::new(bounds.max.x.max(coord.x), bounds.max.y.max(coord.y)),
            )),
        })
    }

    pub fn min(&self) -> Coord {
        self.min
    }

    pub fn max(&self) -> Coord {
        self.max
    }

    /// Check if the coordinate lies inside the box (edges included).
    pub fn contains(&self, coord: &Coord) -> bool {
        coord.x >= self.min.x
            && coord.x <= self.max.x
            && coord.y >= self.min.y
            && coord.y <= self.max.y
    }

    /// Bounding box of the mirrored coordinates (`y' = -y`).
    pub fn mirrored(&self) -> Self {
        Self::from_corners(self.min.mirrored(), self.max.mirrored())
    }
}
