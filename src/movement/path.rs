use crate::core::geometry::coord::Coord;
use crate::map::NodeId;

/// Waypoints an agent follows at a constant speed.
///
/// A path always holds at least its starting waypoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    waypoints: Vec<Coord>,
    speed: f64,
}

impl Path {
    pub(crate) fn new(start: Coord, speed: f64) -> Self {
        Self {
            waypoints: vec![start],
            speed,
        }
    }

    pub(crate) fn add_waypoint(&mut self, waypoint: Coord) {
        self.waypoints.push(waypoint);
    }

    pub fn waypoints(&self) -> &[Coord] {
        &self.waypoints
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Number of roads traversed, i.e. waypoints minus one.
    pub fn steps(&self) -> usize {
        self.waypoints.len() - 1
    }

    pub fn start(&self) -> Coord {
        self.waypoints[0]
    }

    pub fn end(&self) -> Coord {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Total euclidean length of the path.
    pub fn length(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }
}

/// Node an agent occupies between path requests.
///
/// The default cursor is not placed on any node yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    node: Option<NodeId>,
}

impl Cursor {
    pub fn unplaced() -> Self {
        Self { node: None }
    }

    pub fn at(node: NodeId) -> Self {
        Self { node: Some(node) }
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path() {
        let mut path = Path::new(Coord::new(0.0, 0.0), 1.5);
        assert_eq!(path.steps(), 0);
        assert_eq!(path.start(), path.end());

        path.add_waypoint(Coord::new(3.0, 4.0));
        path.add_waypoint(Coord::new(3.0, 0.0));
        assert_eq!(path.steps(), 2);
        assert_eq!(path.end(), Coord::new(3.0, 0.0));
        assert_eq!(path.length(), 9.0);
        assert_eq!(path.speed(), 1.5);
        assert_eq!(path.waypoints().len(), 3);
    }

    #[test]
    fn test_cursor() {
        assert_eq!(Cursor::default().node(), None);
        assert_eq!(Cursor::unplaced(), Cursor::default());
        assert_eq!(Cursor::at(NodeId::new(4)).node(), Some(NodeId::new(4)));
    }
}
