use std::collections::BTreeMap;
use std::io;

use crate::core::geometry::coord::Coord;

/// Source of road geometry.
///
/// A reader turns a map source identifier (usually a file name) into the
/// polylines it describes, in the source's own coordinate frame.
pub trait MapReader {
    fn read_paths(&mut self, source_id: &str) -> io::Result<Vec<Vec<Coord>>>;
}

/// Map reader that serves polylines registered in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticMapReader {
    sources: BTreeMap<String, Vec<Vec<Coord>>>,
}

impl StaticMapReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the polylines of a map source.
    pub fn with_source(mut self, source_id: impl Into<String>, paths: Vec<Vec<Coord>>) -> Self {
        self.sources.insert(source_id.into(), paths);
        self
    }
}

impl MapReader for StaticMapReader {
    fn read_paths(&mut self, source_id: &str) -> io::Result<Vec<Vec<Coord>>> {
        self.sources.get(source_id).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("unknown map source '{}'", source_id),
            )
        })
    }
}
