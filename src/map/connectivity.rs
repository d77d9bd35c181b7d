use crate::error::{Error, Result};

use super::road_map::RoadMap;

/// Check that every node of the map can be reached from every other node.
///
/// Roads are undirected, so it is enough to traverse from the first node.
pub fn validate(map: &RoadMap) -> Result<()> {
    let start = map.nodes().first().ok_or(Error::EmptyGraph)?.id();
    let reachable = map.path_connection().reachable_from(start);

    match map
        .nodes()
        .iter()
        .find(|node| !reachable.contains(&node.id()))
    {
        Some(unreachable) => Err(Error::DisconnectedGraph {
            reachable: reachable.len(),
            total: map.node_count(),
            start,
            unreachable: unreachable.id(),
        }),
        None => Ok(()),
    }
}
