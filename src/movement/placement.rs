use tracing::debug;

use crate::core::geometry::coord::Coord;
use crate::error::{Error, Result};
use crate::map::{MapNode, RoadMap};

use super::filter::NodeTypeFilter;
use super::path::Cursor;
use super::random::RandomProvider;

/// Number of random nodes drawn before placement picks among the admitted
/// nodes directly.
pub const MAX_PLACEMENT_DRAWS: usize = 10_000;

/// Place an agent at a random point of a random road.
///
/// A node admitted by `filter` is drawn at random, then one of its neighbors,
/// and the agent is put at a random fraction of the road between them. The
/// returned cursor is on the drawn node. A node without roads places the agent
/// on the node itself.
pub fn initial_location<P>(
    map: &RoadMap,
    filter: &NodeTypeFilter,
    rng: &mut P,
) -> Result<(Coord, Cursor)>
where
    P: RandomProvider + ?Sized,
{
    if map.node_count() == 0 {
        return Err(Error::EmptyGraph);
    }

    let fraction = rng.gen_f64();
    let node = draw_admitted_node(map, filter, rng)?;
    let cursor = Cursor::at(node.id());

    let neighbors = map.neighbors_iter(node.id()).collect::<Vec<_>>();
    if neighbors.is_empty() {
        return Ok((node.coord(), cursor));
    }
    let neighbor = neighbors[rng.gen_index(neighbors.len())];

    Ok((node.coord().interpolate(&neighbor.coord(), fraction), cursor))
}

fn draw_admitted_node<'a, P>(
    map: &'a RoadMap,
    filter: &NodeTypeFilter,
    rng: &mut P,
) -> Result<&'a MapNode>
where
    P: RandomProvider + ?Sized,
{
    let nodes = map.nodes();
    for _ in 0..MAX_PLACEMENT_DRAWS {
        let node = &nodes[rng.gen_index(nodes.len())];
        if filter.admits(node) {
            return Ok(node);
        }
    }

    debug!(%filter, "random placement exhausted, choosing among admitted nodes");
    let admitted = nodes
        .iter()
        .filter(|node| filter.admits(node))
        .collect::<Vec<_>>();
    if admitted.is_empty() {
        return Err(Error::configuration(
            "ok_maps",
            filter,
            "map types present in the loaded map",
        ));
    }
    Ok(admitted[rng.gen_index(admitted.len())])
}
