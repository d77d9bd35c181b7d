use std::sync::Arc;

use tracing::{debug, info};

use crate::core::geometry::{bounds::Bounds, coord::Coord};
use crate::error::{Error, Result};

use super::cache::GraphCache;
use super::connectivity;
use super::reader::MapReader;
use super::road_map::{RoadMap, RoadMapBuilder, MAX_MAP_TYPE};

/// Loads road maps from map sources and keeps the last one in a [`GraphCache`].
///
/// Loaded maps are connected, mirrored over the x axis and moved so that their
/// lower corner sits at the origin of the world.
pub struct GraphStore<R>
where
    R: MapReader,
{
    reader: R,
    cache: Arc<GraphCache>,
    world: Bounds,
}

impl<R> GraphStore<R>
where
    R: MapReader,
{
    /// Create a store backed by the process-wide cache.
    ///
    /// `world_size` is the (width, height) every map must fit in. Maps served
    /// from the cache are checked against it too, since another store with a
    /// larger world may have loaded them.
    pub fn new(reader: R, world_size: (f64, f64)) -> Self {
        Self::with_cache(reader, world_size, GraphCache::process_wide())
    }

    pub fn with_cache(reader: R, world_size: (f64, f64), cache: Arc<GraphCache>) -> Self {
        Self {
            reader,
            cache,
            world: Bounds::from_corners(
                Coord::new(0.0, 0.0),
                Coord::new(world_size.0, world_size.1),
            ),
        }
    }

    pub fn cache(&self) -> &Arc<GraphCache> {
        &self.cache
    }

    /// Load the map made of the given sources, in order.
    ///
    /// The n-th source contributes nodes of map type n (starting from 1).
    pub fn load(&mut self, source_ids: &[String]) -> Result<Arc<RoadMap>> {
        if source_ids.is_empty() || source_ids.len() > MAX_MAP_TYPE as usize {
            return Err(Error::configuration(
                "nrof_map_files",
                source_ids.len(),
                format!("1..={}", MAX_MAP_TYPE),
            ));
        }

        let reader = &mut self.reader;
        let world = self.world;
        let (map, hit) = self
            .cache
            .get_or_try_load(source_ids, || read_map(reader, world, source_ids))?;

        if hit {
            check_coord_validity(&map, &self.world)?;
            debug!(sources = ?source_ids, "road map served from cache");
        } else {
            info!(
                sources = ?source_ids,
                nodes = map.node_count(),
                paths = map.path_count(),
                "road map loaded"
            );
        }
        Ok(map)
    }
}

fn read_map<R>(reader: &mut R, world: Bounds, source_ids: &[String]) -> Result<RoadMap>
where
    R: MapReader,
{
    let mut builder = RoadMapBuilder::new();
    for (index, source_id) in source_ids.iter().enumerate() {
        let paths = reader.read_paths(source_id).map_err(|source| Error::Load {
            source_id: source_id.clone(),
            source,
        })?;
        // at most MAX_MAP_TYPE sources
        let map_type = (index + 1) as u8;
        for path in &paths {
            builder.add_path(path, map_type)?;
        }
    }

    let map = builder.build();
    connectivity::validate(&map)?;
    let map = map.into_normalized();
    check_coord_validity(&map, &world)?;
    Ok(map)
}

/// Check that every node lies inside the world.
fn check_coord_validity(map: &RoadMap, world: &Bounds) -> Result<()> {
    match map.nodes().iter().find(|node| !world.contains(&node.coord())) {
        Some(node) => Err(Error::configuration(
            "world_size",
            format!("map node {}", node.coord()),
            format!(
                "inside world bounds (x: 0...{} y: 0...{})",
                world.max().x,
                world.max().y
            ),
        )),
        None => Ok(()),
    }
}
