use std::sync::Arc;

use tracing::{debug, info};

use crate::config::LevyWalkSettings;
use crate::core::geometry::coord::Coord;
use crate::error::{Error, Result};
use crate::map::{GraphStore, MapReader, RoadMap};

use super::filter::NodeTypeFilter;
use super::path::{Cursor, Path};
use super::placement;
use super::random::RandomProvider;
use super::sampler::{sample_heading, LevySampler};
use super::selector::NeighborSelector;
use super::speed::{SpeedGenerator, UniformSpeed};

/// Parameters of a Lévy walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkOptions {
    /// Exponent of the step count distribution. Smaller values give longer paths.
    pub lambda: f64,
    /// Step count scale and lower bound.
    pub min_path_length: usize,
    /// Optional upper bound of the step count.
    pub max_path_length: Option<usize>,
    /// Largest angular error in degrees a chosen road may have to the heading.
    pub permissible_error: f64,
    /// Whether the agent may take the road it just arrived by.
    pub back_allowed: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            lambda: 1.2,
            min_path_length: 10,
            max_path_length: None,
            permissible_error: 180.0,
            back_allowed: false,
        }
    }
}

/// Movement model generating Lévy walks on a road map.
///
/// Each path keeps one heading: at every node the agent takes the road that
/// best continues in that direction, and the number of roads per path follows
/// a power law. Agents are tracked by [`Cursor`]s owned by the caller, so one
/// model can drive any number of agents on the same map.
pub struct LevyWalk<P, S = UniformSpeed>
where
    P: RandomProvider,
    S: SpeedGenerator,
{
    map: Arc<RoadMap>,
    filter: NodeTypeFilter,
    sampler: LevySampler,
    options: WalkOptions,
    speed: S,
    rng: P,
}

impl<P, S> LevyWalk<P, S>
where
    P: RandomProvider,
    S: SpeedGenerator,
{
    pub fn new(
        map: Arc<RoadMap>,
        filter: NodeTypeFilter,
        options: WalkOptions,
        speed: S,
        rng: P,
    ) -> Result<Self> {
        let sampler = LevySampler::new(
            options.lambda,
            options.min_path_length,
            options.max_path_length,
        )?;
        if !(options.permissible_error.is_finite() && options.permissible_error > 0.0) {
            return Err(Error::configuration(
                "permissible_error",
                options.permissible_error,
                "a finite number of degrees greater than 0",
            ));
        }

        Ok(Self {
            map,
            filter,
            sampler,
            options,
            speed,
            rng,
        })
    }

    pub fn map(&self) -> &Arc<RoadMap> {
        &self.map
    }

    pub fn filter(&self) -> &NodeTypeFilter {
        &self.filter
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Place a new agent at a random point of an admitted road.
    pub fn initial_location(&mut self) -> Result<(Coord, Cursor)> {
        placement::initial_location(&self.map, &self.filter, &mut self.rng)
    }

    /// Generate the next path of the agent at `cursor`.
    ///
    /// The path starts at the cursor node and has one waypoint per road
    /// traversed plus the start. The returned cursor is on the last waypoint.
    pub fn generate_path(&mut self, cursor: Cursor) -> Result<(Path, Cursor)> {
        let map: &RoadMap = &self.map;
        let mut current = cursor
            .node()
            .and_then(|node_id| map.get_node(node_id))
            .ok_or(Error::NotPlaced)?;

        let speed = self.speed.generate_speed(&mut self.rng);
        let mut heading = sample_heading(&mut self.rng);
        let steps = self.sampler.sample(&mut self.rng)?;

        let selector = NeighborSelector::new(
            map,
            &self.filter,
            self.options.permissible_error,
            self.options.back_allowed,
        );

        let mut path = Path::new(current.coord(), speed);
        // no road was taken yet
        let mut previous = current;
        for _ in 0..steps {
            let selection = selector.select_next(current, previous, heading, &mut self.rng);
            previous = current;
            current = selection.node;
            heading = selection.heading;
            path.add_waypoint(current.coord());
        }

        debug!(
            start = %path.start(),
            end = %path.end(),
            steps,
            length = path.length(),
            speed,
            "generated path"
        );
        Ok((path, Cursor::at(current.id())))
    }

    /// Put the agent on the node nearest to `coord`.
    pub fn relocate(&self, coord: Coord) -> Result<Cursor> {
        self.map
            .nearest_node(coord)
            .map(|node| Cursor::at(node.id()))
            .ok_or(Error::EmptyGraph)
    }

    /// Get the coordinate of the node the agent is on.
    pub fn last_location(&self, cursor: Cursor) -> Option<Coord> {
        cursor
            .node()
            .and_then(|node_id| self.map.get_node(node_id))
            .map(|node| node.coord())
    }

    /// Create a model on the same map with the same parameters, drawing from `rng`.
    pub fn replicate<Q>(&self, rng: Q) -> LevyWalk<Q, S>
    where
        Q: RandomProvider,
        S: Clone,
    {
        LevyWalk {
            map: Arc::clone(&self.map),
            filter: self.filter,
            sampler: self.sampler,
            options: self.options,
            speed: self.speed.clone(),
            rng,
        }
    }
}

impl<P> LevyWalk<P, UniformSpeed>
where
    P: RandomProvider,
{
    /// Create a model from settings, loading its map through `store`.
    pub fn from_settings<R>(
        settings: &LevyWalkSettings,
        store: &mut GraphStore<R>,
        rng: P,
    ) -> Result<Self>
    where
        R: MapReader,
    {
        settings.validate()?;
        let map = store.load(&settings.map_files)?;
        let filter =
            NodeTypeFilter::from_settings(settings.ok_maps.as_deref(), settings.map_files.len())?;
        let speed = UniformSpeed::new(settings.speed[0], settings.speed[1])?;

        info!(%filter, nodes = map.node_count(), "created Lévy walk model");
        Self::new(map, filter, settings.walk_options(), speed, rng)
    }
}
