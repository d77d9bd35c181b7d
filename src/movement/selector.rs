use tracing::warn;

use crate::core::geometry::angle::angular_error;
use crate::map::{MapNode, RoadMap};

use super::filter::NodeTypeFilter;
use super::random::RandomProvider;
use super::sampler::sample_heading;

/// Number of times the heading is redrawn before settling for the neighbor
/// closest to the last heading.
pub const MAX_HEADING_RESAMPLES: usize = 1000;

/// Result of one neighbor selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    /// Node to move to.
    pub node: &'a MapNode,
    /// Heading the node was chosen for. It is kept for the next step.
    pub heading: f64,
}

/// Chooses the neighbor that continues best in the current heading.
#[derive(Debug, Clone, Copy)]
pub struct NeighborSelector<'a> {
    map: &'a RoadMap,
    filter: &'a NodeTypeFilter,
    permissible_error: f64,
    back_allowed: bool,
}

impl<'a> NeighborSelector<'a> {
    pub fn new(
        map: &'a RoadMap,
        filter: &'a NodeTypeFilter,
        permissible_error: f64,
        back_allowed: bool,
    ) -> Self {
        Self {
            map,
            filter,
            permissible_error,
            back_allowed,
        }
    }

    /// Select the node to move to from `current`, having arrived from `previous`.
    ///
    /// Candidates are the admitted neighbors of `current`, without `previous`
    /// unless back moves are allowed. With no candidates the agent turns back
    /// to `previous`. Otherwise the candidate with the smallest angular error
    /// is chosen once that error is below the permissible error, redrawing
    /// the heading until it is.
    pub fn select_next<P>(
        &self,
        current: &'a MapNode,
        previous: &'a MapNode,
        heading: f64,
        rng: &mut P,
    ) -> Selection<'a>
    where
        P: RandomProvider + ?Sized,
    {
        let candidates = self
            .map
            .neighbors_iter(current.id())
            .filter(|node| self.back_allowed || node.id() != previous.id())
            .filter(|node| self.filter.admits(node))
            .collect::<Vec<_>>();

        if candidates.is_empty() {
            return Selection {
                node: previous,
                heading,
            };
        }

        let mut heading = heading;
        let mut resamples = 0;
        loop {
            let (node, error) = closest_to_heading(current, &candidates, heading);
            if error < self.permissible_error {
                return Selection { node, heading };
            }
            if resamples == MAX_HEADING_RESAMPLES {
                warn!(
                    node = %current.id(),
                    permissible_error = self.permissible_error,
                    "no neighbor within the permissible error, taking the closest one"
                );
                return Selection { node, heading };
            }
            heading = sample_heading(rng);
            resamples += 1;
        }
    }
}

/// Find the candidate whose bearing is closest to `heading`.
/// The first one wins ties. `candidates` must not be empty.
fn closest_to_heading<'a>(
    current: &MapNode,
    candidates: &[&'a MapNode],
    heading: f64,
) -> (&'a MapNode, f64) {
    let first = candidates[0];
    let first_error = angular_error(heading, &current.coord(), &first.coord());
    candidates[1..]
        .iter()
        .fold((first, first_error), |(best, best_error), candidate| {
            let error = angular_error(heading, &current.coord(), &candidate.coord());
            if error < best_error {
                (*candidate, error)
            } else {
                (best, best_error)
            }
        })
}
