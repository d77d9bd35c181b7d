pub mod filter;
pub mod levy_walk;
pub mod path;
pub mod placement;
pub mod random;
pub mod sampler;
pub mod selector;
pub mod speed;

pub use filter::NodeTypeFilter;
pub use levy_walk::{LevyWalk, WalkOptions};
pub use path::{Cursor, Path};
pub use random::{RandomProvider, RngSource, SequenceRandom};
pub use sampler::{LevySampler, MAX_STEPS};
pub use selector::{NeighborSelector, Selection, MAX_HEADING_RESAMPLES};
pub use speed::{SpeedGenerator, UniformSpeed};
