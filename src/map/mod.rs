pub mod cache;
pub mod connectivity;
pub mod reader;
pub mod road_map;
pub mod store;

pub use cache::GraphCache;
pub use reader::{MapReader, StaticMapReader};
pub use road_map::{
    MapNode, NodeId, NodeTypes, RoadMap, RoadMapBuilder, MAX_MAP_TYPE, MIN_MAP_TYPE,
};
pub use store::GraphStore;
