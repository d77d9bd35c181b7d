use std::collections::BTreeMap;

use rstar::{primitives::GeomWithData, RTree};

use crate::core::container::undirected::UndirectedGraph;
use crate::core::geometry::{bounds::Bounds, coord::Coord};
use crate::error::{Error, Result};

/// Smallest map type (index of the first map source).
pub const MIN_MAP_TYPE: u8 = 1;
/// Largest map type. Types are stored as bits of a `u32`.
pub const MAX_MAP_TYPE: u8 = 31;

/// ID for identifying a node in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn as_num(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// NodeIdGenerator is a simple struct that generates sequential ids.
///
/// Ids double as indexes into the node list of the map.
#[derive(Debug, Clone, Default)]
struct NodeIdGenerator {
    next_id: usize,
}

impl NodeIdGenerator {
    fn generate_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        NodeId::new(id)
    }
}

/// Set of map types (map source indexes) a node belongs to.
///
/// A node belongs to several types when map sources share its coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeTypes(u32);

impl NodeTypes {
    pub fn empty() -> Self {
        Self(0)
    }

    /// Create a set from map types. Returns `None` if a type is out of range.
    pub fn from_types<I>(types: I) -> Option<Self>
    where
        I: IntoIterator<Item = u8>,
    {
        types.into_iter().try_fold(Self::empty(), |set, map_type| {
            Self::bit(map_type).map(|bit| Self(set.0 | bit))
        })
    }

    fn bit(map_type: u8) -> Option<u32> {
        (MIN_MAP_TYPE..=MAX_MAP_TYPE)
            .contains(&map_type)
            .then(|| 1 << map_type)
    }

    pub fn contains(&self, map_type: u8) -> bool {
        Self::bit(map_type).map_or(false, |bit| self.0 & bit != 0)
    }

    /// Check if the two sets share at least one type.
    pub fn intersects(&self, other: &Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        (MIN_MAP_TYPE..=MAX_MAP_TYPE).filter(move |map_type| self.contains(*map_type))
    }
}

/// R-tree entry locating a node.
type NodeEntry = GeomWithData<[f64; 2], NodeId>;

/// Node of the road map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapNode {
    id: NodeId,
    coord: Coord,
    types: NodeTypes,
}

impl MapNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn types(&self) -> NodeTypes {
        self.types
    }

    pub fn is_type(&self, map_type: u8) -> bool {
        self.types.contains(map_type)
    }
}

/// Road network that agents move on.
///
/// This struct provides:
///  - the nodes of the network and the undirected roads between them.
///  - the bounding box of all nodes.
///  - a search for the node nearest to a coordinate.
///
/// A road map never changes after it is built.
#[derive(Debug, Clone)]
pub struct RoadMap {
    nodes: Vec<MapNode>,
    node_tree: RTree<NodeEntry>,
    path_connection: UndirectedGraph<NodeId>,
    bounds: Option<Bounds>,
}

impl RoadMap {
    fn from_parts(nodes: Vec<MapNode>, path_connection: UndirectedGraph<NodeId>) -> Self {
        let node_tree = RTree::bulk_load(
            nodes
                .iter()
                .map(|node| NodeEntry::new([node.coord.x, node.coord.y], node.id))
                .collect::<Vec<_>>(),
        );
        let bounds = Bounds::from_coords(nodes.iter().map(|node| node.coord));
        Self {
            nodes,
            node_tree,
            path_connection,
            bounds,
        }
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of roads.
    pub fn path_count(&self) -> usize {
        self.path_connection.size()
    }

    /// Get nodes in the map, ordered by id.
    pub fn nodes(&self) -> &[MapNode] {
        &self.nodes
    }

    /// Get a node by its NodeId.
    pub fn get_node(&self, node_id: NodeId) -> Option<&MapNode> {
        self.nodes.get(node_id.as_num())
    }

    /// Get neighbors of a node, ordered by id.
    ///
    /// Unknown nodes have no neighbors.
    pub fn neighbors_iter(&self, node_id: NodeId) -> impl Iterator<Item = &MapNode> {
        self.path_connection
            .neighbors_iter(node_id)
            .into_iter()
            .flatten()
            .filter_map(move |neighbor| self.get_node(*neighbor))
    }

    /// Check if there is a road between two nodes.
    pub fn has_path(&self, start: NodeId, end: NodeId) -> bool {
        self.path_connection.has_edge(start, end)
    }

    /// Get the bounding box of all nodes, or `None` for an empty map.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Search the node nearest to a coordinate.
    pub fn nearest_node(&self, coord: Coord) -> Option<&MapNode> {
        self.node_tree
            .nearest_neighbor(&[coord.x, coord.y])
            .and_then(|entry| self.get_node(entry.data))
    }

    pub(crate) fn path_connection(&self) -> &UndirectedGraph<NodeId> {
        &self.path_connection
    }

    /// Mirror the map over the x axis (`y' = -y`) and move its lower corner to the origin.
    pub(crate) fn into_normalized(self) -> Self {
        let Some(bounds) = self.bounds else {
            return self;
        };
        let offset = bounds.mirrored().min();
        let nodes = self
            .nodes
            .into_iter()
            .map(|node| MapNode {
                coord: node.coord.mirrored().translated(-offset.x, -offset.y),
                ..node
            })
            .collect();
        Self::from_parts(nodes, self.path_connection)
    }
}

/// Builder of a road map from polylines of one or more map sources.
///
/// Points at an identical coordinate are merged into one node, which then
/// belongs to the types of every source that contributed it.
#[derive(Debug, Default)]
pub struct RoadMapBuilder {
    nodes: Vec<MapNode>,
    node_ids: BTreeMap<Coord, NodeId>,
    path_connection: UndirectedGraph<NodeId>,
    id_generator: NodeIdGenerator,
}

impl RoadMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a polyline of map type `map_type`.
    /// Every pair of consecutive points becomes a road.
    pub fn add_path(&mut self, coords: &[Coord], map_type: u8) -> Result<&mut Self> {
        let types = NodeTypes::from_types([map_type]).ok_or_else(|| {
            Error::configuration(
                "map type",
                map_type,
                format!("{}..={}", MIN_MAP_TYPE, MAX_MAP_TYPE),
            )
        })?;

        let mut previous: Option<NodeId> = None;
        for coord in coords {
            let node_id = self.node_at(*coord, types);
            if let Some(previous) = previous {
                self.path_connection.add_edge(previous, node_id);
            }
            previous = Some(node_id);
        }
        Ok(self)
    }

    fn node_at(&mut self, coord: Coord, types: NodeTypes) -> NodeId {
        if let Some(node_id) = self.node_ids.get(&coord) {
            let node = &mut self.nodes[node_id.as_num()];
            node.types = NodeTypes(node.types.0 | types.0);
            return *node_id;
        }

        let id = self.id_generator.generate_id();
        self.nodes.push(MapNode { id, coord, types });
        self.node_ids.insert(coord, id);
        self.path_connection.add_node(id);
        id
    }

    pub fn build(self) -> RoadMap {
        RoadMap::from_parts(self.nodes, self.path_connection)
    }
}
