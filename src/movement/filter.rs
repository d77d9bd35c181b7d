use crate::error::{Error, Result};
use crate::map::{MapNode, NodeTypes, MAX_MAP_TYPE, MIN_MAP_TYPE};

/// Map types a group of agents may traverse.
///
/// An unrestricted filter admits every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeTypeFilter {
    types: Option<NodeTypes>,
}

impl NodeTypeFilter {
    pub fn unrestricted() -> Self {
        Self { types: None }
    }

    /// Create a filter admitting the given map types.
    ///
    /// Every type must lie in `[1, 31]` and refer to one of the
    /// `nrof_map_files` map sources that were loaded.
    pub fn from_types(values: &[i64], nrof_map_files: usize) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::configuration(
                "ok_maps",
                "[]",
                "at least one map type",
            ));
        }

        let mut types = Vec::with_capacity(values.len());
        for value in values {
            if *value < MIN_MAP_TYPE as i64 || *value > MAX_MAP_TYPE as i64 {
                return Err(Error::configuration(
                    "ok_maps",
                    value,
                    format!("a map type in {}..={}", MIN_MAP_TYPE, MAX_MAP_TYPE),
                ));
            }
            if *value as usize > nrof_map_files {
                return Err(Error::configuration(
                    "ok_maps",
                    value,
                    format!("at most {} (the number of map files read)", nrof_map_files),
                ));
            }
            types.push(*value as u8);
        }

        let types = NodeTypes::from_types(types).ok_or_else(|| {
            Error::configuration("ok_maps", format!("{:?}", values), "valid map types")
        })?;
        Ok(Self { types: Some(types) })
    }

    /// Create a filter from an optional list of map types.
    /// `None` means unrestricted.
    pub fn from_settings(values: Option<&[i64]>, nrof_map_files: usize) -> Result<Self> {
        values.map_or(Ok(Self::unrestricted()), |values| {
            Self::from_types(values, nrof_map_files)
        })
    }

    pub fn is_unrestricted(&self) -> bool {
        self.types.is_none()
    }

    pub fn admits(&self, node: &MapNode) -> bool {
        self.types
            .map_or(true, |types| types.intersects(&node.types()))
    }
}

impl std::fmt::Display for NodeTypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.types {
            None => write!(f, "all map types"),
            Some(types) => {
                let types = types.iter().map(|t| t.to_string()).collect::<Vec<_>>();
                write!(f, "map types {}", types.join(","))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::coord::Coord;
    use crate::map::RoadMapBuilder;

    #[test]
    fn test_admits_configured_types() {
        let mut builder = RoadMapBuilder::new();
        for map_type in 1..=4u8 {
            let x = map_type as f64;
            builder
                .add_path(&[Coord::new(x, 0.0), Coord::new(x, 1.0)], map_type)
                .unwrap();
        }
        let map = builder.build();

        let filter = NodeTypeFilter::from_types(&[2, 3], 4).unwrap();
        let admitted = map
            .nodes()
            .iter()
            .filter(|node| filter.admits(node))
            .flat_map(|node| node.types().iter())
            .collect::<Vec<_>>();
        assert_eq!(admitted, vec![2, 2, 3, 3]);

        let unrestricted = NodeTypeFilter::unrestricted();
        assert!(map.nodes().iter().all(|node| unrestricted.admits(node)));
        assert_eq!(filter.to_string(), "map types 2,3");
    }

    #[test]
    fn test_node_with_several_types() {
        let mut builder = RoadMapBuilder::new();
        builder
            .add_path(&[Coord::new(0.0, 0.0), Coord::new(1.0, 0.0)], 1)
            .unwrap()
            .add_path(&[Coord::new(1.0, 0.0), Coord::new(2.0, 0.0)], 2)
            .unwrap();
        let map = builder.build();

        let filter = NodeTypeFilter::from_types(&[2], 2).unwrap();
        let admitted = map
            .nodes()
            .iter()
            .filter(|node| filter.admits(node))
            .map(|node| node.coord())
            .collect::<Vec<_>>();
        assert_eq!(admitted, vec![Coord::new(1.0, 0.0), Coord::new(2.0, 0.0)]);
    }

    #[test]
    fn test_invalid_types() {
        for values in [&[0][..], &[32][..], &[-1][..], &[1, 40][..]] {
            assert!(matches!(
                NodeTypeFilter::from_types(values, 31),
                Err(Error::Configuration { setting: "ok_maps", .. })
            ));
        }
        assert!(NodeTypeFilter::from_types(&[3], 2).is_err());
        assert!(NodeTypeFilter::from_types(&[], 2).is_err());

        assert!(NodeTypeFilter::from_settings(None, 1)
            .unwrap()
            .is_unrestricted());
        assert!(!NodeTypeFilter::from_settings(Some(&[1][..]), 1)
            .unwrap()
            .is_unrestricted());
    }
}
