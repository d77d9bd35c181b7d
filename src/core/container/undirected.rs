use std::collections::{btree_set::Iter, BTreeMap, BTreeSet, VecDeque};

/// Undirected graph.
///
/// Neighbors are iterated in ascending order, so traversals are deterministic.
#[derive(Debug, Clone)]
pub struct UndirectedGraph<T>
where
    T: Eq + Ord + Copy,
{
    edges: BTreeMap<T, BTreeSet<T>>,
}

impl<T> Default for UndirectedGraph<T>
where
    T: Eq + Ord + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> UndirectedGraph<T>
where
    T: Eq + Ord + Copy,
{
    pub fn new() -> Self {
        Self {
            edges: BTreeMap::new(),
        }
    }

    /// Add a node without any edges.
    pub fn add_node(&mut self, node: T) {
        self.edges.entry(node).or_default();
    }

    /// Add an edge between two nodes. Loops are ignored.
    pub fn add_edge(&mut self, a: T, b: T) {
        if a == b || self.has_edge(a, b) {
            return;
        }
        self.edges.entry(a).or_default().insert(b);
        self.edges.entry(b).or_default().insert(a);
    }

    pub fn has_edge(&self, a: T, b: T) -> bool {
        self.edges.get(&a).map_or(false, |set| set.contains(&b))
    }

    pub fn contains_node(&self, node: T) -> bool {
        self.edges.contains_key(&node)
    }

    pub fn size(&self) -> usize {
        self.edges.values().map(|set| set.len()).sum::<usize>() / 2
    }

    pub fn neighbors_iter(&self, node: T) -> Option<Iter<'_, T>> {
        self.edges.get(&node).map(|set| set.iter())
    }

    /// Collect every node reachable from `start` with a breadth-first traversal.
    ///
    /// `start` itself is included if it is part of the graph.
    pub fn reachable_from(&self, start: T) -> BTreeSet<T> {
        let mut visited = BTreeSet::new();
        if !self.contains_node(start) {
            return visited;
        }

        let mut queue = VecDeque::from([start]);
        visited.insert(start);
        while let Some(node) = queue.pop_front() {
            if let Some(neighbors) = self.neighbors_iter(node) {
                for neighbor in neighbors {
                    if visited.insert(*neighbor) {
                        queue.push_back(*neighbor);
                    }
                }
            }
        }
        visited
    }
}
