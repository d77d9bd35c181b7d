use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;

use crate::error::Result;

use super::road_map::RoadMap;

static PROCESS_WIDE: Lazy<Arc<GraphCache>> = Lazy::new(|| Arc::new(GraphCache::new()));

#[derive(Debug)]
struct CacheEntry {
    source_ids: Vec<String>,
    map: Arc<RoadMap>,
}

/// Single-slot cache of the most recently loaded road map.
///
/// The slot is keyed by the ordered list of map source identifiers. A request
/// for any other list drops the cached map and loads a new one in its place.
#[derive(Debug, Default)]
pub struct GraphCache {
    slot: Mutex<Option<CacheEntry>>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache shared by every store of the process that does not bring its own.
    pub fn process_wide() -> Arc<Self> {
        Arc::clone(&PROCESS_WIDE)
    }

    fn lock(&self) -> MutexGuard<'_, Option<CacheEntry>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the cached map if it was loaded from exactly `source_ids`.
    pub fn get(&self, source_ids: &[String]) -> Option<Arc<RoadMap>> {
        self.lock()
            .as_ref()
            .filter(|entry| entry.source_ids == source_ids)
            .map(|entry| Arc::clone(&entry.map))
    }

    /// Get the map cached for `source_ids`, or load it with `load` and cache it.
    ///
    /// The slot stays locked while loading, so concurrent requests for the same
    /// sources load the map once. The slot is emptied before loading and stays
    /// empty if `load` fails.
    ///
    /// The returned flag is `true` on a cache hit.
    pub fn get_or_try_load<F>(
        &self,
        source_ids: &[String],
        load: F,
    ) -> Result<(Arc<RoadMap>, bool)>
    where
        F: FnOnce() -> Result<RoadMap>,
    {
        let mut slot = self.lock();
        if let Some(entry) = slot.as_ref().filter(|entry| entry.source_ids == source_ids) {
            return Ok((Arc::clone(&entry.map), true));
        }

        *slot = None;
        let map = Arc::new(load()?);
        *slot = Some(CacheEntry {
            source_ids: source_ids.to_vec(),
            map: Arc::clone(&map),
        });
        Ok((map, false))
    }

    /// Source identifiers of the cached map, if any.
    pub fn cached_source_ids(&self) -> Option<Vec<String>> {
        self.lock().as_ref().map(|entry| entry.source_ids.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::thread;

    use super::*;
    use crate::core::geometry::coord::Coord;
    use crate::error::Error;
    use crate::map::road_map::RoadMapBuilder;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn tiny_map() -> Result<RoadMap> {
        let mut builder = RoadMapBuilder::new();
        builder.add_path(&[Coord::new(0.0, 0.0), Coord::new(1.0, 0.0)], 1)?;
        Ok(builder.build())
    }

    #[test]
    fn test_hit_and_replace() {
        let cache = GraphCache::new();
        let first = ids(&["a", "b"]);

        let (loaded, hit) = cache.get_or_try_load(&first, tiny_map).unwrap();
        assert!(!hit);

        let (cached, hit) = cache
            .get_or_try_load(&first, || panic!("map must come from the cache"))
            .unwrap();
        assert!(hit);
        assert!(Arc::ptr_eq(&loaded, &cached));
        assert!(cache.get(&first).is_some());

        let reordered = ids(&["b", "a"]);
        assert!(cache.get(&reordered).is_none());
        let (replaced, hit) = cache.get_or_try_load(&reordered, tiny_map).unwrap();
        assert!(!hit);
        assert!(!Arc::ptr_eq(&loaded, &replaced));
        assert_eq!(cache.cached_source_ids(), Some(reordered));
        assert!(cache.get(&first).is_none());
    }

    #[test]
    fn test_concurrent_loads_read_once() {
        let cache = Arc::new(GraphCache::new());
        let source_ids = ids(&["a", "b"]);
        let loads = AtomicUsize::new(0);

        let maps = thread::scope(|scope| {
            let handles = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        cache
                            .get_or_try_load(&source_ids, || {
                                loads.fetch_add(1, AtomicOrdering::SeqCst);
                                tiny_map()
                            })
                            .unwrap()
                            .0
                    })
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect::<Vec<_>>()
        });

        assert_eq!(loads.load(AtomicOrdering::SeqCst), 1);
        assert!(maps.iter().all(|map| Arc::ptr_eq(map, &maps[0])));
    }

    #[test]
    fn test_failed_load_empties_slot() {
        let cache = GraphCache::new();
        cache.get_or_try_load(&ids(&["a"]), tiny_map).unwrap();

        let result = cache.get_or_try_load(&ids(&["c"]), || Err(Error::EmptyGraph));
        assert!(matches!(result, Err(Error::EmptyGraph)));
        assert_eq!(cache.cached_source_ids(), None);

        let (_, hit) = cache.get_or_try_load(&ids(&["a"]), tiny_map).unwrap();
        assert!(!hit);
    }
}
