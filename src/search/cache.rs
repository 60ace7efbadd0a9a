use super::DisplayRecord;
use dashmap::DashMap;

/// Memoizes search output by serialized parameters. Nothing is evicted
/// automatically; owners call [`SearchCache::clear`] when they see fit.
pub trait SearchCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<DisplayRecord>>;
    fn put(&self, key: String, records: Vec<DisplayRecord>);
    /// Drops every entry and returns how many were removed.
    fn clear(&self) -> usize;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, Vec<DisplayRecord>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<DisplayRecord>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn put(&self, key: String, records: Vec<DisplayRecord>) {
        self.entries.insert(key, records);
    }

    fn clear(&self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Cache that never stores anything; every search goes upstream.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl SearchCache for NoCache {
    fn get(&self, _key: &str) -> Option<Vec<DisplayRecord>> {
        None
    }

    fn put(&self, _key: String, _records: Vec<DisplayRecord>) {}

    fn clear(&self) -> usize {
        0
    }

    fn len(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ResourceLink;

    fn record(title: &str) -> DisplayRecord {
        DisplayRecord {
            title: title.into(),
            last_modified: "2024-01-10T00:00:00".into(),
            resources: vec![ResourceLink {
                name: "r".into(),
                url: "http://x/r.csv".into(),
                format: "CSV".into(),
            }],
        }
    }

    #[test]
    fn memory_cache_round_trip_and_clear() {
        let cache = MemoryCache::new();
        assert!(cache.get("k").is_none());

        cache.put("k".into(), vec![record("a")]);
        cache.put("k".into(), vec![record("b")]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k").unwrap()[0].title, "b");

        assert_eq!(cache.clear(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn no_cache_stores_nothing() {
        let cache = NoCache;
        cache.put("k".into(), vec![record("a")]);
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
    }
}
