use ahash::AHashMap;
use parking_lot::RwLock;

/// Adjacency lists keyed by element id, shared across read-only queries.
#[derive(Default)]
pub struct AdjacencyCache {
    inner: RwLock<AHashMap<String, Vec<String>>>,
}

impl AdjacencyCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(AHashMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<Vec<String>> {
        self.inner.read().get(key).cloned()
    }

    pub fn insert(&self, key: String, value: Vec<String>) {
        self.inner.write().insert(key, value);
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }
}
