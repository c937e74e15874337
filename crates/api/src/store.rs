//! Key/value storage for campus records.
//!
//! Database access is an external collaborator; the service ships with an
//! in-memory implementation for dev and tests.

use std::collections::BTreeMap;
use std::sync::RwLock;

/// Key/value store abstraction used by the route handlers.
pub trait Store<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    fn upsert(&self, key: K, value: V);
    fn remove(&self, key: &K) -> Option<V>;
    /// All records in key order.
    fn list(&self) -> Vec<V>;
    /// Atomically modify a record in place; `None` if the key is absent.
    fn update<R>(&self, key: &K, f: impl FnOnce(&mut V) -> R) -> Option<R>
    where
        Self: Sized;
}

/// In-memory store for tests/dev.
#[derive(Debug)]
pub struct InMemoryStore<K, V> {
    inner: RwLock<BTreeMap<K, V>>,
}

impl<K, V> InMemoryStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Store<K, V> for InMemoryStore<K, V>
where
    K: Ord + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.get(key).cloned()
    }

    fn upsert(&self, key: K, value: V) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.insert(key, value);
    }

    fn remove(&self, key: &K) -> Option<V> {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.remove(key)
    }

    fn list(&self) -> Vec<V> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.values().cloned().collect()
    }

    fn update<R>(&self, key: &K, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.get_mut(key).map(f)
    }
}
