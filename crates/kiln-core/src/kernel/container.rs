use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;

type Entry = Arc<dyn Any + Send + Sync>;

/// Name-keyed dependency container.
///
/// Values of any `Send + Sync` type are stored behind `Arc` and retrieved by
/// downcasting to the requested concrete type. Writing to an existing key
/// replaces the previous value (last write wins); unlike the component
/// registry, there is no uniqueness check.
#[derive(Default)]
pub struct Container {
    entries: RwLock<HashMap<String, Entry>>,
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self
            .entries
            .try_read()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("Container").field("keys", &keys).finish()
    }
}

impl Container {
    /// Create a new empty container
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Store `value` under `key`, returning the entry it replaced.
    pub async fn set<T>(&self, key: impl Into<String>, value: Arc<T>) -> Option<Entry>
    where
        T: Any + Send + Sync,
    {
        self.entries.write().await.insert(key.into(), value)
    }

    /// Store an already type-erased value under `key`.
    pub async fn set_erased(&self, key: impl Into<String>, value: Entry) -> Option<Entry> {
        self.entries.write().await.insert(key.into(), value)
    }

    /// Synchronous variant of [`set`](Container::set) for callers holding
    /// exclusive access, e.g. during context construction.
    pub fn set_mut<T>(&mut self, key: impl Into<String>, value: Arc<T>) -> Option<Entry>
    where
        T: Any + Send + Sync,
    {
        self.entries.get_mut().insert(key.into(), value)
    }

    /// Fetch the value under `key` as a `T`.
    ///
    /// Returns `None` if the key is absent or holds a different type.
    pub async fn get<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let entry = self.entries.read().await.get(key).cloned()?;
        Arc::downcast::<T>(entry).ok()
    }

    /// Fetch the type-erased value under `key`.
    pub async fn get_erased(&self, key: &str) -> Option<Entry> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn remove(&self, key: &str) -> Option<Entry> {
        self.entries.write().await.remove(key)
    }

    /// All keys, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
