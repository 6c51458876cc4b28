use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::RwLock;

use serde_json::Value;

use crate::config::data::ConfigData;
use crate::config::error::ConfigError;
use crate::config::format::ConfigParser;
use crate::config::provider::ConfigProvider;

/// Configuration store consulted by the application context.
///
/// The context only decides *when* to load; reading and parsing are left to
/// the provider and parser passed in.
pub trait ConfigRepository: Send + Sync + Debug {
    /// Read from `provider`, parse with `parser` and store the result under
    /// `namespace`.
    fn load_at(
        &self,
        namespace: &str,
        provider: &dyn ConfigProvider,
        parser: &dyn ConfigParser,
    ) -> Result<(), ConfigError>;

    /// Snapshot of a namespace, if loaded.
    fn namespace(&self, namespace: &str) -> Option<ConfigData>;

    /// Value at `key` within `namespace`. Dotted keys descend into maps.
    fn get_value(&self, namespace: &str, key: &str) -> Option<Value> {
        self.namespace(namespace)
            .and_then(|data| data.get_value(key).cloned())
    }

    fn has_namespace(&self, namespace: &str) -> bool {
        self.namespace(namespace).is_some()
    }

    /// Loaded namespaces in sorted order.
    fn namespaces(&self) -> Vec<String>;
}

/// In-memory [`ConfigRepository`].
///
/// Loading into an existing namespace merges the new values over the old ones.
#[derive(Debug, Default)]
pub struct DefaultConfigRepository {
    namespaces: RwLock<BTreeMap<String, ConfigData>>,
}

impl DefaultConfigRepository {
    pub fn new() -> Self {
        Self {
            namespaces: RwLock::new(BTreeMap::new()),
        }
    }

    /// Store `data` under `namespace`, merging with what is already there.
    pub fn insert(&self, namespace: &str, data: ConfigData) -> Result<(), ConfigError> {
        if namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        let mut namespaces = self.namespaces.write().map_err(|_| ConfigError::Poisoned {
            component: "namespaces".to_string(),
        })?;
        match namespaces.get_mut(namespace) {
            Some(existing) => existing.merge(&data),
            None => {
                namespaces.insert(namespace.to_string(), data);
            }
        }
        Ok(())
    }

    /// Drop a namespace, returning its data.
    pub fn remove(&self, namespace: &str) -> Option<ConfigData> {
        self.namespaces
            .write()
            .ok()
            .and_then(|mut namespaces| namespaces.remove(namespace))
    }
}

impl ConfigRepository for DefaultConfigRepository {
    fn load_at(
        &self,
        namespace: &str,
        provider: &dyn ConfigProvider,
        parser: &dyn ConfigParser,
    ) -> Result<(), ConfigError> {
        if namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        let content = provider.read()?;
        let data = parser.parse(&content)?;
        log::debug!(
            "Loaded {} key(s) into config namespace '{}' from {} ({})",
            data.len(),
            namespace,
            provider.describe(),
            parser.format_name()
        );
        self.insert(namespace, data)
    }

    fn namespace(&self, namespace: &str) -> Option<ConfigData> {
        self.namespaces
            .read()
            .ok()
            .and_then(|namespaces| namespaces.get(namespace).cloned())
    }

    fn namespaces(&self) -> Vec<String> {
        self.namespaces
            .read()
            .map(|namespaces| namespaces.keys().cloned().collect())
            .unwrap_or_default()
    }
}
