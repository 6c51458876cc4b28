use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard, TryLockError};

use crate::kernel::component::Component;

/// Errors raised by [`ComponentRegistry`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Component '{name}' already exists in the registry")]
    DuplicateName { name: String },

    #[error("Component '{name}' not found in the registry")]
    NotFound { name: String },

    #[error("Component names must not be empty")]
    EmptyName,
}

/// Insertion-ordered registry of components keyed by name.
///
/// Iteration order is registration order. Removing a component drops it from
/// the order without disturbing the relative order of the others, and a name
/// that is re-added after removal goes to the tail.
pub struct ComponentRegistry {
    components: HashMap<String, Arc<dyn Component>>,
    order: Vec<String>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("components", &self.order)
            .finish()
    }
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Insert `component` under `name` at the tail of the iteration order.
    pub fn add(&mut self, name: &str, component: Arc<dyn Component>) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.components.contains_key(name) {
            return Err(RegistryError::DuplicateName { name: name.to_string() });
        }

        self.components.insert(name.to_string(), component);
        self.order.push(name.to_string());
        Ok(())
    }

    /// Remove and return the component registered under `name`.
    pub fn remove(&mut self, name: &str) -> Result<Arc<dyn Component>, RegistryError> {
        let component = self
            .components
            .remove(name)
            .ok_or_else(|| RegistryError::NotFound { name: name.to_string() })?;
        self.order.retain(|entry| entry != name);
        Ok(component)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Component>> {
        self.components.get(name).cloned()
    }

    /// Snapshot of all components in insertion order.
    pub fn values(&self) -> Vec<Arc<dyn Component>> {
        self.order
            .iter()
            .filter_map(|name| self.components.get(name).cloned())
            .collect()
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Component registry behind an async mutex.
///
/// [`lock`](SharedComponentRegistry::lock) opens an exclusive scope that lasts
/// until the returned guard is dropped, so a check-then-insert-then-call-hook
/// sequence is atomic with respect to every other mutator.
#[derive(Clone, Debug, Default)]
pub struct SharedComponentRegistry {
    registry: Arc<Mutex<ComponentRegistry>>,
}

impl SharedComponentRegistry {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(ComponentRegistry::new())),
        }
    }

    /// Acquire the registry lock, waiting for any in-flight operation.
    pub async fn lock(&self) -> MutexGuard<'_, ComponentRegistry> {
        self.registry.lock().await
    }

    /// Acquire the registry lock without waiting.
    pub fn try_lock(&self) -> Result<MutexGuard<'_, ComponentRegistry>, TryLockError> {
        self.registry.try_lock()
    }
}
