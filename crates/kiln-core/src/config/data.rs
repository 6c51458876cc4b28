use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::error::ConfigError;

/// In-memory representation of one configuration namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigData {
    #[serde(flatten)]
    values: BTreeMap<String, Value>,
}

impl ConfigData {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Build from a parsed JSON value, which must be an object.
    pub fn from_value(value: Value, source_name: &str) -> Result<Self, ConfigError> {
        match value {
            Value::Object(map) => Ok(Self {
                values: map.into_iter().collect(),
            }),
            Value::Null => Ok(Self::new()),
            other => Err(ConfigError::NotAMap {
                source_name: source_name.to_string(),
                found: value_kind(&other).to_string(),
            }),
        }
    }

    /// Look up a raw value. Dotted keys descend into nested maps, so
    /// `"server.port"` reads `{"server": {"port": ..}}`. An exact top-level
    /// match wins over descent.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.values.get(key) {
            return Some(value);
        }
        let mut parts = key.split('.');
        let mut current = self.values.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Get a configuration value
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.get_value(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Get a configuration value with default
    pub fn get_or<T: for<'de> Deserialize<'de>>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Set a top-level configuration value
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<(), ConfigError> {
        let json_value = serde_json::to_value(value).map_err(|e| ConfigError::SerializationError {
            format: "json".to_string(),
            source: Box::new(e),
        })?;
        self.values.insert(key.to_string(), json_value);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    /// Top-level keys in sorted order
    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge with another config. Values from `other` win; nested maps are
    /// merged recursively instead of being replaced wholesale.
    pub fn merge(&mut self, other: &ConfigData) {
        for (key, value) in &other.values {
            match self.values.get_mut(key) {
                Some(existing) => merge_value(existing, value),
                None => {
                    self.values.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

fn merge_value(target: &mut Value, incoming: &Value) {
    match (target, incoming) {
        (Value::Object(target_map), Value::Object(incoming_map)) => {
            for (key, value) in incoming_map {
                match target_map.get_mut(key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, incoming) => *target = incoming.clone(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}
