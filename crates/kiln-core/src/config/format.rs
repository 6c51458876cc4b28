use std::fmt::Debug;
use std::path::Path;

use serde_json::Value;

use crate::config::data::ConfigData;
use crate::config::error::ConfigError;

/// Turns raw configuration text into a [`ConfigData`] map.
pub trait ConfigParser: Send + Sync + Debug {
    /// Short format name used in error messages
    fn format_name(&self) -> &str;

    fn parse(&self, content: &str) -> Result<ConfigData, ConfigError>;
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from a bare extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            #[cfg(feature = "toml-config")]
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Serialize to string based on format
    pub fn serialize(&self, data: &ConfigData) -> Result<String, ConfigError> {
        let wrap = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::SerializationError {
            format: self.extension().to_string(),
            source,
        };
        match self {
            ConfigFormat::Json => serde_json::to_string_pretty(data).map_err(|e| wrap(Box::new(e))),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(data).map_err(|e| wrap(Box::new(e))),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(data).map_err(|e| wrap(Box::new(e))),
        }
    }
}

impl ConfigParser for ConfigFormat {
    fn format_name(&self) -> &str {
        self.extension()
    }

    fn parse(&self, content: &str) -> Result<ConfigData, ConfigError> {
        let wrap = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::DeserializationError {
            format: self.extension().to_string(),
            source,
        };
        if content.trim().is_empty() {
            return Ok(ConfigData::new());
        }
        let value: Value = match self {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| wrap(Box::new(e)))?,
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| wrap(Box::new(e)))?,
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| wrap(Box::new(e)))?,
        };
        ConfigData::from_value(value, self.extension())
    }
}
