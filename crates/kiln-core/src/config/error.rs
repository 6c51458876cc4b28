//! # Kiln Core Configuration Errors
//!
//! Defines [`ConfigError`], raised while reading, parsing or storing
//! configuration. The kernel propagates these verbatim inside
//! `Error::ConfigLoad`.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error during operation '{operation}' on path '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration file not found at path: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Serialization to '{format}' failed: {source}")]
    SerializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Deserialization from '{format}' failed: {source}")]
    DeserializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedConfigFormat(String),

    #[error("Configuration root from '{source_name}' must be a map, found {found}")]
    NotAMap { source_name: String, found: String },

    #[error("Configuration namespace must not be empty")]
    EmptyNamespace,

    #[error("Attempted to operate on a poisoned configuration store: {component}")]
    Poisoned { component: String },
}

impl ConfigError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        ConfigError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }
}
