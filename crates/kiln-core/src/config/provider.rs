use std::fmt::Debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;

/// Source of raw configuration text.
pub trait ConfigProvider: Send + Sync + Debug {
    /// Human-readable description of where the text comes from
    fn describe(&self) -> String;

    fn read(&self) -> Result<String, ConfigError>;
}

/// Reads configuration from a file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigProvider for FileProvider {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<String, ConfigError> {
        fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound(self.path.clone()),
            _ => ConfigError::io(e, "read_to_string", self.path.clone()),
        })
    }
}

/// Serves configuration text held in memory.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    label: String,
    content: String,
}

impl StaticProvider {
    pub fn new(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            content: content.into(),
        }
    }
}

impl ConfigProvider for StaticProvider {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn read(&self) -> Result<String, ConfigError> {
        Ok(self.content.clone())
    }
}
