use std::env;
use std::path::{Path, PathBuf};

use crate::config::ConfigFormat;
use crate::kernel::constants;
use crate::kernel::error::{Error, Result};

/// Resolved construction-time settings for an [`ApplicationContext`].
///
/// Callers build this explicitly, or snapshot the process environment once
/// with [`AppSettings::from_env`]. The context never reads the environment
/// itself, so later changes to it have no effect.
///
/// [`ApplicationContext`]: crate::kernel::ApplicationContext
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub debug: bool,
    pub root: PathBuf,
    pub working_dir: PathBuf,
    pub storage_path: PathBuf,
    pub resource_path: PathBuf,
    pub config_path: PathBuf,
    /// Format used by `configure` when the requested name has no extension.
    pub config_format: ConfigFormat,
}

impl AppSettings {
    /// Settings rooted at `root` with every path derived from it.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            name: constants::DEFAULT_APP_NAME.to_string(),
            version: constants::DEFAULT_APP_VERSION.to_string(),
            debug: false,
            working_dir: root.clone(),
            storage_path: root.join(constants::STORAGE_DIR),
            resource_path: root.join(constants::RESOURCE_DIR),
            config_path: root.join(constants::CONFIG_DIR),
            config_format: ConfigFormat::Json,
            root,
        }
    }

    /// Snapshot the `APP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve settings through `lookup` instead of the process environment.
    ///
    /// Empty values are treated as unset. `APP_WD` falls back to the current
    /// directory, then to the root.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let debug = match get(constants::ENV_DEBUG) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| Error::InvalidSettings {
                field: constants::ENV_DEBUG.to_string(),
                reason: format!("'{}' is not a boolean", raw),
            })?,
            None => false,
        };

        let root = get(constants::ENV_ROOT).map(PathBuf::from).unwrap_or_default();
        let working_dir = get(constants::ENV_WORKING_DIR)
            .map(PathBuf::from)
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| root.clone());
        let path_or = |key: &str, dir: &str| {
            get(key)
                .map(PathBuf::from)
                .unwrap_or_else(|| root.join(dir))
        };

        let storage_path = path_or(constants::ENV_STORAGE_PATH, constants::STORAGE_DIR);
        let resource_path = path_or(constants::ENV_RESOURCE_PATH, constants::RESOURCE_DIR);
        let config_path = path_or(constants::ENV_CONFIG_PATH, constants::CONFIG_DIR);

        Ok(Self {
            debug,
            working_dir,
            storage_path,
            resource_path,
            config_path,
            ..Self::with_root(root)
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::with_root(PathBuf::new())
    }
}

/// Accepts the usual spellings: `1`, `t`, `true`, `yes`, `on` and their
/// negations, case-insensitively.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "f" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
