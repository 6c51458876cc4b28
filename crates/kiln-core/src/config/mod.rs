//! # Kiln Core Configuration
//!
//! Default collaborators for the configuration contract used by the
//! application context:
//!
//! - [`ConfigRepository`] / [`DefaultConfigRepository`]: namespaced store.
//! - [`ConfigProvider`]: where the raw text comes from ([`FileProvider`],
//!   [`StaticProvider`]).
//! - [`ConfigParser`]: how the text is parsed; [`ConfigFormat`] covers JSON,
//!   YAML (`yaml-config` feature) and TOML (`toml-config` feature).
//! - [`ConfigData`]: the parsed key/value map.
pub mod data;
pub mod error;
pub mod format;
pub mod provider;
pub mod repository;

pub use data::ConfigData;
pub use error::ConfigError;
pub use format::{ConfigFormat, ConfigParser};
pub use provider::{ConfigProvider, FileProvider, StaticProvider};
pub use repository::{ConfigRepository, DefaultConfigRepository};
