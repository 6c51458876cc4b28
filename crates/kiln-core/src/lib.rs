//! # kiln-core
//!
//! Application bootstrap runtime: an [`ApplicationContext`] owning
//! configuration, a pluggable [`Kernel`] and a dynamic set of named
//! [`Component`]s with register/boot/unregister/shutdown hooks.
pub mod config;
pub mod kernel;

pub use config::{ConfigData, ConfigFormat, ConfigRepository, DefaultConfigRepository};
pub use kernel::error::Error as KernelError;
pub use kernel::options;
pub use kernel::{AppSettings, ApplicationContext, Component, Container, Kernel, LifecyclePhase, Result};
