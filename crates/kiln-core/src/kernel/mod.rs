//! # Kiln Core Kernel
//!
//! The `kernel` module is the heart of `kiln-core`: it owns the application
//! context and coordinates the lifecycle of the components registered on it.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Application Context**: [`ApplicationContext`](context::ApplicationContext)
//!   holds identity and path metadata, the configuration repository, the kernel
//!   and the dependency [`Container`](container::Container). It also drives
//!   component registration, the boot sweep and unregistration.
//! - **Component Contract**: the [`Component`](component::Component) trait with
//!   its four lifecycle hooks, stored in an insertion-ordered
//!   [`ComponentRegistry`](registry::ComponentRegistry).
//! - **Kernel Contract**: the [`Kernel`](runner::Kernel) run loop started once
//!   booting succeeds.
//! - **Construction**: [`AppSettings`](settings::AppSettings) and the
//!   [`ContextOption`](options::ContextOption) builders in `options`.
//! - **Error Handling**: [`Error`](error::Error) and the `Result` alias.
pub mod component;
pub mod constants;
pub mod container;
pub mod context;
pub mod error;
pub mod options;
pub mod registry;
pub mod runner;
pub mod settings;

pub use component::Component;
pub use container::Container;
pub use context::{AppInfo, ApplicationContext};
pub use error::{Error, LifecyclePhase, Result};
pub use options::{BoxedOption, ContextOption};
pub use registry::{ComponentRegistry, RegistryError, SharedComponentRegistry};
pub use runner::Kernel;
pub use settings::AppSettings;

#[cfg(test)]
mod tests;
