//! # Kiln Core Kernel Errors
//!
//! Defines the error type shared by the registry, the lifecycle coordinator
//! and the application context.
//!
//! Subsystem errors ([`RegistryError`], [`ConfigError`]) are folded into
//! [`Error`] through `#[from]` conversions, so `?` works across module
//! boundaries. Failures raised by a component's lifecycle hooks are wrapped
//! in [`Error::Hook`] together with the component name and the phase that
//! failed.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::config::error::ConfigError;
use crate::kernel::registry::RegistryError;

/// Errors produced by the kernel.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A component with the same name is already registered.
    #[error("Component '{name}' is already registered")]
    DuplicateName { name: String },

    /// `run` was called before a kernel was set.
    #[error("No kernel has been set on the application context")]
    MissingKernel,

    /// `run` was called after the boot sweep already completed.
    #[error("Application context has already been booted")]
    AlreadyBooted,

    /// A component lifecycle hook returned an error.
    #[error("Component '{component}' failed during {phase}: {source}")]
    Hook {
        component: String,
        phase: LifecyclePhase,
        #[source]
        source: Box<Error>,
    },

    /// The kernel run loop returned an error.
    #[error("Kernel '{kernel}' failed: {source}")]
    Kernel {
        kernel: String,
        #[source]
        source: Box<Error>,
    },

    /// Configuration could not be loaded.
    #[error("Configuration load error: {0}")]
    ConfigLoad(#[from] ConfigError),

    /// Registry level error.
    #[error("Component registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Settings resolved for the context are unusable.
    #[error("Invalid settings for '{field}': {reason}")]
    InvalidSettings { field: String, reason: String },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// The lifecycle hook that was executing when a component failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum LifecyclePhase {
    #[error("Register")]
    Register,
    #[error("Unregister")]
    Unregister,
    #[error("Boot")]
    Boot,
    #[error("Shutdown")]
    Shutdown,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl Error {
    /// Wraps a hook failure with the component name and phase.
    pub fn hook(component: impl Into<String>, phase: LifecyclePhase, source: Error) -> Self {
        Error::Hook {
            component: component.into(),
            phase,
            source: Box::new(source),
        }
    }

    /// Returns the lifecycle phase if this error came from a component hook.
    pub fn phase(&self) -> Option<LifecyclePhase> {
        match self {
            Error::Hook { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
