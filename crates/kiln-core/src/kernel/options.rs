use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{ConfigFormat, ConfigRepository};
use crate::kernel::context::ApplicationContext;
use crate::kernel::error::{Error, Result};
use crate::kernel::runner::Kernel;

/// A construction-time mutation of an [`ApplicationContext`].
///
/// Options are applied in order by [`ApplicationContext::new`]; the first
/// error aborts construction. Any `Fn(&mut ApplicationContext) -> Result<()>`
/// closure is an option.
pub trait ContextOption: Send + Sync {
    fn apply(&self, ctx: &mut ApplicationContext) -> Result<()>;
}

impl<F> ContextOption for F
where
    F: Fn(&mut ApplicationContext) -> Result<()> + Send + Sync,
{
    fn apply(&self, ctx: &mut ApplicationContext) -> Result<()> {
        self(ctx)
    }
}

/// Boxed option, the element type accepted by [`ApplicationContext::new`].
pub type BoxedOption = Box<dyn ContextOption>;

/// Box any closure as an option.
pub fn option_fn<F>(f: F) -> BoxedOption
where
    F: Fn(&mut ApplicationContext) -> Result<()> + Send + Sync + 'static,
{
    Box::new(f)
}

/// An option that changes nothing.
pub fn none() -> BoxedOption {
    option_fn(|_ctx: &mut ApplicationContext| Ok(()))
}

pub fn with_name(name: impl Into<String>) -> BoxedOption {
    let name = name.into();
    option_fn(move |ctx: &mut ApplicationContext| {
        if name.is_empty() {
            return Err(Error::InvalidSettings {
                field: "name".to_string(),
                reason: "application name must not be empty".to_string(),
            });
        }
        ctx.name = name.clone();
        Ok(())
    })
}

pub fn with_version(version: impl Into<String>) -> BoxedOption {
    let version = version.into();
    option_fn(move |ctx: &mut ApplicationContext| {
        ctx.version = version.clone();
        Ok(())
    })
}

pub fn with_debug(debug: bool) -> BoxedOption {
    option_fn(move |ctx: &mut ApplicationContext| {
        ctx.debug = debug;
        Ok(())
    })
}

pub fn with_working_dir(path: impl Into<PathBuf>) -> BoxedOption {
    let path = path.into();
    option_fn(move |ctx: &mut ApplicationContext| {
        ctx.working_dir = path.clone();
        Ok(())
    })
}

pub fn with_storage_path(path: impl Into<PathBuf>) -> BoxedOption {
    let path = path.into();
    option_fn(move |ctx: &mut ApplicationContext| {
        ctx.storage_path = path.clone();
        Ok(())
    })
}

pub fn with_resource_path(path: impl Into<PathBuf>) -> BoxedOption {
    let path = path.into();
    option_fn(move |ctx: &mut ApplicationContext| {
        ctx.resource_path = path.clone();
        Ok(())
    })
}

pub fn with_config_path(path: impl Into<PathBuf>) -> BoxedOption {
    let path = path.into();
    option_fn(move |ctx: &mut ApplicationContext| {
        ctx.config_path = path.clone();
        Ok(())
    })
}

/// Default format used by `configure` for names without an extension.
pub fn with_config_format(format: ConfigFormat) -> BoxedOption {
    option_fn(move |ctx: &mut ApplicationContext| {
        ctx.config_format = format;
        Ok(())
    })
}

pub fn with_config(config: Arc<dyn ConfigRepository>) -> BoxedOption {
    option_fn(move |ctx: &mut ApplicationContext| {
        ctx.set_config(config.clone());
        Ok(())
    })
}

pub fn with_kernel(kernel: Arc<dyn Kernel>) -> BoxedOption {
    option_fn(move |ctx: &mut ApplicationContext| {
        ctx.set_kernel(kernel.clone());
        Ok(())
    })
}
