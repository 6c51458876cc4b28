use std::fmt::Debug;

use async_trait::async_trait;

use crate::kernel::context::ApplicationContext;
use crate::kernel::error::Result;

/// Lifecycle contract for every component managed by an [`ApplicationContext`].
///
/// A component is identified by its [`name`](Component::name), which must be
/// non-empty and unique within a context. The context drives the hooks:
///
/// - `register` runs once when the component is added to the context.
/// - `boot` runs during the boot sweep of [`ApplicationContext::run`], or
///   immediately after `register` if the context is already booted.
/// - `unregister` runs when the component is removed from the context.
/// - `shutdown` runs right after `unregister` if the context is booted.
///
/// # Reentrancy
///
/// The context holds its registry lock while a hook executes. A hook must not
/// call [`ApplicationContext::register`] or [`ApplicationContext::unregister`]
/// on the context it was handed, or on the context being booted; doing so
/// deadlocks. The same holds for the async registry queries such as
/// [`ApplicationContext::component_names`]. Synchronous accessors and the
/// dependency container are safe to use.
#[async_trait]
pub trait Component: Send + Sync + Debug {
    /// Unique name of this component.
    fn name(&self) -> &str;

    /// Wires the component against the context, e.g. resolves dependencies
    /// from the container.
    async fn register(&self, ctx: &ApplicationContext) -> Result<()>;

    /// Reverses [`register`](Component::register).
    async fn unregister(&self, ctx: &ApplicationContext) -> Result<()>;

    /// Called once when the owning context enters its running state.
    async fn boot(&self) -> Result<()>;

    /// Reverses [`boot`](Component::boot).
    async fn shutdown(&self) -> Result<()>;
}
