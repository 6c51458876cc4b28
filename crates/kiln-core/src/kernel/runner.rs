use std::fmt::Debug;

use async_trait::async_trait;

use crate::kernel::error::Result;

/// The run loop handed control once every component has booted.
///
/// [`ApplicationContext::run`](crate::kernel::ApplicationContext::run) calls
/// [`run`](Kernel::run) exactly once, after a successful boot sweep. The call
/// is expected to block (await) for the remainder of the application's life.
#[async_trait]
pub trait Kernel: Send + Sync + Debug {
    /// Name used in logs and error messages.
    fn name(&self) -> &str {
        "kernel"
    }

    async fn run(&self) -> Result<()>;
}
