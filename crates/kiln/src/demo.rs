//! Components and kernel the command-line host runs with.
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use kiln_core::kernel::AppInfo;
use kiln_core::{ApplicationContext, Component, ConfigRepository, Kernel, Result};
use log::{debug, info};
use tokio::sync::Mutex;

/// Records when it was booted and reports uptime on shutdown.
#[derive(Debug, Default)]
pub struct ClockComponent {
    booted_at: Mutex<Option<Instant>>,
}

#[async_trait]
impl Component for ClockComponent {
    fn name(&self) -> &str {
        "clock"
    }

    async fn register(&self, _ctx: &ApplicationContext) -> Result<()> {
        debug!("clock registered");
        Ok(())
    }

    async fn unregister(&self, _ctx: &ApplicationContext) -> Result<()> {
        Ok(())
    }

    async fn boot(&self) -> Result<()> {
        *self.booted_at.lock().await = Some(Instant::now());
        println!("[clock] started");
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        if let Some(started) = self.booted_at.lock().await.take() {
            println!("[clock] stopped after {} ms", started.elapsed().as_millis());
        }
        Ok(())
    }
}

/// Greets on boot. The message comes from the `greeter` config namespace
/// (`message` key) when loaded, otherwise from the application name.
#[derive(Debug, Default)]
pub struct GreeterComponent {
    message: Mutex<Option<String>>,
}

#[async_trait]
impl Component for GreeterComponent {
    fn name(&self) -> &str {
        "greeter"
    }

    async fn register(&self, ctx: &ApplicationContext) -> Result<()> {
        let container = ctx.container();
        let info = container
            .get::<AppInfo>("app")
            .await
            .ok_or("application info is not published")?;
        let configured = container
            .get::<Arc<dyn ConfigRepository>>("config")
            .await
            .and_then(|config| config.get_value("greeter", "message"))
            .and_then(|value| value.as_str().map(str::to_string));

        let message = configured.unwrap_or_else(|| format!("Hello from {} v{}", info.name, info.version));
        *self.message.lock().await = Some(message);
        Ok(())
    }

    async fn unregister(&self, _ctx: &ApplicationContext) -> Result<()> {
        self.message.lock().await.take();
        Ok(())
    }

    async fn boot(&self) -> Result<()> {
        let message = self.message.lock().await.clone().ok_or("greeter booted before register")?;
        println!("[greeter] {}", message);
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        println!("[greeter] goodbye");
        Ok(())
    }
}

/// The components the host registers, in registration order.
pub fn default_components() -> Vec<Arc<dyn Component>> {
    vec![
        Arc::new(ClockComponent::default()),
        Arc::new(GreeterComponent::default()),
    ]
}

/// Kernel that ticks a fixed number of times and then returns.
#[derive(Debug)]
pub struct TickKernel {
    ticks: u32,
    interval: Duration,
}

impl TickKernel {
    pub fn new(ticks: u32, interval: Duration) -> Self {
        Self { ticks, interval }
    }
}

#[async_trait]
impl Kernel for TickKernel {
    fn name(&self) -> &str {
        "tick"
    }

    async fn run(&self) -> Result<()> {
        info!("Tick kernel running for {} tick(s)", self.ticks);
        for tick in 1..=self.ticks {
            tokio::time::sleep(self.interval).await;
            println!("tick {}", tick);
        }
        Ok(())
    }
}
