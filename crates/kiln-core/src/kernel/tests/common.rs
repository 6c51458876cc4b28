use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::kernel::component::Component;
use crate::kernel::context::ApplicationContext;
use crate::kernel::error::{LifecyclePhase, Result};
use crate::kernel::runner::Kernel;
use crate::kernel::settings::AppSettings;

/// Shared, ordered record of hook invocations, e.g. `"db:boot"`.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Component recording every hook call into a shared log.
#[derive(Debug)]
pub struct RecordingComponent {
    name: String,
    log: EventLog,
    fail_on: Option<LifecyclePhase>,
}

impl RecordingComponent {
    pub fn new(name: &str, log: &EventLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
            fail_on: None,
        }
    }

    pub fn failing_on(mut self, phase: LifecyclePhase) -> Self {
        self.fail_on = Some(phase);
        self
    }

    pub fn arc(self) -> Arc<dyn Component> {
        Arc::new(self)
    }

    fn record(&self, phase: LifecyclePhase) -> Result<()> {
        let hook = match phase {
            LifecyclePhase::Register => "register",
            LifecyclePhase::Unregister => "unregister",
            LifecyclePhase::Boot => "boot",
            LifecyclePhase::Shutdown => "shutdown",
        };
        self.log.lock().unwrap().push(format!("{}:{}", self.name, hook));
        if self.fail_on == Some(phase) {
            return Err(format!("{} refused to {}", self.name, hook).into());
        }
        Ok(())
    }
}

#[async_trait]
impl Component for RecordingComponent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn register(&self, _ctx: &ApplicationContext) -> Result<()> {
        self.record(LifecyclePhase::Register)
    }

    async fn unregister(&self, _ctx: &ApplicationContext) -> Result<()> {
        self.record(LifecyclePhase::Unregister)
    }

    async fn boot(&self) -> Result<()> {
        self.record(LifecyclePhase::Boot)
    }

    async fn shutdown(&self) -> Result<()> {
        self.record(LifecyclePhase::Shutdown)
    }
}

/// Kernel that counts how often it was run and returns immediately.
#[derive(Debug, Default)]
pub struct CountingKernel {
    runs: AtomicUsize,
    fail: bool,
}

impl CountingKernel {
    pub fn failing() -> Self {
        Self {
            runs: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Kernel for CountingKernel {
    fn name(&self) -> &str {
        "counting"
    }

    async fn run(&self) -> Result<()> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err("kernel loop crashed".into());
        }
        Ok(())
    }
}

pub fn test_settings() -> AppSettings {
    AppSettings::with_root("/srv/app")
}

/// Context with a [`CountingKernel`] attached.
pub fn context_with_kernel() -> (ApplicationContext, Arc<CountingKernel>) {
    let kernel = Arc::new(CountingKernel::default());
    let mut ctx = ApplicationContext::new(test_settings(), Vec::new())
        .expect("Failed to build context");
    ctx.set_kernel(kernel.clone());
    (ctx, kernel)
}
