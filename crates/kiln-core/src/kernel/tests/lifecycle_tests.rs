use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::kernel::component::Component;
use crate::kernel::context::ApplicationContext;
use crate::kernel::error::{Error, LifecyclePhase, Result};
use crate::kernel::tests::common::{
    context_with_kernel, events, new_log, test_settings, CountingKernel, EventLog,
    RecordingComponent,
};

#[tokio::test]
async fn test_register_invokes_register_hook_only() {
    let (ctx, _kernel) = context_with_kernel();
    let log = new_log();

    ctx.register(RecordingComponent::new("db", &log).arc()).await.unwrap();

    assert_eq!(events(&log), vec!["db:register"]);
    assert!(ctx.contains_component("db").await);
    assert!(!ctx.is_booted());
}

#[tokio::test]
async fn test_duplicate_name_rejected_and_first_kept() {
    let (ctx, _kernel) = context_with_kernel();
    let log_a = new_log();
    let log_b = new_log();

    ctx.register(RecordingComponent::new("db", &log_a).arc()).await.unwrap();
    let result = ctx.register(RecordingComponent::new("db", &log_b).arc()).await;

    match result {
        Err(Error::DuplicateName { name }) => assert_eq!(name, "db"),
        other => panic!("Expected DuplicateName, got {:?}", other),
    }
    assert!(events(&log_b).is_empty(), "Rejected component must see no hooks");
    assert_eq!(ctx.component_count().await, 1);

    // The surviving entry is the first one: unregistering reaches its hooks.
    ctx.unregister_by_name("db").await.unwrap();
    assert_eq!(events(&log_a), vec!["db:register", "db:unregister"]);
    assert!(events(&log_b).is_empty());
}

#[tokio::test]
async fn test_duplicate_name_rejected_after_boot() {
    let (ctx, _kernel) = context_with_kernel();
    let log = new_log();
    ctx.register(RecordingComponent::new("db", &log).arc()).await.unwrap();
    ctx.run().await.unwrap();

    let result = ctx.register(RecordingComponent::new("db", &log).arc()).await;
    assert!(matches!(result, Err(Error::DuplicateName { .. })));
    assert_eq!(events(&log), vec!["db:register", "db:boot"]);
}

#[tokio::test]
async fn test_register_hook_failure_leaves_component_registered() {
    let (ctx, _kernel) = context_with_kernel();
    let log = new_log();

    let result = ctx
        .register(
            RecordingComponent::new("db", &log)
                .failing_on(LifecyclePhase::Register)
                .arc(),
        )
        .await;

    match result {
        Err(Error::Hook { component, phase, .. }) => {
            assert_eq!(component, "db");
            assert_eq!(phase, LifecyclePhase::Register);
        }
        other => panic!("Expected Hook error, got {:?}", other),
    }
    assert!(ctx.contains_component("db").await, "No rollback on register failure");
}

#[tokio::test]
async fn test_run_boots_in_registration_order_then_runs_kernel() {
    let (ctx, kernel) = context_with_kernel();
    let log = new_log();
    for name in ["a", "b", "c", "d"] {
        ctx.register(RecordingComponent::new(name, &log).arc()).await.unwrap();
    }
    ctx.unregister_by_name("b").await.unwrap();
    log.lock().unwrap().clear();

    ctx.run().await.expect("Run should succeed");

    assert_eq!(events(&log), vec!["a:boot", "c:boot", "d:boot"]);
    assert!(ctx.is_booted());
    assert_eq!(kernel.runs(), 1);
}

#[tokio::test]
async fn test_boot_failure_aborts_sweep() {
    let (ctx, kernel) = context_with_kernel();
    let log = new_log();
    ctx.register(RecordingComponent::new("a", &log).arc()).await.unwrap();
    ctx.register(RecordingComponent::new("b", &log).arc()).await.unwrap();
    ctx.register(
        RecordingComponent::new("c", &log)
            .failing_on(LifecyclePhase::Boot)
            .arc(),
    )
    .await
    .unwrap();
    ctx.register(RecordingComponent::new("d", &log).arc()).await.unwrap();
    log.lock().unwrap().clear();

    let result = ctx.run().await;

    match result {
        Err(Error::Hook { component, phase, source }) => {
            assert_eq!(component, "c");
            assert_eq!(phase, LifecyclePhase::Boot);
            assert!(source.to_string().contains("c refused to boot"));
        }
        other => panic!("Expected Hook error, got {:?}", other),
    }
    assert_eq!(events(&log), vec!["a:boot", "b:boot", "c:boot"], "d must never boot");
    assert!(!ctx.is_booted(), "Failed sweep must not mark the context booted");
    assert_eq!(kernel.runs(), 0, "Kernel must not run after a failed sweep");

    // The lock was released: the registry is still usable.
    ctx.register(RecordingComponent::new("e", &log).arc()).await.unwrap();
    assert_eq!(events(&log).last().map(String::as_str), Some("e:register"));
}

#[tokio::test]
async fn test_run_without_kernel_boots_nothing() {
    let ctx = ApplicationContext::new(test_settings(), Vec::new()).unwrap();
    let log = new_log();
    ctx.register(RecordingComponent::new("db", &log).arc()).await.unwrap();

    let result = ctx.run().await;

    assert!(matches!(result, Err(Error::MissingKernel)));
    assert_eq!(events(&log), vec!["db:register"]);
    assert!(!ctx.is_booted());
}

#[tokio::test]
async fn test_run_twice_is_rejected() {
    let (ctx, kernel) = context_with_kernel();
    let log = new_log();
    ctx.register(RecordingComponent::new("db", &log).arc()).await.unwrap();

    ctx.run().await.unwrap();
    let second = ctx.run().await;

    assert!(matches!(second, Err(Error::AlreadyBooted)));
    assert_eq!(events(&log), vec!["db:register", "db:boot"]);
    assert_eq!(kernel.runs(), 1);
}

#[tokio::test]
async fn test_kernel_failure_is_wrapped_after_boot() {
    let log = new_log();
    let mut ctx = ApplicationContext::new(test_settings(), Vec::new()).unwrap();
    ctx.set_kernel(Arc::new(CountingKernel::failing()));
    ctx.register(RecordingComponent::new("db", &log).arc()).await.unwrap();

    let result = ctx.run().await;

    match result {
        Err(Error::Kernel { kernel, .. }) => assert_eq!(kernel, "counting"),
        other => panic!("Expected Kernel error, got {:?}", other),
    }
    assert!(ctx.is_booted(), "Boot sweep completed before the kernel ran");
}

#[tokio::test]
async fn test_register_after_boot_boots_only_new_component() {
    let (ctx, _kernel) = context_with_kernel();
    let log = new_log();
    ctx.register(RecordingComponent::new("a", &log).arc()).await.unwrap();
    ctx.run().await.unwrap();
    log.lock().unwrap().clear();

    ctx.register(RecordingComponent::new("late", &log).arc()).await.unwrap();

    assert_eq!(events(&log), vec!["late:register", "late:boot"]);
}

#[tokio::test]
async fn test_boot_failure_after_boot_keeps_component() {
    let (ctx, _kernel) = context_with_kernel();
    let log = new_log();
    ctx.run().await.unwrap();

    let result = ctx
        .register(
            RecordingComponent::new("late", &log)
                .failing_on(LifecyclePhase::Boot)
                .arc(),
        )
        .await;

    assert_eq!(result.unwrap_err().phase(), Some(LifecyclePhase::Boot));
    assert!(ctx.contains_component("late").await);
}

#[tokio::test]
async fn test_unregister_unknown_is_noop_in_any_state() {
    let (ctx, _kernel) = context_with_kernel();
    let log = new_log();
    let ghost = RecordingComponent::new("ghost", &log);

    ctx.unregister(&ghost).await.expect("Unregister before boot should be a no-op");
    ctx.run().await.unwrap();
    ctx.unregister(&ghost).await.expect("Unregister after boot should be a no-op");

    assert!(events(&log).is_empty());
}

#[tokio::test]
async fn test_unregister_before_boot_skips_shutdown() {
    let (ctx, _kernel) = context_with_kernel();
    let log = new_log();
    let component = Arc::new(RecordingComponent::new("db", &log));
    ctx.register(component.clone()).await.unwrap();

    ctx.unregister(&*component).await.unwrap();

    assert_eq!(events(&log), vec!["db:register", "db:unregister"]);
    assert!(!ctx.contains_component("db").await);
}

#[tokio::test]
async fn test_unregister_after_boot_runs_unregister_then_shutdown() {
    let (ctx, _kernel) = context_with_kernel();
    let log = new_log();
    ctx.register(RecordingComponent::new("db", &log).arc()).await.unwrap();
    ctx.run().await.unwrap();
    log.lock().unwrap().clear();

    ctx.unregister_by_name("db").await.unwrap();
    ctx.unregister_by_name("db").await.unwrap();

    assert_eq!(events(&log), vec!["db:unregister", "db:shutdown"]);
}

#[tokio::test]
async fn test_unregister_hook_failure_still_removes() {
    let (ctx, _kernel) = context_with_kernel();
    let log = new_log();
    ctx.register(
        RecordingComponent::new("db", &log)
            .failing_on(LifecyclePhase::Unregister)
            .arc(),
    )
    .await
    .unwrap();
    ctx.run().await.unwrap();

    let result = ctx.unregister_by_name("db").await;

    assert_eq!(result.unwrap_err().phase(), Some(LifecyclePhase::Unregister));
    assert!(!ctx.contains_component("db").await, "No re-insertion on failure");
    assert!(
        !events(&log).contains(&"db:shutdown".to_string()),
        "Shutdown is skipped once unregister fails"
    );
}

#[tokio::test]
async fn test_shutdown_hook_failure_still_removes() {
    let (ctx, _kernel) = context_with_kernel();
    let log = new_log();
    ctx.register(
        RecordingComponent::new("db", &log)
            .failing_on(LifecyclePhase::Shutdown)
            .arc(),
    )
    .await
    .unwrap();
    ctx.run().await.unwrap();

    let result = ctx.unregister_by_name("db").await;

    assert_eq!(result.unwrap_err().phase(), Some(LifecyclePhase::Shutdown));
    assert_eq!(ctx.component_count().await, 0);
}

#[tokio::test]
#[should_panic(expected = "failed to register component 'db'")]
async fn test_must_register_panics_on_duplicate() {
    let (ctx, _kernel) = context_with_kernel();
    let log = new_log();
    ctx.must_register(RecordingComponent::new("db", &log).arc()).await;
    ctx.must_register(RecordingComponent::new("db", &log).arc()).await;
}

/// Component whose register hook resolves a dependency from the container.
#[derive(Debug)]
struct ConfigAwareComponent {
    log: EventLog,
}

#[async_trait]
impl Component for ConfigAwareComponent {
    fn name(&self) -> &str {
        "config-aware"
    }

    async fn register(&self, ctx: &ApplicationContext) -> Result<()> {
        let info = ctx
            .container()
            .get::<crate::kernel::AppInfo>("app")
            .await
            .ok_or("app info missing")?;
        self.log.lock().unwrap().push(format!("resolved:{}", info.name));
        Ok(())
    }

    async fn unregister(&self, _ctx: &ApplicationContext) -> Result<()> {
        Ok(())
    }

    async fn boot(&self) -> Result<()> {
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_register_hook_can_use_container() {
    let (ctx, _kernel) = context_with_kernel();
    let log = new_log();

    ctx.register(Arc::new(ConfigAwareComponent { log: log.clone() })).await.unwrap();

    assert_eq!(events(&log), vec![format!("resolved:{}", ctx.name())]);
}

/// Component that sleeps inside `boot`, used to observe lock scope.
#[derive(Debug)]
struct SlowBootComponent {
    log: EventLog,
}

#[async_trait]
impl Component for SlowBootComponent {
    fn name(&self) -> &str {
        "slow"
    }

    async fn register(&self, _ctx: &ApplicationContext) -> Result<()> {
        Ok(())
    }

    async fn unregister(&self, _ctx: &ApplicationContext) -> Result<()> {
        Ok(())
    }

    async fn boot(&self) -> Result<()> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.log.lock().unwrap().push("slow:boot".to_string());
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_register_during_sweep_waits_for_sweep() {
    let (ctx, _kernel) = context_with_kernel();
    let ctx = Arc::new(ctx);
    let log = new_log();
    ctx.register(Arc::new(SlowBootComponent { log: log.clone() })).await.unwrap();

    let runner = {
        let ctx = ctx.clone();
        tokio::spawn(async move { ctx.run().await })
    };
    // Give the sweep time to take the lock.
    tokio::time::sleep(Duration::from_millis(10)).await;
    ctx.register(RecordingComponent::new("late", &log).arc()).await.unwrap();

    runner.await.unwrap().unwrap();
    // The late component could only get in after the sweep, so it was
    // booted individually rather than by the sweep.
    assert_eq!(events(&log), vec!["slow:boot", "late:register", "late:boot"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registration_same_name_single_winner() {
    let (ctx, _kernel) = context_with_kernel();
    let ctx = Arc::new(ctx);
    let log = new_log();

    let attempts = (0..16).map(|_| {
        let ctx = ctx.clone();
        let log = log.clone();
        tokio::spawn(async move { ctx.register(RecordingComponent::new("db", &log).arc()).await })
    });
    let results = futures::future::join_all(attempts).await;

    let successes = results.iter().filter(|r| matches!(r, Ok(Ok(())))).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Ok(Err(Error::DuplicateName { .. }))))
        .count();
    assert_eq!(successes, 1);
    assert_eq!(duplicates, 15);
    assert_eq!(events(&log), vec!["db:register"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_distinct_registrations_all_succeed() {
    let (ctx, _kernel) = context_with_kernel();
    let ctx = Arc::new(ctx);
    let log = new_log();

    let tasks = (0..32).map(|i| {
        let ctx = ctx.clone();
        let log = log.clone();
        tokio::spawn(async move {
            ctx.register(RecordingComponent::new(&format!("c{}", i), &log).arc()).await
        })
    });
    for result in futures::future::join_all(tasks).await {
        result.unwrap().unwrap();
    }

    assert_eq!(ctx.component_count().await, 32);
    ctx.run().await.unwrap();
    let boots = events(&log).iter().filter(|e| e.ends_with(":boot")).count();
    assert_eq!(boots, 32);
}
