use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::{
    ConfigError, ConfigFormat, ConfigParser, ConfigProvider, ConfigRepository,
    DefaultConfigRepository, FileProvider,
};
use crate::kernel::component::Component;
use crate::kernel::constants;
use crate::kernel::container::Container;
use crate::kernel::error::{Error, LifecyclePhase, Result};
use crate::kernel::options::ContextOption;
use crate::kernel::registry::{RegistryError, SharedComponentRegistry};
use crate::kernel::runner::Kernel;
use crate::kernel::settings::AppSettings;

/// Identity and path metadata of a context, published in its container
/// under `"app"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub debug: bool,
    pub root: PathBuf,
    pub working_dir: PathBuf,
    pub storage_path: PathBuf,
    pub resource_path: PathBuf,
    pub config_path: PathBuf,
}

/// Composition root owning configuration, the kernel and the components.
///
/// Components are added with [`register`](ApplicationContext::register) and
/// removed with [`unregister`](ApplicationContext::unregister), from any task,
/// before or after [`run`](ApplicationContext::run). `run` boots everything
/// registered so far in registration order and then hands control to the
/// kernel. Components registered afterwards are booted on the spot.
///
/// All lifecycle operations serialize on one registry lock that stays held
/// while hooks execute (see [`Component`] for the reentrancy constraint).
pub struct ApplicationContext {
    pub(crate) name: String,
    pub(crate) version: String,
    pub(crate) debug: bool,
    pub(crate) root: PathBuf,
    pub(crate) working_dir: PathBuf,
    pub(crate) storage_path: PathBuf,
    pub(crate) resource_path: PathBuf,
    pub(crate) config_path: PathBuf,
    pub(crate) config_format: ConfigFormat,
    config: Arc<dyn ConfigRepository>,
    kernel: Option<Arc<dyn Kernel>>,
    components: SharedComponentRegistry,
    container: Container,
    // Only written while the registry lock is held.
    booted: AtomicBool,
}

impl ApplicationContext {
    /// Builds a context from `settings`, then applies `options` in order.
    ///
    /// The first failing option aborts construction and its error is
    /// returned; the half-built context is dropped.
    pub fn new<I>(settings: AppSettings, options: I) -> Result<Self>
    where
        I: IntoIterator<Item = Box<dyn ContextOption>>,
    {
        let mut ctx = ApplicationContext {
            name: settings.name,
            version: settings.version,
            debug: settings.debug,
            root: settings.root,
            working_dir: settings.working_dir,
            storage_path: settings.storage_path,
            resource_path: settings.resource_path,
            config_path: settings.config_path,
            config_format: settings.config_format,
            config: Arc::new(DefaultConfigRepository::new()),
            kernel: None,
            components: SharedComponentRegistry::new(),
            container: Container::new(),
            booted: AtomicBool::new(false),
        };

        for option in options {
            option.apply(&mut ctx)?;
        }

        ctx.publish();
        log::info!("Initializing {} v{}", ctx.name, ctx.version);
        log::debug!("Using config directory: {}", ctx.config_path.display());
        Ok(ctx)
    }

    /// Builds a context from a snapshot of the `APP_*` environment variables.
    pub fn from_env<I>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = Box<dyn ContextOption>>,
    {
        Self::new(AppSettings::from_env()?, options)
    }

    // Exposes the context's collaborators to components through the container.
    fn publish(&mut self) {
        let info = Arc::new(self.info());
        let config = Arc::new(self.config.clone());
        self.container.set_mut(constants::CONTAINER_KEY_APP, info);
        self.container.set_mut(constants::CONTAINER_KEY_CONFIG, config);
        if let Some(kernel) = self.kernel.clone() {
            self.container.set_mut(constants::CONTAINER_KEY_KERNEL, Arc::new(kernel));
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_dir
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    pub fn resource_path(&self) -> &Path {
        &self.resource_path
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config_format(&self) -> ConfigFormat {
        self.config_format
    }

    /// Snapshot of identity and path metadata
    pub fn info(&self) -> AppInfo {
        AppInfo {
            name: self.name.clone(),
            version: self.version.clone(),
            debug: self.debug,
            root: self.root.clone(),
            working_dir: self.working_dir.clone(),
            storage_path: self.storage_path.clone(),
            resource_path: self.resource_path.clone(),
            config_path: self.config_path.clone(),
        }
    }

    pub fn config(&self) -> &Arc<dyn ConfigRepository> {
        &self.config
    }

    /// Replaces the configuration repository and republishes it.
    pub fn set_config(&mut self, config: Arc<dyn ConfigRepository>) {
        self.config = config;
        self.container
            .set_mut(constants::CONTAINER_KEY_CONFIG, Arc::new(self.config.clone()));
    }

    pub fn kernel(&self) -> Option<&Arc<dyn Kernel>> {
        self.kernel.as_ref()
    }

    /// Sets the kernel and publishes it in the container under `"kernel"`.
    ///
    /// Takes `&mut self`, so the kernel is fixed before the context is shared.
    pub fn set_kernel(&mut self, kernel: Arc<dyn Kernel>) {
        self.container
            .set_mut(constants::CONTAINER_KEY_KERNEL, Arc::new(kernel.clone()));
        self.kernel = Some(kernel);
    }

    /// Dependency lookup container.
    ///
    /// Pre-populated with `"app"` ([`AppInfo`]), `"config"`
    /// (`Arc<dyn ConfigRepository>`) and, once set, `"kernel"`
    /// (`Arc<dyn Kernel>`).
    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    /// Whether the boot sweep of [`run`](ApplicationContext::run) completed.
    pub fn is_booted(&self) -> bool {
        self.booted.load(Ordering::Acquire)
    }

    /// Names of registered components in registration order.
    pub async fn component_names(&self) -> Vec<String> {
        self.components.lock().await.names()
    }

    pub async fn contains_component(&self, name: &str) -> bool {
        self.components.lock().await.contains(name)
    }

    pub async fn component_count(&self) -> usize {
        self.components.lock().await.len()
    }

    /// Adds `component` and runs its `register` hook.
    ///
    /// If the context is already booted the component is booted right after.
    /// A failing hook leaves the component registered; call
    /// [`unregister`](ApplicationContext::unregister) to roll back.
    pub async fn register(&self, component: Arc<dyn Component>) -> Result<()> {
        let name = component.name().to_string();
        let mut registry = self.components.lock().await;

        registry
            .add(&name, component.clone())
            .map_err(|e| match e {
                RegistryError::DuplicateName { name } => Error::DuplicateName { name },
                other => Error::Registry(other),
            })?;
        log::debug!("Registered component: {}", name);

        component
            .register(self)
            .await
            .map_err(|e| Error::hook(&name, LifecyclePhase::Register, e))?;

        if self.is_booted() {
            log::info!("Booting late component: {}", name);
            component
                .boot()
                .await
                .map_err(|e| Error::hook(&name, LifecyclePhase::Boot, e))?;
        }
        Ok(())
    }

    /// Like [`register`](ApplicationContext::register) but panics on failure.
    pub async fn must_register(&self, component: Arc<dyn Component>) {
        let name = component.name().to_string();
        if let Err(e) = self.register(component).await {
            panic!("failed to register component '{}': {}", name, e);
        }
    }

    /// Removes the component registered under `component.name()`.
    ///
    /// See [`unregister_by_name`](ApplicationContext::unregister_by_name).
    pub async fn unregister(&self, component: &dyn Component) -> Result<()> {
        self.unregister_by_name(component.name()).await
    }

    /// Removes the component registered under `name`, runs its `unregister`
    /// hook and, if the context is booted, its `shutdown` hook.
    ///
    /// Unknown names are a no-op. The component is out of the registry before
    /// any hook runs and is not re-inserted if a hook fails.
    pub async fn unregister_by_name(&self, name: &str) -> Result<()> {
        let mut registry = self.components.lock().await;
        if !registry.contains(name) {
            return Ok(());
        }

        let component = registry.remove(name)?;
        log::debug!("Unregistered component: {}", name);

        component
            .unregister(self)
            .await
            .map_err(|e| Error::hook(name, LifecyclePhase::Unregister, e))?;

        if self.is_booted() {
            log::info!("Shutting down component: {}", name);
            component
                .shutdown()
                .await
                .map_err(|e| Error::hook(name, LifecyclePhase::Shutdown, e))?;
        }
        Ok(())
    }

    /// Boots every registered component in registration order, marks the
    /// context booted and runs the kernel.
    ///
    /// The first boot failure stops the sweep: later components are not
    /// booted, the context stays un-booted and the kernel is not run.
    pub async fn run(&self) -> Result<()> {
        let kernel = self.kernel.clone().ok_or(Error::MissingKernel)?;

        {
            let registry = self.components.lock().await;
            if self.is_booted() {
                return Err(Error::AlreadyBooted);
            }

            let components = registry.values();
            log::info!("Booting {} component(s)...", components.len());
            for component in components {
                log::debug!("Booting component: {}", component.name());
                component
                    .boot()
                    .await
                    .map_err(|e| Error::hook(component.name(), LifecyclePhase::Boot, e))?;
            }
            self.booted.store(true, Ordering::Release);
            log::info!("Component boot complete.");
        }

        log::info!("Running kernel: {}", kernel.name());
        kernel.run().await.map_err(|e| Error::Kernel {
            kernel: kernel.name().to_string(),
            source: Box::new(e),
        })
    }

    /// Loads `<config_path>/<name>` into the configuration repository.
    ///
    /// When `name` has no extension the configured default format's extension
    /// is appended. The namespace is the file stem, so `configure("db")` and
    /// `configure("db.toml")` both load into `"db"`.
    pub fn configure(&self, name: &str) -> Result<()> {
        let file_name = if Path::new(name).extension().is_some() {
            name.to_string()
        } else {
            format!("{}.{}", name, self.config_format.extension())
        };
        let path = self.config_path.join(file_name);

        let format = ConfigFormat::from_path(&path)
            .ok_or_else(|| ConfigError::UnsupportedConfigFormat(path.display().to_string()))?;
        let namespace = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.configure_with(&namespace, &FileProvider::new(path), &format)
    }

    /// Loads configuration from an arbitrary provider and parser.
    pub fn configure_with(
        &self,
        namespace: &str,
        provider: &dyn ConfigProvider,
        parser: &dyn ConfigParser,
    ) -> Result<()> {
        self.config.load_at(namespace, provider, parser)?;
        Ok(())
    }
}

impl fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("debug", &self.debug)
            .field("root", &self.root)
            .field("kernel", &self.kernel.as_ref().map(|k| k.name().to_string()))
            .field("components", &self.components)
            .field("booted", &self.is_booted())
            .finish()
    }
}
