mod cli;
mod demo;
mod logging;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use kiln_core::options::{self, BoxedOption};
use kiln_core::{AppSettings, ApplicationContext, KernelError};
use log::{error, info};

use crate::cli::{CliArgs, Commands, RunArgs};
use crate::demo::TickKernel;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    let settings = match AppSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to read application settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(args.debug || settings.debug) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = match args.command {
        Some(Commands::Info) => build_context(&args, settings, None).map(|ctx| print_info(&ctx)),
        Some(Commands::Components) => list_components(&args, settings).await,
        Some(Commands::Run(ref run)) => run_app(&args, settings, run).await,
        None => run_app(&args, settings, &RunArgs::default()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Application error: {}", e);
            eprintln!("Application error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cli_options(args: &CliArgs) -> Vec<BoxedOption> {
    let mut opts = Vec::new();
    if let Some(name) = &args.name {
        opts.push(options::with_name(name.clone()));
    }
    if let Some(version) = &args.app_version {
        opts.push(options::with_version(version.clone()));
    }
    if args.debug {
        opts.push(options::with_debug(true));
    }
    if let Some(path) = &args.config_path {
        opts.push(options::with_config_path(path.clone()));
    }
    opts
}

fn build_context(
    args: &CliArgs,
    settings: AppSettings,
    run: Option<&RunArgs>,
) -> Result<ApplicationContext, KernelError> {
    let mut opts = cli_options(args);
    if let Some(run) = run {
        let kernel = TickKernel::new(run.ticks, Duration::from_millis(run.interval_ms));
        opts.push(options::with_kernel(Arc::new(kernel)));
    }
    ApplicationContext::new(settings, opts)
}

fn print_info(ctx: &ApplicationContext) {
    println!("Name: {}", ctx.name());
    println!("Version: {}", ctx.version());
    println!("Debug: {}", ctx.debug());
    println!("Root: {}", ctx.root().display());
    println!("Working directory: {}", ctx.working_directory().display());
    println!("Storage path: {}", ctx.storage_path().display());
    println!("Resource path: {}", ctx.resource_path().display());
    println!("Config path: {}", ctx.config_path().display());
}

async fn list_components(args: &CliArgs, settings: AppSettings) -> Result<(), KernelError> {
    let ctx = build_context(args, settings, None)?;
    for component in demo::default_components() {
        ctx.register(component).await?;
    }
    println!("Registered components:");
    for name in ctx.component_names().await {
        println!("  - {}", name);
    }
    Ok(())
}

async fn run_app(args: &CliArgs, settings: AppSettings, run: &RunArgs) -> Result<(), KernelError> {
    println!("Initializing application...");
    let ctx = build_context(args, settings, Some(run))?;

    for name in &run.config {
        info!("Loading configuration '{}'", name);
        ctx.configure(name)?;
    }

    let components = demo::default_components();
    for component in &components {
        ctx.register(component.clone()).await?;
    }

    ctx.run().await?;

    println!("Shutting down application...");
    for component in components.iter().rev() {
        ctx.unregister(&**component).await?;
    }
    Ok(())
}
