use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kiln: application bootstrap runtime
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Print "pong" and exit
    #[arg(long)]
    pub ping: bool,

    /// Override the application name
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Override the application version label
    #[arg(long = "app-version", global = true)]
    pub app_version: Option<String>,

    /// Enable debug mode (also raises the default log level)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Directory configuration files are loaded from
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print identity and resolved paths
    Info,
    /// List the components the host registers
    Components,
    /// Boot the components and run the tick kernel
    Run(RunArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Number of kernel ticks before the kernel returns
    #[arg(long, default_value_t = 3)]
    pub ticks: u32,

    /// Delay between ticks in milliseconds
    #[arg(long, default_value_t = 100)]
    pub interval_ms: u64,

    /// Configuration to load before registering components (e.g. "greeter")
    #[arg(long)]
    pub config: Vec<String>,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            ticks: 3,
            interval_ms: 100,
            config: Vec::new(),
        }
    }
}
