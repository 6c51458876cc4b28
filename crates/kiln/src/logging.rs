use std::error::Error;

use tracing_subscriber::EnvFilter;

/// Routes the `log` facade into a `tracing` fmt subscriber on stderr.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` in debug mode
/// and `info` elsewhere.
pub fn init(debug: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_log::LogTracer::init()?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
