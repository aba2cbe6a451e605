//! File-backed logging setup.
//!
//! Command output goes to stdout; diagnostics go to `${UDX_HOME}/logs/`,
//! gated by the `UDX_LOG` env var (`EnvFilter` syntax, default `info`).

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::paths;

/// Installs the global tracing subscriber.
///
/// Returns the appender guard; dropping it flushes buffered log lines, so
/// the caller holds it for the life of the process. A second call in the
/// same process is a no-op.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init() -> Result<WorkerGuard> {
    let logs_dir = paths::logs_dir();
    fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create directory {}", logs_dir.display()))?;

    let env_filter = EnvFilter::try_from_env("UDX_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::daily(logs_dir, "udx.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init();

    Ok(guard)
}
