// Logging setup - daily rolling file log, optional stderr mirror for dev runs
// The TUI owns stdout, so nothing here ever writes there

use anyhow::Result;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,localtube=debug";

/// Start the global subscriber.
///
/// Logs go to `<log_dir>/localtube.log.<date>`. With `dev` set they are also
/// mirrored to stderr. Keep the returned guard alive for the whole run or
/// buffered lines are lost on exit.
pub fn init_logging(log_dir: &Path, dev: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    // Daily rotating file appender
    let file_appender = tracing_appender::rolling::daily(log_dir, "localtube.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_filter(env_filter());

    let stderr_layer = dev.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(env_filter())
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
