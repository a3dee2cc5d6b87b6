use std::path::Path;

use color_eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::PROJECT_NAME;

pub const LOG_FILE: &str = "grid-console.log";

/// Filter from `GRID_CONSOLE_LOG`, then `RUST_LOG`, then `info`.
pub fn env_filter() -> EnvFilter {
    let log_env = format!("{}_LOG", PROJECT_NAME.as_str());
    std::env::var(&log_env)
        .or_else(|_| std::env::var(EnvFilter::DEFAULT_ENV))
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Log into `<data_dir>/grid-console.log`. stdout stays free for HTML output and the
/// terminal UI. The returned guard must live until exit so the file is flushed.
pub fn init(data_dir: &Path) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(data_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::Layer::default()
        .with_target(false)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(non_blocking)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(guard)
}
