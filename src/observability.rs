use crate::error::Result;
use anyhow::Context;
use homeserver_common::config::{LogConfig, ObservabilityConfig};
use std::fs;
use std::io::IsTerminal;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

const LOG_FILE_NAME: &str = "homeserver.log";

/// Guard for the non-blocking log writer. Flushes on drop.
#[derive(Default)]
pub struct ObservabilityGuard {
    _log_guard: Option<WorkerGuard>,
}

/// Initialize logging based on configuration
pub fn init_observability(config: &ObservabilityConfig) -> Result<ObservabilityGuard> {
    let mut guard = ObservabilityGuard::default();

    if config.is_file_logging() {
        fs::create_dir_all(&config.log.path)
            .with_context(|| format!("Failed to create log directory: {}", config.log.path))?;
        let (non_blocking, worker_guard) = build_file_writer(&config.log, config.should_rotate_logs())?;
        guard._log_guard = Some(worker_guard);
        init_subscriber_with_writer(non_blocking, false, config);
    } else {
        let use_ansi = std::io::stdout().is_terminal();
        init_subscriber_with_writer(std::io::stdout, use_ansi, config);
    }

    Ok(guard)
}

/// Create an EnvFilter from config, with RUST_LOG taking precedence
fn create_env_filter(config: &ObservabilityConfig) -> EnvFilter {
    let directive = std::env::var("RUST_LOG")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| config.filter_level.clone());

    EnvFilter::try_new(&directive).unwrap_or_else(|_| {
        eprintln!("Failed to parse filter directive: {directive}. Falling back to default: info");
        EnvFilter::new("info")
    })
}

fn init_subscriber_with_writer<W>(writer: W, use_ansi: bool, config: &ObservabilityConfig)
where
    W: for<'a> fmt::MakeWriter<'a> + Send + Sync + 'static,
{
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(use_ansi)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(create_env_filter(config))
        .with(fmt_layer)
        .try_init()
        .ok();
}

fn build_file_writer(log_config: &LogConfig, rotate: bool) -> Result<(NonBlocking, WorkerGuard)> {
    if rotate {
        let file_appender = tracing_appender::rolling::daily(&log_config.path, LOG_FILE_NAME);
        Ok(tracing_appender::non_blocking(file_appender))
    } else {
        let log_file_path = std::path::Path::new(&log_config.path).join(LOG_FILE_NAME);
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file_path)
            .with_context(|| format!("Failed to open log file: {}", log_file_path.display()))?;
        Ok(tracing_appender::non_blocking(file))
    }
}
