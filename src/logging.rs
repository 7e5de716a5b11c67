//! Logging configuration for OlgaGPT

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{
    self,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::config::AppConfig;
use crate::Result;

const LOG_FILE_PREFIX: &str = "olgagpt.log";

/// Initialize console and daily-rolling file logging from configuration
///
/// `level_override` (e.g. from `--verbose`) takes priority over the config.
/// The returned guard must be held for as long as file output is wanted.
pub fn init_logging(config: &AppConfig, level_override: Option<&str>) -> Result<WorkerGuard> {
    let log_dir = Path::new(&config.logging.log_dir);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let level = level_override.unwrap_or(&config.logging.level);
    let env_filter = build_filter(Some(level));

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false); // No colors in file

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::OlgaGptError::Custom(format!("Failed to install logger: {e}")))?;

    tracing::info!(
        "Logging initialized with level: {} - console and file output enabled",
        level
    );
    tracing::info!(
        "Log files will be saved to: {}/{}.YYYY-MM-DD",
        log_dir.display(),
        LOG_FILE_PREFIX
    );

    Ok(guard)
}

/// Initialize simple stderr logging for tools and tests
pub fn init_simple_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(None))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| crate::OlgaGptError::Custom(format!("Failed to install logger: {e}")))?;

    tracing::info!("Simple logging initialized");
    Ok(())
}

/// `RUST_LOG` wins when no explicit level is given
fn build_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::new(format!("{level},olgagpt={level}")),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,olgagpt=debug")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_initialization() {
        // A second initialization in the same process reports an error instead of panicking
        let _ = init_simple_logging();
        assert!(init_simple_logging().is_err());
    }

    #[test]
    fn test_filter_with_explicit_level() {
        let filter = build_filter(Some("warn"));
        assert!(filter.to_string().contains("olgagpt=warn"));
    }
}
