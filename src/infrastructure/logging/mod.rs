// Logging module - Logging infrastructure
use crate::domain::error::{GpsReadError, GpsReadResult};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a configured level name onto a tracing level, falling back to info.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.to_ascii_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" => tracing::Level::WARN,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => tracing::Level::INFO,
    }
}

/// Initialize logging system
///
/// Logs go to stderr so stdout carries nothing but sentences. `RUST_LOG`
/// takes precedence over the configured level.
pub fn init_logging(log_level: &str, verbose: bool) -> GpsReadResult<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        parse_level(log_level)
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gpsread={}", level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .try_init()
        .map_err(|e| GpsReadError::Config {
            message: format!("Failed to initialize logging: {}", e),
        })?;

    tracing::debug!("gpsread logging initialized at {}", level);
    Ok(())
}
