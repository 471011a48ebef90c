//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! The level comes from the `MNESH_LOG` environment variable (e.g. "info",
//! "debug") and defaults to `warn`, so interactive output stays clean.
//! Events go to stderr.

use anyhow::Result;
use tracing_subscriber::fmt;

pub const LOG_ENV: &str = "MNESH_LOG";

/// Initialise global logging subscriber.
///
/// Call once at startup.
pub fn init_logging() -> Result<()> {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|s| parse_level_str(&s))
        .unwrap_or(tracing::Level::WARN);

    fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(())
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
