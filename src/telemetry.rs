#[cfg(test)]
#[path = "telemetry_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::anyhow;
use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;

/// `COMPILOT_LOG_DIR`, falling back to the user cache directory.
pub fn default_log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("COMPILOT_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(|| return path::PathBuf::from("."))
        .join("compilot");
}

pub fn is_enabled(rust_log: &str) -> bool {
    return rust_log.contains("compilot");
}

/// Writes JSON debug logs to `<log_dir>/debug.log` when `RUST_LOG` mentions
/// compilot. Keep the returned guard alive for as long as logs should flush.
pub fn init(log_dir: &path::Path) -> Result<Option<WorkerGuard>> {
    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| return "".to_string());
    if !is_enabled(&rust_log) {
        return Ok(None);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "debug.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(writer)
        .try_init()
        .map_err(|err| return anyhow!(err.to_string()))?;

    return Ok(Some(guard));
}
