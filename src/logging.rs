// src/logging.rs

use crate::config::Config;
use crate::errors::{ChatError, ChatResult};
use crate::models::ApiCallLog;
use flexi_logger::{detailed_format, FileSpec, Logger, LoggerHandle};
use std::path::PathBuf;

/// Starts file logging. The terminal belongs to the UI, so nothing is
/// written to stdout. Keep the returned handle alive for the whole run.
pub fn init(config: &Config) -> ChatResult<LoggerHandle> {
    let directory = log_dir()?;

    let handle = Logger::try_with_env_or_str(&config.log_level)?
        .log_to_file(
            FileSpec::default()
                .directory(directory)
                .basename("chatdesk")
                .suppress_timestamp(),
        )
        .append()
        .format(detailed_format)
        .start()?;

    Ok(handle)
}

fn log_dir() -> ChatResult<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .ok_or_else(|| ChatError::config_error("Could not determine cache directory"))?;

    Ok(cache_dir.join("chatdesk"))
}

/// Logs an API call as a single line.
pub fn log_api_call(log: &ApiCallLog) {
    log::info!(
        target: "chatdesk::api",
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    );
}
