//! Logging initialization for the client.
//!
//! All client binaries share the observability crate's JSONL sink under
//! `~/.food-delivery/logs/client.jsonl`.

use crate::Paths;

/// Initialize the logging system for the CLI.
///
/// This sets up tracing with:
/// - Structured JSONL output to the client log file
/// - Log level from RUST_LOG env var or the provided default
///
/// The terminal is left to command output; stderr logging only kicks in when
/// the log file cannot be opened.
///
/// # Example
///
/// ```ignore
/// init_logging("info", &paths);
/// tracing::info!("client started");
/// ```
pub fn init_logging(level: &str, paths: &Paths) {
    init_logging_for_service("cli", level, paths, false);
}

/// Initialize logging with a custom service name, optionally mirrored to stderr.
pub fn init_logging_for_service(service_name: &str, level: &str, paths: &Paths, also_stderr: bool) {
    let log_path = paths.ensure_dirs().ok().map(|_| paths.log_file());

    observability::init_with_config(observability::LogConfig {
        service_name: service_name.into(),
        default_level: parse_level(level).to_string().to_lowercase(),
        log_path,
        also_stderr,
    });
}

/// Parse a log level string into a tracing Level.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
