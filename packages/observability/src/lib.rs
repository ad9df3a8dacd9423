//! # Observability
//!
//! Centralized logging setup for the food delivery client.
//!
//! Binaries call `observability::init()` once at startup and use the standard
//! `tracing` macros everywhere else. Library crates never install a subscriber.
//!
//! Every event is written as one JSON object per line to
//! `~/.food-delivery/logs/client.jsonl`, so the log can be followed with
//! `tail -f ~/.food-delivery/logs/client.jsonl | jq`. Fields whose names look
//! like credentials (`access_token`, `authorization`, `password`, ...) are
//! redacted before they reach the file.
//!
//! ## Usage
//!
//! ```rust,ignore
//! fn main() {
//!     observability::init_with_config(observability::LogConfig {
//!         service_name: "cli".into(),
//!         default_level: "debug".into(),
//!         also_stderr: true,
//!         ..Default::default()
//!     });
//!     tracing::info!("ready");
//! }
//! ```

mod json_layer;
mod redact;
mod writer;

use std::io;
use std::path::PathBuf;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use json_layer::JsonLayer;
pub use redact::{is_sensitive_key, sanitize_value};
pub use writer::LogFile;

/// Directory under the home directory that holds client runtime files.
pub const CLIENT_HOME_DIR: &str = ".food-delivery";

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service (e.g., "cli", "tests").
    /// Included in every log line for filtering.
    pub service_name: String,

    /// Default log level filter (e.g., "debug", "info", "warn").
    /// Can be overridden by `RUST_LOG` environment variable.
    pub default_level: String,

    /// Optional custom log file path.
    /// Defaults to `~/.food-delivery/logs/client.jsonl`.
    pub log_path: Option<PathBuf>,

    /// Also emit human-readable logs to stderr.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            log_path: None,
            also_stderr: false,
        }
    }
}

/// Default JSONL log location, if a home directory can be resolved.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(CLIENT_HOME_DIR)
            .join("logs")
            .join("client.jsonl")
    })
}

/// Initialize the observability layer with default settings.
pub fn init(service_name: &str) {
    init_with_config(LogConfig {
        service_name: service_name.into(),
        ..Default::default()
    });
}

/// Initialize the observability layer with custom configuration.
///
/// If the log file cannot be opened, logging degrades to stderr only.
/// Calling this more than once is a no-op after the first successful call.
pub fn init_with_config(config: LogConfig) {
    let env_filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.default_level))
    };

    let log_path = config.log_path.clone().or_else(default_log_path);
    let (file_layer, open_error) = match log_path.as_deref().map(LogFile::open) {
        Some(Ok(file)) => (
            Some(JsonLayer::new(config.service_name.clone(), file).with_filter(env_filter())),
            None,
        ),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };

    // Without a file the only sink left is stderr.
    let stderr_enabled = config.also_stderr || file_layer.is_none();
    let stderr_layer = stderr_enabled.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .with_writer(io::stderr)
            .with_filter(env_filter())
    });

    let installed = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if !installed {
        return;
    }

    match (&log_path, open_error) {
        (Some(path), None) => {
            tracing::debug!(log_path = %path.display(), "observability initialized");
        }
        (Some(path), Some(error)) => {
            tracing::warn!(
                log_path = %path.display(),
                error = %error,
                "could not open log file, logging to stderr only"
            );
        }
        (None, _) => {
            tracing::warn!("no home directory, logging to stderr only");
        }
    }
}

/// Re-export tracing macros for convenience.
pub use tracing::{debug, error, info, instrument, trace, warn};

/// Re-export Level for advanced filtering.
pub use tracing::Level;
