//! Configuration management for the client.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default REST API base URL (can be overridden at compile time via FOOD_DELIVERY_DEFAULT_API_URL).
pub const DEFAULT_API_BASE_URL: &str = match option_env!("FOOD_DELIVERY_DEFAULT_API_URL") {
    Some(url) => url,
    None => "http://localhost/api",
};

/// Default auth service base URL (can be overridden at compile time via FOOD_DELIVERY_DEFAULT_AUTH_URL).
pub const DEFAULT_AUTH_BASE_URL: &str = match option_env!("FOOD_DELIVERY_DEFAULT_AUTH_URL") {
    Some(url) => url,
    None => "http://localhost/api/auth",
};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Total time budget for a single HTTP request, renewal included.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Time budget for establishing a connection.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const ENV_LOG_LEVEL: &str = "FOOD_DELIVERY_LOG_LEVEL";
const ENV_API_URL: &str = "FOOD_DELIVERY_API_URL";
const ENV_AUTH_URL: &str = "FOOD_DELIVERY_AUTH_URL";
const ENV_ADMIN_URL: &str = "FOOD_DELIVERY_ADMIN_URL";
const ENV_TIMEOUT_SECS: &str = "FOOD_DELIVERY_TIMEOUT_SECS";

/// Main client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Base URL of the core REST API (restaurants, cart, orders, ...).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Base URL of the auth service (login, signup, token refresh, users/me).
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,
    /// Base URL of the admin panel API. Derived from `auth_base_url` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_base_url: Option<String>,
    /// Total per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_auth_base_url() -> String {
    DEFAULT_AUTH_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api_base_url: default_api_base_url(),
            auth_base_url: default_auth_base_url(),
            admin_base_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Create a new Config with default values, then override from environment.
    pub fn new() -> Self {
        let mut config = Self::default();
        config.load_from_env();
        config
    }

    /// Load configuration from the config file (if present), then apply
    /// environment overrides and validate.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let config_path = paths.config_file();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Override configuration from process environment variables.
    fn load_from_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |name: &str| lookup(name).and_then(non_empty);

        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = log_level;
        }
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(url) = lookup(ENV_AUTH_URL) {
            self.auth_base_url = url;
        }
        if let Some(url) = lookup(ENV_ADMIN_URL) {
            self.admin_base_url = Some(url);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).and_then(|raw| raw.parse::<u64>().ok()) {
            self.request_timeout_secs = secs;
        }
    }

    /// Check that every URL parses and the timeouts are usable.
    pub fn validate(&self) -> CoreResult<()> {
        self.api_base_url()?;
        self.auth_base_url()?;
        self.admin_base_url()?;

        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(CoreError::Config(
                "connect_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the core API base URL as a parsed URL.
    pub fn api_base_url(&self) -> CoreResult<Url> {
        parse_base(&self.api_base_url)
    }

    /// Get the auth service base URL as a parsed URL.
    pub fn auth_base_url(&self) -> CoreResult<Url> {
        parse_base(&self.auth_base_url)
    }

    /// Get the admin API base URL.
    ///
    /// Without an explicit value, `/auth` in the auth base URL is swapped for
    /// `/admin` (`http://host/api/auth` becomes `http://host/api/admin`). A
    /// trailing `/auth` segment is preferred over an earlier match. An auth URL
    /// with no `/auth` at all is used as is.
    pub fn admin_base_url(&self) -> CoreResult<Url> {
        if let Some(explicit) = &self.admin_base_url {
            return parse_base(explicit);
        }

        let auth = self.auth_base_url.trim_end_matches('/');
        let derived = match auth.strip_suffix("/auth") {
            Some(prefix) => format!("{prefix}/admin"),
            None => auth.replacen("/auth", "/admin", 1),
        };
        parse_base(&derived)
    }

    /// Total per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Connection establishment timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn parse_base(raw: &str) -> CoreResult<Url> {
    let url = Url::parse(raw.trim_end_matches('/'))?;
    if url.cannot_be_a_base() {
        return Err(CoreError::Config(format!("{raw} cannot be used as a base URL")));
    }
    Ok(url)
}

fn non_empty(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
