//! File system paths for the client.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

const CLIENT_HOME_DIR: &str = ".food-delivery";
const LOG_FILE_NAME: &str = "client.jsonl";

/// Manages file system paths for the client.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory for client files (~/.food-delivery)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.food-delivery`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(CLIENT_HOME_DIR),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.food-delivery).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (~/.food-delivery/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the logs directory (~/.food-delivery/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the JSONL log file path (~/.food-delivery/logs/client.jsonl).
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE_NAME)
    }

    /// Get the sessions directory (~/.food-delivery/sessions).
    pub fn sessions_dir(&self) -> PathBuf {
        self.base_dir.join("sessions")
    }

    /// Get the session file for a backend origin.
    ///
    /// One file per origin keeps tokens for different backends apart.
    pub fn session_file(&self, origin: &str) -> PathBuf {
        self.sessions_dir()
            .join(format!("{}.json", sanitize_origin(origin)))
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.logs_dir())?;
        std::fs::create_dir_all(self.sessions_dir())?;
        Ok(())
    }
}

/// Reduce an origin such as `https://food.example.com:8443` to a file stem.
fn sanitize_origin(origin: &str) -> String {
    let stripped = origin
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');

    let sanitized: String = stripped
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "default".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_paths_with_base_dir() {
        let base = PathBuf::from("/tmp/test-food-delivery");
        let paths = Paths::with_base_dir(base.clone());

        assert_eq!(paths.base_dir(), &base);
        assert_eq!(paths.config_file(), base.join("config.json"));
        assert_eq!(paths.logs_dir(), base.join("logs"));
        assert_eq!(paths.log_file(), base.join("logs/client.jsonl"));
        assert_eq!(paths.sessions_dir(), base.join("sessions"));
    }

    #[test]
    fn test_session_file_per_origin() {
        let paths = Paths::with_base_dir(PathBuf::from("/base"));

        assert_eq!(
            paths.session_file("http://localhost"),
            PathBuf::from("/base/sessions/localhost.json")
        );
        assert_eq!(
            paths.session_file("https://Food.Example.com:8443/"),
            PathBuf::from("/base/sessions/food.example.com_8443.json")
        );
        assert_ne!(
            paths.session_file("http://a.example"),
            paths.session_file("http://b.example")
        );
        assert_eq!(
            paths.session_file(""),
            PathBuf::from("/base/sessions/default.json")
        );
    }

    #[test]
    fn test_ensure_dirs_creates_directories() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("food-delivery");
        let paths = Paths::with_base_dir(base.clone());

        assert!(!base.exists());

        paths.ensure_dirs().unwrap();
        // Idempotent
        paths.ensure_dirs().unwrap();

        assert!(base.is_dir());
        assert!(paths.logs_dir().is_dir());
        assert!(paths.sessions_dir().is_dir());
    }
}
