//! Shared state built once per invocation.

use std::sync::Arc;

use api_client::{ApiClient, SessionEvent, SessionManager};
use api_types::{Role, User};
use client_config_and_utils::{Config, Paths};
use client_storage::{open_session_store, SessionStore};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{CliError, CliResult};
use crate::output::{self, OutputFormat};

/// Client and session for the current command.
pub struct AppState {
    pub config: Config,
    pub format: OutputFormat,
    pub client: ApiClient,
    pub session: SessionManager,
}

impl AppState {
    /// Open the session file for the configured backend and build the client.
    pub fn init(paths: &Paths, config: Config, format: OutputFormat) -> CliResult<Self> {
        paths.ensure_dirs()?;

        let origin = config.api_base_url()?.origin().ascii_serialization();
        let session_file = paths.session_file(&origin);
        debug!(session_file = %session_file.display(), "Opening session store");

        let store: Arc<dyn SessionStore> = Arc::new(open_session_store(session_file)?);
        let client = ApiClient::new(&config, store)?;

        client.on_session_event(|event| match event {
            SessionEvent::LoggedIn { user } => {
                info!(user_id = ?user.map(|u| u.id), "Session established");
            }
            SessionEvent::Renewed => debug!("Access token renewed"),
            SessionEvent::SessionExpired => warn!("Session expired, stored credentials cleared"),
            SessionEvent::LoggedOut => info!("Session cleared"),
        });
        client.on_auth_state_change(|change| {
            debug!(from = ?change.previous, to = ?change.state, "Auth state changed");
        });

        Ok(Self {
            session: SessionManager::new(client.clone()),
            config,
            format,
            client,
        })
    }

    /// The session user, provided it holds one of `roles`.
    pub async fn require(&self, roles: &[Role]) -> CliResult<User> {
        self.session
            .require_role(roles)
            .await
            .map_err(|e| CliError::from_api(e, "Could not load your account"))
    }

    /// Print a command result in the selected format.
    pub fn emit<T, F>(&self, value: &T, render: F)
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        output::print(value, render, self.format);
    }

    pub fn success(&self, message: &str) {
        output::print_success(message, self.format);
    }
}
