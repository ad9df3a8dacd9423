//! Authenticated request client with transparent access-token renewal.

use crate::auth_fsm::{AuthMachineInput, AuthState, AuthStateChangedPayload};
use crate::descriptor::RequestDescriptor;
use crate::events::{SessionEvent, SessionSignals};
use crate::renewal::{RenewalCoordinator, RenewalOutcome};
use crate::response::ApiResponse;
use crate::{ApiError, ApiResult};
use api_types::{RefreshRequest, RefreshResponse};
use client_config_and_utils::Config;
use client_storage::SessionStore;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Base URLs and time budgets for the client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_base_url: Url,
    pub auth_base_url: Url,
    pub admin_base_url: Url,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl ClientSettings {
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Ok(Self {
            api_base_url: config.api_base_url()?,
            auth_base_url: config.auth_base_url()?,
            admin_base_url: config.admin_base_url()?,
            request_timeout: config.request_timeout(),
            connect_timeout: config.connect_timeout(),
        })
    }
}

/// HTTP client that attaches the stored bearer token and recovers from one
/// expired access token per request.
///
/// Cloning is cheap; clones share the session store, the renewal coordinator
/// and the registered callbacks.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    settings: ClientSettings,
    store: Arc<dyn SessionStore>,
    renewal: RenewalCoordinator,
    signals: SessionSignals,
}

impl ApiClient {
    /// Create a client from loaded configuration.
    pub fn new(config: &Config, store: Arc<dyn SessionStore>) -> ApiResult<Self> {
        Self::with_settings(ClientSettings::from_config(config)?, store)
    }

    /// Create a client with explicit settings.
    pub fn with_settings(settings: ClientSettings, store: Arc<dyn SessionStore>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .connect_timeout(settings.connect_timeout)
            .build()?;

        let has_session = store.is_authenticated()?;
        debug!(
            api = %settings.api_base_url,
            auth = %settings.auth_base_url,
            has_session,
            "API client created"
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                settings,
                store,
                renewal: RenewalCoordinator::new(),
                signals: SessionSignals::new(has_session),
            }),
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.inner.settings
    }

    /// The injected session store.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.inner.store
    }

    /// Current auth state.
    pub fn auth_state(&self) -> AuthState {
        self.inner.signals.state()
    }

    /// Register the host's session-event callback (replaces any previous one).
    pub fn on_session_event<F>(&self, callback: F)
    where
        F: Fn(SessionEvent) + Send + Sync + 'static,
    {
        self.inner.signals.set_event_callback(Arc::new(callback));
    }

    /// Register a callback for auth state changes (replaces any previous one).
    pub fn on_auth_state_change<F>(&self, callback: F)
    where
        F: Fn(AuthStateChangedPayload) + Send + Sync + 'static,
    {
        self.inner.signals.set_state_callback(Arc::new(callback));
    }

    pub(crate) fn signals(&self) -> &SessionSignals {
        &self.inner.signals
    }

    /// URL under the core API base.
    pub fn api_url(&self, path: &str) -> ApiResult<Url> {
        join_url(&self.inner.settings.api_base_url, path)
    }

    /// URL under the auth service base.
    pub fn auth_url(&self, path: &str) -> ApiResult<Url> {
        join_url(&self.inner.settings.auth_base_url, path)
    }

    /// URL under the admin API base.
    pub fn admin_url(&self, path: &str) -> ApiResult<Url> {
        join_url(&self.inner.settings.admin_base_url, path)
    }

    /// Send a request, renewing the access token once on 401.
    ///
    /// Any HTTP status is returned as `Ok`, including a 401 on the replay or on
    /// an unauthenticated descriptor. `Err` means transport failure, timeout,
    /// or [`ApiError::SessionExpired`] when renewal failed.
    pub async fn send(&self, mut descriptor: RequestDescriptor) -> ApiResult<ApiResponse> {
        loop {
            let observed = self.inner.renewal.generation();
            let response = self.execute(&descriptor).await?;

            if response.status != StatusCode::UNAUTHORIZED
                || descriptor.retried
                || !descriptor.authenticated
            {
                return Ok(response);
            }

            descriptor.retried = true;
            warn!(
                request_id = %descriptor.request_id,
                method = %descriptor.method,
                path = descriptor.url.path(),
                "Access token rejected, renewing"
            );

            let outcome = self
                .inner
                .renewal
                .renew(observed, || self.renew_credentials())
                .await;

            match outcome {
                RenewalOutcome::Renewed => {
                    debug!(request_id = %descriptor.request_id, "Replaying request after renewal");
                }
                RenewalOutcome::Failed => return Err(ApiError::SessionExpired),
            }
        }
    }

    /// Send and decode a JSON body, mapping non-2xx to [`ApiError::Status`].
    pub async fn send_json<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> ApiResult<T> {
        self.send(descriptor).await?.error_for_status()?.json()
    }

    /// Send and discard the body, mapping non-2xx to [`ApiError::Status`].
    pub async fn send_empty(&self, descriptor: RequestDescriptor) -> ApiResult<()> {
        self.send(descriptor).await?.error_for_status()?;
        Ok(())
    }

    /// One network round trip. The bearer is read from the store here, per
    /// attempt, so a replay picks up the renewed token.
    async fn execute(&self, descriptor: &RequestDescriptor) -> ApiResult<ApiResponse> {
        let mut request = self
            .inner
            .http
            .request(descriptor.method.clone(), descriptor.url.clone());

        if !descriptor.query.is_empty() {
            request = request.query(&descriptor.query);
        }
        for (name, value) in &descriptor.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }

        let mut has_bearer = false;
        if descriptor.authenticated {
            if let Some(token) = self.inner.store.access_token()? {
                request = request.header(AUTHORIZATION, format!("Bearer {}", token));
                has_bearer = true;
            }
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        debug!(
            request_id = %descriptor.request_id,
            method = %descriptor.method,
            path = descriptor.url.path(),
            status = status.as_u16(),
            retried = descriptor.retried,
            has_bearer,
            "HTTP request completed"
        );

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Any failure clears the session and emits [`SessionEvent::SessionExpired`].
    async fn renew_credentials(&self) -> RenewalOutcome {
        let signals = &self.inner.signals;
        signals.try_transition(AuthMachineInput::TokenRejected);

        match self.try_refresh().await {
            Ok(()) => {
                signals.try_transition(AuthMachineInput::RefreshSuccess);
                info!("Access token renewed");
                signals.emit(SessionEvent::Renewed);
                RenewalOutcome::Renewed
            }
            Err(e) => {
                warn!(error = %e, "Token renewal failed, clearing session");
                if let Err(clear_err) = self.inner.store.clear() {
                    warn!(error = %clear_err, "Failed to clear session store");
                }
                signals.try_transition(AuthMachineInput::RefreshFailed);
                signals.emit(SessionEvent::SessionExpired);
                RenewalOutcome::Failed
            }
        }
    }

    async fn try_refresh(&self) -> ApiResult<()> {
        let refresh_token = self
            .inner
            .store
            .refresh_token()?
            .ok_or(ApiError::NotLoggedIn)?;

        let descriptor = RequestDescriptor::post(self.auth_url("token/refresh")?)
            .json(&RefreshRequest {
                refresh: refresh_token,
            })?
            .unauthenticated();

        let data: RefreshResponse = self.execute(&descriptor).await?.error_for_status()?.json()?;

        match data.refresh.as_deref() {
            Some(rotated) => self.inner.store.set_credentials(&data.access, rotated)?,
            None => self.inner.store.set_access_token(&data.access)?,
        }
        Ok(())
    }
}

/// Append `path` to a base URL, keeping every base segment.
fn join_url(base: &Url, path: &str) -> ApiResult<Url> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(Url::parse(&joined)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_keeps_base_path() {
        let base = Url::parse("http://localhost/api").unwrap();
        assert_eq!(
            join_url(&base, "restaurants/3/menu").unwrap().as_str(),
            "http://localhost/api/restaurants/3/menu"
        );

        let base = Url::parse("http://localhost/api/auth/").unwrap();
        assert_eq!(
            join_url(&base, "/token/refresh").unwrap().as_str(),
            "http://localhost/api/auth/token/refresh"
        );
    }

    #[test]
    fn test_settings_from_default_config() {
        let settings = ClientSettings::from_config(&Config::default()).unwrap();
        assert_eq!(settings.admin_base_url.as_str(), "http://localhost/api/admin");
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_client_builds_when_auth_host_has_no_auth_path() {
        let mut config = Config::default();
        config.auth_base_url = "https://auth.example.com".to_string();

        let store = Arc::new(client_storage::PersistentSessionStore::in_memory());
        let client = ApiClient::new(&config, store).unwrap();
        assert_eq!(
            client.admin_url("offers").unwrap().as_str(),
            "https://admin.example.com/offers"
        );
        assert_eq!(client.auth_state(), AuthState::NotLoggedIn);
    }
}
