//! Session management: login, signup, the cached session user, logout and
//! role gating.
//!
//! Tokens live in the injected [`SessionStore`](client_storage::SessionStore);
//! the auth FSM tracks transient states (logging in, refreshing, logging out)
//! that are never persisted. On construction the FSM state is derived from the
//! store.

use crate::auth_fsm::{AuthMachineInput, AuthState};
use crate::events::SessionEvent;
use crate::{ApiClient, ApiError, ApiResult};
use api_types::{LoginRequest, Role, SignupRequest, SignupResponse, User};
use tracing::{debug, info, warn};

/// Session manager layered over an [`ApiClient`].
#[derive(Clone)]
pub struct SessionManager {
    client: ApiClient,
}

impl SessionManager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Get the current FSM state.
    pub fn auth_state(&self) -> AuthState {
        self.client.auth_state()
    }

    /// Whether an access token is stored.
    pub fn is_logged_in(&self) -> ApiResult<bool> {
        Ok(self.client.store().is_authenticated()?)
    }

    /// Login with email and password.
    ///
    /// Uses the FSM to track the login operation:
    /// - NotLoggedIn/LoggedIn -> LoggingIn -> (LoggedIn | NotLoggedIn)
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let signals = self.client.signals();
        signals.transition(AuthMachineInput::LoginAttempt)?;

        info!(email, "Logging in");
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = match self.client.auth().login(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.restore_state_after_failed_login();
                return Err(e);
            }
        };

        let store = self.client.store();
        store.set_credentials(&response.access, &response.refresh)?;
        if let Some(user) = &response.user {
            store.set_user(&serde_json::to_string(user)?)?;
        }
        signals.transition(AuthMachineInput::LoginSuccess)?;
        signals.emit(SessionEvent::LoggedIn {
            user: response.user.clone(),
        });

        let user = match response.user {
            Some(user) => user,
            None => self.current_user().await?,
        };
        info!(user_id = user.id, role = %user.role, "Logged in");
        Ok(user)
    }

    /// A failed login leaves any previously stored pair untouched.
    fn restore_state_after_failed_login(&self) {
        let signals = self.client.signals();
        signals.try_transition(AuthMachineInput::LoginFailed);
        if matches!(self.client.store().is_authenticated(), Ok(true)) {
            signals.try_transition(AuthMachineInput::SessionDetected);
        }
    }

    /// Register a new account.
    ///
    /// When the backend also issues tokens, the session is established exactly
    /// as after [`login`](Self::login).
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<SignupResponse> {
        info!(email = %request.email, role = %request.role, "Signing up");
        let response = self.client.auth().signup(request).await?;

        if let (Some(access), Some(refresh)) = (&response.access, &response.refresh) {
            let signals = self.client.signals();
            signals.transition(AuthMachineInput::LoginAttempt)?;
            let store = self.client.store();
            store.set_credentials(access, refresh)?;
            store.set_user(&serde_json::to_string(&response.user)?)?;
            signals.transition(AuthMachineInput::LoginSuccess)?;
            signals.emit(SessionEvent::LoggedIn {
                user: Some(response.user.clone()),
            });
        }

        Ok(response)
    }

    /// The session user: cached copy if present, otherwise `GET /users/me`.
    pub async fn current_user(&self) -> ApiResult<User> {
        let store = self.client.store();

        if let Some(json) = store.user()? {
            match serde_json::from_str::<User>(&json) {
                Ok(user) => return Ok(user),
                Err(e) => debug!(error = %e, "Cached user unreadable, refetching"),
            }
        }

        if !store.is_authenticated()? {
            return Err(ApiError::NotLoggedIn);
        }

        let user = self.client.auth().me().await?;
        // Skip caching if the session was cleared meanwhile.
        if store.is_authenticated()? {
            store.set_user(&serde_json::to_string(&user)?)?;
        }
        Ok(user)
    }

    /// Clear every stored credential and notify the host.
    pub fn logout(&self) -> ApiResult<()> {
        let signals = self.client.signals();
        signals.try_transition(AuthMachineInput::LogoutRequested);
        self.client.store().clear()?;
        signals.try_transition(AuthMachineInput::LogoutComplete);
        signals.emit(SessionEvent::LoggedOut);
        info!("Logged out");
        Ok(())
    }

    /// Fail unless the session user holds one of `allowed`.
    pub async fn require_role(&self, allowed: &[Role]) -> ApiResult<User> {
        let user = self.current_user().await?;
        if allowed.contains(&user.role) {
            Ok(user)
        } else {
            debug!(role = %user.role, "Role not permitted");
            Err(ApiError::Forbidden {
                required: allowed.to_vec(),
                actual: user.role,
            })
        }
    }
}
