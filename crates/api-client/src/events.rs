//! Session events and auth state tracking shared by the client and the
//! session manager.

use crate::auth_fsm::{AuthMachine, AuthMachineInput, AuthState, AuthStateChangedPayload};
use crate::{ApiError, ApiResult};
use api_types::User;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Lifecycle notifications the host routes on (e.g. back to login).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A credential pair was stored by login or signup.
    LoggedIn { user: Option<User> },
    /// The access token was renewed after a 401.
    Renewed,
    /// Renewal failed and every stored credential was cleared.
    SessionExpired,
    /// The user logged out explicitly.
    LoggedOut,
}

/// Callback type for session event notifications.
pub type SessionEventCallback = Arc<dyn Fn(SessionEvent) + Send + Sync>;

/// Callback type for auth state change notifications.
pub type AuthStateCallback = Arc<dyn Fn(AuthStateChangedPayload) + Send + Sync>;

/// FSM plus registered callbacks.
///
/// Callbacks are cloned out of their slot before being invoked so a callback
/// may call back into the client.
pub(crate) struct SessionSignals {
    fsm: Mutex<AuthMachine>,
    state_callback: Mutex<Option<AuthStateCallback>>,
    event_callback: Mutex<Option<SessionEventCallback>>,
}

impl SessionSignals {
    pub(crate) fn new(has_stored_session: bool) -> Self {
        let signals = Self {
            fsm: Mutex::new(AuthMachine::new()),
            state_callback: Mutex::new(None),
            event_callback: Mutex::new(None),
        };
        if has_stored_session {
            signals.try_transition(AuthMachineInput::SessionDetected);
        }
        signals
    }

    pub(crate) fn state(&self) -> AuthState {
        AuthState::from(self.fsm.lock().state())
    }

    pub(crate) fn set_state_callback(&self, callback: AuthStateCallback) {
        *self.state_callback.lock() = Some(callback);
    }

    pub(crate) fn set_event_callback(&self, callback: SessionEventCallback) {
        *self.event_callback.lock() = Some(callback);
    }

    /// Transition the FSM and notify the state callback if the state changed.
    pub(crate) fn transition(&self, input: AuthMachineInput) -> ApiResult<AuthState> {
        let mut fsm = self.fsm.lock();
        let previous = AuthState::from(fsm.state());

        fsm.consume(&input).map_err(|_| {
            ApiError::InvalidStateTransition(format!(
                "Cannot apply {:?} in state {:?}",
                input,
                fsm.state()
            ))
        })?;

        let state = AuthState::from(fsm.state());
        drop(fsm);

        if previous != state {
            debug!(old_state = ?previous, new_state = ?state, "Auth state transition");
            let callback = self.state_callback.lock().clone();
            if let Some(callback) = callback {
                callback(AuthStateChangedPayload { previous, state });
            }
        }

        Ok(state)
    }

    /// Like [`transition`](Self::transition), for callers where an
    /// out-of-order input is not an error (concurrent renewals, logout while
    /// logged out).
    pub(crate) fn try_transition(&self, input: AuthMachineInput) {
        if let Err(e) = self.transition(input) {
            debug!(error = %e, "Ignoring auth transition");
        }
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        debug!(event = ?event_name(&event), "Session event");
        let callback = self.event_callback.lock().clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }
}

fn event_name(event: &SessionEvent) -> &'static str {
    match event {
        SessionEvent::LoggedIn { .. } => "logged_in",
        SessionEvent::Renewed => "renewed",
        SessionEvent::SessionExpired => "session_expired",
        SessionEvent::LoggedOut => "logged_out",
    }
}
