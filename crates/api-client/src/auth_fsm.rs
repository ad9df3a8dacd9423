//! Authentication state machine using rust-fsm.
//!
//! ## State Diagram
//!
//! ```text
//!                 SessionDetected
//! ┌─────────────┐ ───────────────────────────────────┐
//! │ NotLoggedIn │ (initial)                          │
//! └──────┬──────┘                                    ▼
//!        │ LoginAttempt     ┌───────────┐  LoginSuccess  ┌──────────┐
//!        └────────────────► │ LoggingIn │ ─────────────► │ LoggedIn │
//!                           └───────────┘                └────┬─────┘
//!                             LoginFailed ──► NotLoggedIn     │
//!                                                             │ TokenRejected
//! ┌────────────┐  LogoutRequested                       ┌─────▼──────┐
//! │ LoggingOut │ ◄───────────────── LoggedIn            │ Refreshing │
//! └─────┬──────┘                                        └─────┬──────┘
//!       │ LogoutComplete                                      │ RefreshSuccess ──► LoggedIn
//!       ▼                                                     │ RefreshFailed  ──► NotLoggedIn
//!  NotLoggedIn
//! ```

use rust_fsm::*;
use serde::{Deserialize, Serialize};

state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub auth_machine(NotLoggedIn)

    NotLoggedIn => {
        SessionDetected => LoggedIn,
        LoginAttempt => LoggingIn,
        // A 401 with no stored access token still goes through renewal.
        TokenRejected => Refreshing
    },
    LoggingIn => {
        LoginSuccess => LoggedIn,
        LoginFailed => NotLoggedIn
    },
    LoggedIn => {
        TokenRejected => Refreshing,
        LoginAttempt => LoggingIn,
        LogoutRequested => LoggingOut
    },
    Refreshing => {
        RefreshSuccess => LoggedIn,
        RefreshFailed => NotLoggedIn
    },
    LoggingOut => {
        LogoutComplete => NotLoggedIn
    }
}

pub use auth_machine::Input as AuthMachineInput;
pub use auth_machine::State as AuthMachineState;
pub use auth_machine::StateMachine as AuthMachine;

/// Authentication state for external consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    /// Not logged in.
    NotLoggedIn,
    /// Currently logging in.
    LoggingIn,
    /// Logged in with stored credentials.
    LoggedIn,
    /// Renewing a rejected access token.
    Refreshing,
    /// Currently logging out.
    LoggingOut,
}

impl AuthState {
    /// Returns true if the user has a session (LoggedIn state only).
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::LoggedIn)
    }

    /// Returns true if the state is a transient/in-progress state.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AuthState::LoggingIn | AuthState::Refreshing | AuthState::LoggingOut
        )
    }
}

impl From<&AuthMachineState> for AuthState {
    fn from(state: &AuthMachineState) -> Self {
        match state {
            AuthMachineState::NotLoggedIn => AuthState::NotLoggedIn,
            AuthMachineState::LoggingIn => AuthState::LoggingIn,
            AuthMachineState::LoggedIn => AuthState::LoggedIn,
            AuthMachineState::Refreshing => AuthState::Refreshing,
            AuthMachineState::LoggingOut => AuthState::LoggingOut,
        }
    }
}

/// Payload for auth state change events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthStateChangedPayload {
    /// Previous auth state.
    pub previous: AuthState,
    /// Current auth state.
    pub state: AuthState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_not_logged_in() {
        let machine = AuthMachine::new();
        assert_eq!(*machine.state(), AuthMachineState::NotLoggedIn);
    }

    #[test]
    fn test_login_flow() {
        let mut machine = AuthMachine::new();

        machine.consume(&AuthMachineInput::LoginAttempt).unwrap();
        assert_eq!(*machine.state(), AuthMachineState::LoggingIn);

        machine.consume(&AuthMachineInput::LoginSuccess).unwrap();
        assert_eq!(*machine.state(), AuthMachineState::LoggedIn);
    }

    #[test]
    fn test_stored_session_detected() {
        let mut machine = AuthMachine::new();
        machine.consume(&AuthMachineInput::SessionDetected).unwrap();
        assert_eq!(*machine.state(), AuthMachineState::LoggedIn);
    }

    #[test]
    fn test_login_failure_returns_to_not_logged_in() {
        let mut machine = AuthMachine::new();
        machine.consume(&AuthMachineInput::LoginAttempt).unwrap();
        machine.consume(&AuthMachineInput::LoginFailed).unwrap();
        assert_eq!(*machine.state(), AuthMachineState::NotLoggedIn);
    }

    #[test]
    fn test_rejected_token_renewal_success() {
        let mut machine = AuthMachine::new();
        machine.consume(&AuthMachineInput::SessionDetected).unwrap();

        machine.consume(&AuthMachineInput::TokenRejected).unwrap();
        assert_eq!(*machine.state(), AuthMachineState::Refreshing);

        machine.consume(&AuthMachineInput::RefreshSuccess).unwrap();
        assert_eq!(*machine.state(), AuthMachineState::LoggedIn);
    }

    #[test]
    fn test_rejected_token_renewal_failure() {
        let mut machine = AuthMachine::new();
        machine.consume(&AuthMachineInput::SessionDetected).unwrap();
        machine.consume(&AuthMachineInput::TokenRejected).unwrap();

        machine.consume(&AuthMachineInput::RefreshFailed).unwrap();
        assert_eq!(*machine.state(), AuthMachineState::NotLoggedIn);
    }

    #[test]
    fn test_logout_flow() {
        let mut machine = AuthMachine::new();
        machine.consume(&AuthMachineInput::SessionDetected).unwrap();

        machine.consume(&AuthMachineInput::LogoutRequested).unwrap();
        assert_eq!(*machine.state(), AuthMachineState::LoggingOut);

        machine.consume(&AuthMachineInput::LogoutComplete).unwrap();
        assert_eq!(*machine.state(), AuthMachineState::NotLoggedIn);
    }

    #[test]
    fn test_invalid_transition_returns_error() {
        let mut machine = AuthMachine::new();

        assert!(machine.consume(&AuthMachineInput::LogoutRequested).is_err());
        assert!(machine.consume(&AuthMachineInput::LoginSuccess).is_err());
        assert!(machine.consume(&AuthMachineInput::RefreshSuccess).is_err());
    }

    #[test]
    fn test_auth_state_flags() {
        assert!(AuthState::LoggedIn.is_authenticated());
        assert!(!AuthState::Refreshing.is_authenticated());
        assert!(AuthState::Refreshing.is_transient());
        assert!(!AuthState::NotLoggedIn.is_transient());
        assert_eq!(
            AuthState::from(&AuthMachineState::LoggingOut),
            AuthState::LoggingOut
        );
    }
}
