//! Command handlers, grouped by the role that uses them.

pub mod admin;
pub mod auth;
pub mod config;
pub mod customer;
pub mod delivery;
pub mod restaurant;
pub mod support;

pub use admin::AdminCommand;
pub use auth::SignupArgs;
pub use config::ConfigCommand;
pub use customer::{CartCommand, ComplaintsCommand, OrdersCommand};
pub use delivery::DeliveryCommand;
pub use restaurant::RestaurantCommand;
pub use support::SupportCommand;

use clap::ValueEnum;

use crate::app::{CliError, CliResult};

/// On/off argument for availability and ordering toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn enabled(self) -> bool {
        matches!(self, Switch::On)
    }
}

/// Read a password without echo.
pub(crate) fn prompt_password(label: &str) -> CliResult<String> {
    let password = rpassword::prompt_password(format!("{label}: "))?;
    if password.is_empty() {
        return Err(CliError::Usage(format!("{label} is required")));
    }
    Ok(password)
}
