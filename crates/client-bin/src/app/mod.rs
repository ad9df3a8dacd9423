//! Process-wide state and error handling for the CLI.

mod error;
mod state;

pub use error::{CliError, CliResult, OrFail};
pub use state::AppState;
