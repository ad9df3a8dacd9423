//! Customer care commands.

use api_types::{ComplaintStatus, Role};
use clap::Subcommand;

use crate::app::{AppState, CliResult, OrFail};
use crate::output;

#[derive(Debug, Subcommand)]
pub enum SupportCommand {
    /// List complaints, optionally only open or resolved ones
    Complaints {
        #[arg(long)]
        status: Option<ComplaintStatus>,
    },
    /// Resolve a complaint
    Resolve {
        complaint_id: i64,
        #[arg(long)]
        notes: String,
    },
}

pub async fn run(state: &AppState, command: SupportCommand) -> CliResult<()> {
    state.require(&[Role::CustomerCare]).await?;
    let api = state.client.support();

    match command {
        SupportCommand::Complaints { status } => {
            let complaints = api
                .complaints(status)
                .await
                .or_fail("Could not load complaints")?;
            state.emit(complaints.as_slice(), output::complaints);
        }
        SupportCommand::Resolve {
            complaint_id,
            notes,
        } => {
            let complaint = api
                .resolve_complaint(complaint_id, &notes)
                .await
                .or_fail("Could not resolve the complaint")?;
            state.emit(&complaint, |c| format!("Complaint #{} is {}.\n", c.id, c.status));
        }
    }
    Ok(())
}
