//! `opsdeck tickets` -- support ticket listing.

use tabled::Tabled;

use opsdeck_core::{Ticket, TicketStatus};

use crate::cli::{GlobalOpts, TicketsArgs};
use crate::error::CliError;
use crate::output;

use super::Context;

#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Env")]
    environment: String,
}

impl From<&Ticket> for TicketRow {
    fn from(t: &Ticket) -> Self {
        Self {
            id: t.id.clone(),
            title: t.title.clone(),
            status: t.status.to_string(),
            priority: t.priority.to_string(),
            kind: t.kind.to_string(),
            environment: t.environment.to_string(),
        }
    }
}

pub async fn handle(
    ctx: &Context,
    args: TicketsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let status = args.status.as_deref().map(parse_status).transpose()?;
    let page = ctx.inventory.tickets(status).await?;
    let out = output::render_list(&global.output, &page.items, |t| TicketRow::from(t), |t| {
        t.id.clone()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

fn parse_status(raw: &str) -> Result<TicketStatus, CliError> {
    match raw.to_ascii_lowercase().as_str() {
        "new" => Ok(TicketStatus::New),
        "triage" => Ok(TicketStatus::Triage),
        "in_progress" => Ok(TicketStatus::InProgress),
        "waiting_dev" => Ok(TicketStatus::WaitingDev),
        "blocked" => Ok(TicketStatus::Blocked),
        "done" => Ok(TicketStatus::Done),
        "rejected" => Ok(TicketStatus::Rejected),
        _ => Err(CliError::Validation {
            field: "status".into(),
            reason: format!(
                "expected one of new, triage, in_progress, waiting_dev, blocked, done, \
                 rejected, got '{raw}'"
            ),
        }),
    }
}
