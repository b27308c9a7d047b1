//! `opsdeck counts` -- the dashboard counters, once or watched.

use opsdeck_core::{CountsPoller, SidebarCounts};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::Context;

fn render(counts: SidebarCounts, global: &GlobalOpts) -> String {
    match global.output {
        crate::cli::OutputFormat::Table => format!(
            "Waiting tickets:  {}\nOnline servers:   {}\nRunning apps:     {}",
            counts.waiting_tickets, counts.online_servers, counts.running_apps
        ),
        _ => {
            let value = serde_json::json!({
                "waiting_tickets": counts.waiting_tickets,
                "online_servers": counts.online_servers,
                "running_apps": counts.running_apps,
            });
            match global.output {
                crate::cli::OutputFormat::JsonCompact => value.to_string(),
                crate::cli::OutputFormat::Yaml => {
                    serde_yaml::to_string(&value).unwrap_or_default()
                }
                _ => serde_json::to_string_pretty(&value).unwrap_or_default(),
            }
        }
    }
}

pub async fn handle(ctx: &Context, watch: bool, global: &GlobalOpts) -> Result<(), CliError> {
    if !watch {
        let counts = ctx.inventory.refresh_counts(SidebarCounts::default()).await;
        output::print_output(&render(counts, global), global.quiet);
        return Ok(());
    }

    // Watch mode: print every change until Ctrl-C.
    let poller = CountsPoller::spawn(ctx.inventory.clone());
    let mut rx = poller.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let counts = *rx.borrow_and_update();
                output::print_output(&render(counts, global), global.quiet);
            }
        }
    }

    poller.shutdown().await;
    Ok(())
}
