//! Server command handlers.

use tabled::Tabled;

use opsdeck_core::{DockerMode, Environment, Server, ServerDraft, ServerStatus};

use crate::cli::{GlobalOpts, ServersArgs, ServersCommand};
use crate::error::CliError;
use crate::output;

use super::Context;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ServerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Env")]
    environment: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Docker")]
    docker: String,
}

impl From<&Server> for ServerRow {
    fn from(s: &Server) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            ip: s.ip.clone().unwrap_or_default(),
            environment: s.environment.to_string(),
            status: s.status.to_string(),
            docker: s.docker_mode.to_string(),
        }
    }
}

fn detail(s: &Server) -> String {
    let mut out = String::new();
    let mut push = |label: &str, value: String| {
        out.push_str(&format!("{label:<12} {value}\n"));
    };
    push("Id:", s.id.clone());
    push("Name:", s.name.clone());
    push("Host:", s.host.clone().unwrap_or_default());
    push("IP:", s.ip.clone().unwrap_or_default());
    push("Env:", s.environment.to_string());
    push("Status:", s.status.to_string());
    push("Docker:", s.docker_mode.to_string());
    push("OS:", s.os.clone().unwrap_or_default());
    push("Location:", s.location.clone().unwrap_or_default());
    push("Netdata:", s.netdata_enabled.to_string());
    push("Notes:", s.notes.clone().unwrap_or_default());
    out.trim_end().to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    ctx: &Context,
    args: ServersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ServersCommand::List { search } => {
            let page = ctx
                .inventory
                .search_servers(search.as_deref().unwrap_or(""))
                .await?;
            let out = output::render_list(
                &global.output,
                &page.items,
                |s| ServerRow::from(s),
                |s| s.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServersCommand::Show { id } => {
            let server = ctx.inventory.server(&id).await?;
            let out = output::render_single(&global.output, &server, detail, |s| s.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServersCommand::Set {
            id,
            name,
            host,
            ip,
            docker_mode,
            environment,
            os,
            status,
            location,
            netdata,
            notes,
        } => {
            let server = ctx.inventory.server(&id).await?;
            let initial = ServerDraft::from_server(&server);
            let mut draft = initial.clone();

            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(host) = host {
                draft.host = host;
            }
            if let Some(ip) = ip {
                draft.ip = ip;
            }
            if let Some(mode) = docker_mode {
                draft.docker_mode = parse_docker_mode(&mode)?;
            }
            if let Some(env) = environment {
                draft.environment = parse_environment(&env)?;
            }
            if let Some(os) = os {
                draft.os = os;
            }
            if let Some(status) = status {
                draft.status = parse_status(&status)?;
            }
            if let Some(location) = location {
                draft.location = location;
            }
            if let Some(netdata) = netdata {
                draft.netdata_enabled = netdata;
            }
            if let Some(notes) = notes {
                draft.notes = notes;
            }

            if !draft.is_dirty(&initial) {
                if !global.quiet {
                    eprintln!("No changes.");
                }
                return Ok(());
            }
            if !draft.can_save(&initial) {
                return Err(CliError::Validation {
                    field: "name".into(),
                    reason: "server name is required".into(),
                });
            }

            ctx.inventory.update_server(&id, &draft.to_patch()).await?;

            // Update doesn't refresh held state; re-fetch to display.
            let refreshed = ctx.inventory.server(&id).await?;
            let out =
                output::render_single(&global.output, &refreshed, detail, |s| s.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

// ── Flag parsing (strict, unlike the legacy decode layer) ───────────

fn parse_docker_mode(raw: &str) -> Result<DockerMode, CliError> {
    match raw.to_ascii_lowercase().as_str() {
        "none" => Ok(DockerMode::None),
        "cli" => Ok(DockerMode::Cli),
        "desktop" => Ok(DockerMode::Desktop),
        _ => Err(CliError::Validation {
            field: "docker-mode".into(),
            reason: format!("expected none, cli, or desktop, got '{raw}'"),
        }),
    }
}

fn parse_environment(raw: &str) -> Result<Environment, CliError> {
    match raw.to_ascii_lowercase().as_str() {
        "prd" => Ok(Environment::Prd),
        "dev" => Ok(Environment::Dev),
        _ => Err(CliError::Validation {
            field: "environment".into(),
            reason: format!("expected prd or dev, got '{raw}'"),
        }),
    }
}

fn parse_status(raw: &str) -> Result<ServerStatus, CliError> {
    match raw.to_ascii_lowercase().as_str() {
        "online" => Ok(ServerStatus::Online),
        "offline" => Ok(ServerStatus::Offline),
        "maintenance" => Ok(ServerStatus::Maintenance),
        _ => Err(CliError::Validation {
            field: "status".into(),
            reason: format!("expected online, offline, or maintenance, got '{raw}'"),
        }),
    }
}
