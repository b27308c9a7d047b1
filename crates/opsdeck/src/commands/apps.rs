//! `opsdeck apps` -- applications deployed on a server.

use tabled::Tabled;

use opsdeck_core::App;

use crate::cli::{AppsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::Context;

#[derive(Tabled)]
struct AppRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Docker")]
    docker: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Owner")]
    owner: String,
}

impl From<&App> for AppRow {
    fn from(a: &App) -> Self {
        Self {
            id: a.id.clone(),
            name: a.name.clone().unwrap_or_default(),
            port: a.port.map(|p| p.to_string()).unwrap_or_default(),
            status: a.status.clone().unwrap_or_default(),
            docker: a.docker_mode.to_string(),
            version: a
                .meta
                .as_ref()
                .and_then(|m| m.version.clone())
                .unwrap_or_default(),
            owner: a.owner.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(ctx: &Context, args: AppsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let page = ctx.inventory.server_apps(&args.server).await?;
    let out = output::render_list(&global.output, &page.items, |a| AppRow::from(a), |a| a.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
