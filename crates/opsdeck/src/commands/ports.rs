//! `opsdeck ports` -- port mappings on a server.

use tabled::Tabled;

use opsdeck_core::Port;

use crate::cli::{GlobalOpts, PortsArgs};
use crate::error::CliError;
use crate::output;

use super::Context;

#[derive(Tabled)]
struct PortRow {
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Proto")]
    protocol: String,
    #[tabled(rename = "App")]
    app: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Container")]
    container: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Port> for PortRow {
    fn from(p: &Port) -> Self {
        Self {
            port: p.port.map(|n| n.to_string()).unwrap_or_default(),
            protocol: p.protocol.clone().unwrap_or_default(),
            app: p.app_name.clone().unwrap_or_default(),
            service: p.service_name.clone().unwrap_or_default(),
            container: p.container_name.clone().unwrap_or_default(),
            status: p.status.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(ctx: &Context, args: PortsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let page = ctx.inventory.server_ports(&args.server).await?;
    let out = output::render_list(&global.output, &page.items, |p| PortRow::from(p), |p| p.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
