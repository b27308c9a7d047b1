//! opsdeck binary entry point.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use opsdeck_api::RecordClient;
use opsdeck_core::{CoreError, FileSessionStore, Inventory, SessionManager};
use opsdeck_config::{base_url, load_config_or_default, session_path, transport};

use cli::{Cli, Command, GlobalOpts};
use commands::Context;
use error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.global);

    if let Err(e) = run(cli).await {
        let code = e.exit_code();
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config_or_default();

    // Global flags win over file and environment.
    if let Some(url) = &cli.global.url {
        config.url = url.clone();
    }
    if let Some(timeout) = cli.global.timeout {
        config.timeout = timeout;
    }
    if cli.global.insecure {
        config.insecure = true;
    }

    let url = base_url(&config)?;
    tracing::debug!(url = %url, timeout = config.timeout, "resolved configuration");
    let client = RecordClient::new(url, &transport(&config)).map_err(CoreError::from)?;

    let store = FileSessionStore::new(session_path(&config));
    let ctx = Context {
        inventory: Inventory::new(client.clone()),
        session: SessionManager::new(
            client,
            config.app_id.clone(),
            config.allowed_dept.clone(),
            Box::new(store),
        ),
    };

    match cli.command {
        Command::Login { username } => commands::auth::login(&ctx, username, &cli.global).await,
        Command::Logout => commands::auth::logout(&ctx, &cli.global),
        Command::Whoami => commands::auth::whoami(&ctx, &cli.global),
        Command::Servers(args) => commands::servers::handle(&ctx, args, &cli.global).await,
        Command::Apps(args) => commands::apps::handle(&ctx, args, &cli.global).await,
        Command::Ports(args) => commands::ports::handle(&ctx, args, &cli.global).await,
        Command::Tickets(args) => commands::tickets::handle(&ctx, args, &cli.global).await,
        Command::Counts { watch } => commands::counts::handle(&ctx, watch, &cli.global).await,
    }
}

fn init_tracing(global: &GlobalOpts) {
    let default = match global.verbose {
        0 => "warn",
        1 => "opsdeck=info,opsdeck_core=info,opsdeck_api=info",
        2 => "opsdeck=debug,opsdeck_core=debug,opsdeck_api=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(global.verbose >= 2)
        .init();
}
