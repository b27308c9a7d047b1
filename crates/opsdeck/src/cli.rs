//! Clap derive structures for the `opsdeck` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// opsdeck -- inventory and ticket dashboard for the internal IT team
#[derive(Debug, Parser)]
#[command(
    name = "opsdeck",
    version,
    about = "Track servers, apps, ports, and tickets from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Record store base URL (overrides config)
    #[arg(long, short = 'u', env = "OPSDECK_URL", global = true)]
    pub url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "OPSDECK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "OPSDECK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "OPSDECK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and persist a session profile
    Login {
        /// Account username (prompted password)
        username: String,
    },

    /// Clear the persisted session
    Logout,

    /// Show the current session profile
    Whoami,

    /// Manage inventory servers
    #[command(alias = "srv")]
    Servers(ServersArgs),

    /// List applications on a server
    Apps(AppsArgs),

    /// List port mappings on a server
    Ports(PortsArgs),

    /// List support tickets
    Tickets(TicketsArgs),

    /// Show the dashboard counters
    Counts {
        /// Keep polling and print every change
        #[arg(long, short = 'w')]
        watch: bool,
    },
}

// ── Servers ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServersArgs {
    #[command(subcommand)]
    pub command: ServersCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServersCommand {
    /// List servers, optionally filtered by a search query
    List {
        /// Case-insensitive substring match across name, IP, environment
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show one server
    Show { id: String },

    /// Edit fields on a server
    Set {
        id: String,

        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        ip: Option<String>,
        /// none | cli | desktop
        #[arg(long)]
        docker_mode: Option<String>,
        /// prd | dev
        #[arg(long)]
        environment: Option<String>,
        #[arg(long)]
        os: Option<String>,
        /// online | offline | maintenance
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        netdata: Option<bool>,
        #[arg(long)]
        notes: Option<String>,
    },
}

// ── Apps / Ports / Tickets ───────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AppsArgs {
    /// Server record id
    #[arg(long, short = 's')]
    pub server: String,
}

#[derive(Debug, Args)]
pub struct PortsArgs {
    /// Server record id
    #[arg(long, short = 's')]
    pub server: String,
}

#[derive(Debug, Args)]
pub struct TicketsArgs {
    /// Restrict to one status (e.g. waiting_dev)
    #[arg(long)]
    pub status: Option<String>,
}
