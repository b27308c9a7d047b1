// ── Canonical domain model ──
//
// Strictly canonical field shapes. Legacy/alternate wire encodings
// (boolean docker_mode, `env` alias, `is_active`) never appear here;
// they are resolved once in `decode.rs` and nowhere else.

pub mod app;
pub mod port;
pub mod profile;
pub mod server;
pub mod ticket;

pub use app::{App, AppMeta, BackupFrequency};
pub use port::Port;
pub use profile::UserProfile;
pub use server::{DockerMode, Environment, Server, ServerStatus};
pub use ticket::{Ticket, TicketEnvironment, TicketPriority, TicketStatus, TicketType};
