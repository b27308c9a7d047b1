// opsdeck-core: Domain layer between opsdeck-api and consumers (CLI).

pub mod counts;
pub mod decode;
pub mod error;
pub mod form;
pub mod inventory;
pub mod model;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use counts::{CountsPoller, SidebarCounts, POLL_INTERVAL};
pub use error::CoreError;
pub use form::{ServerDraft, ServerPatch};
pub use inventory::Inventory;
pub use session::{
    FileSessionStore, MemorySessionStore, SessionManager, SessionState, SessionStore,
    DEFAULT_ALLOWED_DEPT,
};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    App, AppMeta, BackupFrequency, DockerMode, Environment, Port, Server, ServerStatus, Ticket,
    TicketEnvironment, TicketPriority, TicketStatus, TicketType, UserProfile,
};
