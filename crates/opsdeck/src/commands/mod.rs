//! Command handlers.

pub mod apps;
pub mod auth;
pub mod counts;
pub mod ports;
pub mod servers;
pub mod tickets;

use opsdeck_core::{Inventory, SessionManager};

/// Everything a handler needs: data services plus the session gate.
pub struct Context {
    pub inventory: Inventory,
    pub session: SessionManager,
}
