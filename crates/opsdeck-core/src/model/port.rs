// ── Port entity ──

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A network port mapping on a [`Server`](super::Server).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Port {
    pub id: String,
    pub server: String,
    /// Referenced app record id, if any.
    pub app: Option<String>,
    /// App name from the `expand.app` sub-document, when requested.
    pub app_name: Option<String>,
    pub port: Option<u32>,
    pub protocol: Option<String>,
    pub status: Option<String>,
    pub service_name: Option<String>,
    pub container_name: Option<String>,
    pub internal_port: Option<u32>,
    pub external_port: Option<u32>,
    pub description: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}
