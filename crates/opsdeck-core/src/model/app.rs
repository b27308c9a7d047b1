// ── App entity ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::server::DockerMode;

/// How often an app is backed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackupFrequency {
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

impl BackupFrequency {
    /// Parse a raw frequency string, case-insensitive. Unknown values
    /// yield `None` rather than an error.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

/// Denormalized metadata inlined by the backend under `expand.app`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppMeta {
    pub version: Option<String>,
    pub created_by: Option<String>,
}

/// An application deployed on a [`Server`](super::Server).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct App {
    pub id: String,
    /// Owning server record id. Referential integrity is enforced
    /// server-side, not here.
    pub server: String,
    pub name: Option<String>,
    pub key: Option<String>,
    pub department: Option<String>,
    pub port: Option<u32>,
    pub environment: Option<String>,
    pub repo_url: Option<String>,
    pub tech_stack: Option<String>,
    pub owner: Option<String>,
    pub path: Option<String>,
    pub status: Option<String>,
    pub docker_mode: DockerMode,
    pub backup_enabled: bool,
    pub backup_frequency: Option<BackupFrequency>,
    pub notes: Option<String>,
    pub meta: Option<AppMeta>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}
