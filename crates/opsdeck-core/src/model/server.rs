// ── Server entity and its canonical enums ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Deployment environment. Only two values exist; anything that is not
/// recognizably "dev" is treated as production by the decode layer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    #[default]
    Prd,
    Dev,
}

/// How Docker runs on a host. The legacy boolean encoding maps
/// `true` to `Cli` and `false` to `None`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DockerMode {
    #[default]
    None,
    Cli,
    Desktop,
}

/// Operational status of a server.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ServerStatus {
    #[default]
    Online,
    Offline,
    Maintenance,
}

/// A tracked infrastructure server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Server {
    pub id: String,
    pub name: String,
    pub host: Option<String>,
    pub ip: Option<String>,
    pub docker_mode: DockerMode,
    pub environment: Environment,
    pub os: Option<String>,
    pub status: ServerStatus,
    pub location: Option<String>,
    pub netdata_enabled: bool,
    pub notes: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}
