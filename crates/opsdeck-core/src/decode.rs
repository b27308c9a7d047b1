// ── Raw-to-canonical decoding ──
//
// The only place legacy wire shapes are read. The backend has grown
// several encodings for the same fields over time: `docker_mode` as a
// boolean or a string enum, `environment` with a legacy `env` alias,
// status as a string or a legacy `is_active` boolean. Each coercion here
// is total over every input shape, with an explicit default arm.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::model::{
    App, AppMeta, BackupFrequency, DockerMode, Environment, Port, Server, ServerStatus,
};

// ── Field unions ────────────────────────────────────────────────────

/// `docker_mode` on the wire: boolean in old records, string in new ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DockerModeField {
    Flag(bool),
    Name(String),
}

/// Decode any `docker_mode` shape. `true` means the CLI engine,
/// `false` means none; unknown strings fall back to none.
pub fn decode_docker_mode(raw: Option<&DockerModeField>) -> DockerMode {
    match raw {
        Some(DockerModeField::Flag(true)) => DockerMode::Cli,
        Some(DockerModeField::Flag(false)) | None => DockerMode::None,
        Some(DockerModeField::Name(name)) => match name.to_ascii_lowercase().as_str() {
            "cli" => DockerMode::Cli,
            "desktop" => DockerMode::Desktop,
            _ => DockerMode::None,
        },
    }
}

/// Decode `environment` (or its legacy `env` alias). Case-insensitive;
/// anything that is not recognizably dev is production.
pub fn decode_environment(raw: Option<&str>) -> Environment {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        Some("dev" | "development") => Environment::Dev,
        _ => Environment::Prd,
    }
}

/// Decode server status. A boolean `is_active`, when present, overrides
/// any coexisting `status` string.
pub fn decode_status(is_active: Option<bool>, status: Option<&str>) -> ServerStatus {
    if let Some(active) = is_active {
        return if active {
            ServerStatus::Online
        } else {
            ServerStatus::Offline
        };
    }
    match status.map(str::to_ascii_lowercase).as_deref() {
        Some("offline") => ServerStatus::Offline,
        Some("maintenance") => ServerStatus::Maintenance,
        _ => ServerStatus::Online,
    }
}

/// Parse a record timestamp. The store emits `2024-01-01 10:00:00.123Z`;
/// RFC 3339 is accepted too. Unparseable values are dropped.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.fZ")
                .map(|ndt| ndt.and_utc())
                .ok()
        })
}

// ── Raw records ─────────────────────────────────────────────────────

/// Server document as stored, legacy shapes included.
#[derive(Debug, Clone, Deserialize)]
pub struct RawServer {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub docker_mode: Option<DockerModeField>,
    #[serde(default)]
    pub environment: Option<String>,
    /// Legacy alias. Migrated records may carry both fields;
    /// `environment` wins.
    #[serde(default)]
    pub env: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_netdata_enabled: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

impl From<RawServer> for Server {
    fn from(raw: RawServer) -> Self {
        Server {
            docker_mode: decode_docker_mode(raw.docker_mode.as_ref()),
            environment: decode_environment(raw.environment.as_deref().or(raw.env.as_deref())),
            status: decode_status(raw.is_active, raw.status.as_deref()),
            id: raw.id,
            name: raw.name,
            host: raw.host,
            ip: raw.ip,
            os: raw.os,
            location: raw.location,
            netdata_enabled: raw.is_netdata_enabled.unwrap_or(false),
            notes: raw.notes,
            created: parse_timestamp(&raw.created),
            updated: parse_timestamp(&raw.updated),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAppExpand {
    #[serde(default)]
    pub app: Option<AppMeta>,
}

/// App document as stored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawApp {
    pub id: String,
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub port: Option<u32>,
    #[serde(default)]
    pub environment: Option<String>,
    /// Legacy alias, see [`RawServer::env`].
    #[serde(default)]
    pub env: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub tech_stack: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub docker_mode: Option<DockerModeField>,
    #[serde(default)]
    pub backup_enabled: Option<bool>,
    #[serde(default)]
    pub backup_frequency: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub expand: Option<RawAppExpand>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

impl From<RawApp> for App {
    fn from(raw: RawApp) -> Self {
        App {
            docker_mode: decode_docker_mode(raw.docker_mode.as_ref()),
            backup_enabled: raw.backup_enabled.unwrap_or(false),
            backup_frequency: raw
                .backup_frequency
                .as_deref()
                .and_then(BackupFrequency::parse),
            meta: raw.expand.and_then(|e| e.app),
            id: raw.id,
            server: raw.server,
            name: raw.name,
            key: raw.key,
            department: raw.department,
            port: raw.port,
            environment: raw.environment.or(raw.env),
            repo_url: raw.repo_url,
            tech_stack: raw.tech_stack,
            owner: raw.owner,
            path: raw.path,
            status: raw.status,
            notes: raw.notes,
            created: parse_timestamp(&raw.created),
            updated: parse_timestamp(&raw.updated),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPortExpand {
    /// Partial app document inlined by the backend.
    #[serde(default)]
    pub app: Option<RawPortApp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPortApp {
    #[serde(default)]
    pub name: Option<String>,
}

/// Port document as stored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPort {
    pub id: String,
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub app: Option<String>,
    #[serde(default)]
    pub port: Option<u32>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub container_name: Option<String>,
    #[serde(default)]
    pub internal_port: Option<u32>,
    #[serde(default)]
    pub external_port: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expand: Option<RawPortExpand>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

impl From<RawPort> for Port {
    fn from(raw: RawPort) -> Self {
        Port {
            app_name: raw.expand.and_then(|e| e.app).and_then(|a| a.name),
            id: raw.id,
            server: raw.server,
            app: raw.app,
            port: raw.port,
            protocol: raw.protocol,
            status: raw.status,
            service_name: raw.service_name,
            container_name: raw.container_name,
            internal_port: raw.internal_port,
            external_port: raw.external_port,
            description: raw.description,
            created: parse_timestamp(&raw.created),
            updated: parse_timestamp(&raw.updated),
        }
    }
}
