//! Shared configuration for the opsdeck CLI.
//!
//! TOML file + `OPSDECK_`-prefixed environment variables over serialized
//! defaults, resolved to a base URL and transport settings. The record
//! store URL falls back to the hard-coded internal host when nothing
//! overrides it.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use opsdeck_api::TransportConfig;

/// Default record store host when no override is configured.
pub const DEFAULT_URL: &str = "http://ma-records.internal:8090/";

/// Application identifier attached to every login request.
pub const DEFAULT_APP_ID: &str = "ma";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config struct ───────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Record store base URL. `OPSDECK_URL` overrides.
    pub url: String,

    /// Application identifier sent with login requests.
    #[serde(default = "default_app_id")]
    pub app_id: String,

    /// Department code allowed to authenticate.
    #[serde(default = "default_dept")]
    pub allowed_dept: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept self-signed TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Session blob location. Defaults beside the config file.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.into(),
            app_id: default_app_id(),
            allowed_dept: default_dept(),
            timeout: default_timeout(),
            insecure: false,
            session_file: None,
        }
    }
}

fn default_app_id() -> String {
    DEFAULT_APP_ID.into()
}
fn default_dept() -> String {
    "MIS".into()
}
fn default_timeout() -> u64 {
    30
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "opsdeck", "opsdeck").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Where the persisted session profile lives, honoring the override.
pub fn session_path(config: &Config) -> PathBuf {
    config.session_file.clone().unwrap_or_else(|| {
        let mut p = config_path();
        p.set_file_name("session.json");
        p
    })
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("opsdeck");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load the Config from file + environment over defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("OPSDECK_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning the defaults if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Resolution ──────────────────────────────────────────────────────

/// Parse the configured base URL.
pub fn base_url(config: &Config) -> Result<Url, ConfigError> {
    config.url.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {}", config.url),
    })
}

/// Translate config into transport settings.
pub fn transport(config: &Config) -> TransportConfig {
    TransportConfig {
        timeout: Duration::from_secs(config.timeout),
        danger_accept_invalid_certs: config.insecure,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_internal_host() {
        let cfg = Config::default();
        assert_eq!(cfg.url, DEFAULT_URL);
        assert_eq!(cfg.app_id, "ma");
        assert_eq!(cfg.allowed_dept, "MIS");
        assert_eq!(cfg.timeout, 30);
        assert!(!cfg.insecure);
    }

    #[test]
    fn env_overrides_the_base_url() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OPSDECK_URL", "http://10.20.0.9:8090/");
            let figment = Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Env::prefixed("OPSDECK_"));
            let cfg: Config = figment.extract()?;
            assert_eq!(cfg.url, "http://10.20.0.9:8090/");
            Ok(())
        });
    }

    #[test]
    fn bad_url_is_a_validation_error() {
        let cfg = Config {
            url: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            base_url(&cfg),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn session_path_defaults_beside_config() {
        let cfg = Config::default();
        let path = session_path(&cfg);
        assert_eq!(path.file_name().unwrap(), "session.json");
    }
}
