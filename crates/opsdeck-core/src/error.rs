// ── Core error types ──
//
// User-facing errors from opsdeck-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<opsdeck_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    /// Bad credentials, sentinel login body, or an unreachable login
    /// endpoint. Deliberately indistinguishable.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Credentials were valid but the account's department is not on
    /// the allowlist. The profile is discarded, never persisted.
    #[error("Account department '{dept}' is not permitted to use this dashboard")]
    PermissionDenied { dept: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("No record '{id}' in collection '{collection}'")]
    NotFound { collection: String, id: String },

    /// Client-side validation failure; never reaches the network.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Transport errors ─────────────────────────────────────────────
    #[error("Cannot reach the record store: {reason}")]
    Connection { reason: String },

    #[error("Record store error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<opsdeck_api::Error> for CoreError {
    fn from(err: opsdeck_api::Error) -> Self {
        match err {
            opsdeck_api::Error::Authentication { .. } => CoreError::InvalidCredentials,
            opsdeck_api::Error::NotFound { collection, id } => {
                CoreError::NotFound { collection, id }
            }
            opsdeck_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_timeout() {
                    CoreError::Connection {
                        reason: e.to_string(),
                    }
                } else if e.status().map(|s| s.as_u16()) == Some(404) {
                    CoreError::NotFound {
                        collection: String::new(),
                        id: e.url().map(|u| u.path().to_owned()).unwrap_or_default(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            opsdeck_api::Error::InvalidUrl(e) => CoreError::Connection {
                reason: format!("invalid URL: {e}"),
            },
            opsdeck_api::Error::Tls(msg) => CoreError::Connection { reason: msg },
            opsdeck_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            opsdeck_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("deserialization error: {message}"))
            }
        }
    }
}
