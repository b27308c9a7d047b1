//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use opsdeck_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the record store")]
    #[diagnostic(
        code(opsdeck::connection_failed),
        help(
            "Check that the record store is running and accessible.\n\
             Reason: {reason}\n\
             Override the host with --url or OPSDECK_URL."
        )
    )]
    ConnectionFailed { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Invalid username or password")]
    #[diagnostic(code(opsdeck::auth_failed))]
    AuthFailed,

    #[error("Account department '{dept}' is not permitted to use this dashboard")]
    #[diagnostic(
        code(opsdeck::permission_denied),
        help("Only the allowed department can sign in. Contact the IT team lead.")
    )]
    PermissionDenied { dept: String },

    #[error("Not logged in")]
    #[diagnostic(code(opsdeck::no_session), help("Run: opsdeck login <username>"))]
    NoSession,

    // ── Resources ────────────────────────────────────────────────────
    #[error("No record '{id}' in collection '{collection}'")]
    #[diagnostic(code(opsdeck::not_found))]
    NotFound { collection: String, id: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(opsdeck::validation))]
    Validation { field: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Record store error: {message}")]
    #[diagnostic(code(opsdeck::api_error))]
    ApiError { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    #[diagnostic(code(opsdeck::config))]
    Config(#[from] opsdeck_config::ConfigError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed | Self::NoSession => exit_code::AUTH,
            Self::PermissionDenied { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCredentials => CliError::AuthFailed,
            CoreError::PermissionDenied { dept } => CliError::PermissionDenied { dept },
            CoreError::NotFound { collection, id } => CliError::NotFound { collection, id },
            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Connection { reason } => CliError::ConnectionFailed { reason },
            CoreError::Api { message, status: _ } => CliError::ApiError { message },
            CoreError::Internal(message) => CliError::ApiError { message },
        }
    }
}
