//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use whereabouts_config::ConfigError;
use whereabouts_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 3;
    pub const TIMEOUT: i32 = 4;
    pub const API: i32 = 5;
    pub const DATA: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the API at {url}")]
    #[diagnostic(
        code(whereabouts::connection_failed),
        help(
            "Check your network connection, or point --endpoint at a\n\
             reachable generator instance."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(whereabouts::timeout),
        help("Increase the timeout with --timeout or check API responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(code(whereabouts::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    #[error("The API returned a payload this version cannot read: {message}")]
    #[diagnostic(
        code(whereabouts::bad_payload),
        help("The API may have changed shape; try upgrading whereabouts.")
    )]
    BadPayload { message: String },

    // ── Data ─────────────────────────────────────────────────────────

    #[error("Location data has two fields named '{column}'")]
    #[diagnostic(
        code(whereabouts::duplicate_column),
        help(
            "Flattening refuses to silently drop one of the values.\n\
             Try a different --seed, or report the offending dataset."
        )
    )]
    DuplicateColumn { column: String },

    #[error("Unknown sort column '{column}'")]
    #[diagnostic(
        code(whereabouts::unknown_column),
        help("Available columns: {available}")
    )]
    UnknownColumn { column: String, available: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(whereabouts::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(whereabouts::profile_not_found),
        help("Create one with: whereabouts config init")
    )]
    ProfileNotFound { name: String },

    #[error(transparent)]
    #[diagnostic(code(whereabouts::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    #[diagnostic(code(whereabouts::serialize))]
    Serialize(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::ApiError { .. } => exit_code::API,
            Self::BadPayload { .. } | Self::DuplicateColumn { .. } => exit_code::DATA,
            Self::UnknownColumn { .. } | Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::BadPayload { message } => CliError::BadPayload { message },

            CoreError::DuplicateColumn { column } => CliError::DuplicateColumn { column },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                message,
                status: None,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { profile } => {
                CliError::ProfileNotFound { name: profile }
            }
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            ConfigError::Serialization(e) => CliError::Serialize(e.to_string()),
            other => CliError::Config(Box::new(other)),
        }
    }
}
