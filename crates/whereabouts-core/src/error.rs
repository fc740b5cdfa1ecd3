// ── Core error types ──
//
// User-facing errors from whereabouts-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<whereabouts_api::Error>` impl translates transport-layer
// errors into domain-appropriate variants.

use thiserror::Error;

use crate::flatten::FlattenError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Fetch errors ─────────────────────────────────────────────────
    #[error("Cannot reach {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Fetch timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if one was received).
        status: Option<u16>,
    },

    #[error("Malformed response payload: {message}")]
    BadPayload { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Duplicate column '{column}' while flattening location data")]
    DuplicateColumn { column: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<whereabouts_api::Error> for CoreError {
    fn from(err: whereabouts_api::Error) -> Self {
        match err {
            whereabouts_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            whereabouts_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            whereabouts_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            whereabouts_api::Error::Deserialization { message, body: _ } => {
                CoreError::BadPayload { message }
            }
        }
    }
}

impl From<FlattenError> for CoreError {
    fn from(err: FlattenError) -> Self {
        match err {
            FlattenError::DuplicateKey { key } => CoreError::DuplicateColumn { column: key },
        }
    }
}
