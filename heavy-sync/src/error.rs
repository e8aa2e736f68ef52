//! Error types for the sync layer.
//!
//! Two levels: [`GatewayError`] is what a REST call can produce, and
//! [`SyncFailure`] is the normalized form the engine stores and reports.
//! Raw gateway errors never reach the store.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for engine-level operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Result type for API gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors surfaced by the engine itself (not by a remote call).
#[derive(Debug, Error)]
pub enum SyncError {
    /// The engine stopped before the dispatch settled.
    #[error("channel closed")]
    ChannelClosed,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Raw outcome of a failed REST call, before classification.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No response was received (connect failure, timeout, reset).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {}", body.message.as_deref().unwrap_or("no message"))]
    Status { status: u16, body: ErrorBody },

    /// A 2xx response whose body did not match the expected envelope.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

/// Optional JSON body carried by a non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    /// Field-level validation messages (422 responses).
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Normalized failure taxonomy stored in sync metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Payload rejected by server-side rules.
    Validation,
    /// The identifier no longer exists.
    NotFound,
    /// No response from the server.
    Network,
    /// The server failed (5xx), refused the request (401, 403, ...) or
    /// answered with something unreadable.
    Server,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation error",
            ErrorKind::NotFound => "not found",
            ErrorKind::Network => "network error",
            ErrorKind::Server => "server error",
        };
        f.write_str(name)
    }
}

/// A classified failure, as stored in `error()` and sent in notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncFailure {
    pub kind: ErrorKind,
    pub message: String,
    /// Field-level messages for validation failures; empty otherwise.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl SyncFailure {
    /// Creates a failure with no field errors.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: BTreeMap::new(),
        }
    }

    /// Classifies a gateway error. `fallback` is used when the server did
    /// not supply a message.
    ///
    /// 400, 409 and 422 map to validation and 404 to not-found. Any other
    /// status (401, 403, 5xx, ...) and unreadable bodies map to server;
    /// missing responses map to network.
    pub fn classify(err: GatewayError, fallback: &str) -> Self {
        match err {
            GatewayError::Transport(_) => Self::new(ErrorKind::Network, fallback),
            GatewayError::Decode(_) => Self::new(ErrorKind::Server, fallback),
            GatewayError::Status { status, body } => {
                let kind = match status {
                    404 => ErrorKind::NotFound,
                    400 | 409 | 422 => ErrorKind::Validation,
                    _ => ErrorKind::Server,
                };
                let first_field = body
                    .errors
                    .values()
                    .find_map(|messages| messages.first().cloned());
                let message = match (status, first_field, body.message) {
                    (422, Some(field), _) => field,
                    (_, _, Some(message)) if !message.is_empty() => message,
                    _ => fallback.to_string(),
                };
                Self {
                    kind,
                    message,
                    field_errors: body.errors,
                }
            }
        }
    }
}

impl fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, message: Option<&str>) -> GatewayError {
        GatewayError::Status {
            status,
            body: ErrorBody {
                message: message.map(str::to_string),
                errors: BTreeMap::new(),
            },
        }
    }

    #[test]
    fn classify_by_status() {
        assert_eq!(
            SyncFailure::classify(status(404, None), "x").kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            SyncFailure::classify(status(503, None), "x").kind,
            ErrorKind::Server
        );
        assert_eq!(
            SyncFailure::classify(status(422, None), "x").kind,
            ErrorKind::Validation
        );
        assert_eq!(
            SyncFailure::classify(status(409, None), "x").kind,
            ErrorKind::Validation
        );
        assert_eq!(
            SyncFailure::classify(status(400, None), "x").kind,
            ErrorKind::Validation
        );
    }

    #[test]
    fn auth_rejections_are_not_validation() {
        let failure = SyncFailure::classify(status(401, Some("Unauthenticated.")), "failed");
        assert_eq!(failure.kind, ErrorKind::Server);
        assert_eq!(failure.message, "Unauthenticated.");

        let failure = SyncFailure::classify(status(403, None), "failed to delete widget");
        assert_eq!(failure.kind, ErrorKind::Server);
        assert_eq!(failure.message, "failed to delete widget");
    }

    #[test]
    fn transport_is_network() {
        let failure =
            SyncFailure::classify(GatewayError::Transport("reset".into()), "failed to load");
        assert_eq!(failure.kind, ErrorKind::Network);
        assert_eq!(failure.message, "failed to load");
    }

    #[test]
    fn decode_is_server() {
        let failure = SyncFailure::classify(GatewayError::Decode("eof".into()), "oops");
        assert_eq!(failure.kind, ErrorKind::Server);
    }

    #[test]
    fn validation_prefers_first_field_error() {
        let mut errors = BTreeMap::new();
        errors.insert(
            "nombre".to_string(),
            vec!["The name field is required.".to_string()],
        );
        let err = GatewayError::Status {
            status: 422,
            body: ErrorBody {
                message: Some("The given data was invalid.".into()),
                errors,
            },
        };
        let failure = SyncFailure::classify(err, "failed to create manufacturer");
        assert_eq!(failure.message, "The name field is required.");
        assert_eq!(failure.field_errors.len(), 1);
    }

    #[test]
    fn server_message_beats_fallback() {
        let failure = SyncFailure::classify(status(500, Some("database down")), "fallback");
        assert_eq!(failure.message, "database down");

        let failure = SyncFailure::classify(status(500, Some("")), "fallback");
        assert_eq!(failure.message, "fallback");
    }

    #[test]
    fn failure_display() {
        let failure = SyncFailure::new(ErrorKind::NotFound, "manufacturer 9 not found");
        assert_eq!(failure.to_string(), "not found: manufacturer 9 not found");
    }
}
