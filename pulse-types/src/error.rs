//! Error types for all pulse crates.

use std::time::Duration;

/// Errors from backend HTTP calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    // Retryable errors
    /// Network-level error (connection refused, reset, DNS failure, …).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Request timed out.
    #[error("timeout after {0:?}")]
    Timeout(Duration),
    /// Backend answered 5xx.
    #[error("service unavailable ({status}): {detail}")]
    ServiceUnavailable {
        /// HTTP status code.
        status: u16,
        /// Backend-provided detail.
        detail: String,
    },

    // Terminal errors
    /// Backend answered 404.
    #[error("not found: {0}")]
    NotFound(String),
    /// Backend answered 400 or 422.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Backend answered 401 or 403.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Backend answered another non-success status.
    #[error("HTTP {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend-provided detail.
        detail: String,
    },
    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
    /// Input rejected before any request was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The backend has no export for this kind/format pair.
    #[error("unsupported export: {kind} as {format}")]
    UnsupportedExport {
        /// Export kind.
        kind: String,
        /// Export format.
        format: String,
    },
}

impl ClientError {
    /// Whether this error is likely transient and the request can be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::ServiceUnavailable { .. }
        )
    }

    /// The HTTP status behind this error, if the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Unauthorized(_) => Some(401),
            Self::BadRequest(_) => Some(400),
            Self::ServiceUnavailable { status, .. } | Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures inside a started streamed generation.
///
/// These never surface as `Err` from the streaming API; their `Display`
/// text is what [`StreamHandler::on_error`](crate::StreamHandler::on_error)
/// receives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// The connection failed or broke while reading.
    #[error("stream transport error: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend-provided detail.
        detail: String,
    },
    /// The producer reported a failure through an `error` envelope.
    #[error("{0}")]
    Producer(String),
    /// The byte stream ended before any terminal envelope.
    #[error("stream ended without terminal envelope")]
    MissingTerminal,
}

/// Synchronous precondition failures when starting a streamed generation.
///
/// Everything that goes wrong after a generation has started is reported
/// through [`StreamHandler::on_error`](crate::StreamHandler::on_error)
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// A generation is still streaming; cancel it or use `restart`.
    #[error("a summary generation is already in progress")]
    AlreadyActive,
    /// The request could not be built.
    #[error("invalid generation request: {0}")]
    InvalidRequest(String),
    /// The generation task was torn down before it could report back,
    /// e.g. because the runtime shut down.
    #[error("generation task interrupted: {0}")]
    Interrupted(String),
}

/// Errors from loading or saving UI preferences.
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    /// Serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// I/O error while reading or writing the preferences file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from loading client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable or file field has an unusable value.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Variable or field name.
        key: String,
        /// The rejected value.
        value: String,
    },
    /// The config file could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// The config file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(ClientError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(
            ClientError::ServiceUnavailable {
                status: 503,
                detail: "down".into()
            }
            .is_retryable()
        );
        assert!(!ClientError::NotFound("x".into()).is_retryable());
        assert_eq!(ClientError::NotFound("x".into()).status(), Some(404));
        assert_eq!(ClientError::Decode("x".into()).status(), None);
    }

    #[test]
    fn stream_error_messages() {
        assert_eq!(
            StreamError::MissingTerminal.to_string(),
            "stream ended without terminal envelope"
        );
        assert_eq!(StreamError::Producer("quota".into()).to_string(), "quota");
        assert_eq!(
            StreamError::Status {
                status: 500,
                detail: "boom".into()
            }
            .to_string(),
            "HTTP 500: boom"
        );
    }
}
