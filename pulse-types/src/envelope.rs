//! Envelopes of a streamed summary generation.
//!
//! The backend answers `POST /v1/monitoring/generate-*-summary-stream` with a
//! text stream of `data: <json>` lines separated by blank lines. Each JSON
//! payload is one [`StreamEnvelope`], tagged by its `type` field:
//!
//! ```text
//! data: {"type":"start","message":"starting daily summary"}
//!
//! data: {"type":"progress","progress":10,"message":"collecting activities"}
//!
//! data: {"type":"content_chunk","language":"chinese","content":"今天"}
//!
//! data: {"type":"complete","summary":{...}}
//! ```

use serde::{Deserialize, Serialize};

use crate::records::Summary;

/// Language tag for the Chinese summary text.
pub const CHINESE: &str = "chinese";

/// Language tag for the English summary text.
pub const ENGLISH: &str = "english";

/// One decoded message of a summary stream.
///
/// Generic over the payload of the `complete` envelope so the same framing
/// and dispatch code serves any summary record shape; it defaults to
/// [`Summary`].
///
/// Types this client does not know deserialize to [`StreamEnvelope::Unknown`]
/// and are skipped by consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEnvelope<S = Summary> {
    /// Generation has begun.
    Start {
        /// Status text for display.
        #[serde(default)]
        message: String,
    },
    /// Progress report. The percentage is an opaque display hint chosen by
    /// the backend; it is usually but not necessarily non-decreasing.
    Progress {
        /// Percentage, nominally 0–100.
        #[serde(default)]
        progress: i64,
        /// Status text for display.
        #[serde(default)]
        message: String,
    },
    /// Text generation for one language is about to start.
    ContentStart {
        /// Language tag, e.g. [`CHINESE`] or [`ENGLISH`].
        language: String,
        /// Optional status text.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// A fragment of generated text for one language.
    ///
    /// The fragment may be empty and may split a Markdown construct.
    ContentChunk {
        /// Language tag the fragment belongs to.
        language: String,
        /// Text fragment, appended verbatim.
        #[serde(default)]
        content: String,
    },
    /// Text generation for one language has finished.
    ContentEnd {
        /// Language tag.
        language: String,
        /// Optional status text.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        /// Optional progress percentage.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        progress: Option<i64>,
    },
    /// The summary was generated and stored.
    Complete {
        /// The stored summary record.
        summary: S,
    },
    /// The backend gave up.
    Error {
        /// Human-readable failure text.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        /// Alternate failure field used by some producers.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// Any `type` this client does not recognise.
    #[serde(other)]
    Unknown,
}

impl<S> StreamEnvelope<S> {
    /// The wire `type` tag of this envelope.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Progress { .. } => "progress",
            Self::ContentStart { .. } => "content_start",
            Self::ContentChunk { .. } => "content_chunk",
            Self::ContentEnd { .. } => "content_end",
            Self::Complete { .. } => "complete",
            Self::Error { .. } => "error",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this envelope ends the generation.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::Error { .. })
    }

    /// The language tag carried by content envelopes.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        match self {
            Self::ContentStart { language, .. }
            | Self::ContentChunk { language, .. }
            | Self::ContentEnd { language, .. } => Some(language),
            _ => None,
        }
    }

    /// The failure text of an `error` envelope.
    ///
    /// Prefers `message`, falls back to `error`, and finally to a generic
    /// text so the caller always has something to show.
    #[must_use]
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Error { message, error } => Some(
                [message, error]
                    .into_iter()
                    .flatten()
                    .find(|m| !m.is_empty())
                    .cloned()
                    .unwrap_or_else(|| "summary generation failed".to_string()),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type Envelope = StreamEnvelope<serde_json::Value>;

    fn parse(value: serde_json::Value) -> Envelope {
        serde_json::from_value(value).expect("valid envelope")
    }

    #[test]
    fn parses_progress() {
        let env = parse(json!({"type": "progress", "progress": 35, "message": "working"}));
        assert_eq!(
            env,
            Envelope::Progress {
                progress: 35,
                message: "working".into()
            }
        );
        assert!(!env.is_terminal());
    }

    #[test]
    fn parses_content_chunk_with_missing_content_as_empty() {
        let env = parse(json!({"type": "content_chunk", "language": "english"}));
        assert_eq!(env.language(), Some(ENGLISH));
        assert!(matches!(env, Envelope::ContentChunk { ref content, .. } if content.is_empty()));
    }

    #[test]
    fn unknown_type_is_not_an_error() {
        let env = parse(json!({"type": "heartbeat", "at": 3}));
        assert_eq!(env, Envelope::Unknown);
        assert_eq!(env.kind(), "unknown");
    }

    #[test]
    fn missing_type_is_an_error() {
        let res: Result<Envelope, _> = serde_json::from_value(json!({"progress": 3}));
        assert!(res.is_err());
    }

    #[test]
    fn complete_carries_payload() {
        let env = parse(json!({"type": "complete", "summary": {"id": 7}}));
        assert!(env.is_terminal());
        assert!(matches!(env, Envelope::Complete { ref summary } if summary["id"] == 7));
    }

    #[test]
    fn failure_reason_prefers_message() {
        let env = parse(json!({"type": "error", "message": "no activities", "error": "x"}));
        assert_eq!(env.failure_reason().as_deref(), Some("no activities"));

        let env = parse(json!({"type": "error", "error": "boom"}));
        assert_eq!(env.failure_reason().as_deref(), Some("boom"));

        let env = parse(json!({"type": "error"}));
        assert_eq!(
            env.failure_reason().as_deref(),
            Some("summary generation failed")
        );
    }

    #[test]
    fn failure_reason_is_none_for_other_kinds() {
        let env = parse(json!({"type": "start", "message": "go"}));
        assert!(env.failure_reason().is_none());
    }
}
