//! Recording handler for tests.
//!
//! Available behind the `test-utils` feature flag.

use std::sync::{Arc, Mutex};

use crate::envelope::StreamEnvelope;
use crate::handler::StreamHandler;
use crate::records::Summary;

/// One recorded [`StreamHandler`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerCall<S = Summary> {
    /// `on_progress`
    Progress(StreamEnvelope<S>),
    /// `on_content_chunk`
    Chunk {
        /// Language tag.
        language: String,
        /// Text fragment.
        content: String,
    },
    /// `on_complete`
    Complete(S),
    /// `on_error`
    Error(String),
}

impl<S> HandlerCall<S> {
    /// Whether this call is `on_complete` or `on_error`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete(_) | Self::Error(_))
    }
}

/// A handler that records every call. Clones share the same log, so a test
/// can keep one clone while the other is moved into a running generation.
#[derive(Debug)]
pub struct RecordingHandler<S = Summary> {
    calls: Arc<Mutex<Vec<HandlerCall<S>>>>,
}

impl<S> RecordingHandler<S> {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn push(&self, call: HandlerCall<S>) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }
}

impl<S: Clone> RecordingHandler<S> {
    /// Snapshot of all recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<HandlerCall<S>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The envelopes passed to `on_progress`, in order.
    #[must_use]
    pub fn envelopes(&self) -> Vec<StreamEnvelope<S>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                HandlerCall::Progress(env) => Some(env),
                _ => None,
            })
            .collect()
    }

    /// The terminal calls recorded so far.
    #[must_use]
    pub fn terminals(&self) -> Vec<HandlerCall<S>> {
        self.calls().into_iter().filter(HandlerCall::is_terminal).collect()
    }
}

impl<S> Clone for RecordingHandler<S> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<S> Default for RecordingHandler<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone> StreamHandler<S> for RecordingHandler<S> {
    fn on_progress(&mut self, envelope: &StreamEnvelope<S>) {
        self.push(HandlerCall::Progress(envelope.clone()));
    }

    fn on_content_chunk(&mut self, language: &str, content: &str) {
        self.push(HandlerCall::Chunk {
            language: language.to_string(),
            content: content.to_string(),
        });
    }

    fn on_complete(&mut self, summary: S) {
        self.push(HandlerCall::Complete(summary));
    }

    fn on_error(&mut self, message: String) {
        self.push(HandlerCall::Error(message));
    }
}
