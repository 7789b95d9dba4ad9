//! The stream ingestor: bytes in, ordered handler callbacks out.

use std::fmt::Display;
use std::marker::PhantomData;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use pulse_types::{StreamEnvelope, StreamError, StreamHandler, Summary};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::decode::Utf8Decoder;
use crate::frame::{LineFramer, data_payload};

/// How an ingestion ended.
///
/// This only tells the driver which way the loop exited; the handler has
/// already been told everything it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// A `complete` envelope was dispatched.
    Completed,
    /// `on_error` was called.
    Failed,
    /// Cancelled; no terminal callback fired.
    Cancelled,
}

/// Turns one generation's response body into handler callbacks.
///
/// Bytes are decoded with a [`Utf8Decoder`] and split by a [`LineFramer`].
/// Each `data: ` line is parsed as a [`StreamEnvelope<S>`] and dispatched:
/// `on_progress` first, then `on_content_chunk`, `on_complete` or `on_error`
/// depending on the envelope type. Malformed lines are logged and skipped.
/// Unknown envelope types are skipped silently.
///
/// The first terminal envelope (or transport failure, or end of input)
/// settles the ingestor; every later call is a no-op that returns the same
/// [`IngestOutcome`]. Once the cancellation token fires nothing more is
/// dispatched.
///
/// [`feed`](Self::feed) and [`finish`](Self::finish) are the synchronous
/// core; [`run`](Self::run) drives them from an async byte stream.
#[derive(Debug)]
pub struct StreamIngestor<S = Summary> {
    decoder: Utf8Decoder,
    framer: LineFramer,
    cancel: CancellationToken,
    outcome: Option<IngestOutcome>,
    _summary: PhantomData<fn() -> S>,
}

impl<S> Default for StreamIngestor<S> {
    fn default() -> Self {
        Self::with_cancellation(CancellationToken::new())
    }
}

impl<S> StreamIngestor<S> {
    /// Create an ingestor with its own cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an ingestor that stops when `cancel` fires.
    #[must_use]
    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self {
            decoder: Utf8Decoder::new(),
            framer: LineFramer::new(),
            cancel,
            outcome: None,
            _summary: PhantomData,
        }
    }

    /// A handle to this ingestor's cancellation token.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// How ingestion ended, or `None` while it is still running.
    #[must_use]
    pub fn outcome(&self) -> Option<IngestOutcome> {
        self.outcome
    }

    fn settle(&mut self, outcome: IngestOutcome) -> IngestOutcome {
        debug!(?outcome, "stream ingestion settled");
        self.outcome = Some(outcome);
        outcome
    }

    /// Report a failure that happened outside the body (connection error,
    /// non-success status) and settle as [`IngestOutcome::Failed`].
    ///
    /// Does nothing if already settled. A cancelled ingestor settles as
    /// [`IngestOutcome::Cancelled`] without calling the handler.
    pub fn fail<H>(&mut self, error: StreamError, handler: &mut H) -> IngestOutcome
    where
        H: StreamHandler<S> + ?Sized,
    {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        if self.cancel.is_cancelled() {
            return self.settle(IngestOutcome::Cancelled);
        }
        warn!(error = %error, "summary stream failed");
        handler.on_error(error.to_string());
        self.settle(IngestOutcome::Failed)
    }
}

impl<S: DeserializeOwned> StreamIngestor<S> {
    /// Process one chunk of the body, dispatching every envelope it
    /// completes. Returns the outcome once settled.
    pub fn feed<H>(&mut self, chunk: &[u8], handler: &mut H) -> Option<IngestOutcome>
    where
        H: StreamHandler<S> + ?Sized,
    {
        if self.outcome.is_some() {
            return self.outcome;
        }
        if self.cancel.is_cancelled() {
            return Some(self.settle(IngestOutcome::Cancelled));
        }
        let text = self.decoder.decode(chunk);
        for line in self.framer.push(&text) {
            if let Some(outcome) = self.process_line(&line, handler) {
                return Some(outcome);
            }
        }
        None
    }

    /// Signal end of input. Flushes the decoder, processes the remaining
    /// partial line, and reports a missing terminal envelope as an error.
    pub fn finish<H>(&mut self, handler: &mut H) -> IngestOutcome
    where
        H: StreamHandler<S> + ?Sized,
    {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        if self.cancel.is_cancelled() {
            return self.settle(IngestOutcome::Cancelled);
        }
        let tail = self.decoder.finish();
        let mut lines = self.framer.push(&tail);
        lines.extend(self.framer.finish());
        for line in lines {
            if let Some(outcome) = self.process_line(&line, handler) {
                return outcome;
            }
        }
        self.fail(StreamError::MissingTerminal, handler)
    }

    /// Read `body` to the end, one chunk at a time, dispatching to `handler`.
    ///
    /// Only one read is in flight at a time and each chunk is fully
    /// dispatched before the next read. The body is dropped as soon as the
    /// ingestor settles, even if bytes remain. A read error is reported
    /// through `on_error`.
    pub async fn run<B, E, H>(&mut self, body: B, handler: &mut H) -> IngestOutcome
    where
        B: Stream<Item = Result<Bytes, E>>,
        E: Display,
        H: StreamHandler<S> + ?Sized,
    {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        let cancel = self.cancel.clone();
        let mut body = Box::pin(body);
        let outcome = loop {
            let next = tokio::select! {
                biased;
                () = cancel.cancelled() => break self.settle(IngestOutcome::Cancelled),
                next = body.next() => next,
            };
            match next {
                Some(Ok(chunk)) => {
                    trace!(len = chunk.len(), "stream chunk");
                    if let Some(outcome) = self.feed(&chunk, handler) {
                        break outcome;
                    }
                }
                Some(Err(e)) => {
                    break self.fail(StreamError::Transport(e.to_string()), handler);
                }
                None => break self.finish(handler),
            }
        };
        drop(body);
        trace!("stream body released");
        outcome
    }

    fn process_line<H>(&mut self, line: &str, handler: &mut H) -> Option<IngestOutcome>
    where
        H: StreamHandler<S> + ?Sized,
    {
        let Some(payload) = data_payload(line) else {
            if !line.is_empty() {
                trace!(line, "ignoring non-data line");
            }
            return None;
        };
        match serde_json::from_str::<StreamEnvelope<S>>(payload) {
            Ok(envelope) => self.dispatch(envelope, handler),
            Err(e) => {
                warn!(error = %e, payload, "skipping malformed stream frame");
                None
            }
        }
    }

    fn dispatch<H>(&mut self, envelope: StreamEnvelope<S>, handler: &mut H) -> Option<IngestOutcome>
    where
        H: StreamHandler<S> + ?Sized,
    {
        if self.cancel.is_cancelled() {
            return Some(self.settle(IngestOutcome::Cancelled));
        }
        if matches!(envelope, StreamEnvelope::Unknown) {
            trace!("skipping envelope of unknown type");
            return None;
        }

        handler.on_progress(&envelope);
        if self.cancel.is_cancelled() {
            return Some(self.settle(IngestOutcome::Cancelled));
        }

        match envelope {
            StreamEnvelope::ContentChunk { language, content } => {
                handler.on_content_chunk(&language, &content);
                None
            }
            StreamEnvelope::Complete { summary } => {
                handler.on_complete(summary);
                Some(self.settle(IngestOutcome::Completed))
            }
            error @ StreamEnvelope::Error { .. } => {
                let reason = error.failure_reason().unwrap_or_default();
                debug!(reason = %reason, "producer reported failure");
                handler.on_error(reason);
                Some(self.settle(IngestOutcome::Failed))
            }
            _ => None,
        }
    }
}
