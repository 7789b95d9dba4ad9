//! Streamed summary generation, one at a time.

use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use pulse_stream::{IngestOutcome, StreamIngestor};
use pulse_types::{GenerationError, StreamError, StreamHandler, Summary};
use reqwest::header::ACCEPT;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

use crate::client::PulseClient;
use crate::error::error_detail;

/// Which summary to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    /// Summary of one day. `None` lets the backend pick today.
    Daily {
        /// Day to summarize.
        date: Option<NaiveDate>,
    },
    /// Summary of one week. `None` lets the backend pick the current week.
    Weekly {
        /// First day of the week.
        start_date: Option<NaiveDate>,
    },
}

impl SummaryKind {
    /// A daily summary.
    #[must_use]
    pub fn daily(date: Option<NaiveDate>) -> Self {
        Self::Daily { date }
    }

    /// A weekly summary.
    #[must_use]
    pub fn weekly(start_date: Option<NaiveDate>) -> Self {
        Self::Weekly { start_date }
    }

    /// `"daily"` or `"weekly"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily { .. } => "daily",
            Self::Weekly { .. } => "weekly",
        }
    }

    /// Path of the non-streaming endpoint.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Daily { .. } => "/v1/monitoring/generate-daily-summary",
            Self::Weekly { .. } => "/v1/monitoring/generate-weekly-summary",
        }
    }

    /// Path of the streaming endpoint.
    #[must_use]
    pub fn stream_path(self) -> &'static str {
        match self {
            Self::Daily { .. } => "/v1/monitoring/generate-daily-summary-stream",
            Self::Weekly { .. } => "/v1/monitoring/generate-weekly-summary-stream",
        }
    }

    /// Request body: `{"date": "YYYY-MM-DD"}`, `{"start_date": ...}`, or
    /// `{}` when no date is given.
    #[must_use]
    pub fn body(self) -> serde_json::Value {
        let (key, date) = match self {
            Self::Daily { date } => ("date", date),
            Self::Weekly { start_date } => ("start_date", start_date),
        };
        let mut body = serde_json::Map::new();
        if let Some(date) = date {
            body.insert(key.into(), date.format("%Y-%m-%d").to_string().into());
        }
        serde_json::Value::Object(body)
    }
}

/// Bookkeeping for the generation currently owned by a generator.
struct Active {
    cancel: CancellationToken,
    released: CancellationToken,
}

/// Runs streamed summary generations, at most one at a time.
///
/// [`start`](Self::start) refuses while a generation is still streaming;
/// [`restart`](Self::restart) cancels it first. Everything that goes wrong
/// after a generation has started reaches the handler's `on_error`.
pub struct SummaryGenerator {
    client: PulseClient,
    active: Mutex<Option<Active>>,
}

impl SummaryGenerator {
    /// Create a generator that talks to the backend through `client`.
    #[must_use]
    pub fn new(client: PulseClient) -> Self {
        Self {
            client,
            active: Mutex::new(None),
        }
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &PulseClient {
        &self.client
    }

    /// Whether a generation is still streaming.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|a| !a.released.is_cancelled())
    }

    /// Cancel the running generation, if any. Its handler hears nothing
    /// more.
    pub fn cancel(&self) {
        if let Some(active) = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            active.cancel.cancel();
        }
    }

    /// Start generating `kind`, reporting to `handler` from a spawned task.
    ///
    /// Fails with [`GenerationError::AlreadyActive`] while a previous
    /// generation is still streaming, and with
    /// [`GenerationError::InvalidRequest`] outside a Tokio runtime.
    pub fn start<H>(&self, kind: SummaryKind, handler: H) -> Result<GenerationHandle<H>, GenerationError>
    where
        H: StreamHandler<Summary> + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| GenerationError::InvalidRequest(e.to_string()))?;
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if active.as_ref().is_some_and(|a| !a.released.is_cancelled()) {
            return Err(GenerationError::AlreadyActive);
        }

        let cancel = CancellationToken::new();
        let released = CancellationToken::new();
        let task = runtime.spawn(stream_generation(
            self.client.clone(),
            kind,
            handler,
            cancel.clone(),
            released.clone(),
        ));
        *active = Some(Active {
            cancel: cancel.clone(),
            released: released.clone(),
        });
        Ok(GenerationHandle {
            task,
            drop_guard: cancel.clone().drop_guard(),
            cancel,
            released,
        })
    }

    /// Cancel any running generation, wait until it has let go of its
    /// response body, then [`start`](Self::start) a new one.
    pub async fn restart<H>(
        &self,
        kind: SummaryKind,
        handler: H,
    ) -> Result<GenerationHandle<H>, GenerationError>
    where
        H: StreamHandler<Summary> + Send + 'static,
    {
        let prior = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|a| (a.cancel.clone(), a.released.clone()));
        if let Some((cancel, released)) = prior {
            cancel.cancel();
            released.cancelled().await;
        }
        self.start(kind, handler)
    }
}

/// A running streamed generation.
///
/// Dropping the handle without [`join`](Self::join)ing it cancels the
/// generation the same way [`cancel`](Self::cancel) does.
pub struct GenerationHandle<H> {
    task: JoinHandle<(IngestOutcome, H)>,
    cancel: CancellationToken,
    released: CancellationToken,
    drop_guard: DropGuard,
}

impl<H> GenerationHandle<H> {
    /// Stop the generation silently: no terminal callback fires and the
    /// response body is released.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A token that cancels this generation when fired.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether the generation has stopped streaming.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.released.is_cancelled()
    }

    /// Wait for the generation to end and take the handler back.
    ///
    /// A panic inside the handler resumes here.
    pub async fn join(self) -> Result<(IngestOutcome, H), GenerationError> {
        let Self {
            task, drop_guard, ..
        } = self;
        // Still armed while waiting: dropping this future cancels the stream.
        let joined = task.await;
        drop_guard.disarm();
        match joined {
            Ok(done) => Ok(done),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(GenerationError::Interrupted(e.to_string())),
        }
    }
}

async fn stream_generation<H>(
    client: PulseClient,
    kind: SummaryKind,
    mut handler: H,
    cancel: CancellationToken,
    released: CancellationToken,
) -> (IngestOutcome, H)
where
    H: StreamHandler<Summary>,
{
    // Fires when this task ends, however it ends.
    let _released = released.drop_guard();
    let mut ingestor = StreamIngestor::<Summary>::with_cancellation(cancel.clone());

    let url = client.url(kind.stream_path());
    debug!(url = %url, kind = kind.label(), "starting streamed summary generation");
    let request = client
        .http
        .post(&url)
        .header(ACCEPT, "text/event-stream")
        .json(&kind.body());

    let sent = tokio::select! {
        biased;
        () = cancel.cancelled() => return (IngestOutcome::Cancelled, handler),
        sent = request.send() => sent,
    };
    let response = match sent {
        Ok(response) => response,
        Err(e) => {
            let outcome = ingestor.fail(StreamError::Transport(e.to_string()), &mut handler);
            return (outcome, handler);
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let error = StreamError::Status {
            status: status.as_u16(),
            detail: error_detail(&body),
        };
        let outcome = ingestor.fail(error, &mut handler);
        return (outcome, handler);
    }

    let outcome = ingestor.run(response.bytes_stream(), &mut handler).await;
    debug!(?outcome, kind = kind.label(), "streamed summary generation ended");
    (outcome, handler)
}
