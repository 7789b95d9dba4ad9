//! Stored summaries and non-streaming generation.

use pulse_types::{ClientError, Summary, SummaryCreate, SummaryQuery};

use crate::client::PulseClient;
use crate::generator::SummaryKind;

impl PulseClient {
    /// `GET /v1/summaries/`. The query's `language` decides whether
    /// `content` or `content_en` is filled in.
    pub async fn summaries(&self, query: &SummaryQuery) -> Result<Vec<Summary>, ClientError> {
        self.get_query("/v1/summaries/", query).await
    }

    /// `GET /v1/summaries/{id}`.
    pub async fn summary(&self, id: i64) -> Result<Summary, ClientError> {
        self.get(&format!("/v1/summaries/{id}")).await
    }

    /// `POST /v1/summaries/`.
    pub async fn create_summary(&self, summary: &SummaryCreate) -> Result<Summary, ClientError> {
        if summary.title.trim().is_empty() {
            return Err(ClientError::InvalidInput("summary title is empty".into()));
        }
        self.post("/v1/summaries/", summary).await
    }

    /// Generate and store a summary in one blocking request
    /// (`POST /v1/monitoring/generate-daily-summary` or
    /// `/generate-weekly-summary`). Use
    /// [`SummaryGenerator`](crate::SummaryGenerator) for the streamed
    /// variant.
    pub async fn generate_summary(&self, kind: SummaryKind) -> Result<Summary, ClientError> {
        tracing::debug!(kind = kind.label(), "generating summary");
        self.post(kind.path(), &kind.body()).await
    }
}
