//! JSON records exchanged with the monitoring backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::{CHINESE, ENGLISH};
use crate::error::ClientError;

// ─── Members & social profiles ───────────────────────────────────────────────

/// A monitored team member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Backend identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Contact e-mail.
    pub email: String,
    /// Job title.
    #[serde(default)]
    pub position: Option<String>,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Whether the member is still monitored.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Creation time.
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Attached profiles; only populated by the single-member endpoint.
    #[serde(default)]
    pub social_profiles: Vec<SocialProfile>,
}

/// Body of `POST /v1/members/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberCreate {
    /// Display name.
    pub name: String,
    /// Contact e-mail.
    pub email: String,
    /// Job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl MemberCreate {
    /// Reject obviously invalid input before it reaches the backend.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.name.trim().is_empty() {
            return Err(ClientError::InvalidInput("member name is required".into()));
        }
        validate_email(&self.email)
    }
}

/// Body of `PUT /v1/members/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberUpdate {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New e-mail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// New department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Enable or disable monitoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl MemberUpdate {
    /// Reject obviously invalid input before it reaches the backend.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ClientError::InvalidInput("member name cannot be empty".into()));
        }
        match &self.email {
            Some(email) => validate_email(email),
            None => Ok(()),
        }
    }
}

fn validate_email(email: &str) -> Result<(), ClientError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ClientError::InvalidInput(format!("invalid e-mail address: {email}"))),
    }
}

fn default_true() -> bool {
    true
}

/// Social platforms the backend knows how to monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// github.com
    Github,
    /// linkedin.com
    Linkedin,
    /// twitter.com / x.com
    Twitter,
}

impl Platform {
    /// All supported platforms.
    pub const ALL: [Platform; 3] = [Platform::Github, Platform::Linkedin, Platform::Twitter];

    /// The wire name of the platform.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Linkedin => "linkedin",
            Self::Twitter => "twitter",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ClientError::InvalidInput(format!("unknown platform: {s}")))
    }
}

/// A social-platform profile attached to a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialProfile {
    /// Backend identifier.
    pub id: i64,
    /// Owning member.
    pub member_id: i64,
    /// Platform wire name (see [`Platform`]).
    pub platform: String,
    /// Profile URL.
    pub profile_url: String,
    /// Handle on the platform.
    #[serde(default)]
    pub username: Option<String>,
    /// Whether the profile is still monitored.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Last time the backend polled this profile.
    #[serde(default, with = "crate::timestamp::option")]
    pub last_checked: Option<DateTime<Utc>>,
    /// Creation time.
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /v1/members/{id}/social-profiles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialProfileCreate {
    /// Platform to monitor.
    pub platform: Platform,
    /// Profile URL; must be http(s).
    pub profile_url: String,
    /// Handle on the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl SocialProfileCreate {
    /// Reject obviously invalid input before it reaches the backend.
    pub fn validate(&self) -> Result<(), ClientError> {
        validate_profile_url(&self.profile_url)
    }
}

/// Body of `PUT /v1/members/{id}/social-profiles/{profile_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialProfileUpdate {
    /// New profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    /// New handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Enable or disable monitoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl SocialProfileUpdate {
    /// Reject obviously invalid input before it reaches the backend.
    pub fn validate(&self) -> Result<(), ClientError> {
        match &self.profile_url {
            Some(url) => validate_profile_url(url),
            None => Ok(()),
        }
    }
}

fn validate_profile_url(url: &str) -> Result<(), ClientError> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(ClientError::InvalidInput(format!(
            "profile URL must start with http:// or https://: {url}"
        )))
    }
}

// ─── Activities & monitoring ─────────────────────────────────────────────────

/// One captured social activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Backend identifier.
    pub id: i64,
    /// Member the activity belongs to.
    pub member_id: i64,
    /// Profile the activity was captured from.
    pub social_profile_id: i64,
    /// Platform wire name.
    pub platform: String,
    /// Platform-specific kind, e.g. `push`, `post`.
    #[serde(default)]
    pub activity_type: Option<String>,
    /// Title.
    #[serde(default)]
    pub title: Option<String>,
    /// Body text.
    #[serde(default)]
    pub content: Option<String>,
    /// Link to the activity.
    #[serde(default)]
    pub url: Option<String>,
    /// Identifier on the platform.
    #[serde(default)]
    pub external_id: Option<String>,
    /// Time the activity was published on the platform.
    #[serde(default, with = "crate::timestamp::option")]
    pub published_at: Option<DateTime<Utc>>,
    /// Whether a summary already consumed it.
    #[serde(default)]
    pub is_processed: bool,
    /// Capture time.
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Embedded member, when the backend includes it.
    #[serde(default)]
    pub member: Option<Box<Member>>,
}

/// Result of `POST /v1/monitoring/run-monitoring`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringResult {
    /// `completed` or `no_updates_needed`.
    pub status: String,
    /// Number of newly captured activities.
    #[serde(default)]
    pub new_activities: u64,
    /// Per-platform details, opaque to the client.
    #[serde(default)]
    pub platform_results: Option<serde_json::Value>,
}

/// Result of `POST /v1/monitoring/monitor-profile/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMonitoringResult {
    /// The profile that was polled.
    pub profile_id: i64,
    /// Number of newly captured activities.
    pub new_activities: u64,
    /// The new activities.
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// Dashboard counters from `GET /v1/monitoring/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// All members.
    pub total_members: u64,
    /// Members with monitoring enabled.
    pub active_members: u64,
    /// All captured activities.
    pub total_activities: u64,
    /// Activities captured today (UTC).
    pub activities_today: u64,
    /// Activities captured since Monday (UTC).
    pub activities_this_week: u64,
    /// Most recent summary, if any.
    #[serde(default)]
    pub latest_summary: Option<Summary>,
}

// ─── Summaries ───────────────────────────────────────────────────────────────

/// A generated bilingual summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Backend identifier.
    pub id: i64,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Chinese Markdown text.
    #[serde(default)]
    pub content: String,
    /// English Markdown text.
    #[serde(default)]
    pub content_en: Option<String>,
    /// `daily` or `weekly`.
    #[serde(default)]
    pub summary_type: Option<String>,
    /// Start of the covered period.
    #[serde(default, with = "crate::timestamp::option")]
    pub start_date: Option<DateTime<Utc>>,
    /// End of the covered period.
    #[serde(default, with = "crate::timestamp::option")]
    pub end_date: Option<DateTime<Utc>>,
    /// Members covered.
    #[serde(default)]
    pub member_count: u64,
    /// Activities covered.
    #[serde(default)]
    pub activity_count: u64,
    /// Whether the summary was delivered.
    #[serde(default)]
    pub is_sent: bool,
    /// Delivery time.
    #[serde(default, with = "crate::timestamp::option")]
    pub sent_at: Option<DateTime<Utc>>,
    /// Creation time.
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Summary {
    /// The text for a language tag; `None` when that language was not generated.
    #[must_use]
    pub fn content_for(&self, language: &str) -> Option<&str> {
        match language {
            CHINESE => Some(self.content.as_str()).filter(|c| !c.is_empty()),
            ENGLISH => self.content_en.as_deref().filter(|c| !c.is_empty()),
            _ => None,
        }
    }
}

/// Which text column `GET /v1/summaries/` filters on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLanguage {
    /// `content`
    #[default]
    Chinese,
    /// `content_en`
    English,
}

impl SummaryLanguage {
    /// The language tag, matching the stream's `language` field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chinese => CHINESE,
            Self::English => ENGLISH,
        }
    }
}

impl std::str::FromStr for SummaryLanguage {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            CHINESE | "zh" => Ok(Self::Chinese),
            ENGLISH | "en" => Ok(Self::English),
            other => Err(ClientError::InvalidInput(format!("unknown language: {other}"))),
        }
    }
}

/// Body of `POST /v1/summaries/` for a manually written summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryCreate {
    /// Title.
    pub title: String,
    /// Chinese text.
    pub content: String,
    /// English text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_en: Option<String>,
    /// `daily` or `weekly`.
    pub summary_type: String,
    /// Members covered.
    #[serde(default)]
    pub member_count: u64,
    /// Activities covered.
    #[serde(default)]
    pub activity_count: u64,
}

// ─── Notifications ───────────────────────────────────────────────────────────

/// Severity of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Informational.
    #[default]
    Info,
    /// Something finished.
    Success,
    /// Needs attention.
    Warning,
    /// Something failed.
    Error,
}

/// A dashboard notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Backend identifier.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity.
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    /// Opaque attached data.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Whether the operator has seen it.
    #[serde(default)]
    pub read: bool,
    /// Creation time.
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /v1/notifications/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationCreate {
    /// Title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity.
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    /// Opaque attached data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Plain `{"message": "..."}` acknowledgement returned by mutating endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// Backend message.
    pub message: String,
}

// ─── Settings ────────────────────────────────────────────────────────────────

/// Monitoring schedule settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSettings {
    /// Minutes between monitoring runs; at least 1.
    pub monitoring_interval_minutes: u32,
    /// Hours between automatic summaries; at least 1.
    pub summary_frequency_hours: u32,
    /// Whether summaries are e-mailed.
    #[serde(default)]
    pub email_enabled: bool,
    /// Platforms to poll.
    #[serde(default)]
    pub platforms_to_monitor: Vec<String>,
}

impl SystemSettings {
    /// Apply the same bounds the backend enforces.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.monitoring_interval_minutes < 1 {
            return Err(ClientError::InvalidInput(
                "monitoring interval must be at least 1 minute".into(),
            ));
        }
        if self.summary_frequency_hours < 1 {
            return Err(ClientError::InvalidInput(
                "summary frequency must be at least 1 hour".into(),
            ));
        }
        Ok(())
    }
}

/// Third-party API credentials and model selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// OpenAI-compatible key (`sk-…`).
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// Model used for summaries.
    #[serde(default)]
    pub openai_model: Option<String>,
    /// OpenAI-compatible endpoint.
    #[serde(default)]
    pub openai_base_url: Option<String>,
    /// GitHub personal or OAuth token.
    #[serde(default)]
    pub github_token: Option<String>,
}

impl ApiSettings {
    /// Apply the same key-format checks the backend enforces.
    ///
    /// Empty strings mean "not configured" and pass.
    pub fn validate(&self) -> Result<(), ClientError> {
        let openai_key = self.openai_api_key.as_deref().unwrap_or_default();
        if !openai_key.is_empty() && !openai_key.starts_with("sk-") {
            return Err(ClientError::InvalidInput("invalid OpenAI API key format".into()));
        }
        let token = self.github_token.as_deref().unwrap_or_default();
        if !token.is_empty() && !["ghp_", "gho_", "ghu_"].iter().any(|p| token.starts_with(p)) {
            return Err(ClientError::InvalidInput("invalid GitHub token format".into()));
        }
        Ok(())
    }
}

/// Combined response of `GET /v1/settings/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsResponse {
    /// Schedule settings.
    pub system: SystemSettings,
    /// Credential settings.
    pub api: ApiSettings,
}

/// Result of the `test-openai` / `test-github` connection checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTest {
    /// `success` when the check passed.
    pub status: String,
    /// Backend message.
    #[serde(default)]
    pub message: String,
}

impl ConnectionTest {
    /// Whether the check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == "success"
    }
}

// ─── GitHub connection ───────────────────────────────────────────────────────

/// GitHub OAuth connection state of the current user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GithubStatus {
    /// Whether an OAuth token is stored.
    #[serde(default)]
    pub connected: bool,
    /// GitHub login.
    #[serde(default)]
    pub github_username: Option<String>,
    /// Connection time.
    #[serde(default, with = "crate::timestamp::option")]
    pub connected_at: Option<DateTime<Utc>>,
}

/// GitHub profile of the connected account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GithubProfile {
    /// GitHub login.
    #[serde(default)]
    pub username: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Public e-mail.
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Number of public repositories.
    #[serde(default)]
    pub public_repos: u64,
}

// ─── Health ──────────────────────────────────────────────────────────────────

/// Coarse backend health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// All good.
    Healthy,
    /// Partially working.
    Degraded,
    /// Not working.
    Unhealthy,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Overall state.
    pub status: HealthState,
    /// Time of the check.
    #[serde(default, with = "crate::timestamp::option")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Backend version.
    #[serde(default)]
    pub version: Option<String>,
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Query parameters of `GET /v1/members/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemberQuery {
    /// Offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Query parameters of `GET /v1/monitoring/activities`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityQuery {
    /// Offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    /// Page size (backend default 50).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Only this platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    /// Only this member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<i64>,
}

/// Query parameters of `GET /v1/summaries/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryQuery {
    /// Offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    /// Page size (backend default 20).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// `daily` or `weekly`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_type: Option<String>,
    /// Only summaries that have text in this language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<SummaryLanguage>,
}

/// Query parameters of `GET /v1/notifications/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotificationQuery {
    /// Most recent N (backend default 50).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Only unread notifications.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unread_only: bool,
}

// ─── Export ──────────────────────────────────────────────────────────────────

/// What to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// Members with their profiles.
    Members,
    /// Captured activities.
    Activities,
    /// Generated summaries.
    Summaries,
    /// Dashboard counters.
    Stats,
}

/// File format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values.
    Csv,
    /// Excel workbook.
    Excel,
    /// PDF document.
    Pdf,
    /// JSON document.
    Json,
}

impl ExportKind {
    /// Wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Members => "members",
            Self::Activities => "activities",
            Self::Summaries => "summaries",
            Self::Stats => "stats",
        }
    }

    /// Backend path serving this kind in `format`, or `None` when the backend
    /// has no such export.
    #[must_use]
    pub fn endpoint(self, format: ExportFormat) -> Option<&'static str> {
        use ExportFormat::*;
        match (self, format) {
            (Self::Members, Json) => Some("/v1/export/members/json"),
            (Self::Members, Csv) => Some("/v1/export/members/csv"),
            (Self::Activities, Csv) => Some("/v1/export/activities/csv"),
            (Self::Activities, Excel) => Some("/v1/export/activities/excel"),
            (Self::Summaries, Pdf) => Some("/v1/export/summaries/pdf"),
            (Self::Summaries, Json) => Some("/v1/export/summaries/json"),
            (Self::Stats, Json) => Some("/v1/export/dashboard/stats"),
            (Self::Stats, Csv) => Some("/v1/export/stats/csv"),
            _ => None,
        }
    }
}

impl std::str::FromStr for ExportKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "members" => Ok(Self::Members),
            "activities" => Ok(Self::Activities),
            "summaries" => Ok(Self::Summaries),
            "stats" => Ok(Self::Stats),
            other => Err(ClientError::InvalidInput(format!("unknown export kind: {other}"))),
        }
    }
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "xlsx",
            Self::Pdf => "pdf",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "excel" | "xlsx" => Ok(Self::Excel),
            "pdf" => Ok(Self::Pdf),
            "json" => Ok(Self::Json),
            other => Err(ClientError::InvalidInput(format!("unknown export format: {other}"))),
        }
    }
}

/// Filters accepted by the export endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportParams {
    /// Inclusive start date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Only this platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    /// Only this member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<i64>,
    /// `daily` or `weekly`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_type: Option<String>,
    /// Include deactivated members.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_inactive: Option<bool>,
}

/// A downloaded export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// `Content-Type` reported by the backend.
    pub content_type: Option<String>,
    /// Suggested file name.
    pub filename: String,
}
