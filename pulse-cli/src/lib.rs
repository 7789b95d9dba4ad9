#![deny(missing_docs)]
//! The `pulse` command-line front end.
//!
//! [`parse_args`] turns a command line into an [`Invocation`]; [`run`]
//! executes it against the backend, writing results to the given writer.

pub mod args;
pub mod printer;

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use pulse_client::{ClientConfig, PreferencesStore, PulseClient, SummaryGenerator, SummaryKind};
use pulse_stream::{IngestOutcome, Terminal};
use pulse_types::{
    ActivityFilter, ActivityQuery, ClientError, ConfigError, ExportParams, GenerationError,
    HealthState, MemberFilter, MemberQuery, NotificationKind, NotificationQuery, PreferencesError,
    Summary, SummaryQuery, CHINESE, ENGLISH,
};

pub use args::{Command, DarkModeAction, Invocation, USAGE, parse_args};
pub use printer::StreamPrinter;

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_PATH: &str = "pulse.json";

/// Everything that can make `pulse` exit non-zero.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Bad command line.
    #[error("{0}")]
    Usage(String),
    /// Bad config file or environment.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A backend call failed.
    #[error(transparent)]
    Client(#[from] ClientError),
    /// A streamed generation could not be started or joined.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The preferences file could not be read or written.
    #[error(transparent)]
    Preferences(#[from] PreferencesError),
    /// The backend reported a failed generation.
    #[error("summary generation failed: {0}")]
    GenerationFailed(String),
    /// The generation was interrupted.
    #[error("summary generation cancelled")]
    Cancelled,
    /// Writing output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolve the client config: file, then `PULSE_*` environment variables,
/// then `--base-url`.
pub fn load_config(invocation: &Invocation) -> Result<ClientConfig, CliError> {
    let config = match &invocation.config_path {
        Some(path) => ClientConfig::from_path(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                ClientConfig::from_path(default_path)?
            } else {
                ClientConfig::default()
            }
        }
    };
    let mut config = config.overlay(|key| std::env::var(key).ok())?;
    if let Some(url) = &invocation.base_url {
        config.base_url.clone_from(url);
    }
    Ok(config)
}

/// Execute `invocation`, writing results to `out`, and hand `out` back.
///
/// Streamed generations write progress to stderr and can be cancelled with
/// Ctrl-C.
pub async fn run<W>(invocation: Invocation, mut out: W) -> Result<W, CliError>
where
    W: Write + Send + 'static,
{
    if invocation.command == Command::Help {
        write!(out, "{USAGE}")?;
        return Ok(out);
    }
    let config = load_config(&invocation)?;
    tracing::debug!(base_url = %config.base_url, "resolved configuration");

    if let Command::DarkMode(action) = invocation.command {
        dark_mode(&config.preferences_path, action, &mut out).await?;
        return Ok(out);
    }

    let client = PulseClient::new(config)?;
    match invocation.command {
        Command::Help | Command::DarkMode(_) => {}
        Command::Health => {
            let health = client.health().await?;
            let state = match health.status {
                HealthState::Healthy => "healthy",
                HealthState::Degraded => "degraded",
                HealthState::Unhealthy => "unhealthy",
            };
            match health.version {
                Some(version) => writeln!(out, "{state} (version {version})")?,
                None => writeln!(out, "{state}")?,
            }
        }
        Command::Members {
            search,
            active_only,
        } => {
            let members = client.members(&MemberQuery::default()).await?;
            let filter = MemberFilter {
                query: search.unwrap_or_default(),
                active_only,
            };
            for member in filter.apply(&members) {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    member.id,
                    member.name,
                    member.email,
                    member.department.as_deref().unwrap_or("-")
                )?;
            }
        }
        Command::Activities {
            platform,
            member_id,
            search,
        } => {
            let query = ActivityQuery {
                platform,
                member_id,
                ..ActivityQuery::default()
            };
            let activities = client.activities(&query).await?;
            let filter = ActivityFilter {
                query: search.unwrap_or_default(),
                ..ActivityFilter::default()
            };
            for activity in filter.apply(&activities) {
                let who = activity
                    .member
                    .as_ref()
                    .map_or_else(|| format!("member {}", activity.member_id), |m| m.name.clone());
                let what = activity
                    .title
                    .as_deref()
                    .or(activity.activity_type.as_deref())
                    .unwrap_or("-");
                writeln!(
                    out,
                    "{}\t{}\t{who}\t{what}",
                    timestamp(Some(activity.created_at)),
                    activity.platform
                )?;
            }
        }
        Command::Summaries { language } => {
            let query = SummaryQuery {
                language,
                ..SummaryQuery::default()
            };
            for summary in client.summaries(&query).await? {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    summary.id,
                    summary.summary_type.as_deref().unwrap_or("-"),
                    timestamp(summary.created_at),
                    summary.title
                )?;
            }
        }
        Command::Generate { kind, stream: false } => {
            let summary = client.generate_summary(kind).await?;
            write_summary(&mut out, &summary)?;
        }
        Command::Generate { kind, stream: true } => {
            return generate_streamed(client, kind, out).await;
        }
        Command::Notifications { unread_only } => {
            let query = NotificationQuery {
                limit: None,
                unread_only,
            };
            for notification in client.notifications(&query).await? {
                let kind = match notification.kind {
                    NotificationKind::Info => "info",
                    NotificationKind::Success => "success",
                    NotificationKind::Warning => "warning",
                    NotificationKind::Error => "error",
                };
                writeln!(
                    out,
                    "{} {}\t{kind}\t{}: {}",
                    if notification.read { " " } else { "*" },
                    notification.id,
                    notification.title,
                    notification.message
                )?;
            }
        }
        Command::Export {
            kind,
            format,
            out: destination,
        } => {
            let file = client.export(kind, format, &ExportParams::default()).await?;
            let path = destination.unwrap_or_else(|| PathBuf::from(&file.filename));
            tokio::fs::write(&path, &file.bytes).await?;
            writeln!(out, "wrote {} bytes to {}", file.bytes.len(), path.display())?;
        }
        Command::GithubStatus => {
            let status = client.github_status().await?;
            if status.connected {
                let name = status.github_username.as_deref().unwrap_or("unknown user");
                writeln!(out, "connected as {name}")?;
            } else {
                writeln!(out, "not connected")?;
            }
        }
    }
    Ok(out)
}

async fn generate_streamed<W>(client: PulseClient, kind: SummaryKind, out: W) -> Result<W, CliError>
where
    W: Write + Send + 'static,
{
    let generator = SummaryGenerator::new(client);
    let handle = generator.start(kind, StreamPrinter::new(out, std::io::stderr()))?;

    let token = handle.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("interrupted, cancelling generation");
            token.cancel();
        }
    });
    let joined = handle.join().await;
    interrupt.abort();

    let (outcome, printer) = joined?;
    let (out, session, write_error) = printer.into_parts();
    // A failed or cancelled generation is reported ahead of any output error.
    match (outcome, write_error) {
        (IngestOutcome::Completed, None) => Ok(out),
        (IngestOutcome::Completed, Some(e)) => Err(e.into()),
        (IngestOutcome::Cancelled, _) => Err(CliError::Cancelled),
        (IngestOutcome::Failed, write_error) => {
            if let Some(e) = write_error {
                tracing::debug!(error = %e, "output write failed during a failed generation");
            }
            let reason = match session.terminal {
                Some(Terminal::Failed(reason)) => reason,
                _ => String::new(),
            };
            Err(CliError::GenerationFailed(reason))
        }
    }
}

async fn dark_mode<W: Write>(
    path: &Path,
    action: DarkModeAction,
    out: &mut W,
) -> Result<(), CliError> {
    let mut store = PreferencesStore::load(path).await?;
    match action {
        DarkModeAction::Show => {}
        DarkModeAction::On => store.set_dark_mode(true).await?,
        DarkModeAction::Off => store.set_dark_mode(false).await?,
        DarkModeAction::Toggle => {
            store.toggle_dark_mode().await?;
        }
    }
    let state = if store.get().dark_mode { "on" } else { "off" };
    writeln!(out, "dark mode: {state}")?;
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> std::io::Result<()> {
    writeln!(out, "summary #{}: {}", summary.id, summary.title)?;
    for language in [CHINESE, ENGLISH] {
        if let Some(text) = summary.content_for(language) {
            writeln!(out, "\n== {language} ==\n{text}")?;
        }
    }
    Ok(())
}

fn timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| "-".to_string(), |at| at.format("%Y-%m-%d %H:%M").to_string())
}
