//! Command-line parsing.

use std::path::PathBuf;

use chrono::NaiveDate;
use pulse_client::SummaryKind;
use pulse_types::{ClientError, ExportFormat, ExportKind, Platform, SummaryLanguage};

use crate::CliError;

/// What to do with the dark-mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DarkModeAction {
    /// Print the current value.
    Show,
    /// Turn dark mode on.
    On,
    /// Turn dark mode off.
    Off,
    /// Flip the current value.
    Toggle,
}

/// A parsed `pulse` subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print usage.
    Help,
    /// `GET /health`.
    Health,
    /// List members, optionally filtered locally.
    Members {
        /// Free-text search.
        search: Option<String>,
        /// Hide deactivated members.
        active_only: bool,
    },
    /// List recent activities.
    Activities {
        /// Server-side platform filter.
        platform: Option<Platform>,
        /// Server-side member filter.
        member_id: Option<i64>,
        /// Free-text search applied locally.
        search: Option<String>,
    },
    /// List generated summaries.
    Summaries {
        /// Only summaries with text in this language.
        language: Option<SummaryLanguage>,
    },
    /// Generate a summary.
    Generate {
        /// Daily or weekly, with an optional date.
        kind: SummaryKind,
        /// Use the streaming endpoint and print text as it arrives.
        stream: bool,
    },
    /// List notifications.
    Notifications {
        /// Only unread ones.
        unread_only: bool,
    },
    /// Download an export.
    Export {
        /// What to export.
        kind: ExportKind,
        /// File format.
        format: ExportFormat,
        /// Destination; defaults to the backend-suggested name.
        out: Option<PathBuf>,
    },
    /// Show whether a GitHub account is connected.
    GithubStatus,
    /// Show or change the dark-mode preference.
    DarkMode(DarkModeAction),
}

/// A full command line: global flags plus the subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// `--base-url`, overriding config and environment.
    pub base_url: Option<String>,
    /// `--config`, a JSON [`ClientConfig`](pulse_client::ClientConfig) file.
    pub config_path: Option<PathBuf>,
    /// The subcommand.
    pub command: Command,
}

/// Parse the arguments after the program name.
///
/// `--base-url` and `--config` are accepted anywhere on the line.
pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Invocation, CliError> {
    let mut remaining: Vec<String> = args.into_iter().collect();
    let mut base_url = None;
    let mut config_path = None;
    let mut rest = Vec::new();
    while !remaining.is_empty() {
        let arg = remaining.remove(0);
        match arg.as_str() {
            "--base-url" => base_url = Some(take_arg("--base-url", &mut remaining)?),
            "--config" => config_path = Some(PathBuf::from(take_arg("--config", &mut remaining)?)),
            _ => rest.push(arg),
        }
    }

    let command = if rest.is_empty() {
        Command::Help
    } else {
        let name = rest.remove(0);
        parse_command(&name, rest)?
    };
    Ok(Invocation {
        base_url,
        config_path,
        command,
    })
}

fn parse_command(name: &str, mut args: Vec<String>) -> Result<Command, CliError> {
    let command = match name {
        "help" | "--help" | "-h" => Command::Help,
        "health" => Command::Health,
        "github-status" => Command::GithubStatus,
        "members" => {
            let mut search = None;
            let mut active_only = false;
            while let Some(flag) = next(&mut args) {
                match flag.as_str() {
                    "--search" => search = Some(take_arg("--search", &mut args)?),
                    "--active" => active_only = true,
                    other => return Err(unknown_flag(other)),
                }
            }
            Command::Members {
                search,
                active_only,
            }
        }
        "activities" => {
            let mut platform = None;
            let mut member_id = None;
            let mut search = None;
            while let Some(flag) = next(&mut args) {
                match flag.as_str() {
                    "--platform" => {
                        platform = Some(take_arg("--platform", &mut args)?.parse().map_err(usage)?)
                    }
                    "--member" => {
                        let raw = take_arg("--member", &mut args)?;
                        member_id = Some(raw.parse().map_err(|_| {
                            CliError::Usage(format!("--member expects a numeric id, got {raw}"))
                        })?);
                    }
                    "--search" => search = Some(take_arg("--search", &mut args)?),
                    other => return Err(unknown_flag(other)),
                }
            }
            Command::Activities {
                platform,
                member_id,
                search,
            }
        }
        "summaries" => {
            let mut language = None;
            while let Some(flag) = next(&mut args) {
                match flag.as_str() {
                    "--language" => {
                        language = Some(take_arg("--language", &mut args)?.parse().map_err(usage)?)
                    }
                    other => return Err(unknown_flag(other)),
                }
            }
            Command::Summaries { language }
        }
        "generate" => {
            let period = positional("generate", "daily|weekly", &mut args)?;
            let mut date = None;
            let mut stream = false;
            while let Some(flag) = next(&mut args) {
                match flag.as_str() {
                    "--date" => date = Some(parse_date(&take_arg("--date", &mut args)?)?),
                    "--stream" => stream = true,
                    other => return Err(unknown_flag(other)),
                }
            }
            let kind = match period.as_str() {
                "daily" => SummaryKind::daily(date),
                "weekly" => SummaryKind::weekly(date),
                other => {
                    return Err(CliError::Usage(format!(
                        "generate expects daily or weekly, got {other}"
                    )));
                }
            };
            Command::Generate { kind, stream }
        }
        "notifications" => {
            let mut unread_only = false;
            while let Some(flag) = next(&mut args) {
                match flag.as_str() {
                    "--unread" => unread_only = true,
                    other => return Err(unknown_flag(other)),
                }
            }
            Command::Notifications { unread_only }
        }
        "export" => {
            let kind = positional("export", "KIND", &mut args)?
                .parse()
                .map_err(usage)?;
            let format = positional("export", "FORMAT", &mut args)?
                .parse()
                .map_err(usage)?;
            let mut out = None;
            while let Some(flag) = next(&mut args) {
                match flag.as_str() {
                    "--out" => out = Some(PathBuf::from(take_arg("--out", &mut args)?)),
                    other => return Err(unknown_flag(other)),
                }
            }
            Command::Export { kind, format, out }
        }
        "dark-mode" => {
            let action = match next(&mut args).as_deref() {
                None => DarkModeAction::Show,
                Some("on") => DarkModeAction::On,
                Some("off") => DarkModeAction::Off,
                Some("toggle") => DarkModeAction::Toggle,
                Some(other) => {
                    return Err(CliError::Usage(format!(
                        "dark-mode expects on, off or toggle, got {other}"
                    )));
                }
            };
            Command::DarkMode(action)
        }
        other => return Err(CliError::Usage(format!("unknown subcommand: {other}"))),
    };
    if let Some(extra) = args.first() {
        return Err(CliError::Usage(format!("unexpected argument: {extra}")));
    }
    Ok(command)
}

fn next(args: &mut Vec<String>) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(args.remove(0))
    }
}

fn take_arg(flag: &str, remaining: &mut Vec<String>) -> Result<String, CliError> {
    if remaining.is_empty() {
        return Err(CliError::Usage(format!("missing value for {flag}")));
    }
    Ok(remaining.remove(0))
}

fn positional(command: &str, name: &str, remaining: &mut Vec<String>) -> Result<String, CliError> {
    match remaining.first() {
        Some(value) if !value.starts_with("--") => Ok(remaining.remove(0)),
        _ => Err(CliError::Usage(format!("{command}: missing {name}"))),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CliError::Usage(format!("--date expects YYYY-MM-DD, got {raw}")))
}

fn unknown_flag(flag: &str) -> CliError {
    CliError::Usage(format!("unknown flag: {flag}"))
}

fn usage(err: ClientError) -> CliError {
    match err {
        ClientError::InvalidInput(message) => CliError::Usage(message),
        other => CliError::Client(other),
    }
}

/// Usage text printed by `pulse help`.
pub const USAGE: &str = "\
usage: pulse [--base-url URL] [--config FILE] <command>

commands:
  health
  members [--search Q] [--active]
  activities [--platform github|linkedin|twitter] [--member ID] [--search Q]
  summaries [--language chinese|english]
  generate daily|weekly [--date YYYY-MM-DD] [--stream]
  notifications [--unread]
  export KIND FORMAT [--out PATH]
  github-status
  dark-mode [on|off|toggle]
";
