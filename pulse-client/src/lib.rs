#![deny(missing_docs)]
//! Client for the pulse social-activity monitoring backend.
//!
//! [`PulseClient`] covers the REST endpoints (members, activities,
//! summaries, notifications, settings, exports, GitHub connection).
//! [`SummaryGenerator`] runs one streamed summary generation at a time and
//! reports it through a [`StreamHandler`](pulse_types::StreamHandler).
//! [`PreferencesStore`] persists local UI preferences.
//!
//! ```no_run
//! use pulse_client::{ClientConfig, PulseClient, SummaryGenerator, SummaryKind};
//! use pulse_stream::SummaryAssembler;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PulseClient::new(ClientConfig::from_env()?)?;
//! let generator = SummaryGenerator::new(client);
//! let handle = generator.start(SummaryKind::daily(None), SummaryAssembler::new())?;
//! let (outcome, assembler) = handle.join().await?;
//! println!("{outcome:?}: {:?}", assembler.text("english"));
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
mod error;
mod export;
pub mod generator;
mod members;
mod monitoring;
mod notifications;
pub mod preferences;
mod settings;
mod summaries;

pub use auth::OAuthCallback;
pub use client::PulseClient;
pub use config::ClientConfig;
pub use generator::{GenerationHandle, SummaryGenerator, SummaryKind};
pub use preferences::{Preferences, PreferencesStore};
