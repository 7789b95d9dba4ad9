#![deny(missing_docs)]
//! # pulse: umbrella crate
//!
//! Single import surface for the pulse monitoring client. Re-exports the
//! member crates behind feature flags, plus a `prelude` for the happy path.

#[cfg(feature = "client")]
pub use pulse_client;
#[cfg(feature = "stream")]
pub use pulse_stream;
#[cfg(feature = "core")]
pub use pulse_types;

/// Happy-path imports for consuming streamed summaries.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use pulse_types::{
        Activity, ActivityFilter, CHINESE, CallbackHandler, ClientError, ENGLISH, GenerationError,
        Member, MemberFilter, Platform, StreamEnvelope, StreamError, StreamHandler, Summary,
    };

    #[cfg(feature = "stream")]
    pub use pulse_stream::{GenerationSession, IngestOutcome, StreamIngestor, SummaryAssembler, Terminal};

    #[cfg(feature = "client")]
    pub use pulse_client::{
        ClientConfig, GenerationHandle, PreferencesStore, PulseClient, SummaryGenerator, SummaryKind,
    };
}
