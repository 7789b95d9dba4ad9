#![deny(missing_docs)]
//! Incremental ingestion of streamed summary generations.
//!
//! A streamed generation arrives as a chunked HTTP body of `data: <json>`
//! lines. Chunk boundaries fall anywhere, including inside a line or a
//! multi-byte character. This crate turns that body into an ordered sequence
//! of [`StreamEnvelope`](pulse_types::StreamEnvelope) callbacks and
//! accumulates them into a renderable [`GenerationSession`].
//!
//! - [`Utf8Decoder`] carries incomplete UTF-8 sequences across chunks.
//! - [`LineFramer`] splits decoded text into complete lines.
//! - [`StreamIngestor`] parses `data:` lines and dispatches to a
//!   [`StreamHandler`](pulse_types::StreamHandler), stopping at the first
//!   terminal envelope.
//! - [`SummaryAssembler`] is a handler that folds envelopes into a
//!   [`GenerationSession`] and publishes snapshots to subscribers.

pub mod assembler;
pub mod decode;
pub mod frame;
pub mod ingest;

pub use assembler::{GenerationSession, SummaryAssembler, Terminal};
pub use decode::Utf8Decoder;
pub use frame::{DATA_PREFIX, LineFramer, data_payload};
pub use ingest::{IngestOutcome, StreamIngestor};
