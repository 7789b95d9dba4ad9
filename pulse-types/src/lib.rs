#![deny(missing_docs)]
//! Core types shared by the pulse crates.
//!
//! - [`envelope`]: the `data:` framed JSON units of a streamed summary.
//! - [`records`]: members, social profiles, activities, summaries and the
//!   other JSON records returned by the monitoring backend.
//! - [`handler`]: the callback interface a streamed generation reports to.
//! - [`filter`]: client-side search and filtering over fetched records.
//! - [`error`]: error enums for every pulse crate.

pub mod envelope;
pub mod error;
pub mod filter;
pub mod handler;
pub mod records;
mod timestamp;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use envelope::*;
pub use error::*;
pub use filter::*;
pub use handler::*;
pub use records::*;
