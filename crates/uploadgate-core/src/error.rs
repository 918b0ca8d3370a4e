//! Error types module
//!
//! Internal faults are represented as `GateError` and are always converted
//! to a [`ValidationOutcome`](crate::outcome::ValidationOutcome) at the
//! public boundary of each service. No public check surfaces a raw error.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to access upload candidate: {0}")]
    Candidate(String),

    #[error("Unsupported file type tag: {0}")]
    UnknownTag(String),
}
