//! Uploadgate Core Library
//!
//! This crate provides the domain types and pure checks shared across all
//! uploadgate components: validation outcomes, the upload candidate
//! abstraction, file type tags and their size/format rules, the extension
//! denylist policy, and configuration.

pub mod candidate;
pub mod config;
pub mod error;
pub mod mime;
pub mod outcome;
pub mod policy;
pub mod rules;

// Re-export commonly used types
pub use candidate::{
    is_eligible_upload, ReadSeek, ReceivedUpload, StoredUpload, UploadCandidate,
};
pub use config::{GateConfig, ScanOptions, DEFAULT_EXTRACTION_ROOT, DEFAULT_MIN_UPLOAD_BYTES};
pub use error::GateError;
pub use outcome::ValidationOutcome;
pub use policy::{ExtensionPolicy, DEFAULT_DENIED_EXTENSIONS};
pub use rules::{FileTypeTag, RuleCatalog, TypeRule};
