//! Uploadgate Services Layer
//!
//! This crate hosts the effectful half of the upload eligibility gate: the
//! type-rule validator, the archive security scanner with its transient
//! extraction workspace, and the orchestrator that composes every check into
//! the end-to-end eligibility decision. Keep pure domain types in
//! uploadgate-core; keep filesystem work and composition here.

pub mod archive;
pub mod eligibility;
pub mod validator;

pub use archive::{scan_zip_contents, ExtractionWorkspace, ZipSource};
pub use eligibility::check_eligibility;
pub use validator::validate_type_rules;
