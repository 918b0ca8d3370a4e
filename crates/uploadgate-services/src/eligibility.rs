//! Upload eligibility orchestrator
//!
//! Composes every check into the end-to-end decision for a single upload:
//! precondition, extension denylist, MIME/extension consistency, type rules,
//! and archive scanning. Checks run in order and the first failure wins; the
//! orchestrator is the outermost fault boundary, so nothing past it ever
//! surfaces as a raw error.

use uploadgate_core::candidate::{is_eligible_upload, UploadCandidate};
use uploadgate_core::config::GateConfig;
use uploadgate_core::error::GateError;
use uploadgate_core::mime;
use uploadgate_core::outcome::ValidationOutcome;
use uploadgate_core::rules::FileTypeTag;

use crate::archive::{scan_zip_contents, ZipSource};
use crate::validator::validate_type_rules;

pub const ELIGIBLE_MESSAGE: &str = "File eligible to upload!";
pub const NOT_ELIGIBLE_MESSAGE: &str = "File not eligible to upload!";

/// Decide whether an upload may proceed to storage.
///
/// Every failure mode comes back as a [`ValidationOutcome`]: 400 for policy
/// violations, 500 for internal faults. An empty tag list skips type-rule
/// constraints but keeps every other check.
pub fn check_eligibility(
    candidate: &dyn UploadCandidate,
    tags: &[FileTypeTag],
    config: &GateConfig,
) -> ValidationOutcome {
    match run_checks(candidate, tags, config) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(
                filename = %candidate.original_filename(),
                error = %e,
                "Eligibility check hit an internal fault"
            );
            ValidationOutcome::internal_fault()
        }
    }
}

fn run_checks(
    candidate: &dyn UploadCandidate,
    tags: &[FileTypeTag],
    config: &GateConfig,
) -> Result<ValidationOutcome, GateError> {
    if let Err(outcome) = check_precondition(candidate, config) {
        return Ok(outcome);
    }
    if let Err(outcome) = check_denied_extension(candidate, config) {
        return Ok(outcome);
    }
    if let Err(outcome) = check_mime_consistency(candidate) {
        return Ok(outcome);
    }

    let rules_outcome = validate_type_rules(tags, candidate, &config.catalog);
    if !rules_outcome.is_success() {
        return Ok(ValidationOutcome::rejected(rules_outcome.message));
    }

    let effective =
        mime::effective_extension(candidate.mime_type(), candidate.original_extension());
    if effective == "zip" {
        let scan_outcome =
            scan_zip_contents(ZipSource::Upload(candidate), &config.policy, &config.scan);
        if !scan_outcome.is_success() {
            return Ok(ValidationOutcome::rejected(scan_outcome.message));
        }
    }

    tracing::debug!(
        filename = %candidate.original_filename(),
        "Upload passed all eligibility checks"
    );

    Ok(ValidationOutcome::success(ELIGIBLE_MESSAGE))
}

fn check_precondition(
    candidate: &dyn UploadCandidate,
    config: &GateConfig,
) -> Result<(), ValidationOutcome> {
    if !is_eligible_upload(candidate, config.min_upload_bytes) {
        return Err(ValidationOutcome::rejected(NOT_ELIGIBLE_MESSAGE));
    }
    Ok(())
}

fn check_denied_extension(
    candidate: &dyn UploadCandidate,
    config: &GateConfig,
) -> Result<(), ValidationOutcome> {
    if config.stop_executable && config.policy.is_forbidden(candidate.original_extension()) {
        return Err(ValidationOutcome::rejected(format!(
            "File '{}' is not allowed!",
            candidate.original_filename()
        )));
    }
    Ok(())
}

/// A JSON-looking MIME type with a non-json declared extension means the
/// file was renamed or corrupted in transit.
fn check_mime_consistency(candidate: &dyn UploadCandidate) -> Result<(), ValidationOutcome> {
    if mime::is_json_like(candidate.mime_type()) && candidate.original_extension() != "json" {
        return Err(ValidationOutcome::rejected(format!(
            "File '{}' already broken, please change it to other file!",
            candidate.original_filename()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uploadgate_core::candidate::ReceivedUpload;

    #[test]
    fn test_empty_upload_not_eligible() {
        let up = ReceivedUpload::new(Vec::new(), "a.txt", "text/plain");
        let outcome = check_eligibility(&up, &[], &GateConfig::default());
        assert_eq!(outcome.code, 400);
        assert_eq!(outcome.message, NOT_ELIGIBLE_MESSAGE);
    }

    #[test]
    fn test_denied_extension_names_file() {
        let up = ReceivedUpload::new(vec![0u8; 64], "setup.exe", "application/octet-stream");
        let outcome = check_eligibility(&up, &[], &GateConfig::default());
        assert_eq!(outcome.code, 400);
        assert_eq!(outcome.message, "File 'setup.exe' is not allowed!");
    }

    #[test]
    fn test_denied_extension_ignored_when_disabled() {
        let up = ReceivedUpload::new(vec![0u8; 64], "setup.exe", "application/octet-stream");
        let outcome = check_eligibility(&up, &[], &GateConfig::default().allow_executables());
        assert!(outcome.is_success());
    }

    #[test]
    fn test_json_mime_with_other_extension_is_broken() {
        let up = ReceivedUpload::new(vec![0u8; 64], "notes.txt", "application/json");
        let outcome = check_eligibility(&up, &[], &GateConfig::default());
        assert_eq!(outcome.code, 400);
        assert!(outcome.message.contains("already broken"));
        assert!(outcome.message.contains("notes.txt"));
    }

    #[test]
    fn test_genuine_json_pair_passes() {
        let up = ReceivedUpload::new(vec![0u8; 64], "data.json", "application/json");
        let outcome = check_eligibility(&up, &[], &GateConfig::default());
        assert!(outcome.is_success());
        assert_eq!(outcome.message, ELIGIBLE_MESSAGE);
    }
}
