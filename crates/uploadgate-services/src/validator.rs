//! Type-rule validation
//!
//! Resolves each requested file type tag to its rule, merges them into a
//! permissive union, and checks the candidate's size and declared format
//! against the merged rule. Every violated constraint ends up in the
//! rejection message as its own line-delimited segment, prefixed with the
//! original filename.

use uploadgate_core::candidate::UploadCandidate;
use uploadgate_core::error::GateError;
use uploadgate_core::outcome::ValidationOutcome;
use uploadgate_core::rules::{FileTypeTag, RuleCatalog, TypeRule};

pub const SUCCESS_MESSAGE: &str = "Success validate file!";

/// Validate a candidate against one or more file type tags.
///
/// An empty tag list (or an all-empty merged rule) imposes no constraints.
/// Internal faults never escape; they surface as a generic 500 outcome.
pub fn validate_type_rules(
    tags: &[FileTypeTag],
    candidate: &dyn UploadCandidate,
    catalog: &RuleCatalog,
) -> ValidationOutcome {
    match run(tags, candidate, catalog) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "Type-rule validation hit an internal fault");
            ValidationOutcome::internal_fault()
        }
    }
}

fn run(
    tags: &[FileTypeTag],
    candidate: &dyn UploadCandidate,
    catalog: &RuleCatalog,
) -> Result<ValidationOutcome, GateError> {
    let merged = TypeRule::merge(tags.iter().map(|tag| catalog.rule_for(*tag)));
    if merged.is_empty() {
        return Ok(ValidationOutcome::success(SUCCESS_MESSAGE));
    }

    let mut violations = Vec::new();

    if !merged.allowed_formats.is_empty()
        && !merged.allows_format(candidate.original_extension())
    {
        violations.push(format!(
            "file must be a file of type: {}",
            merged.allowed_formats.join(", ")
        ));
    }

    if merged.max_kilobytes > 0 {
        let size = candidate.size_bytes()?;
        if size > merged.max_bytes() {
            violations.push(format!(
                "file exceeds max size of {} kilobytes",
                merged.max_kilobytes
            ));
        }
    }

    if violations.is_empty() {
        return Ok(ValidationOutcome::success(SUCCESS_MESSAGE));
    }

    tracing::debug!(
        filename = %candidate.original_filename(),
        violations = violations.len(),
        "Upload violates type rules"
    );

    Ok(ValidationOutcome::rejected(format!(
        "{}:{}",
        candidate.original_filename(),
        violations.join("\n")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uploadgate_core::candidate::ReceivedUpload;

    fn png(size: usize) -> ReceivedUpload {
        ReceivedUpload::new(vec![0u8; size], "photo.png", "image/png")
    }

    #[test]
    fn test_valid_image_passes() {
        let outcome = validate_type_rules(
            &[FileTypeTag::Image],
            &png(2 * 1024 * 1024),
            &RuleCatalog::default(),
        );
        assert!(outcome.is_success());
        assert_eq!(outcome.message, SUCCESS_MESSAGE);
    }

    #[test]
    fn test_oversized_image_names_file_and_cap() {
        let outcome = validate_type_rules(
            &[FileTypeTag::Image],
            &png(10 * 1024 * 1024),
            &RuleCatalog::default(),
        );
        assert_eq!(outcome.code, 400);
        assert!(outcome.message.starts_with("photo.png:"));
        assert!(outcome.message.contains("max"));
        assert!(outcome.message.contains("6553"));
    }

    #[test]
    fn test_wrong_format_rejected() {
        let pdf = ReceivedUpload::new(vec![0u8; 64], "report.pdf", "application/pdf");
        let outcome = validate_type_rules(&[FileTypeTag::Image], &pdf, &RuleCatalog::default());
        assert_eq!(outcome.code, 400);
        assert!(outcome.message.contains("report.pdf:"));
        assert!(outcome.message.contains("type"));
    }

    #[test]
    fn test_merged_tags_accept_either_format() {
        let pdf = ReceivedUpload::new(vec![0u8; 64], "report.pdf", "application/pdf");
        let outcome = validate_type_rules(
            &[FileTypeTag::Image, FileTypeTag::Document],
            &pdf,
            &RuleCatalog::default(),
        );
        assert!(outcome.is_success());
    }

    #[test]
    fn test_both_violations_render_on_separate_lines() {
        let huge_bin = ReceivedUpload::new(
            vec![0u8; 7 * 1024 * 1024],
            "blob.bin",
            "application/octet-stream",
        );
        let outcome =
            validate_type_rules(&[FileTypeTag::Image], &huge_bin, &RuleCatalog::default());
        assert_eq!(outcome.code, 400);
        assert_eq!(outcome.message.lines().count(), 2);
    }

    #[test]
    fn test_no_tags_means_no_constraints() {
        let outcome = validate_type_rules(&[], &png(1024), &RuleCatalog::default());
        assert!(outcome.is_success());
    }
}
