//! Configuration module
//!
//! All knobs of the eligibility gate in one place, with documented defaults.
//! Configuration values are immutable once built and injected per call; there
//! is no process-wide mutable state.

use std::path::PathBuf;

use crate::policy::ExtensionPolicy;
use crate::rules::RuleCatalog;

/// Minimum byte size for something to count as a genuine upload.
pub const DEFAULT_MIN_UPLOAD_BYTES: u64 = 20;

/// Directory under which per-scan extraction workspaces are created.
pub const DEFAULT_EXTRACTION_ROOT: &str = "extracted_zip";

/// Options for the archive security scanner.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Root directory for transient extraction workspaces.
    pub extraction_root: PathBuf,
    /// When a bare-path source turns out to be insecure, delete it.
    pub delete_source_if_insecure: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extraction_root: PathBuf::from(DEFAULT_EXTRACTION_ROOT),
            delete_source_if_insecure: true,
        }
    }
}

impl ScanOptions {
    pub fn with_extraction_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.extraction_root = root.into();
        self
    }

    pub fn keep_insecure_source(mut self) -> Self {
        self.delete_source_if_insecure = false;
        self
    }
}

/// Full configuration for the eligibility gate.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub min_upload_bytes: u64,
    /// Reject uploads whose declared extension hits the denylist.
    pub stop_executable: bool,
    pub policy: ExtensionPolicy,
    pub catalog: RuleCatalog,
    pub scan: ScanOptions,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_upload_bytes: DEFAULT_MIN_UPLOAD_BYTES,
            stop_executable: true,
            policy: ExtensionPolicy::default(),
            catalog: RuleCatalog::default(),
            scan: ScanOptions::default(),
        }
    }
}

impl GateConfig {
    pub fn with_policy(mut self, policy: ExtensionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_catalog(mut self, catalog: RuleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_scan_options(mut self, scan: ScanOptions) -> Self {
        self.scan = scan;
        self
    }

    pub fn allow_executables(mut self) -> Self {
        self.stop_executable = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GateConfig::default();
        assert_eq!(config.min_upload_bytes, 20);
        assert!(config.stop_executable);
        assert!(config.scan.delete_source_if_insecure);
        assert_eq!(
            config.scan.extraction_root,
            PathBuf::from(DEFAULT_EXTRACTION_ROOT)
        );
    }

    #[test]
    fn test_builders() {
        let config = GateConfig::default()
            .allow_executables()
            .with_scan_options(ScanOptions::default().keep_insecure_source());
        assert!(!config.stop_executable);
        assert!(!config.scan.delete_source_if_insecure);
    }
}
