//! Archive security scanner
//!
//! ZIP entries can lie about their names, and execute bits are only
//! observable after extraction, so the scanner extracts the archive into an
//! isolated per-scan workspace, inspects the extracted entries, and tears
//! the workspace down on every exit path. The workspace name carries a UUID
//! suffix so concurrent scans of same-named archives never collide.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use uuid::Uuid;
use zip::ZipArchive;

use uploadgate_core::candidate::{ReadSeek, UploadCandidate};
use uploadgate_core::config::ScanOptions;
use uploadgate_core::error::GateError;
use uploadgate_core::outcome::ValidationOutcome;
use uploadgate_core::policy::ExtensionPolicy;

pub const UNREADABLE_MESSAGE: &str = "Failed to validate zip file!";
pub const INSECURE_MESSAGE: &str = "Zip cannot contain executable file!";
pub const SECURE_MESSAGE: &str = "Great! Zip file secure!";

/// Input to the scanner: either an upload candidate or a bare path to an
/// archive already at rest on the filesystem.
pub enum ZipSource<'a> {
    Upload(&'a dyn UploadCandidate),
    Path(&'a Path),
}

impl<'a> ZipSource<'a> {
    fn display_name(&self) -> String {
        match self {
            ZipSource::Upload(candidate) => candidate.original_filename().to_string(),
            ZipSource::Path(path) => path.display().to_string(),
        }
    }

    fn open(&self) -> Result<Box<dyn ReadSeek + 'a>, GateError> {
        match self {
            ZipSource::Upload(candidate) => candidate.open(),
            ZipSource::Path(path) => Ok(Box::new(File::open(path)?)),
        }
    }
}

/// Transient, uniquely-named extraction directory for a single scan.
///
/// The directory is removed recursively when the workspace is dropped, so
/// cleanup runs on every exit path including early returns and faults.
/// `close` removes it eagerly and reports the deletion error, if any.
pub struct ExtractionWorkspace {
    path: PathBuf,
    armed: bool,
}

impl ExtractionWorkspace {
    /// Create a fresh workspace under `root`, scoped by the archive's name
    /// plus a per-call UUID.
    pub fn create(root: &Path, archive_name: &str) -> Result<Self, GateError> {
        let base = sanitize_dir_name(archive_name);
        let path = root.join(format!("{}.{}", base, Uuid::new_v4()));
        fs::create_dir_all(&path)?;

        tracing::debug!(workspace = %path.display(), "Created extraction workspace");

        Ok(Self { path, armed: true })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the workspace now instead of waiting for drop.
    pub fn close(mut self) -> Result<(), GateError> {
        self.armed = false;
        fs::remove_dir_all(&self.path)?;
        Ok(())
    }
}

impl Drop for ExtractionWorkspace {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = fs::remove_dir_all(&self.path) {
                tracing::warn!(
                    workspace = %self.path.display(),
                    error = %e,
                    "Failed to remove extraction workspace"
                );
            }
        }
    }
}

/// Reduce an archive name to a single safe path component for the workspace
/// directory (strips path components like `../`).
fn sanitize_dir_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or("archive")
        .to_string()
}

/// Extract a ZIP source into a workspace and reject it when any contained
/// entry is an executable file or carries a denylisted extension.
///
/// The workspace directory is deleted regardless of the outcome. When the
/// source is a bare path, the archive itself is also deleted on an insecure
/// verdict if `options.delete_source_if_insecure` is set.
pub fn scan_zip_contents(
    source: ZipSource<'_>,
    policy: &ExtensionPolicy,
    options: &ScanOptions,
) -> ValidationOutcome {
    match run_scan(&source, policy, options) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(
                archive = %source.display_name(),
                error = %e,
                "Archive scan hit an internal fault"
            );
            ValidationOutcome::internal_fault()
        }
    }
}

fn run_scan(
    source: &ZipSource<'_>,
    policy: &ExtensionPolicy,
    options: &ScanOptions,
) -> Result<ValidationOutcome, GateError> {
    let name = source.display_name();

    let mut archive = match source.open().and_then(|reader| {
        ZipArchive::new(reader).map_err(|e| GateError::Candidate(e.to_string()))
    }) {
        Ok(archive) => archive,
        Err(e) => {
            tracing::debug!(archive = %name, error = %e, "Unreadable zip archive");
            return Ok(ValidationOutcome::rejected(UNREADABLE_MESSAGE));
        }
    };

    let workspace = ExtractionWorkspace::create(&options.extraction_root, &name)?;

    // `extract` routes entry names through the zip crate's sanitizer, so
    // entries cannot escape the workspace.
    if let Err(e) = archive.extract(workspace.path()) {
        tracing::debug!(archive = %name, error = %e, "Zip extraction failed");
        return Ok(ValidationOutcome::rejected(UNREADABLE_MESSAGE));
    }

    let insecure = find_insecure_entry(workspace.path(), policy)?;

    if let Err(e) = workspace.close() {
        tracing::warn!(archive = %name, error = %e, "Workspace cleanup failed");
    }

    if let Some(entry) = insecure {
        tracing::warn!(archive = %name, entry = %entry, "Rejected insecure zip upload");

        if options.delete_source_if_insecure {
            if let ZipSource::Path(path) = source {
                // The verdict is already determined; a deletion failure must
                // not turn a rejection into an internal fault.
                match fs::remove_file(path) {
                    Ok(()) => {
                        tracing::info!(archive = %name, "Deleted insecure source archive")
                    }
                    Err(e) => tracing::warn!(
                        archive = %name,
                        error = %e,
                        "Failed to delete insecure source archive"
                    ),
                }
            }
        }

        return Ok(ValidationOutcome::rejected(INSECURE_MESSAGE));
    }

    Ok(ValidationOutcome::success(SECURE_MESSAGE))
}

/// Walk the extracted tree and return the name of the first insecure file,
/// if any. Subdirectories are descended into so nested payloads cannot hide;
/// the first violation stops the walk.
fn find_insecure_entry(
    dir: &Path,
    policy: &ExtensionPolicy,
) -> Result<Option<String>, GateError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type()?.is_dir() {
            if let Some(found) = find_insecure_entry(&path, policy)? {
                return Ok(Some(found));
            }
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let extension = name.rsplit('.').next().unwrap_or("");

        if is_executable_file(&path)? {
            return Ok(Some(name));
        }
        if policy.is_forbidden(extension) {
            return Ok(Some(name));
        }
    }

    Ok(None)
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> Result<bool, GateError> {
    use std::os::unix::fs::PermissionsExt;

    let meta = fs::metadata(path)?;
    Ok(meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable_file(_path: &Path) -> Result<bool, GateError> {
    // No execute bit to observe; the extension denylist still applies.
    Ok(false)
}
