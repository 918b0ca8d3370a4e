//! Upload candidate abstraction
//!
//! The validator never parses multipart/form-data itself. Callers hand it an
//! [`UploadCandidate`]: something that reports the client-declared filename,
//! extension and detected MIME type, its size in bytes, and can be opened as
//! a readable byte source for archive inspection. Two implementations are
//! provided: [`ReceivedUpload`] for uploads buffered in memory and
//! [`StoredUpload`] for files already written to disk.

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use crate::error::GateError;

/// Combined `Read + Seek` object, as required to open a ZIP archive.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// An uploaded artifact as seen by the validator.
///
/// Attribute accessors reflect what the client declared; only `size_bytes`
/// and `open` touch the underlying bytes and may fail.
pub trait UploadCandidate {
    /// Size of the upload in bytes.
    fn size_bytes(&self) -> Result<u64, GateError>;

    /// Original client-declared filename (e.g. "report.pdf").
    fn original_filename(&self) -> &str;

    /// Original client-declared extension, without the leading dot.
    /// Empty when the filename carries no extension.
    fn original_extension(&self) -> &str;

    /// Detected MIME type (e.g. "application/zip").
    fn mime_type(&self) -> &str;

    /// Open the upload as a readable, seekable byte source.
    fn open(&self) -> Result<Box<dyn ReadSeek + '_>, GateError>;
}

/// Check that a candidate is a genuine, non-trivial upload: at least
/// `min_size_bytes` large and carrying a declared extension.
///
/// Pure predicate; a candidate whose size cannot be read is not an upload.
pub fn is_eligible_upload(candidate: &dyn UploadCandidate, min_size_bytes: u64) -> bool {
    let size = match candidate.size_bytes() {
        Ok(size) => size,
        Err(_) => return false,
    };

    size >= min_size_bytes && !candidate.original_extension().is_empty()
}

/// Upload buffered in memory, as produced by a multipart extraction layer.
#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    data: Vec<u8>,
    original_filename: String,
    content_type: String,
    extension: String,
}

impl ReceivedUpload {
    pub fn new(
        data: Vec<u8>,
        original_filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        let original_filename = original_filename.into();
        let extension = extension_of(&original_filename);
        Self {
            data,
            original_filename,
            content_type: content_type.into(),
            extension,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl UploadCandidate for ReceivedUpload {
    fn size_bytes(&self) -> Result<u64, GateError> {
        Ok(self.data.len() as u64)
    }

    fn original_filename(&self) -> &str {
        &self.original_filename
    }

    fn original_extension(&self) -> &str {
        &self.extension
    }

    fn mime_type(&self) -> &str {
        &self.content_type
    }

    fn open(&self) -> Result<Box<dyn ReadSeek + '_>, GateError> {
        Ok(Box::new(Cursor::new(self.data.as_slice())))
    }
}

/// Upload already stored on the local filesystem.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    path: PathBuf,
    original_filename: String,
    content_type: String,
    extension: String,
}

impl StoredUpload {
    pub fn new(path: impl Into<PathBuf>, content_type: impl Into<String>) -> Self {
        let path = path.into();
        let original_filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let extension = extension_of(&original_filename);
        Self {
            path,
            original_filename,
            content_type: content_type.into(),
            extension,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UploadCandidate for StoredUpload {
    fn size_bytes(&self) -> Result<u64, GateError> {
        let meta = std::fs::metadata(&self.path)
            .map_err(|e| GateError::Candidate(format!("{}: {}", self.path.display(), e)))?;
        Ok(meta.len())
    }

    fn original_filename(&self) -> &str {
        &self.original_filename
    }

    fn original_extension(&self) -> &str {
        &self.extension
    }

    fn mime_type(&self) -> &str {
        &self.content_type
    }

    fn open(&self) -> Result<Box<dyn ReadSeek + '_>, GateError> {
        let file = File::open(&self.path)
            .map_err(|e| GateError::Candidate(format!("{}: {}", self.path.display(), e)))?;
        Ok(Box::new(file))
    }
}

/// Extension as the substring after the last `.`, or empty when the name
/// carries none. A trailing dot also yields empty.
fn extension_of(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(data: &[u8], name: &str) -> ReceivedUpload {
        ReceivedUpload::new(data.to_vec(), name, "application/octet-stream")
    }

    #[test]
    fn test_extension_derived_from_filename() {
        assert_eq!(upload(b"x", "photo.JPG").original_extension(), "JPG");
        assert_eq!(upload(b"x", "archive.tar.gz").original_extension(), "gz");
        assert_eq!(upload(b"x", "noextension").original_extension(), "");
        assert_eq!(upload(b"x", ".gitignore").original_extension(), "");
    }

    #[test]
    fn test_eligible_upload_requires_min_size() {
        let small = upload(b"tiny", "a.txt");
        assert!(!is_eligible_upload(&small, 20));

        let big = upload(&[0u8; 64], "a.txt");
        assert!(is_eligible_upload(&big, 20));
    }

    #[test]
    fn test_eligible_upload_requires_extension() {
        let no_ext = upload(&[0u8; 64], "README");
        assert!(!is_eligible_upload(&no_ext, 20));
    }

    #[test]
    fn test_stored_upload_missing_file_is_not_eligible() {
        let stored = StoredUpload::new("/nonexistent/archive.zip", "application/zip");
        assert!(stored.size_bytes().is_err());
        assert!(!is_eligible_upload(&stored, 20));
    }

    #[test]
    fn test_received_upload_open_reads_data() {
        let up = upload(b"hello world, this is data", "a.bin");
        let mut buf = Vec::new();
        up.open().unwrap().read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"hello world, this is data");
    }
}
