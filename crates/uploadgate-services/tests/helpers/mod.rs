//! Shared helpers for integration tests: building real zip archives in
//! memory and scan options rooted in a temp directory.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;

use uploadgate_core::config::ScanOptions;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// One archive entry: name, contents, and an optional unix mode.
pub struct Entry<'a> {
    pub name: &'a str,
    pub data: &'a [u8],
    pub mode: Option<u32>,
}

impl<'a> Entry<'a> {
    pub fn plain(name: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            data,
            mode: Some(0o644),
        }
    }

    pub fn executable(name: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            data,
            mode: Some(0o755),
        }
    }
}

/// Build a zip archive containing the given entries.
pub fn zip_bytes(entries: &[Entry<'_>]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        for entry in entries {
            let mut options =
                FileOptions::default().compression_method(CompressionMethod::Stored);
            if let Some(mode) = entry.mode {
                options = options.unix_permissions(mode);
            }
            zip.start_file(entry.name, options).unwrap();
            zip.write_all(entry.data).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer
}

/// Scan options whose extraction root lives under the given temp directory.
pub fn scan_options_under(root: &Path) -> ScanOptions {
    ScanOptions::default().with_extraction_root(root.join("extracted_zip"))
}

/// Number of leftover entries under the extraction root. Zero after a scan
/// means cleanup ran.
pub fn leftover_workspaces(root: &Path) -> usize {
    let extraction_root = root.join("extracted_zip");
    if !extraction_root.exists() {
        return 0;
    }
    std::fs::read_dir(extraction_root).unwrap().count()
}
