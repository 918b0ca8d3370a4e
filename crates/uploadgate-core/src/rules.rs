//! File type tags and size/format rules
//!
//! Each [`FileTypeTag`] maps to a declarative [`TypeRule`]: the set of
//! accepted formats (extensions) and a size cap in kilobytes. Several rules
//! can be merged into a single permissive union so a caller can validate
//! "this upload may be an image OR a document".

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GateError;

/// Domain category of an upload, driving which size/format rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileTypeTag {
    Video,
    Audio,
    Document,
    Spreadsheet,
    Word,
    Powerpoint,
    Image,
    Text,
    Zip,
}

impl FileTypeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileTypeTag::Video => "video",
            FileTypeTag::Audio => "audio",
            FileTypeTag::Document => "document",
            FileTypeTag::Spreadsheet => "spreadsheet",
            FileTypeTag::Word => "word",
            FileTypeTag::Powerpoint => "powerpoint",
            FileTypeTag::Image => "image",
            FileTypeTag::Text => "text",
            FileTypeTag::Zip => "zip",
        }
    }
}

impl fmt::Display for FileTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileTypeTag {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(FileTypeTag::Video),
            "audio" => Ok(FileTypeTag::Audio),
            "document" => Ok(FileTypeTag::Document),
            "spreadsheet" => Ok(FileTypeTag::Spreadsheet),
            "word" => Ok(FileTypeTag::Word),
            "powerpoint" => Ok(FileTypeTag::Powerpoint),
            "image" => Ok(FileTypeTag::Image),
            "text" => Ok(FileTypeTag::Text),
            "zip" => Ok(FileTypeTag::Zip),
            other => Err(GateError::UnknownTag(other.to_string())),
        }
    }
}

/// Declarative size/format rule for one file type.
///
/// Immutable once constructed. Formats are stored lowercase; a size cap of
/// zero or an empty format set means "no constraint" for that axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRule {
    pub allowed_formats: Vec<String>,
    pub max_kilobytes: u64,
}

impl TypeRule {
    pub fn new(formats: &[&str], max_kilobytes: u64) -> Self {
        Self {
            allowed_formats: formats.iter().map(|f| f.to_lowercase()).collect(),
            max_kilobytes,
        }
    }

    /// Rule with no constraints, the identity for [`TypeRule::merge`].
    pub fn empty() -> Self {
        Self {
            allowed_formats: Vec::new(),
            max_kilobytes: 0,
        }
    }

    /// Built-in rule for a tag.
    pub fn for_tag(tag: FileTypeTag) -> Self {
        match tag {
            FileTypeTag::Video => Self::new(&["mp4", "3gp"], 30 * 1024),
            FileTypeTag::Audio => Self::new(&["mp3", "wav"], 10 * 1024),
            FileTypeTag::Document => Self::new(&["pdf"], 25 * 1024),
            FileTypeTag::Spreadsheet => Self::new(&["xls", "xlsx"], 30 * 1024),
            FileTypeTag::Word => Self::new(&["doc", "docx"], 30 * 1024),
            FileTypeTag::Powerpoint => Self::new(&["ppt", "pptx"], 30 * 1024),
            // 6.4 MB, truncated to whole kilobytes
            FileTypeTag::Image => Self::new(&["jpeg", "bmp", "png", "gif", "jpg", "webp"], 6553),
            FileTypeTag::Text => Self::new(&["txt", "csv"], 25 * 1024),
            FileTypeTag::Zip => Self::new(&["zip"], 30 * 1024),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.allowed_formats.is_empty() && self.max_kilobytes == 0
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_kilobytes * 1024
    }

    pub fn allows_format(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.allowed_formats.iter().any(|f| *f == extension)
    }

    /// Merge rules into their permissive union: formats are unioned
    /// (deduplicated, first-seen order) and the size cap is the maximum.
    ///
    /// The fold is commutative and associative, so input order never affects
    /// the result. A singleton input returns that rule unchanged.
    pub fn merge(rules: impl IntoIterator<Item = TypeRule>) -> TypeRule {
        let mut merged = TypeRule::empty();
        for rule in rules {
            for format in rule.allowed_formats {
                if !merged.allowed_formats.contains(&format) {
                    merged.allowed_formats.push(format);
                }
            }
            merged.max_kilobytes = merged.max_kilobytes.max(rule.max_kilobytes);
        }
        merged
    }
}

/// Rule lookup table with optional per-tag overrides on top of the built-in
/// defaults. Lookup is total: every tag resolves to a rule.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    overrides: HashMap<FileTypeTag, TypeRule>,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the rule for one tag.
    pub fn with_rule(mut self, tag: FileTypeTag, rule: TypeRule) -> Self {
        self.overrides.insert(tag, rule);
        self
    }

    pub fn rule_for(&self, tag: FileTypeTag) -> TypeRule {
        self.overrides
            .get(&tag)
            .cloned()
            .unwrap_or_else(|| TypeRule::for_tag(tag))
    }
}
