//! Extension denylist policy
//!
//! Decides whether an extension is categorically forbidden, independently of
//! any declared file type. The default list targets native executables,
//! scripts, installers and a handful of document/web formats that are
//! routinely abused as droppers (html, css, php, sql).

/// Extensions refused by default. Matching is case-sensitive.
pub const DEFAULT_DENIED_EXTENSIONS: &[&str] = &[
    "exe", "bat", "cmd", "vbs", "js", "ps1", "dll", "hta", "jar", "reg", "scr", "cpp", "php",
    "aspx", "sql", "iso", "html", "css", "swf", "py", "rb", "cgi", "sh", "msi", "ocx", "sys",
    "drv", "cpl", "msp", "ink", "pif", "msc", "mst", "com",
];

/// Immutable denylist policy, injected per call site.
///
/// A caller-supplied list replaces the default entirely; it is never merged.
#[derive(Debug, Clone)]
pub struct ExtensionPolicy {
    denied: Vec<String>,
}

impl ExtensionPolicy {
    /// Policy using [`DEFAULT_DENIED_EXTENSIONS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy using a custom denylist instead of the default.
    pub fn with_denylist(denied: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            denied: denied.into_iter().map(Into::into).collect(),
        }
    }

    /// Case-sensitive membership test against the denylist.
    pub fn is_forbidden(&self, extension: &str) -> bool {
        self.denied.iter().any(|denied| denied == extension)
    }
}

impl Default for ExtensionPolicy {
    fn default() -> Self {
        Self {
            denied: DEFAULT_DENIED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
