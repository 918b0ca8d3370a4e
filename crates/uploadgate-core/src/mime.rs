//! MIME type helpers

/// Strip parameters from a MIME type (e.g. "image/jpeg; charset=utf-8" ->
/// "image/jpeg").
pub fn normalize(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Subtype portion of a MIME type: the token after `/`, if any.
pub fn subtype(content_type: &str) -> Option<&str> {
    let normalized = normalize(content_type);
    normalized
        .split_once('/')
        .map(|(_, sub)| sub.trim())
        .filter(|sub| !sub.is_empty())
}

/// Whether the MIME type indicates JSON-structured content.
pub fn is_json_like(content_type: &str) -> bool {
    content_type.contains("json")
}

/// Effective extension of an upload: the MIME subtype when it looks like a
/// real extension, otherwise the declared extension.
///
/// Subtypes longer than 5 characters are treated as non-extension artifacts
/// (e.g. "vnd.openxmlformats-..."). The threshold is a compatibility
/// heuristic carried over from the original system, not a security boundary.
pub fn effective_extension<'a>(content_type: &'a str, declared: &'a str) -> &'a str {
    match subtype(content_type) {
        Some(sub) if sub.len() <= 5 => sub,
        _ => declared,
    }
}
