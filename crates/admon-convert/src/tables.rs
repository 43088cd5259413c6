//! Fixed keyword tables for admonition type resolution.

/// Container types the target renderer understands natively.
pub const CANONICAL_TYPES: [&str; 5] = ["tip", "info", "warning", "danger", "details"];

/// Check whether a lowercase keyword is a canonical container type.
#[must_use]
pub fn is_canonical(keyword: &str) -> bool {
    CANONICAL_TYPES.contains(&keyword)
}

/// Map a lowercase MkDocs admonition keyword to its container type.
///
/// Returns `None` for keywords without a mapping, including the canonical
/// types themselves.
#[must_use]
pub fn mapped_type(keyword: &str) -> Option<&'static str> {
    Some(match keyword {
        "note" | "success" | "check" | "done" => "tip",
        "important" | "question" | "help" | "faq" => "warning",
        "abstract" | "summary" | "tldr" | "quote" | "cite" => "info",
        "caution" | "failure" | "fail" | "missing" | "error" | "bug" => "danger",
        "example" => "details",
        _ => return None,
    })
}

/// Title used when an admonition does not carry an explicit one.
#[must_use]
pub fn default_title(keyword: &str) -> Option<&'static str> {
    match keyword {
        "note" => Some("Note"),
        _ => None,
    }
}

/// Resolve a raw keyword to its baseline container type.
///
/// The keyword is lowercased; canonical types pass through, mapped keywords
/// are translated, and anything else is returned lowercased.
#[must_use]
pub fn resolve_type(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if is_canonical(&lower) {
        return lower;
    }
    match mapped_type(&lower) {
        Some(mapped) => mapped.to_owned(),
        None => lower,
    }
}
