//! Rentry page references.
//!
//! Accepted forms: `https://rentry.co/slug`, `rentry.co/slug`,
//! `www.rentry.org/slug/`. Markdown is read from the page's `/edit` view,
//! which serves the raw text inside a textarea even when `/raw` is disabled.

use std::sync::LazyLock;

use regex::Regex;

static RENTRY_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?(www\.)?rentry\.(co|org)/[a-zA-Z0-9_-]+/?$")
        .expect("invalid rentry reference regex")
});

/// Check whether `input` names a rentry page rather than a local file.
#[must_use]
pub fn is_rentry_reference(input: &str) -> bool {
    RENTRY_REFERENCE.is_match(input)
}

/// Build the edit-page URL for a rentry reference.
///
/// Trailing slashes and a trailing `/edit` or `/raw` are dropped and
/// `https://` is added when no scheme is given.
#[must_use]
pub fn edit_url(reference: &str) -> String {
    let mut url = reference.trim().trim_end_matches('/');
    for suffix in ["/edit", "/raw"] {
        if let Some(stripped) = strip_suffix_ignore_case(url, suffix) {
            url = stripped;
            break;
        }
    }

    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        format!("{url}/edit")
    } else {
        format!("https://{url}/edit")
    }
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    let tail = s.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &s[..split])
}
