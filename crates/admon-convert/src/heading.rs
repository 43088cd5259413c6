//! Heading marker spacing.
//!
//! Rentry accepts `###Title`, `CommonMark` does not. Lines that start with
//! one to six `#` followed directly by text get a space inserted after the
//! marker run.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::fence::FenceTracker;

static UNSPACED_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})([^ #\n])").expect("invalid heading regex"));

/// Normalize a single line. Returns the line unchanged when it is not an
/// unspaced heading.
pub fn normalize_heading(line: &str) -> Cow<'_, str> {
    UNSPACED_HEADING.replace(line, "${1} ${2}")
}

/// Normalize every line of a document.
#[must_use]
pub fn normalize_headings(markdown: &str) -> String {
    markdown
        .split('\n')
        .map(normalize_heading)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize a document, leaving lines inside fenced code blocks untouched.
#[must_use]
pub fn normalize_headings_outside_fences(markdown: &str) -> String {
    let mut fence = FenceTracker::new();
    markdown
        .split('\n')
        .map(|line| {
            // Fence markers themselves are never headings.
            if fence.update(line) || fence.in_fence() {
                Cow::Borrowed(line)
            } else {
                normalize_heading(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inserts_space_after_marker() {
        assert_eq!(normalize_heading("###Title"), "### Title");
        assert_eq!(normalize_heading("#Top"), "# Top");
        assert_eq!(normalize_heading("######Six"), "###### Six");
    }

    #[test]
    fn test_spaced_heading_unchanged() {
        assert!(matches!(normalize_heading("## Title"), Cow::Borrowed(_)));
        assert_eq!(normalize_heading("## Title"), "## Title");
    }

    #[test]
    fn test_seven_hashes_unchanged() {
        assert_eq!(normalize_heading("#######Seven"), "#######Seven");
    }

    #[test]
    fn test_bare_marker_unchanged() {
        assert_eq!(normalize_heading("###"), "###");
    }

    #[test]
    fn test_crlf_bare_marker_gets_space() {
        assert_eq!(normalize_heading("#\r"), "# \r");
        assert_eq!(normalize_headings("#\r\n##Two\r\n"), "# \r\n## Two\r\n");
        assert_eq!(normalize_headings("# \r\n"), "# \r\n");
    }

    #[test]
    fn test_indented_hash_unchanged() {
        assert_eq!(normalize_heading("  ##Title"), "  ##Title");
    }

    #[test]
    fn test_non_heading_unchanged() {
        assert_eq!(normalize_heading("plain text #tag"), "plain text #tag");
        assert_eq!(normalize_heading(""), "");
    }

    #[test]
    fn test_document_normalization_is_idempotent() {
        let doc = "#One\ntext\n##Two\n\n### Three\n#######x\n";
        let once = normalize_headings(doc);
        assert_eq!(once, "# One\ntext\n## Two\n\n### Three\n#######x\n");
        assert_eq!(normalize_headings(&once), once);
    }

    #[test]
    fn test_fenced_lines_skipped() {
        let doc = "#Title\n```c\n#include <stdio.h>\n```\n#After";
        assert_eq!(
            normalize_headings_outside_fences(doc),
            "# Title\n```c\n#include <stdio.h>\n```\n# After"
        );
        assert_eq!(
            normalize_headings(doc),
            "# Title\n```c\n# include <stdio.h>\n```\n# After"
        );
    }
}
