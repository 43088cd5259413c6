//! Line scanner turning `!!!`/`???` blocks into `:::` containers.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::fence::FenceTracker;
use crate::heading::{normalize_headings, normalize_headings_outside_fences};
use crate::parser::parse_admonition;

/// Columns stripped from continuation lines on top of the opener's indent.
const BODY_INDENT: usize = 4;

static OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)(!!!|\?\?\?)\s+([A-Za-z0-9_]+)\s*(.*)").expect("invalid opener regex")
});

/// Conversion switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Insert the missing space in headings like `###Title` before scanning.
    pub fix_headings: bool,
    /// Leave everything inside fenced code blocks untouched.
    pub skip_code_fences: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            fix_headings: true,
            skip_code_fences: false,
        }
    }
}

/// Summary of one converted admonition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedBlock {
    /// Line of the opener (1-indexed).
    pub line: usize,
    /// Keyword as written after the marker.
    pub keyword: String,
    /// Container type emitted after `:::`.
    pub container_type: String,
    /// Opened with `???`.
    pub collapsible: bool,
    /// Title emitted on the opening fence, possibly empty.
    pub title: String,
    /// Number of continuation lines (blank ones included) moved into the container.
    pub body_lines: usize,
}

/// Converted document together with per-block details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Rewritten markdown.
    pub output: String,
    /// Converted blocks in document order.
    pub blocks: Vec<ConvertedBlock>,
}

/// Matched opener line.
#[derive(Debug)]
struct Opener<'a> {
    indent: &'a str,
    collapsible: bool,
    keyword: &'a str,
    rest: &'a str,
}

impl<'a> Opener<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let caps = OPENER.captures(line)?;
        let group = |i| caps.get(i).map_or("", |m| m.as_str());
        Some(Self {
            indent: group(1),
            collapsible: group(2) == "???",
            keyword: group(3),
            rest: group(4),
        })
    }
}

/// Converts MkDocs admonitions to container blocks.
///
/// # Example
///
/// ```
/// use admon_convert::AdmonitionConverter;
///
/// let conversion = AdmonitionConverter::default().convert("!!! note Remember this.");
/// assert_eq!(conversion.output, "::: tip Note\nRemember this.\n:::");
/// assert_eq!(conversion.blocks.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct AdmonitionConverter {
    options: ConvertOptions,
}

impl AdmonitionConverter {
    #[must_use]
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Rewrite every admonition in `markdown`.
    ///
    /// Lines are split on `\n` and joined back the same way, so a trailing
    /// newline and any `\r` survive unchanged.
    #[must_use]
    pub fn convert(&self, markdown: &str) -> Conversion {
        let normalized: Cow<'_, str> = if !self.options.fix_headings {
            Cow::Borrowed(markdown)
        } else if self.options.skip_code_fences {
            Cow::Owned(normalize_headings_outside_fences(markdown))
        } else {
            Cow::Owned(normalize_headings(markdown))
        };

        let lines: Vec<&str> = normalized.split('\n').collect();
        let mut out: Vec<Cow<'_, str>> = Vec::with_capacity(lines.len());
        let mut blocks = Vec::new();
        let mut fence = FenceTracker::new();
        let mut cursor = 0;

        while cursor < lines.len() {
            let line = lines[cursor];

            if self.options.skip_code_fences && (fence.update(line) || fence.in_fence()) {
                out.push(Cow::Borrowed(line));
                cursor += 1;
                continue;
            }

            let Some(opener) = Opener::parse(line) else {
                out.push(Cow::Borrowed(line));
                cursor += 1;
                continue;
            };

            let line_num = cursor + 1;
            let mut admonition = parse_admonition(opener.keyword, opener.rest);
            if opener.collapsible {
                "details".clone_into(&mut admonition.container_type);
            }

            let indent = opener.indent;
            out.push(Cow::Owned(if admonition.title.is_empty() {
                format!("{indent}::: {}", admonition.container_type)
            } else {
                format!(
                    "{indent}::: {} {}",
                    admonition.container_type, admonition.title
                )
            }));
            if !admonition.content.is_empty() {
                out.push(Cow::Owned(format!("{indent}{}", admonition.content)));
            }

            let body_start = cursor + 1;
            cursor = collect_body(&lines, body_start, indent, &mut out);
            out.push(Cow::Owned(format!("{indent}:::")));

            debug!(
                "line {line_num}: {} -> ::: {} ({} body lines)",
                opener.keyword,
                admonition.container_type,
                cursor - body_start
            );

            blocks.push(ConvertedBlock {
                line: line_num,
                keyword: opener.keyword.to_owned(),
                container_type: admonition.container_type,
                collapsible: opener.collapsible,
                title: admonition.title,
                body_lines: cursor - body_start,
            });
        }

        Conversion {
            output: out.join("\n"),
            blocks,
        }
    }
}

/// Convert with default options and return only the rewritten text.
#[must_use]
pub fn convert_admonitions(markdown: &str) -> String {
    AdmonitionConverter::default().convert(markdown).output
}

/// Move the continuation lines starting at `cursor` into `out`.
///
/// Returns the index of the first line that does not belong to the block.
/// A blank line is only taken when more deeper-indented content follows it;
/// otherwise it is left for the caller to copy as ordinary text.
fn collect_body<'a>(
    lines: &[&'a str],
    mut cursor: usize,
    indent: &str,
    out: &mut Vec<Cow<'a, str>>,
) -> usize {
    let base = indent_len(indent);

    while let Some(&line) = lines.get(cursor) {
        if is_blank(line) {
            let next_content = lines[cursor + 1..].iter().find(|l| !is_blank(l));
            match next_content {
                Some(next) if indent_len(next) > base => {
                    out.push(Cow::Borrowed(line));
                    cursor += 1;
                }
                _ => break,
            }
        } else if indent_len(line) > base {
            let stripped = strip_chars(line, base + BODY_INDENT);
            out.push(Cow::Owned(format!("{indent}{stripped}")));
            cursor += 1;
        } else {
            break;
        }
    }

    cursor
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Number of leading whitespace characters.
fn indent_len(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Drop the first `n` characters, or everything if the line is shorter.
fn strip_chars(line: &str, n: usize) -> &str {
    line.char_indices().nth(n).map_or("", |(i, _)| &line[i..])
}
