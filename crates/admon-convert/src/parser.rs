//! Admonition opener parsing.
//!
//! The text after `!!! type` takes one of four shapes, checked in order:
//!
//! | shape                | example                     | title     | content  |
//! |----------------------|-----------------------------|-----------|----------|
//! | bold title + colon   | `** Warning:** Stop here.`  | `Warning` | `Stop here.` |
//! | bold-wrapped         | `** Stop here. **`          | default   | `Stop here.` |
//! | quoted title         | `"Heads up" Stop here.`     | `Heads up`| `Stop here.` |
//! | plain                | `Stop here.`                | default   | `Stop here.` |
//!
//! A bold title that names a canonical container type also switches the
//! container to that type.

use std::sync::LazyLock;

use regex::Regex;

use crate::tables::{default_title, is_canonical, resolve_type};

static TITLED_WITH_COLON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\*\s*(.+?):\s*\*\*\s*(.*)").expect("invalid bold title regex")
});

static BOLD_WRAPPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*\s*(.*?)\s*\*\*\s*$").expect("invalid bold regex"));

static QUOTED_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"(.+?)"\s*(.*)"#).expect("invalid quoted title regex"));

/// Shape of the inline text following an admonition keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineForm<'a> {
    /// `**Title:** rest`
    TitledWithColon { title: &'a str, rest: &'a str },
    /// `**text**` with nothing around it.
    BoldWrapped { inner: &'a str },
    /// `"Title" rest`
    Quoted { title: &'a str, rest: &'a str },
    /// Anything else.
    Plain,
}

/// Classify trimmed inline text. First matching shape wins.
#[must_use]
pub fn classify(content: &str) -> InlineForm<'_> {
    if let Some(caps) = TITLED_WITH_COLON.captures(content) {
        return InlineForm::TitledWithColon {
            title: caps.get(1).map_or("", |m| m.as_str()),
            rest: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    if let Some(caps) = BOLD_WRAPPED.captures(content) {
        return InlineForm::BoldWrapped {
            inner: caps.get(1).map_or("", |m| m.as_str()),
        };
    }
    if let Some(caps) = QUOTED_TITLE.captures(content) {
        return InlineForm::Quoted {
            title: caps.get(1).map_or("", |m| m.as_str()),
            rest: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    InlineForm::Plain
}

/// Parsed admonition opener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admonition {
    /// Container type to emit after `:::`.
    pub container_type: String,
    /// Title shown after the type; empty when there is none.
    pub title: String,
    /// Inline content emitted as the first body line; empty when there is none.
    pub content: String,
}

/// Parse an opener's keyword and trailing text.
#[must_use]
pub fn parse_admonition(raw_type: &str, raw_content: &str) -> Admonition {
    let container_type = resolve_type(raw_type);
    let title = default_title(&raw_type.to_lowercase()).unwrap_or_default();
    let content = raw_content.trim();

    match classify(content) {
        InlineForm::TitledWithColon { title, rest } => {
            let title = title.trim();
            let lower = title.to_lowercase();
            Admonition {
                container_type: if is_canonical(&lower) {
                    lower
                } else {
                    container_type
                },
                title: title.to_owned(),
                content: rest.trim().to_owned(),
            }
        }
        InlineForm::BoldWrapped { inner } => Admonition {
            container_type,
            title: title.to_owned(),
            content: inner.trim().to_owned(),
        },
        InlineForm::Quoted { title, rest } => Admonition {
            container_type,
            title: title.to_owned(),
            content: rest.trim().to_owned(),
        },
        InlineForm::Plain => Admonition {
            container_type,
            title: title.to_owned(),
            content: content.to_owned(),
        },
    }
}
