//! Status lines on stderr.
//!
//! stdout may carry the converted document, so everything meant for the
//! user goes through [`Output`] instead.

use std::fmt;
use std::path::Path;

use console::{Style, Term};

/// A progress or result line of the convert command.
#[derive(Debug)]
pub(crate) enum Status<'a> {
    Fetching(&'a str),
    Fetched(usize),
    Converted { from: &'a str, to: &'a Path },
    ConvertedInPlace(&'a Path),
    NoAdmonitions,
}

impl Status<'_> {
    fn style(&self) -> Style {
        match self {
            Self::Fetching(_) | Self::Fetched(_) => Style::new().dim(),
            Self::Converted { .. } | Self::ConvertedInPlace(_) => Style::new().green(),
            Self::NoAdmonitions => Style::new().yellow(),
        }
    }
}

impl fmt::Display for Status<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetching(url) => write!(f, "Fetching: {url}"),
            Self::Fetched(chars) => write!(f, "Fetched {chars} chars of markdown."),
            Self::Converted { from, to } => write!(f, "Converted: {from} → {}", to.display()),
            Self::ConvertedInPlace(path) => write!(f, "Converted in place: {}", path.display()),
            Self::NoAdmonitions => f.write_str("No admonitions found"),
        }
    }
}

/// Styled writer for status and error lines.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    pub(crate) fn status(&self, status: &Status<'_>) {
        self.write(&status.style(), &status.to_string());
    }

    /// Print `Error: <err>` in red.
    pub(crate) fn error(&self, err: &dyn fmt::Display) {
        self.write(&Style::new().red().bold(), &format!("Error: {err}"));
    }

    // Write failures on stderr have nowhere to be reported.
    fn write(&self, style: &Style, line: &str) {
        let _ = self.term.write_line(&style.apply_to(line).to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_messages() {
        assert_eq!(
            Status::Fetching("https://rentry.co/a/edit").to_string(),
            "Fetching: https://rentry.co/a/edit"
        );
        assert_eq!(
            Status::Fetched(42).to_string(),
            "Fetched 42 chars of markdown."
        );
        assert_eq!(
            Status::Converted {
                from: "guide.md",
                to: Path::new("/tmp/out.md"),
            }
            .to_string(),
            "Converted: guide.md → /tmp/out.md"
        );
        assert_eq!(
            Status::ConvertedInPlace(Path::new("/tmp/guide.md")).to_string(),
            "Converted in place: /tmp/guide.md"
        );
        assert_eq!(Status::NoAdmonitions.to_string(), "No admonitions found");
    }
}
