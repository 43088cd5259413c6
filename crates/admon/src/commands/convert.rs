//! `admon convert` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use admon_config::{CliSettings, Config};
use admon_convert::{AdmonitionConverter, ConvertOptions};
use admon_rentry::{RentryClient, Source, Transport, edit_url};
use clap::Args;
use tracing::info;

use crate::error::CliError;
use crate::output::{Output, Status};

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown file, rentry URL (or `rentry.co/<id>`); reads stdin when omitted.
    input: Option<String>,

    /// Destination file (default: stdout).
    #[arg(conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Overwrite the input file with the converted markdown.
    #[arg(short = 'i', long)]
    in_place: bool,

    /// Leave admonition syntax inside fenced code blocks untouched.
    #[arg(long)]
    skip_code_fences: bool,

    /// Do not insert the missing space after leading `#` runs.
    #[arg(long)]
    no_fix_headings: bool,

    /// Path to configuration file (default: auto-discover admon.toml).
    #[arg(short, long, env = "ADMON_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output (log config, fetch and redirect steps).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the source cannot be read or
    /// fetched, `--in-place` is used without a local file, or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            fix_headings: self.no_fix_headings.then_some(false),
            skip_code_fences: self.skip_code_fences.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            info!(path = %path.display(), "Loaded configuration");
        }

        let source = Source::classify(self.input.as_deref());
        if self.in_place && source.path().is_none() {
            return Err(CliError::Usage(
                "--in-place requires a local input file".to_owned(),
            ));
        }

        let client = RentryClient::from_settings(
            &config.fetch.user_agent,
            config.fetch.timeout(),
            config.fetch.max_redirects,
        );

        let markdown = read_source(&source, &client, std::io::stdin().lock(), &output)?;

        let converter = AdmonitionConverter::new(ConvertOptions {
            fix_headings: config.convert.fix_headings,
            skip_code_fences: config.convert.skip_code_fences,
        });
        let conversion = converter.convert(&markdown);
        if conversion.blocks.is_empty() {
            output.status(&Status::NoAdmonitions);
        } else {
            info!(count = conversion.blocks.len(), "Converted admonitions");
        }

        if self.in_place {
            if let Some(path) = source.path() {
                std::fs::write(path, &conversion.output)?;
                output.status(&Status::ConvertedInPlace(&absolute(path)));
            }
        } else if let Some(destination) = &self.output {
            write_file(destination, &conversion.output)?;
            output.status(&Status::Converted {
                from: &describe(&source),
                to: &absolute(destination),
            });
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(conversion.output.as_bytes())?;
            stdout.flush()?;
        }

        Ok(())
    }
}

/// Read the markdown, reporting progress for remote sources.
fn read_source<T: Transport, R: Read>(
    source: &Source,
    client: &RentryClient<T>,
    stdin: R,
    output: &Output,
) -> Result<String, CliError> {
    if let Source::Rentry(reference) = source {
        output.status(&Status::Fetching(&edit_url(reference)));
    }
    let markdown = source.read_with_stdin(client, stdin)?;
    if source.is_remote() {
        output.status(&Status::Fetched(markdown.chars().count()));
    }
    Ok(markdown)
}

/// Write `content` to `path`, creating parent directories as needed.
fn write_file(path: &Path, content: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Human-readable name of the source for status messages.
fn describe(source: &Source) -> String {
    match source {
        Source::Rentry(reference) => reference.clone(),
        Source::File(path) => path.display().to_string(),
        Source::Stdin => "<stdin>".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admon_rentry::{MockTransport, SourceError};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_read_source_fetches_rentry_once() {
        let transport = MockTransport::new().with_page(
            "https://rentry.co/notes/edit",
            r#"<textarea id="id_text">!!! tip &amp; more</textarea>"#,
        );
        let client = RentryClient::new(transport);
        let source = Source::classify(Some("rentry.co/notes"));

        let markdown = read_source(&source, &client, std::io::empty(), &Output::new()).unwrap();

        assert_eq!(markdown, "!!! tip & more");
        assert_eq!(
            client.transport().requests(),
            vec!["https://rentry.co/notes/edit".to_owned()]
        );
    }

    #[test]
    fn test_read_source_stdin_makes_no_requests() {
        let client = RentryClient::new(MockTransport::new());

        let markdown =
            read_source(&Source::Stdin, &client, &b"!!! note hi"[..], &Output::new()).unwrap();

        assert_eq!(markdown, "!!! note hi");
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn test_read_source_fetch_failure() {
        let client = RentryClient::new(MockTransport::new());
        let source = Source::classify(Some("https://rentry.org/gone"));

        let err = read_source(&source, &client, std::io::empty(), &Output::new()).unwrap_err();

        assert!(matches!(err, CliError::Source(SourceError::Fetch(_))));
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/deeper/out.md");

        write_file(&path, "::: tip\nx\n:::").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "::: tip\nx\n:::");
    }

    #[test]
    fn test_write_file_bare_filename() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.md");

        write_file(&path, "text").unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn test_describe_sources() {
        assert_eq!(describe(&Source::Stdin), "<stdin>");
        assert_eq!(
            describe(&Source::Rentry("rentry.co/abc".to_owned())),
            "rentry.co/abc"
        );
        assert_eq!(
            describe(&Source::File(PathBuf::from("docs/a.md"))),
            "docs/a.md"
        );
    }
}
