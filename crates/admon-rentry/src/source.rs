//! Input source resolution.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::client::RentryClient;
use crate::entities::decode_lossy;
use crate::error::SourceError;
use crate::reference::is_rentry_reference;
use crate::transport::Transport;

/// Where the markdown comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Rentry page reference, as given on the command line.
    Rentry(String),
    /// Local file.
    File(PathBuf),
    /// Standard input.
    Stdin,
}

impl Source {
    /// Classify a command-line input. `None` means standard input.
    #[must_use]
    pub fn classify(input: Option<&str>) -> Self {
        match input {
            None => Self::Stdin,
            Some(reference) if is_rentry_reference(reference) => {
                Self::Rentry(reference.to_owned())
            }
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }

    /// Whether the source lives on the network.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Rentry(_))
    }

    /// Local file path, if the source is a file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Rentry(_) | Self::Stdin => None,
        }
    }

    /// Read the source, taking standard input from the process.
    ///
    /// # Errors
    ///
    /// See [`read_with_stdin`](Self::read_with_stdin).
    pub fn read<T: Transport>(&self, client: &RentryClient<T>) -> Result<String, SourceError> {
        self.read_with_stdin(client, std::io::stdin().lock())
    }

    /// Read the source, taking standard input from `stdin`.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] for a missing local file,
    /// [`SourceError::Fetch`] when a rentry page cannot be fetched, and
    /// [`SourceError::Io`] when reading fails.
    pub fn read_with_stdin<T: Transport, R: Read>(
        &self,
        client: &RentryClient<T>,
        mut stdin: R,
    ) -> Result<String, SourceError> {
        match self {
            Self::Rentry(reference) => Ok(client.fetch_markdown(reference)?),
            Self::File(path) => {
                if !path.exists() {
                    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.clone());
                    return Err(SourceError::NotFound(absolute));
                }
                Ok(decode_lossy(&std::fs::read(path)?))
            }
            Self::Stdin => {
                let mut bytes = Vec::new();
                stdin.read_to_end(&mut bytes)?;
                Ok(decode_lossy(&bytes))
            }
        }
    }
}
