//! Error types for reading markdown sources.

use std::path::PathBuf;

/// Error while fetching a remote page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure (DNS, TLS, connection reset, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    /// Server answered with a status outside 2xx.
    #[error("HTTP {status} fetching {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// URL of the failing request.
        url: String,
    },

    /// Redirect chain longer than the configured limit.
    #[error("Too many redirects (limit {limit})")]
    TooManyRedirects {
        /// Maximum number of hops that were allowed.
        limit: u32,
    },

    /// `Location` header that cannot be resolved to a URL.
    #[error("Invalid redirect location {location:?}")]
    InvalidRedirect {
        /// Raw header value.
        location: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The edit page has no markdown textarea.
    #[error(
        "Could not find the markdown textarea on {url}. \
         The page may require authentication or the URL may be invalid."
    )]
    MissingTextarea {
        /// Edit page URL.
        url: String,
    },
}

/// Error while reading a markdown source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Local input path does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Remote fetch failed.
    #[error("Error fetching from rentry: {0}")]
    Fetch(#[from] FetchError),

    /// Reading a file or stdin failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
