//! Rentry page fetching.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::info;
use url::Url;

use crate::consts::DEFAULT_MAX_REDIRECTS;
use crate::entities::decode_html_entities;
use crate::error::FetchError;
use crate::reference::edit_url;
use crate::transport::{Transport, UreqTransport};

/// Markdown textarea on the edit page. Attributes may appear in any order.
static TEXTAREA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<textarea[^>]*\bid="id_text"[^>]*>(.*?)</textarea>"#)
        .expect("invalid textarea regex")
});

/// Extract the raw (still entity-encoded) markdown from an edit page.
#[must_use]
pub fn extract_textarea(html: &str) -> Option<&str> {
    TEXTAREA
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Client that downloads markdown from rentry edit pages.
pub struct RentryClient<T = UreqTransport> {
    transport: T,
    max_redirects: u32,
}

impl RentryClient<UreqTransport> {
    /// Create a client backed by `ureq`.
    #[must_use]
    pub fn from_settings(user_agent: &str, timeout: Duration, max_redirects: u32) -> Self {
        Self::new(UreqTransport::new(user_agent, timeout)).with_max_redirects(max_redirects)
    }
}

impl<T: Transport> RentryClient<T> {
    /// Create a client following at most five redirects.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    #[must_use]
    pub fn with_max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `url`, following redirects, and return the body of the final 2xx
    /// response.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::TooManyRedirects`] once more than the configured
    /// number of hops would be needed, [`FetchError::Status`] for a final
    /// status outside 2xx, and transport errors as they occur.
    pub fn get(&self, url: &str) -> Result<String, FetchError> {
        let mut current = url.to_owned();
        let mut hops = 0;

        loop {
            let response = self.transport.get(&current)?;

            if response.is_redirect()
                && let Some(location) = response.location.as_deref()
            {
                if hops == self.max_redirects {
                    return Err(FetchError::TooManyRedirects {
                        limit: self.max_redirects,
                    });
                }
                hops += 1;
                current = resolve_location(&current, location)?;
                info!("Redirected ({}) to {}", response.status, current);
                continue;
            }

            if !response.is_success() {
                return Err(FetchError::Status {
                    status: response.status,
                    url: current,
                });
            }

            return Ok(response.body);
        }
    }

    /// Fetch the markdown behind a rentry reference.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingTextarea`] if the edit page carries no
    /// markdown textarea, plus anything [`get`](Self::get) returns.
    pub fn fetch_markdown(&self, reference: &str) -> Result<String, FetchError> {
        let url = edit_url(reference);
        info!("Fetching {}", url);

        let html = self.get(&url)?;
        let raw = extract_textarea(&html).ok_or(FetchError::MissingTextarea { url })?;
        Ok(decode_html_entities(raw))
    }
}

/// Resolve a `Location` header against the URL that produced it.
fn resolve_location(base: &str, location: &str) -> Result<String, FetchError> {
    Url::parse(base)
        .and_then(|base| base.join(location))
        .map(String::from)
        .map_err(|source| FetchError::InvalidRedirect {
            location: location.to_owned(),
            source,
        })
}
