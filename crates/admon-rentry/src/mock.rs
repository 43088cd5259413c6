//! In-memory transport for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::FetchError;
use crate::transport::{HttpResponse, Transport};

/// Transport serving canned responses.
///
/// URLs without a registered response answer `404`. Every requested URL is
/// recorded in order.
///
/// # Example
///
/// ```ignore
/// use admon_rentry::{MockTransport, RentryClient};
///
/// let transport = MockTransport::new()
///     .with_redirect("https://rentry.co/a/edit", "/b/edit", 302)
///     .with_page("https://rentry.co/b/edit", r#"<textarea id="id_text">!!! note hi</textarea>"#);
/// let client = RentryClient::new(transport);
///
/// assert_eq!(client.fetch_markdown("rentry.co/a").unwrap(), "!!! note hi");
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<String, HttpResponse>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 at `url`.
    #[must_use]
    pub fn with_page(self, url: &str, body: &str) -> Self {
        self.with_response(
            url,
            HttpResponse {
                status: 200,
                location: None,
                body: body.to_owned(),
            },
        )
    }

    /// Redirect `url` to `location` with the given status.
    #[must_use]
    pub fn with_redirect(self, url: &str, location: &str, status: u16) -> Self {
        self.with_response(
            url,
            HttpResponse {
                status,
                location: Some(location.to_owned()),
                body: String::new(),
            },
        )
    }

    /// Answer `url` with a bare status code.
    #[must_use]
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.with_response(
            url,
            HttpResponse {
                status,
                location: None,
                body: String::new(),
            },
        )
    }

    #[must_use]
    pub fn with_response(mut self, url: &str, response: HttpResponse) -> Self {
        self.responses.insert(url.to_owned(), response);
        self
    }

    /// URLs requested so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.requests.lock().unwrap().push(url.to_owned());
        Ok(self.responses.get(url).cloned().unwrap_or(HttpResponse {
            status: 404,
            location: None,
            body: String::new(),
        }))
    }
}
