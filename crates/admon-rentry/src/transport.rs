//! HTTP transport.
//!
//! [`Transport`] performs a single GET without following redirects, so the
//! redirect policy lives in [`RentryClient`](crate::RentryClient) where it can
//! be exercised with [`MockTransport`](crate::MockTransport).

use std::time::Duration;

use tracing::debug;
use ureq::Agent;

use crate::consts::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::entities::decode_lossy;
use crate::error::FetchError;

/// Status codes treated as redirects.
pub const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

/// Response to a single GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Location` header, if present.
    pub location: Option<String>,
    /// Response body, decoded lossily as UTF-8. Empty for redirects.
    pub body: String,
}

impl HttpResponse {
    /// Whether the response asks the client to go elsewhere.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        REDIRECT_STATUSES.contains(&self.status)
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A single-request HTTP GET.
pub trait Transport {
    /// Fetch `url` without following redirects.
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// Blocking transport backed by `ureq`.
pub struct UreqTransport {
    agent: Agent,
    user_agent: String,
}

impl UreqTransport {
    /// Create a transport with the given user agent and global timeout.
    #[must_use]
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .max_redirects(0)
            .build()
            .into();

        Self {
            agent,
            user_agent: user_agent.to_owned(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        debug!("GET {}", url);

        let response = self
            .agent
            .get(url)
            .header("User-Agent", &self.user_agent)
            .call()?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get("location")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let mut fetched = HttpResponse {
            status,
            location,
            body: String::new(),
        };
        if !fetched.is_redirect() {
            let mut body_reader = response.into_body();
            fetched.body = decode_lossy(&body_reader.read_to_vec()?);
        }
        Ok(fetched)
    }
}
