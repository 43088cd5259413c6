//! Markdown sources for admon.
//!
//! Resolves a command-line input to markdown text:
//!
//! - a rentry.co / rentry.org reference is fetched from the page's `/edit`
//!   view and the textarea content is entity-decoded
//! - any other argument is read as a local file
//! - no argument reads standard input to the end
//!
//! Fetching is synchronous. Redirects are followed by [`RentryClient`] itself
//! (five hops by default) on top of a [`Transport`] that performs single
//! requests; [`UreqTransport`] is the production implementation and
//! `MockTransport` serves canned responses in tests (behind the `mock`
//! feature flag).

mod client;
mod consts;
mod entities;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod reference;
mod source;
mod transport;

pub use client::{RentryClient, extract_textarea};
pub use consts::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use entities::decode_html_entities;
pub use error::{FetchError, SourceError};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
pub use reference::{edit_url, is_rentry_reference};
pub use source::Source;
pub use transport::{HttpResponse, REDIRECT_STATUSES, Transport, UreqTransport};
