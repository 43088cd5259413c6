//! Fetch defaults.

use std::time::Duration;

/// User agent sent with every request. Rentry rejects empty agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Redirect hops followed before giving up.
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// Global HTTP timeout per request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
