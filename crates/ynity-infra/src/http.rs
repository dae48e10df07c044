//! Shared outbound HTTP client construction.

use std::time::Duration;

/// Request timeout for agent, completion and voice calls. Summaries of
/// large chunks can take a while, so this is generous.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Build the `reqwest` client shared by every outbound adapter.
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("ynity/", env!("CARGO_PKG_VERSION")))
        .build()
}
