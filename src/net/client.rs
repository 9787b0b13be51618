//! Outbound HTTP client construction.

use std::time::Duration;

use reqwest::redirect::Policy;

use crate::config::UpstreamConfig;

/// Redirects a scrape fetch may follow before giving up.
const SCRAPE_MAX_REDIRECTS: usize = 5;

/// Error building an outbound client.
#[derive(Debug, thiserror::Error)]
#[error("failed to build upstream client: {0}")]
pub struct ClientError(#[from] reqwest::Error);

/// What the client is used for; decides redirect handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRole {
    /// Verbatim forwarding: a 3xx is relayed to the caller untouched.
    Forward,
    /// Page fetches: redirects are followed like a browser would.
    Scrape,
}

/// Build an outbound client with the configured deadlines and TLS policy.
pub fn build_client(config: &UpstreamConfig, role: ClientRole) -> Result<reqwest::Client, ClientError> {
    let redirect = match role {
        ClientRole::Forward => Policy::none(),
        ClientRole::Scrape => Policy::limited(SCRAPE_MAX_REDIRECTS),
    };

    let mut builder = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .redirect(redirect);
    if !config.use_system_proxy {
        builder = builder.no_proxy();
    }

    Ok(builder.build()?)
}
