//! Fetch-and-relay for scrape endpoints.

use std::collections::HashMap;

use axum::response::Response;

use crate::error::ProxyError;
use crate::http::response::html;
use crate::scrape::ScrapeEndpoint;

/// Issues scrape fetches on behalf of callers.
#[derive(Clone)]
pub struct Scraper {
    client: reqwest::Client,
}

impl Scraper {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch the page for `endpoint` and relay it.
    pub async fn scrape(
        &self,
        endpoint: &ScrapeEndpoint,
        params: &HashMap<String, String>,
    ) -> Result<Response, ProxyError> {
        let code = endpoint.extract_code(params)?;
        let url = endpoint.target_url(code)?;

        tracing::info!(endpoint = %endpoint.name, code = %code, url = %url, "Fetching page");

        let upstream = self
            .client
            .get(url.clone())
            .headers(endpoint.headers().clone())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(endpoint = %endpoint.name, url = %url, error = %e, "Page fetch failed");
                ProxyError::Fetch(e)
            })?;

        let status = upstream.status();
        if !status.is_success() {
            tracing::warn!(endpoint = %endpoint.name, url = %url, status = %status, "Upstream returned non-success status");
            return Err(ProxyError::UpstreamStatus(status));
        }

        let body = upstream.bytes().await.map_err(|e| {
            tracing::warn!(endpoint = %endpoint.name, url = %url, error = %e, "Reading page body failed");
            ProxyError::Fetch(e)
        })?;

        tracing::debug!(endpoint = %endpoint.name, bytes = body.len(), "Page fetched");
        Ok(html(body))
    }
}
