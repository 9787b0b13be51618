//! Request forwarding to a matched upstream.

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::TryStreamExt;

use crate::error::ProxyError;
use crate::http::request::request_id;
use crate::routing::Route;
use crate::security::headers::{outbound_request_headers, relayed_response_headers};

/// Relays inbound requests to upstream origins.
#[derive(Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl Forwarder {
    pub fn new(client: reqwest::Client, max_body_bytes: usize) -> Self {
        Self {
            client,
            max_body_bytes,
        }
    }

    /// Forward `request` to `route`'s upstream and relay the response.
    pub async fn forward(&self, request: Request<Body>, route: &Route) -> Result<Response, ProxyError> {
        let (parts, body) = request.into_parts();
        let request_id = request_id(&parts.headers).to_string();
        let target = route.target_url(parts.uri.path(), parts.uri.query());

        tracing::info!(
            request_id = %request_id,
            route = %route.name,
            method = %parts.method,
            target = %target,
            "Forwarding request"
        );

        let body = axum::body::to_bytes(body, self.max_body_bytes)
            .await
            .map_err(|e| {
                tracing::warn!(request_id = %request_id, error = %e, "Rejected request body");
                ProxyError::BodyRejected {
                    limit: self.max_body_bytes,
                }
            })?;

        let mut outbound = self
            .client
            .request(parts.method.clone(), target.clone())
            .headers(outbound_request_headers(&parts.headers));
        if !body.is_empty() {
            outbound = outbound.body(body);
        }

        let upstream = outbound.send().await.map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                target = %target,
                timeout = e.is_timeout(),
                error = %e,
                "Upstream error"
            );
            ProxyError::Gateway(e)
        })?;

        let status = upstream.status();
        tracing::debug!(request_id = %request_id, status = %status, "Upstream responded");

        let headers = relayed_response_headers(upstream.headers());
        let stream = upstream.bytes_stream().inspect_err(move |e| {
            tracing::warn!(request_id = %request_id, error = %e, "Upstream body stream failed");
        });

        let mut response = Response::new(Body::from_stream(stream));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}
