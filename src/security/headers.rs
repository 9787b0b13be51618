//! Header manipulation between the two transport legs.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers in both directions
//! - Drop headers the outbound client derives itself (Host, Content-Length)
//! - Drop upstream CORS headers; the proxy applies its own
//!
//! # Design Decisions
//! - Headers listed in `Connection` are treated as hop-by-hop too
//! - Host is not copied: the client sets it from the upstream URL, which
//!   gives name-based virtual hosting on the upstream the right authority

use axum::http::{header, HeaderMap, HeaderName};

/// Headers meaningful only for a single transport leg.
pub static HOP_BY_HOP_HEADERS: [HeaderName; 9] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    HeaderName::from_static("proxy-connection"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Names listed in the `Connection` header value(s).
fn connection_tokens(headers: &HeaderMap) -> Vec<HeaderName> {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect()
}

fn is_hop_by_hop(name: &HeaderName, extra: &[HeaderName]) -> bool {
    HOP_BY_HOP_HEADERS.contains(name) || extra.contains(name)
}

/// Headers to send upstream for an inbound request.
pub fn outbound_request_headers(inbound: &HeaderMap) -> HeaderMap {
    let extra = connection_tokens(inbound);
    let mut headers = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if is_hop_by_hop(name, &extra) || *name == header::HOST || *name == header::CONTENT_LENGTH {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

/// Headers to relay to the caller for an upstream response.
///
/// `Content-Length` is kept: the body is streamed through unmodified.
pub fn relayed_response_headers(upstream: &HeaderMap) -> HeaderMap {
    let extra = connection_tokens(upstream);
    let mut headers = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream {
        if is_hop_by_hop(name, &extra) || name.as_str().starts_with("access-control-") {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}
