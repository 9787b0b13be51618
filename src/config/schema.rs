//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.
//! The defaults reproduce the development setup: four upstream routes and
//! three news scrape endpoints listening on port 8080.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// How route prefixes are compared against request paths.
    pub routing: RoutingConfig,

    /// Prefix routes, evaluated in declaration order.
    pub routes: Vec<RouteConfig>,

    /// Exact-path scrape endpoints.
    pub scrapes: Vec<ScrapeConfig>,

    /// Outbound client settings shared by forwarding and scraping.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routing: RoutingConfig::default(),
            routes: default_routes(),
            scrapes: default_scrapes(),
            upstream: UpstreamConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Route matching behaviour.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub match_mode: MatchMode,
}

/// Prefix comparison strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Plain string prefix: `/apid` matches a `/api` route.
    #[default]
    Prefix,
    /// The prefix must end at a `/` boundary or at the end of the path.
    Segment,
}

/// Path rewrite applied before forwarding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteRule {
    /// Forward the inbound path unchanged.
    #[default]
    Passthrough,
    /// Remove the route prefix from the inbound path.
    StripPrefix,
}

/// Route configuration mapping a path prefix to an upstream origin.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging.
    pub name: String,

    /// Path prefix to match.
    pub prefix: String,

    /// Upstream origin, e.g. "https://api.fund.eastmoney.com".
    pub upstream: String,

    #[serde(default)]
    pub rewrite: RewriteRule,
}

/// A scrape endpoint: fetch one remote page derived from a query parameter.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapeConfig {
    /// Endpoint identifier for logging.
    pub name: String,

    /// Exact request path, e.g. "/news/fund_news".
    pub path: String,

    /// Required query parameter carrying the code.
    pub param: String,

    /// Target URL with a `{code}` placeholder.
    pub url_template: String,

    /// Treat the parameter as a comma-separated list and use its first entry.
    #[serde(default)]
    pub first_of_list: bool,

    /// Referer sent with the outbound request.
    pub referer: String,

    /// Extra or overriding outbound headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// Outbound client settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total time allowed for one outbound call, body included, in seconds.
    pub request_timeout_secs: u64,

    /// Accept self-signed or otherwise invalid upstream certificates.
    /// Only enabled by default in debug builds.
    pub accept_invalid_certs: bool,

    /// Maximum inbound request body forwarded upstream, in bytes.
    pub max_body_bytes: usize,

    /// Honour HTTP_PROXY / HTTPS_PROXY / NO_PROXY for outbound calls.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            request_timeout_secs: 20,
            accept_invalid_certs: cfg!(debug_assertions),
            max_body_bytes: 2 * 1024 * 1024, // 2MB
            use_system_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
        }
    }
}

fn route(name: &str, prefix: &str, upstream: &str) -> RouteConfig {
    RouteConfig {
        name: name.to_string(),
        prefix: prefix.to_string(),
        upstream: upstream.to_string(),
        rewrite: RewriteRule::Passthrough,
    }
}

fn default_routes() -> Vec<RouteConfig> {
    vec![
        route("fund-quotes", "/search", "https://fundgz.1234567.com.cn"),
        route("fund-api", "/api", "https://api.fund.eastmoney.com"),
        route("dayfund", "/find", "https://www.dayfund.cn"),
        route("fund-f10", "/eastmoney", "https://fundf10.eastmoney.com"),
    ]
}

fn default_scrapes() -> Vec<ScrapeConfig> {
    vec![
        ScrapeConfig {
            name: "fund-news".to_string(),
            path: "/news/fund_news".to_string(),
            param: "fundCode".to_string(),
            url_template: "https://fund.eastmoney.com/news,{code},cn.html".to_string(),
            first_of_list: false,
            referer: "https://fund.eastmoney.com/".to_string(),
            headers: BTreeMap::new(),
        },
        ScrapeConfig {
            name: "holdings-news".to_string(),
            path: "/news/holdings_news".to_string(),
            param: "stockCodes".to_string(),
            url_template: "https://finance.eastmoney.com/news/s{code}.html".to_string(),
            first_of_list: true,
            referer: "https://finance.eastmoney.com/".to_string(),
            headers: BTreeMap::new(),
        },
        ScrapeConfig {
            name: "stock-news".to_string(),
            path: "/news/stock_news".to_string(),
            param: "stockCode".to_string(),
            url_template: "https://finance.eastmoney.com/news,s{code}.html".to_string(),
            first_of_list: false,
            referer: "https://finance.eastmoney.com/".to_string(),
            headers: BTreeMap::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_development_setup() {
        let config = ProxyConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        let prefixes: Vec<_> = config.routes.iter().map(|r| r.prefix.as_str()).collect();
        assert_eq!(prefixes, ["/search", "/api", "/find", "/eastmoney"]);
        assert!(config.routes.iter().all(|r| r.rewrite == RewriteRule::Passthrough));
        assert_eq!(config.scrapes.len(), 3);
        assert!(config.scrapes[1].first_of_list);
        assert_eq!(config.routing.match_mode, MatchMode::Prefix);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [routing]
            match_mode = "segment"

            [[routes]]
            name = "local"
            prefix = "/local"
            upstream = "http://127.0.0.1:3000"
            rewrite = "strip_prefix"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.routing.match_mode, MatchMode::Segment);
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].rewrite, RewriteRule::StripPrefix);
        // Sections not mentioned fall back to their defaults.
        assert_eq!(config.scrapes.len(), 3);
        assert_eq!(config.upstream.request_timeout_secs, 20);
    }
}
