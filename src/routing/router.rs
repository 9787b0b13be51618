//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up matching route for a request path
//! - Compute the upstream URL for a matched request
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan in declaration order; first match wins
//! - Explicit NoMatch (`None`) rather than silent default

use url::Url;

use crate::config::{MatchMode, RewriteRule, RouteConfig};
use crate::routing::matcher::PathPrefixMatcher;

/// Error building a route from configuration.
#[derive(Debug, thiserror::Error)]
#[error("route '{name}': invalid upstream '{upstream}': {source}")]
pub struct RouteError {
    name: String,
    upstream: String,
    #[source]
    source: url::ParseError,
}

/// A compiled prefix route.
#[derive(Debug, Clone)]
pub struct Route {
    pub name: String,
    pub upstream: Url,
    pub rewrite: RewriteRule,
    matcher: PathPrefixMatcher,
}

impl Route {
    pub fn new(config: &RouteConfig, mode: MatchMode) -> Result<Self, RouteError> {
        let upstream = Url::parse(&config.upstream).map_err(|source| RouteError {
            name: config.name.clone(),
            upstream: config.upstream.clone(),
            source,
        })?;
        Ok(Self {
            name: config.name.clone(),
            upstream,
            rewrite: config.rewrite,
            matcher: PathPrefixMatcher::new(config.prefix.clone(), mode),
        })
    }

    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }

    /// Path sent upstream after applying the rewrite rule.
    pub fn rewrite_path<'a>(&self, path: &'a str) -> std::borrow::Cow<'a, str> {
        match self.rewrite {
            RewriteRule::Passthrough => path.into(),
            RewriteRule::StripPrefix => {
                let rest = path.strip_prefix(self.prefix()).unwrap_or(path);
                if rest.starts_with('/') {
                    rest.into()
                } else {
                    format!("/{}", rest).into()
                }
            }
        }
    }

    /// Upstream URL for an inbound path and optional query string.
    pub fn target_url(&self, path: &str, query: Option<&str>) -> Url {
        let mut url = self.upstream.clone();
        url.set_path(&self.rewrite_path(path));
        url.set_query(query);
        url
    }
}

/// Ordered, immutable route table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Compile routes in declaration order.
    pub fn from_config(routes: &[RouteConfig], mode: MatchMode) -> Result<Self, RouteError> {
        let routes = routes
            .iter()
            .map(|r| Route::new(r, mode))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { routes })
    }

    /// First route, in declaration order, whose prefix matches `path`.
    pub fn match_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.matches(path))
    }
}
