//! Path prefix matching.
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex or wildcards; a prefix is a literal string
//! - `MatchMode::Prefix` keeps plain `starts_with` semantics, so `/apidocs`
//!   matches an `/api` route; `MatchMode::Segment` requires a `/` boundary

use crate::config::MatchMode;

/// Matches the request path against a literal prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
    mode: MatchMode,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            prefix: prefix.into(),
            mode,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if `path` falls under this prefix.
    pub fn matches(&self, path: &str) -> bool {
        let Some(rest) = path.strip_prefix(self.prefix.as_str()) else {
            return false;
        };
        match self.mode {
            MatchMode::Prefix => true,
            MatchMode::Segment => {
                rest.is_empty() || rest.starts_with('/') || self.prefix.ends_with('/')
            }
        }
    }
}
