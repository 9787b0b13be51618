//! Scrape endpoint definitions.

use std::collections::HashMap;

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::config::ScrapeConfig;
use crate::error::ProxyError;
use crate::scrape::CODE_PLACEHOLDER;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

/// Error building a scrape endpoint from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("scrape '{endpoint}': invalid header name '{name}'")]
    HeaderName { endpoint: String, name: String },
    #[error("scrape '{endpoint}': invalid value for header '{name}'")]
    HeaderValue { endpoint: String, name: String },
}

/// A compiled scrape endpoint.
#[derive(Debug, Clone)]
pub struct ScrapeEndpoint {
    pub name: String,
    pub path: String,
    pub param: String,
    url_template: String,
    first_of_list: bool,
    headers: HeaderMap,
}

impl ScrapeEndpoint {
    pub fn from_config(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let header_value = |name: &str, value: &str| {
            HeaderValue::from_str(value).map_err(|_| ScrapeError::HeaderValue {
                endpoint: config.name.clone(),
                name: name.to_string(),
            })
        };

        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(header::ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));
        headers.insert(header::REFERER, header_value("referer", &config.referer)?);

        for (name, value) in &config.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|_| ScrapeError::HeaderName {
                    endpoint: config.name.clone(),
                    name: name.clone(),
                })?;
            headers.insert(header_name, header_value(name, value)?);
        }

        Ok(Self {
            name: config.name.clone(),
            path: config.path.clone(),
            param: config.param.clone(),
            url_template: config.url_template.clone(),
            first_of_list: config.first_of_list,
            headers,
        })
    }

    /// Outbound headers mimicking a desktop browser.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Pull the code out of the query parameters.
    ///
    /// List endpoints only use the first comma-separated entry.
    pub fn extract_code<'a>(&self, params: &'a HashMap<String, String>) -> Result<&'a str, ProxyError> {
        let raw = params
            .get(&self.param)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ProxyError::MissingParameter(self.param.clone()))?;

        let code = if self.first_of_list {
            raw.split(',').next().unwrap_or_default().trim()
        } else {
            raw
        };

        if code.is_empty() {
            return Err(ProxyError::MissingParameter(self.param.clone()));
        }
        if !code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_'))
        {
            return Err(ProxyError::InvalidParameter {
                name: self.param.clone(),
                value: code.to_string(),
            });
        }
        Ok(code)
    }

    /// Render the target URL for `code`.
    pub fn target_url(&self, code: &str) -> Result<Url, ProxyError> {
        Url::parse(&self.url_template.replace(CODE_PLACEHOLDER, code)).map_err(|_| {
            ProxyError::InvalidParameter {
                name: self.param.clone(),
                value: code.to_string(),
            }
        })
    }
}

/// The set of scrape endpoints, keyed by exact path.
#[derive(Debug, Clone, Default)]
pub struct ScrapeRegistry {
    endpoints: Vec<ScrapeEndpoint>,
}

impl ScrapeRegistry {
    pub fn from_config(scrapes: &[ScrapeConfig]) -> Result<Self, ScrapeError> {
        let endpoints = scrapes
            .iter()
            .map(ScrapeEndpoint::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { endpoints })
    }

    pub fn get(&self, path: &str) -> Option<&ScrapeEndpoint> {
        self.endpoints.iter().find(|e| e.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScrapeEndpoint> {
        self.endpoints.iter()
    }
}
