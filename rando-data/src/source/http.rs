//! HTTP [`TrekSource`] for a Geotrek API v2 endpoint.
//!
//! The source maps each [`Resource`] to a path below the configured API root
//! and flattens [`QueryParams`] into the query string. It performs exactly
//! one request per fetch: no caching, no retries.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use rando_core::QueryParams;
//! use rando_data::{HttpTrekSource, HttpTrekSourceConfig, Resource, TrekSource};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpTrekSourceConfig::new("https://geotrek.example.org/api/v2/")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let source = HttpTrekSource::with_config(config)?;
//! let themes = source
//!     .fetch(Resource::Themes, &QueryParams::new().with("language", "fr"))
//!     .await?;
//! println!("{themes}");
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use rando_core::{ListEncoding, QueryParams};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use super::{FetchError, Resource, TrekSource};

/// Default user agent for API requests.
pub const DEFAULT_USER_AGENT: &str = "rando-engine/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while building an [`HttpTrekSource`].
#[derive(Debug, Error)]
pub enum SourceBuildError {
    /// The API root is not an absolute URL.
    #[error("invalid API base URL {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Configuration for [`HttpTrekSource`].
#[derive(Debug, Clone)]
pub struct HttpTrekSourceConfig {
    /// API root, such as `"https://geotrek.example.org/api/v2/"`.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// How list values are written into the query string.
    pub list_encoding: ListEncoding,
}

impl Default for HttpTrekSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v2/".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            list_encoding: ListEncoding::CommaJoined,
        }
    }
}

impl HttpTrekSourceConfig {
    /// Create a configuration for the given API root.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the list encoding.
    #[must_use]
    pub fn with_list_encoding(mut self, encoding: ListEncoding) -> Self {
        self.list_encoding = encoding;
        self
    }
}

/// [`TrekSource`] issuing `GET` requests against a Geotrek API.
#[derive(Debug, Clone)]
pub struct HttpTrekSource {
    client: Client,
    base_url: Url,
    config: HttpTrekSourceConfig,
}

impl HttpTrekSource {
    /// Create a source with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` does not parse or the HTTP client
    /// fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceBuildError> {
        Self::with_config(HttpTrekSourceConfig::new(base_url))
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// fails to build.
    pub fn with_config(config: HttpTrekSourceConfig) -> Result<Self, SourceBuildError> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(SourceBuildError::HttpClient)?;
        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &HttpTrekSourceConfig {
        &self.config
    }

    /// Build the request URL for `resource` and `params`.
    fn request_url(&self, resource: Resource, params: &QueryParams) -> Result<Url, FetchError> {
        let path = resource.path();
        let mut url = self
            .base_url
            .join(&path)
            .map_err(|err| FetchError::InvalidUrl {
                url: format!("{}{path}", self.base_url),
                message: err.to_string(),
            })?;
        let pairs = params.to_pairs(self.config.list_encoding);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Convert a reqwest error to a [`FetchError`].
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> FetchError {
        if error.is_timeout() {
            return FetchError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return FetchError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        FetchError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Parse the API root, making sure it ends with `/` so that joins append.
fn parse_base_url(raw: &str) -> Result<Url, SourceBuildError> {
    let normalised = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalised).map_err(|source| SourceBuildError::BaseUrl {
        url: raw.to_owned(),
        source,
    })
}

#[async_trait(?Send)]
impl TrekSource for HttpTrekSource {
    async fn fetch(&self, resource: Resource, params: &QueryParams) -> Result<Value, FetchError> {
        let url = self.request_url(resource, params)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;

        response
            .json::<Value>()
            .await
            .map_err(|err| FetchError::Decode {
                url: url.to_string(),
                message: err.to_string(),
            })
    }
}
