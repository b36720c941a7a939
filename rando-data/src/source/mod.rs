//! The fetch seam between the aggregator and an upstream API.
//!
//! [`TrekSource`] is the only way data enters the pipeline. It receives a
//! [`Resource`] and transport-agnostic [`QueryParams`], and returns the raw
//! JSON payload untouched. Implementations own URL construction, headers,
//! timeouts and retries; the aggregator never does.

mod http;

#[doc(hidden)]
pub mod test_support;

use std::fmt;

use async_trait::async_trait;
use rando_core::QueryParams;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use http::{DEFAULT_USER_AGENT, HttpTrekSource, HttpTrekSourceConfig, SourceBuildError};

/// An upstream collection or entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Paginated trek search results.
    Treks,
    /// One trek, by id.
    Trek(u32),
    Difficulties,
    Themes,
    /// Practices.
    Activities,
    /// Route shapes.
    CourseTypes,
    Networks,
    Accessibilities,
    Sources,
    InformationDesks,
    Labels,
    Pois,
    TouristicContents,
}

impl Resource {
    /// Path of the resource relative to the API root.
    ///
    /// # Examples
    /// ```
    /// use rando_data::Resource;
    ///
    /// assert_eq!(Resource::Trek(12).path(), "trek/12/");
    /// assert_eq!(Resource::Activities.path(), "trek_practice/");
    /// ```
    pub fn path(&self) -> String {
        let collection = match self {
            Self::Treks => "trek",
            Self::Trek(id) => return format!("trek/{id}/"),
            Self::Difficulties => "trek_difficulty",
            Self::Themes => "theme",
            Self::Activities => "trek_practice",
            Self::CourseTypes => "trek_route",
            Self::Networks => "trek_network",
            Self::Accessibilities => "trek_accessibility",
            Self::Sources => "source",
            Self::InformationDesks => "informationdesk",
            Self::Labels => "label",
            Self::Pois => "poi",
            Self::TouristicContents => "touristiccontent",
        };
        format!("{collection}/")
    }

    /// Human-readable name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Treks => "treks",
            Self::Trek(_) => "trek",
            Self::Difficulties => "difficulties",
            Self::Themes => "themes",
            Self::Activities => "activities",
            Self::CourseTypes => "course types",
            Self::Networks => "networks",
            Self::Accessibilities => "accessibilities",
            Self::Sources => "sources",
            Self::InformationDesks => "information desks",
            Self::Labels => "labels",
            Self::Pois => "points of interest",
            Self::TouristicContents => "touristic contents",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trek(id) => write!(f, "trek {id}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Transport-level failures reported by a [`TrekSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with an error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        url: String,
        status: u16,
        message: String,
    },
    /// The request could not be sent or the response not received.
    #[error("network error requesting {url}: {message}")]
    Network { url: String, message: String },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },
    /// The response body was not JSON.
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
    /// The request URL could not be built.
    #[error("invalid request URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

/// Asynchronous provider of raw upstream payloads.
#[async_trait(?Send)]
pub trait TrekSource {
    /// Fetch `resource` filtered by `params`.
    async fn fetch(&self, resource: Resource, params: &QueryParams) -> Result<Value, FetchError>;
}

#[async_trait(?Send)]
impl<T: TrekSource + ?Sized> TrekSource for Box<T> {
    async fn fetch(&self, resource: Resource, params: &QueryParams) -> Result<Value, FetchError> {
        (**self).fetch(resource, params).await
    }
}
