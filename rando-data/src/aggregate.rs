//! Concurrent fetch and adaptation of trek search results and details.
//!
//! Each aggregation issues one primary fetch and a fixed set of reference
//! fetches at once, then waits for all of them before adapting anything.
//! The primary fetch is the only one allowed to fail the aggregation; a
//! failed reference fetch degrades to an empty collection and is recorded in
//! the [`AggregationReport`]. Items that fail adaptation are dropped and
//! recorded as well.

use log::warn;
use rando_core::geometry::Coordinate;
use rando_core::query::{LANGUAGE_KEY, PAGE_SIZE_KEY};
use rando_core::{
    Details, FilterState, Identified, QueryBuilder, QueryParams, QueryValue, ReferenceCollection,
    TrekPopup, TrekResult,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::adapter::{
    AdaptError, Nearby, References, adapt_accessibility, adapt_activity, adapt_course_type,
    adapt_details, adapt_difficulty, adapt_information_desk, adapt_label, adapt_network,
    adapt_poi, adapt_source, adapt_theme, adapt_touristic_content, adapt_trek,
    adapt_trek_geometry, adapt_trek_popup,
};
use crate::raw::{RawList, decode};
use crate::{FetchError, Resource, TrekSource};

/// Default content language.
pub const DEFAULT_LANGUAGE: &str = "fr";
/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

const FIELDS_KEY: &str = "fields";
const TREK_KEY: &str = "trek";
const NEAR_TREK_KEY: &str = "near_trek";

/// Settings shared by every aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Content language sent with every fetch.
    pub language: String,
    /// Results per search page.
    pub page_size: u32,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AggregatorConfig {
    /// Create a configuration for `language`.
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Default::default()
        }
    }

    /// Set the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Query builder using this language and page size.
    pub fn query_builder(&self) -> QueryBuilder {
        QueryBuilder::new(self.language.as_str(), self.page_size)
    }
}

/// Errors that abort an aggregation.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The primary fetch failed.
    #[error("failed to fetch {resource}: {source}")]
    PrimaryFetch {
        /// Resource whose fetch failed.
        resource: Resource,
        /// Transport failure.
        #[source]
        source: FetchError,
    },
    /// The primary payload could not be adapted.
    #[error("invalid {resource} payload: {source}")]
    InvalidPrimary {
        /// Resource whose payload was rejected.
        resource: Resource,
        /// Adaptation failure.
        #[source]
        source: AdaptError,
    },
}

/// A reference collection replaced by an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Degradation {
    /// Collection that degraded.
    pub resource: Resource,
    /// Why it could not be loaded.
    pub reason: String,
}

/// An item dropped because it could not be adapted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    /// Collection the item belongs to.
    pub resource: Resource,
    /// Upstream id, when the payload carried one.
    pub id: Option<u64>,
    /// Why it was dropped.
    pub reason: String,
}

/// Data-quality conditions met during one aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationReport {
    /// Reference collections treated as empty.
    pub degradations: Vec<Degradation>,
    /// Items dropped during adaptation.
    pub skipped: Vec<SkippedItem>,
}

impl AggregationReport {
    /// Whether every fetch and every item succeeded.
    pub fn is_clean(&self) -> bool {
        self.degradations.is_empty() && self.skipped.is_empty()
    }

    /// Whether `resource` degraded.
    pub fn degraded(&self, resource: Resource) -> bool {
        self.degradations.iter().any(|d| d.resource == resource)
    }

    fn degrade(&mut self, resource: Resource, reason: String) {
        warn!("Treating {resource} as empty: {reason}");
        self.degradations.push(Degradation { resource, reason });
    }

    fn skip(&mut self, resource: Resource, item: &Value, reason: String) {
        let id = item.get("id").and_then(Value::as_u64);
        match id {
            Some(id) => warn!("Skipped {resource} item {id}: {reason}"),
            None => warn!("Skipped {resource} item without id: {reason}"),
        }
        self.skipped.push(SkippedItem {
            resource,
            id,
            reason,
        });
    }
}

/// One page of normalized search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrekResults {
    /// Total matching treks across pages.
    pub count: u64,
    /// Requested page size.
    pub page_size: u32,
    /// URL of the next page, if any.
    pub next_page: Option<String>,
    /// URL of the previous page, if any.
    pub previous_page: Option<String>,
    /// Adapted treks, in upstream order.
    pub results: Vec<TrekResult>,
    /// Degradations and dropped items.
    pub report: AggregationReport,
}

/// A normalized detail page with its aggregation report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrekDetails {
    /// The adapted detail page.
    pub details: Details,
    /// Degradations and dropped items.
    pub report: AggregationReport,
}

/// Fetches and adapts search results and details through a [`TrekSource`].
#[derive(Debug)]
pub struct ResultAggregator<S> {
    source: S,
    config: AggregatorConfig,
}

impl<S: TrekSource> ResultAggregator<S> {
    /// Create an aggregator with default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, AggregatorConfig::default())
    }

    /// Create an aggregator with explicit configuration.
    pub fn with_config(source: S, config: AggregatorConfig) -> Self {
        Self { source, config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Build the query for `states` and aggregate the matching page.
    pub async fn get_trek_results(
        &self,
        states: &[FilterState],
    ) -> Result<TrekResults, AggregateError> {
        let params = self.config.query_builder().build(states);
        self.fetch_trek_results(&params).await
    }

    /// Aggregate the search page described by `params`.
    ///
    /// # Errors
    ///
    /// Fails only when the trek list cannot be fetched or its envelope is
    /// invalid. Reference failures and invalid items are reported in
    /// [`TrekResults::report`].
    pub async fn fetch_trek_results(
        &self,
        params: &QueryParams,
    ) -> Result<TrekResults, AggregateError> {
        let reference_params = self.reference_params();
        let (treks, difficulties, themes, activities, course_types) = tokio::join!(
            self.source.fetch(Resource::Treks, params),
            self.source.fetch(Resource::Difficulties, &reference_params),
            self.source.fetch(Resource::Themes, &reference_params),
            self.source.fetch(Resource::Activities, &reference_params),
            self.source.fetch(Resource::CourseTypes, &reference_params),
        );

        let treks = primary(Resource::Treks, treks)?;
        let envelope: RawList = decode("trek list", treks).map_err(|err| {
            AggregateError::InvalidPrimary {
                resource: Resource::Treks,
                source: err.into(),
            }
        })?;

        let mut report = AggregationReport::default();
        let references = References {
            difficulties: collection(
                Resource::Difficulties,
                difficulties,
                adapt_difficulty,
                &mut report,
            ),
            themes: collection(Resource::Themes, themes, adapt_theme, &mut report),
            activities: collection(Resource::Activities, activities, adapt_activity, &mut report),
            course_types: collection(
                Resource::CourseTypes,
                course_types,
                adapt_course_type,
                &mut report,
            ),
            ..References::default()
        };

        let results = adapt_items(Resource::Treks, envelope.results, &mut report, |raw| {
            adapt_trek(raw, &references)
        });

        Ok(TrekResults {
            count: envelope.count,
            page_size: self.requested_page_size(params),
            next_page: envelope.next,
            previous_page: envelope.previous,
            results,
            report,
        })
    }

    /// Aggregate the detail page of trek `id`.
    ///
    /// # Errors
    ///
    /// Fails when the trek itself cannot be fetched or adapted.
    pub async fn get_details(&self, id: u32) -> Result<TrekDetails, AggregateError> {
        let params = self.reference_params();
        let pois_params = params.clone().with(TREK_KEY, id);
        let nearby_params = params.clone().with(NEAR_TREK_KEY, id);
        let resource = Resource::Trek(id);
        let (
            details,
            networks,
            accessibilities,
            sources,
            information_desks,
            labels,
            activities,
            difficulties,
            themes,
            course_types,
            pois,
            touristic_contents,
        ) = tokio::join!(
            self.source.fetch(resource, &params),
            self.source.fetch(Resource::Networks, &params),
            self.source.fetch(Resource::Accessibilities, &params),
            self.source.fetch(Resource::Sources, &params),
            self.source.fetch(Resource::InformationDesks, &params),
            self.source.fetch(Resource::Labels, &params),
            self.source.fetch(Resource::Activities, &params),
            self.source.fetch(Resource::Difficulties, &params),
            self.source.fetch(Resource::Themes, &params),
            self.source.fetch(Resource::CourseTypes, &params),
            self.source.fetch(Resource::Pois, &pois_params),
            self.source.fetch(Resource::TouristicContents, &nearby_params),
        );

        let details = primary(resource, details)?;
        let mut report = AggregationReport::default();
        let references = References {
            difficulties: collection(
                Resource::Difficulties,
                difficulties,
                adapt_difficulty,
                &mut report,
            ),
            themes: collection(Resource::Themes, themes, adapt_theme, &mut report),
            activities: collection(Resource::Activities, activities, adapt_activity, &mut report),
            course_types: collection(
                Resource::CourseTypes,
                course_types,
                adapt_course_type,
                &mut report,
            ),
            networks: collection(Resource::Networks, networks, adapt_network, &mut report),
            accessibilities: collection(
                Resource::Accessibilities,
                accessibilities,
                adapt_accessibility,
                &mut report,
            ),
            sources: collection(Resource::Sources, sources, adapt_source, &mut report),
            information_desks: collection(
                Resource::InformationDesks,
                information_desks,
                adapt_information_desk,
                &mut report,
            ),
            labels: collection(Resource::Labels, labels, adapt_label, &mut report),
        };
        let nearby = Nearby {
            pois: listed(Resource::Pois, pois, adapt_poi, &mut report),
            touristic_contents: listed(
                Resource::TouristicContents,
                touristic_contents,
                adapt_touristic_content,
                &mut report,
            ),
        };

        let details = decode("details", details)
            .map_err(AdaptError::from)
            .and_then(|raw| adapt_details(raw, &references, nearby))
            .map_err(|source| AggregateError::InvalidPrimary { resource, source })?;
        Ok(TrekDetails { details, report })
    }

    /// Fetch the map popup summary of trek `id`.
    pub async fn get_trek_popup(&self, id: u32) -> Result<TrekPopup, AggregateError> {
        let resource = Resource::Trek(id);
        let params = self
            .reference_params()
            .with(FIELDS_KEY, "name,departure,attachments");
        let payload = primary(resource, self.source.fetch(resource, &params).await)?;
        decode("trek popup", payload)
            .map(adapt_trek_popup)
            .map_err(|err| AggregateError::InvalidPrimary {
                resource,
                source: err.into(),
            })
    }

    /// Fetch the path of trek `id`.
    pub async fn get_trek_geometry(&self, id: u32) -> Result<Vec<Coordinate>, AggregateError> {
        let resource = Resource::Trek(id);
        let params = self.reference_params().with(FIELDS_KEY, "geometry");
        let payload = primary(resource, self.source.fetch(resource, &params).await)?;
        decode("trek geometry", payload)
            .map_err(AdaptError::from)
            .and_then(adapt_trek_geometry)
            .map_err(|source| AggregateError::InvalidPrimary { resource, source })
    }

    /// Page size carried by `params`, or the configured one when absent.
    fn requested_page_size(&self, params: &QueryParams) -> u32 {
        match params.get(PAGE_SIZE_KEY) {
            Some(QueryValue::Number(size)) => u32::try_from(*size).ok(),
            Some(QueryValue::Text(size)) => size.parse().ok(),
            Some(QueryValue::List(_)) | None => None,
        }
        .unwrap_or(self.config.page_size)
    }

    fn reference_params(&self) -> QueryParams {
        QueryParams::new().with(LANGUAGE_KEY, self.config.language.as_str())
    }
}

fn primary(resource: Resource, fetched: Result<Value, FetchError>) -> Result<Value, AggregateError> {
    fetched.map_err(|source| AggregateError::PrimaryFetch { resource, source })
}

/// Load a reference collection, degrading to empty on any list failure.
fn collection<R, T>(
    resource: Resource,
    fetched: Result<Value, FetchError>,
    adapt: fn(R) -> T,
    report: &mut AggregationReport,
) -> ReferenceCollection<T>
where
    R: DeserializeOwned,
    T: Identified,
{
    listed(resource, fetched, |raw| Ok(adapt(raw)), report)
        .into_iter()
        .collect()
}

/// Adapt an auxiliary list, degrading to empty on fetch or envelope failure.
fn listed<R, T>(
    resource: Resource,
    fetched: Result<Value, FetchError>,
    adapt: impl Fn(R) -> Result<T, AdaptError>,
    report: &mut AggregationReport,
) -> Vec<T>
where
    R: DeserializeOwned,
{
    let envelope = fetched
        .map_err(|err| err.to_string())
        .and_then(|value| decode::<RawList>(resource.name(), value).map_err(|err| err.to_string()));
    match envelope {
        Ok(envelope) => adapt_items(resource, envelope.results, report, adapt),
        Err(reason) => {
            report.degrade(resource, reason);
            Vec::new()
        }
    }
}

/// Decode and adapt each item on its own, dropping those that fail.
fn adapt_items<R, T>(
    resource: Resource,
    items: Vec<Value>,
    report: &mut AggregationReport,
    adapt: impl Fn(R) -> Result<T, AdaptError>,
) -> Vec<T>
where
    R: DeserializeOwned,
{
    let mut adapted = Vec::with_capacity(items.len());
    for item in items {
        let outcome = decode::<R>(resource.name(), item.clone())
            .map_err(AdaptError::from)
            .and_then(&adapt);
        match outcome {
            Ok(value) => adapted.push(value),
            Err(err) => report.skip(resource, &item, err.to_string()),
        }
    }
    adapted
}
