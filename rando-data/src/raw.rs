//! Serde mirrors of the upstream Geotrek payloads.
//!
//! Payloads arrive from a [`TrekSource`](crate::TrekSource) as untyped
//! [`serde_json::Value`]s. [`decode`] validates one of them against the
//! matching `Raw*` shape exactly once; adapters then work on typed input
//! only. Optional fields default to `None` or empty collections so that
//! missing data never counts as a structural error.

use rando_core::RawGeometry;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// A raw payload whose shape does not match the expected entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {entity} payload: {message}")]
pub struct InvalidPayloadError {
    /// Name of the entity being decoded.
    pub entity: &'static str,
    /// Decoder message.
    pub message: String,
}

/// Decode `value` as `T`, reporting failures against `entity`.
///
/// # Examples
/// ```
/// use rando_data::raw::{RawDifficulty, decode};
///
/// let raw: RawDifficulty = decode("difficulty", serde_json::json!({"id": 1, "label": "Easy"}))?;
/// assert_eq!(raw.id, 1);
/// assert!(decode::<RawDifficulty>("difficulty", serde_json::json!([1])).is_err());
/// # Ok::<(), rando_data::raw::InvalidPayloadError>(())
/// ```
pub fn decode<T: DeserializeOwned>(entity: &'static str, value: Value) -> Result<T, InvalidPayloadError> {
    serde_json::from_value(value).map_err(|err| InvalidPayloadError {
        entity,
        message: err.to_string(),
    })
}

/// Paginated list envelope.
///
/// Items stay untyped so that each one is validated, and possibly rejected,
/// on its own.
#[derive(Debug, Clone, Deserialize)]
pub struct RawList {
    /// Total number of matching items across pages.
    pub count: u64,
    /// URL of the next page.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page.
    #[serde(default)]
    pub previous: Option<String>,
    /// Items of this page.
    pub results: Vec<Value>,
}

/// A picture attached to an upstream entity.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAttachment {
    /// Full-size URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// One trek of a search result page.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrek {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub departure: Option<String>,
    #[serde(default)]
    pub attachments: Vec<RawAttachment>,
    #[serde(default)]
    pub practice: Option<u32>,
    #[serde(default)]
    pub themes: Vec<u32>,
    #[serde(default)]
    pub difficulty: Option<u32>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub length_2d: Option<f64>,
    #[serde(default)]
    pub ascent: Option<f64>,
    #[serde(default)]
    pub route: Option<u32>,
    /// `[lon, lat]` of the departure point.
    #[serde(default)]
    pub departure_geom: Option<Vec<f64>>,
}

/// Fields shown in a map popup.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrekPopup {
    pub name: String,
    #[serde(default)]
    pub departure: Option<String>,
    #[serde(default)]
    pub attachments: Vec<RawAttachment>,
}

/// A trek reduced to its path.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrekGeometry {
    pub geometry: RawGeometry,
}

/// A trek detail page, as a GeoJSON feature.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDetails {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
    pub geometry: RawGeometry,
    pub properties: RawDetailsProperties,
}

/// Properties of a [`RawDetails`] feature.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDetailsProperties {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub departure: Option<String>,
    #[serde(default)]
    pub attachments: Vec<RawAttachment>,
    #[serde(default)]
    pub practice: Option<u32>,
    #[serde(default)]
    pub public_transport: Option<String>,
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub advised_parking: Option<String>,
    #[serde(default)]
    pub description_teaser: Option<String>,
    #[serde(default)]
    pub ambiance: Option<String>,
    #[serde(default)]
    pub themes: Vec<u32>,
    #[serde(default)]
    pub difficulty: Option<u32>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub length_2d: Option<f64>,
    #[serde(default)]
    pub ascent: Option<f64>,
    #[serde(default)]
    pub route: Option<u32>,
    #[serde(default)]
    pub networks: Vec<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parking_location: Option<Vec<f64>>,
    #[serde(default)]
    pub pdf: Option<String>,
    #[serde(default)]
    pub gpx: Option<String>,
    #[serde(default)]
    pub kml: Option<String>,
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub disabled_infrastructure: Option<String>,
    #[serde(default)]
    pub accessibilities: Vec<u32>,
    #[serde(default)]
    pub source: Vec<u32>,
    #[serde(default)]
    pub information_desks: Vec<u32>,
    #[serde(default)]
    pub labels: Vec<u32>,
    #[serde(default)]
    pub advice: Option<String>,
    #[serde(default)]
    pub points_reference: Option<RawGeometry>,
    #[serde(default)]
    pub children: Vec<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDifficulty {
    pub id: u32,
    pub label: String,
    #[serde(default)]
    pub pictogram: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTheme {
    pub id: u32,
    pub label: String,
    #[serde(default)]
    pub pictogram: Option<String>,
}

/// A practice; upstream calls its label `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawActivity {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub pictogram: Option<String>,
}

/// A route shape; upstream calls its label `route`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCourseType {
    pub id: u32,
    pub route: String,
    #[serde(default)]
    pub pictogram: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNetwork {
    pub id: u32,
    pub label: String,
    #[serde(default)]
    pub pictogram: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAccessibility {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub pictogram: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSource {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub pictogram: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawInformationDesk {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLabel {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub advice: Option<String>,
    #[serde(default)]
    pub pictogram: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPoi {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attachments: Vec<RawAttachment>,
    pub geometry: RawGeometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTouristicContent {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description_teaser: Option<String>,
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<RawAttachment>,
    pub geometry: RawGeometry,
}
