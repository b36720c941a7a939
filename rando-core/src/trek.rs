//! Normalized trek entities consumed by the presentation layer.
//!
//! Every reference id found upstream has been resolved into the matching
//! reference entity, every position is a [`Coordinate`], and upstream
//! sentinels (`null`, `-1`, empty strings) are represented as `None`.

use crate::{
    Accessibility, Activity, Bbox, Coordinate, CourseType, Difficulty, Geometry, InformationDesk,
    Label, Network, Source, Theme,
};

/// A picture attached to an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attachment {
    /// Full-size picture.
    pub url: String,
    /// Thumbnail, when upstream provides one.
    pub thumbnail: Option<String>,
}

/// Summary figures shown on a trek card.
///
/// Numbers are passed through unformatted: `duration` is in hours,
/// `distance` and `elevation` in metres.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrekInformation {
    /// Walking time in hours.
    pub duration: Option<f64>,
    /// Horizontal length in metres.
    pub distance: Option<f64>,
    /// Positive elevation gain in metres.
    pub elevation: Option<f64>,
    /// Resolved difficulty.
    pub difficulty: Option<Difficulty>,
    /// Resolved route shape.
    pub course_type: Option<CourseType>,
    /// Resolved waymarking networks; empty for search results.
    pub networks: Vec<Network>,
}

/// One entry of a search result page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrekResult {
    /// Upstream id.
    pub id: u32,
    /// Trek name.
    pub title: String,
    /// Departure place.
    pub place: Option<String>,
    /// Labels of the resolved themes, in upstream order.
    pub tags: Vec<String>,
    /// Thumbnail of the first attachment.
    pub thumbnail_uri: Option<String>,
    /// Resolved practice.
    pub practice: Option<Activity>,
    /// Resolved themes.
    pub themes: Vec<Theme>,
    /// Summary figures.
    pub informations: TrekInformation,
    /// Departure position.
    pub location: Option<Coordinate>,
}

/// Minimal trek summary shown in a map popup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrekPopup {
    /// Trek name.
    pub title: String,
    /// Departure place.
    pub place: Option<String>,
    /// Thumbnail of the first attachment.
    pub img_url: Option<String>,
}

/// A point of interest near a trek.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Poi {
    /// Upstream id.
    pub id: u32,
    /// Name.
    pub name: String,
    /// HTML description.
    pub description: Option<String>,
    /// Thumbnail of the first attachment.
    pub thumbnail_uri: Option<String>,
    /// Attached pictures.
    pub attachments: Vec<Attachment>,
    /// Position.
    pub location: Coordinate,
}

/// Accommodation, event or other touristic offer near a trek.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TouristicContent {
    /// Upstream id.
    pub id: u32,
    /// Name.
    pub name: String,
    /// Municipality.
    pub place: Option<String>,
    /// HTML teaser.
    pub description_teaser: Option<String>,
    /// Thumbnail of the first attachment.
    pub thumbnail_uri: Option<String>,
    /// Normalised geometry.
    pub geometry: Geometry,
}

/// Fully resolved trek detail page.
///
/// HTML fields are passed through untouched under their presentation names.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Details {
    /// Upstream id.
    pub id: u32,
    /// Trek name.
    pub title: String,
    /// Departure place.
    pub place: Option<String>,
    /// Resolved practice.
    pub practice: Option<Activity>,
    /// Attached pictures.
    pub imgs: Vec<Attachment>,
    /// Labels of the resolved themes.
    pub tags: Vec<String>,
    /// Resolved themes.
    pub themes: Vec<Theme>,
    /// Summary figures, including networks.
    pub informations: TrekInformation,
    /// Public transport (HTML).
    pub transport: Option<String>,
    /// Road access and parking advice (HTML).
    pub access_parking: Option<String>,
    /// Teaser (HTML).
    pub description_teaser: Option<String>,
    /// Ambiance (HTML).
    pub ambiance: Option<String>,
    /// Itinerary (HTML).
    pub description: Option<String>,
    /// Accessibility notes (HTML).
    pub disabled_infrastructure: Option<String>,
    /// Recommendations (HTML).
    pub advice: Option<String>,
    /// Nearby points of interest.
    pub pois: Vec<Poi>,
    /// Nearby touristic contents.
    pub touristic_contents: Vec<TouristicContent>,
    /// Path in travel order.
    pub trek_geometry: Vec<Coordinate>,
    /// First point of the path.
    pub trek_departure: Option<Coordinate>,
    /// Last point of the path.
    pub trek_arrival: Option<Coordinate>,
    /// Advised parking position.
    pub parking_location: Option<Coordinate>,
    /// PDF brochure URL.
    pub pdf_uri: Option<String>,
    /// GPX export URL.
    pub gpx_uri: Option<String>,
    /// KML export URL.
    pub kml_uri: Option<String>,
    /// Municipality codes crossed by the trek.
    pub cities: Vec<String>,
    /// Resolved accessibilities.
    pub accessibilities: Vec<Accessibility>,
    /// Resolved data sources.
    pub sources: Vec<Source>,
    /// Resolved information desks.
    pub information_desks: Vec<InformationDesk>,
    /// Resolved labels.
    pub labels: Vec<Label>,
    /// Numbered reference points; `None` when upstream has none.
    pub points_reference: Option<Vec<Coordinate>>,
    /// Bounding box of the trek.
    pub bbox: Bbox,
    /// Ids of child treks, for multi-stage itineraries.
    pub children: Vec<u32>,
}

impl Details {
    /// Whether the trek is an itinerary made of stages.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
