//! Pure conversions from raw payloads to normalized entities.
//!
//! Adapters never fetch. They receive one decoded raw entity and, where ids
//! need resolving, the already loaded [`References`] bundle. Unresolved ids
//! are not errors: singular fields become `None` and list elements are
//! skipped. Only a structurally invalid payload or malformed geometry fails
//! an adaptation, and then only for that one entity.

mod details;
mod poi;
mod reference;
mod trek;

use log::debug;
use rando_core::{
    Accessibility, Activity, Attachment, CourseType, Difficulty, InformationDesk, Label,
    MalformedGeometryError, Network, ReferenceCollection, Source, Theme,
};
use thiserror::Error;

use crate::raw::{InvalidPayloadError, RawAttachment};

pub use details::{Nearby, adapt_details};
pub use poi::{adapt_poi, adapt_touristic_content};
pub use reference::{
    adapt_accessibility, adapt_activity, adapt_course_type, adapt_difficulty,
    adapt_information_desk, adapt_label, adapt_network, adapt_source, adapt_theme,
};
pub use trek::{adapt_trek, adapt_trek_geometry, adapt_trek_popup};

/// Errors raised while adapting a single raw entity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdaptError {
    /// The payload does not have the expected shape.
    #[error(transparent)]
    InvalidPayload(#[from] InvalidPayloadError),
    /// A geometry field could not be normalised.
    #[error("malformed {field} geometry: {source}")]
    MalformedGeometry {
        /// Field holding the geometry.
        field: &'static str,
        /// Underlying normaliser error.
        #[source]
        source: MalformedGeometryError,
    },
}

impl AdaptError {
    pub(crate) fn geometry(field: &'static str) -> impl FnOnce(MalformedGeometryError) -> Self {
        move |source| Self::MalformedGeometry { field, source }
    }
}

/// Reference collections available to the adapters.
///
/// A collection that could not be loaded is simply empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct References {
    pub difficulties: ReferenceCollection<Difficulty>,
    pub themes: ReferenceCollection<Theme>,
    pub activities: ReferenceCollection<Activity>,
    pub course_types: ReferenceCollection<CourseType>,
    pub networks: ReferenceCollection<Network>,
    pub accessibilities: ReferenceCollection<Accessibility>,
    pub sources: ReferenceCollection<Source>,
    pub information_desks: ReferenceCollection<InformationDesk>,
    pub labels: ReferenceCollection<Label>,
}

/// Upstream encodes absent text as an empty string.
pub(crate) fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|value| !value.trim().is_empty())
}

/// Upstream encodes absent measures as `-1`.
pub(crate) fn measure(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

pub(crate) fn attachments(raw: Vec<RawAttachment>) -> Vec<Attachment> {
    raw.into_iter()
        .filter_map(|attachment| {
            let url = non_empty(attachment.url)?;
            Some(Attachment {
                url,
                thumbnail: non_empty(attachment.thumbnail),
            })
        })
        .collect()
}

/// Thumbnail of the first usable attachment, falling back to its full URL.
pub(crate) fn thumbnail(attachments: &[Attachment]) -> Option<String> {
    attachments
        .first()
        .map(|first| first.thumbnail.clone().unwrap_or_else(|| first.url.clone()))
}

pub(crate) fn resolve_one<T: Clone>(
    collection: &ReferenceCollection<T>,
    id: Option<u32>,
    owner: u32,
    field: &str,
) -> Option<T> {
    let resolved = collection.resolve(id);
    if let (Some(id), None) = (id, resolved.as_ref()) {
        debug!("Trek {owner}: unresolved {field} id {id}");
    }
    resolved
}

pub(crate) fn resolve_many<T: Clone>(
    collection: &ReferenceCollection<T>,
    ids: &[u32],
    owner: u32,
    field: &str,
) -> Vec<T> {
    let missing = collection.missing(ids);
    if !missing.is_empty() {
        debug!("Trek {owner}: skipped unresolved {field} ids {missing:?}");
    }
    collection.resolve_all(ids)
}
