//! Adapters for points of interest and touristic contents.

use rando_core::{Poi, TouristicContent};

use super::{AdaptError, attachments, non_empty, thumbnail};
use crate::raw::{RawPoi, RawTouristicContent};

/// Adapt a point of interest; its geometry must be a point.
pub fn adapt_poi(raw: RawPoi) -> Result<Poi, AdaptError> {
    let location = raw
        .geometry
        .normalize_point()
        .map_err(AdaptError::geometry("poi"))?;
    let attachments = attachments(raw.attachments);
    Ok(Poi {
        id: raw.id,
        name: raw.name,
        description: non_empty(raw.description),
        thumbnail_uri: thumbnail(&attachments),
        attachments,
        location,
    })
}

/// Adapt a touristic content of any geometry kind.
pub fn adapt_touristic_content(raw: RawTouristicContent) -> Result<TouristicContent, AdaptError> {
    let geometry = raw
        .geometry
        .normalize()
        .map_err(AdaptError::geometry("touristic content"))?;
    let attachments = attachments(raw.attachments);
    Ok(TouristicContent {
        id: raw.id,
        name: raw.name,
        place: raw.cities.into_iter().find(|city| !city.trim().is_empty()),
        description_teaser: non_empty(raw.description_teaser),
        thumbnail_uri: thumbnail(&attachments),
        geometry,
    })
}
