//! Adapter for the trek detail page.

use rando_core::geometry::{Bbox, normalize_multi_point, normalize_position};
use rando_core::{Details, MalformedGeometryError, Poi, TouristicContent, TrekInformation};

use super::trek::tags;
use super::{AdaptError, References, attachments, measure, non_empty, resolve_many, resolve_one};
use crate::raw::RawDetails;

/// Already adapted content located near a trek.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Nearby {
    pub pois: Vec<Poi>,
    pub touristic_contents: Vec<TouristicContent>,
}

/// Adapt a trek detail feature.
///
/// The path must be a line string. The bounding box comes from the feature's
/// `bbox` member, or is derived from the path when upstream omits it.
pub fn adapt_details(
    raw: RawDetails,
    references: &References,
    nearby: Nearby,
) -> Result<Details, AdaptError> {
    let trek_geometry = raw
        .geometry
        .normalize_line_string()
        .map_err(AdaptError::geometry("trek"))?;
    let bbox = match raw.bbox.as_deref() {
        Some(raw_bbox) => Bbox::from_raw(raw_bbox),
        None => Bbox::enclosing(&trek_geometry)
            .ok_or(MalformedGeometryError::Bbox { raw: Vec::new() }),
    }
    .map_err(AdaptError::geometry("bbox"))?;

    let props = raw.properties;
    let id = props.id;
    let parking_location = props
        .parking_location
        .as_deref()
        .map(normalize_position)
        .transpose()
        .map_err(AdaptError::geometry("parking"))?;
    let points_reference = normalize_multi_point(props.points_reference.as_ref())
        .map_err(AdaptError::geometry("points reference"))?;
    let themes = resolve_many(&references.themes, &props.themes, id, "theme");

    Ok(Details {
        id,
        title: props.name,
        place: non_empty(props.departure),
        practice: resolve_one(&references.activities, props.practice, id, "practice"),
        imgs: attachments(props.attachments),
        tags: tags(&themes),
        themes,
        informations: TrekInformation {
            duration: measure(props.duration),
            distance: measure(props.length_2d),
            elevation: measure(props.ascent),
            difficulty: resolve_one(&references.difficulties, props.difficulty, id, "difficulty"),
            course_type: resolve_one(&references.course_types, props.route, id, "route"),
            networks: resolve_many(&references.networks, &props.networks, id, "network"),
        },
        transport: non_empty(props.public_transport),
        access_parking: join_html(non_empty(props.access), non_empty(props.advised_parking)),
        description_teaser: non_empty(props.description_teaser),
        ambiance: non_empty(props.ambiance),
        description: non_empty(props.description),
        disabled_infrastructure: non_empty(props.disabled_infrastructure),
        advice: non_empty(props.advice),
        pois: nearby.pois,
        touristic_contents: nearby.touristic_contents,
        trek_departure: trek_geometry.first().copied(),
        trek_arrival: trek_geometry.last().copied(),
        trek_geometry,
        parking_location,
        pdf_uri: non_empty(props.pdf),
        gpx_uri: non_empty(props.gpx),
        kml_uri: non_empty(props.kml),
        cities: props.cities,
        accessibilities: resolve_many(
            &references.accessibilities,
            &props.accessibilities,
            id,
            "accessibility",
        ),
        sources: resolve_many(&references.sources, &props.source, id, "source"),
        information_desks: resolve_many(
            &references.information_desks,
            &props.information_desks,
            id,
            "information desk",
        ),
        labels: resolve_many(&references.labels, &props.labels, id, "label"),
        points_reference,
        bbox,
        children: props.children,
    })
}

/// Road access and parking advice are shown as one block.
fn join_html(first: Option<String>, second: Option<String>) -> Option<String> {
    match (first, second) {
        (Some(first), Some(second)) => Some(format!("{first}{second}")),
        (first, second) => first.or(second),
    }
}
