//! Adapters for trek search results, popups and paths.

use rando_core::geometry::{Coordinate, normalize_position};
use rando_core::{Theme, TrekInformation, TrekPopup, TrekResult};

use super::{
    AdaptError, References, attachments, measure, non_empty, resolve_many, resolve_one, thumbnail,
};
use crate::raw::{RawTrek, RawTrekGeometry, RawTrekPopup};

/// Adapt one trek of a search result page.
///
/// # Examples
/// ```
/// use rando_core::Difficulty;
/// use rando_data::adapter::{References, adapt_trek};
/// use rando_data::raw::{RawTrek, decode};
///
/// let references = References {
///     difficulties: [Difficulty::new(7, "Expert")].into_iter().collect(),
///     ..References::default()
/// };
/// let raw: RawTrek = decode("trek", serde_json::json!({"id": 1, "name": "Aiguillette", "difficulty": 7}))?;
/// let trek = adapt_trek(raw, &references)?;
/// assert_eq!(trek.informations.difficulty.map(|d| d.label), Some("Expert".into()));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn adapt_trek(raw: RawTrek, references: &References) -> Result<TrekResult, AdaptError> {
    let location = raw
        .departure_geom
        .as_deref()
        .map(normalize_position)
        .transpose()
        .map_err(AdaptError::geometry("departure"))?;
    let themes = resolve_many(&references.themes, &raw.themes, raw.id, "theme");
    let attachments = attachments(raw.attachments);
    Ok(TrekResult {
        id: raw.id,
        title: raw.name,
        place: non_empty(raw.departure),
        tags: tags(&themes),
        thumbnail_uri: thumbnail(&attachments),
        practice: resolve_one(&references.activities, raw.practice, raw.id, "practice"),
        themes,
        informations: TrekInformation {
            duration: measure(raw.duration),
            distance: measure(raw.length_2d),
            elevation: measure(raw.ascent),
            difficulty: resolve_one(&references.difficulties, raw.difficulty, raw.id, "difficulty"),
            course_type: resolve_one(&references.course_types, raw.route, raw.id, "route"),
            networks: Vec::new(),
        },
        location,
    })
}

/// Adapt the popup summary of a trek.
pub fn adapt_trek_popup(raw: RawTrekPopup) -> TrekPopup {
    let attachments = attachments(raw.attachments);
    TrekPopup {
        title: raw.name,
        place: non_empty(raw.departure),
        img_url: thumbnail(&attachments),
    }
}

/// Adapt a trek path; the geometry must be a line string.
pub fn adapt_trek_geometry(raw: RawTrekGeometry) -> Result<Vec<Coordinate>, AdaptError> {
    raw.geometry
        .normalize_line_string()
        .map_err(AdaptError::geometry("trek"))
}

pub(super) fn tags(themes: &[Theme]) -> Vec<String> {
    themes.iter().map(|theme| theme.label.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::decode;
    use rando_core::test_support::{sample_activities, sample_difficulties, sample_themes};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn references() -> References {
        References {
            difficulties: sample_difficulties(),
            themes: sample_themes(),
            activities: sample_activities(),
            ..References::default()
        }
    }

    fn trek(value: Value) -> RawTrek {
        decode("trek", value).expect("valid trek")
    }

    #[rstest]
    #[case(Some(7), Some("Expert"))]
    #[case(Some(42), None)]
    #[case(None, None)]
    fn difficulty_resolves_or_is_absent(
        references: References,
        #[case] difficulty: Option<u32>,
        #[case] expected: Option<&str>,
    ) {
        let raw = trek(json!({"id": 1, "name": "Tour", "difficulty": difficulty}));
        let adapted = adapt_trek(raw, &references).expect("adaptation succeeds");
        assert_eq!(
            adapted.informations.difficulty.as_ref().map(|d| d.label.as_str()),
            expected
        );
    }

    #[rstest]
    fn unknown_themes_are_skipped(references: References) {
        let raw = trek(json!({"id": 1, "name": "Tour", "themes": [9, 100, 4]}));
        let adapted = adapt_trek(raw, &references).expect("adaptation succeeds");
        assert_eq!(adapted.tags, vec!["Heritage", "Fauna"]);
        assert_eq!(adapted.themes.len(), 2);
    }

    #[rstest]
    fn sentinels_become_absent(references: References) {
        let raw = trek(json!({
            "id": 1,
            "name": "Tour",
            "departure": "",
            "duration": -1,
            "length_2d": 5400.0,
            "ascent": -1
        }));
        let adapted = adapt_trek(raw, &references).expect("adaptation succeeds");
        assert!(adapted.place.is_none());
        assert!(adapted.informations.duration.is_none());
        assert_eq!(adapted.informations.distance, Some(5400.0));
        assert!(adapted.informations.elevation.is_none());
    }

    #[rstest]
    fn departure_geometry_is_normalised(references: References) {
        let raw = trek(json!({"id": 1, "name": "Tour", "departure_geom": [6.1, 45.2]}));
        let adapted = adapt_trek(raw, &references).expect("adaptation succeeds");
        assert_eq!(adapted.location, Some(Coordinate { x: 6.1, y: 45.2 }));
    }

    #[rstest]
    fn malformed_departure_fails_the_trek(references: References) {
        let raw = trek(json!({"id": 1, "name": "Tour", "departure_geom": [6.1]}));
        let err = adapt_trek(raw, &references).expect_err("malformed departure");
        assert!(matches!(err, AdaptError::MalformedGeometry { field: "departure", .. }));
    }

    #[rstest]
    fn popup_uses_first_thumbnail() {
        let raw: RawTrekPopup = decode(
            "trek popup",
            json!({
                "name": "Tour",
                "departure": "Samoëns",
                "attachments": [{"url": "u", "thumbnail": "t"}]
            }),
        )
        .expect("valid popup");
        let popup = adapt_trek_popup(raw);
        assert_eq!(popup.place.as_deref(), Some("Samoëns"));
        assert_eq!(popup.img_url.as_deref(), Some("t"));
    }

    #[rstest]
    fn trek_geometry_keeps_order() {
        let raw: RawTrekGeometry = decode(
            "trek geometry",
            json!({"geometry": {"type": "LineString", "coordinates": [[1, 2], [3, 4]]}}),
        )
        .expect("valid geometry");
        let line = adapt_trek_geometry(raw).expect("line string");
        assert_eq!(
            line,
            vec![Coordinate { x: 1.0, y: 2.0 }, Coordinate { x: 3.0, y: 4.0 }]
        );
    }
}
