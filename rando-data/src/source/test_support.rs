//! Test utilities for trek sources.
//!
//! [`StubTrekSource`] answers fetches from pre-configured payloads without
//! any network access, and records every call it receives. The `sample_*`
//! functions return small but realistic upstream payloads.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;

use async_trait::async_trait;
use rando_core::QueryParams;
use serde_json::{Value, json};

use super::{FetchError, Resource, TrekSource};

/// Stub [`TrekSource`] backed by in-memory payloads.
///
/// Resources without a configured response fail with an HTTP 404 error.
///
/// # Example
///
/// ```
/// use rando_core::QueryParams;
/// use rando_data::test_support::{StubTrekSource, block_on_for_tests};
/// use rando_data::{Resource, TrekSource};
///
/// let source = StubTrekSource::new().with_payload(Resource::Themes, serde_json::json!({"count": 0, "results": []}));
/// let payload = block_on_for_tests(source.fetch(Resource::Themes, &QueryParams::new()));
/// assert!(payload.is_ok());
/// assert!(block_on_for_tests(source.fetch(Resource::Labels, &QueryParams::new())).is_err());
/// assert_eq!(source.calls().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct StubTrekSource {
    responses: HashMap<Resource, Result<Value, FetchError>>,
    calls: RefCell<Vec<(Resource, QueryParams)>>,
}

impl StubTrekSource {
    /// A source without any configured response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A source answering every resource the aggregator uses with sample
    /// payloads.
    #[must_use]
    pub fn with_samples() -> Self {
        Self::new()
            .with_payload(Resource::Treks, sample_trek_list())
            .with_payload(Resource::Trek(2), sample_details())
            .with_payload(Resource::Difficulties, sample_difficulties())
            .with_payload(Resource::Themes, sample_themes())
            .with_payload(Resource::Activities, sample_activities())
            .with_payload(Resource::CourseTypes, sample_course_types())
            .with_payload(Resource::Networks, sample_networks())
            .with_payload(Resource::Accessibilities, list(Vec::new()))
            .with_payload(Resource::Sources, sample_sources())
            .with_payload(Resource::InformationDesks, sample_information_desks())
            .with_payload(Resource::Labels, list(Vec::new()))
            .with_payload(Resource::Pois, sample_pois())
            .with_payload(Resource::TouristicContents, sample_touristic_contents())
    }

    /// Answer `resource` with `payload`.
    #[must_use]
    pub fn with_payload(mut self, resource: Resource, payload: Value) -> Self {
        self.responses.insert(resource, Ok(payload));
        self
    }

    /// Answer `resource` with `error`.
    #[must_use]
    pub fn with_error(mut self, resource: Resource, error: FetchError) -> Self {
        self.responses.insert(resource, Err(error));
        self
    }

    /// Answer `resource` with a 500 error.
    #[must_use]
    pub fn failing(self, resource: Resource) -> Self {
        self.with_error(
            resource,
            FetchError::Http {
                url: format!("https://stub.test/{}", resource.path()),
                status: 500,
                message: "stub failure".to_string(),
            },
        )
    }

    /// Every fetch received so far, in call order.
    pub fn calls(&self) -> Vec<(Resource, QueryParams)> {
        self.calls.borrow().clone()
    }

    /// Parameters of the first fetch of `resource`.
    pub fn params_for(&self, resource: Resource) -> Option<QueryParams> {
        self.calls
            .borrow()
            .iter()
            .find(|(called, _)| *called == resource)
            .map(|(_, params)| params.clone())
    }
}

#[async_trait(?Send)]
impl TrekSource for StubTrekSource {
    async fn fetch(&self, resource: Resource, params: &QueryParams) -> Result<Value, FetchError> {
        self.calls.borrow_mut().push((resource, params.clone()));
        self.responses
            .get(&resource)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Http {
                    url: format!("https://stub.test/{}", resource.path()),
                    status: 404,
                    message: "no stub payload".to_string(),
                })
            })
    }
}

/// Drive `future` to completion on a current-thread Tokio runtime.
pub fn block_on_for_tests<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime should build")
        .block_on(future)
}

/// Wrap `results` in a single-page list envelope.
pub fn list(results: Vec<Value>) -> Value {
    json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results,
    })
}

/// Three search results: a complete trek, a trek with unknown references and
/// sentinel values, and a trek with a malformed departure.
pub fn sample_trek_list() -> Value {
    json!({
        "count": 12,
        "next": "https://stub.test/trek/?page=2",
        "previous": null,
        "results": [
            {
                "id": 1,
                "name": "Lac Blanc",
                "departure": "Chamonix",
                "attachments": [{"url": "https://img.test/1.jpg", "thumbnail": "https://img.test/1_t.jpg"}],
                "practice": 1,
                "themes": [7, 4],
                "difficulty": 2,
                "duration": 4.5,
                "length_2d": 9800.0,
                "ascent": 820.0,
                "route": 1,
                "departure_geom": [6.87, 45.95]
            },
            {
                "id": 2,
                "name": "Tour du lac",
                "departure": "",
                "attachments": [],
                "practice": 9,
                "themes": [99],
                "difficulty": null,
                "duration": -1,
                "length_2d": 14000.0,
                "ascent": -1,
                "route": 3,
                "departure_geom": [6.13, 45.89]
            },
            {
                "id": 3,
                "name": "Broken",
                "departure_geom": [6.1]
            }
        ]
    })
}

/// Detail feature for trek 2.
pub fn sample_details() -> Value {
    json!({
        "type": "Feature",
        "bbox": [6.1, 45.8, 6.3, 45.9],
        "geometry": {
            "type": "LineString",
            "coordinates": [[6.13, 45.89, 450.0], [6.2, 45.85, 470.0], [6.3, 45.8, 455.0]]
        },
        "properties": {
            "id": 2,
            "name": "Tour du lac",
            "departure": "Annecy",
            "attachments": [{"url": "https://img.test/2.jpg", "thumbnail": ""}],
            "practice": 1,
            "public_transport": "<p>Bus 61</p>",
            "access": "",
            "advised_parking": "<p>Parking du port</p>",
            "description_teaser": "<p>Around the lake.</p>",
            "ambiance": "",
            "themes": [7],
            "difficulty": 1,
            "duration": 5.0,
            "length_2d": 14000.0,
            "ascent": 120.0,
            "route": 1,
            "networks": [1, 5],
            "description": "<ol><li>Follow the shore.</li></ol>",
            "parking_location": [6.13, 45.9],
            "pdf": "https://stub.test/trek/2.pdf",
            "gpx": "https://stub.test/trek/2.gpx",
            "kml": "",
            "cities": ["74010"],
            "disabled_infrastructure": "",
            "accessibilities": [],
            "source": [1],
            "information_desks": [1],
            "labels": [],
            "advice": "<p>Bring water.</p>",
            "points_reference": {"type": "MultiPoint", "coordinates": [[6.2, 45.85]]},
            "children": []
        }
    })
}

pub fn sample_difficulties() -> Value {
    list(vec![
        json!({"id": 1, "label": "Easy", "pictogram": "https://img.test/d1.svg"}),
        json!({"id": 2, "label": "Medium", "pictogram": "https://img.test/d2.svg"}),
        json!({"id": 3, "label": "Hard", "pictogram": ""}),
    ])
}

pub fn sample_themes() -> Value {
    list(vec![
        json!({"id": 4, "label": "Fauna", "pictogram": "https://img.test/t4.svg"}),
        json!({"id": 7, "label": "Lakes", "pictogram": "https://img.test/t7.svg"}),
    ])
}

pub fn sample_activities() -> Value {
    list(vec![
        json!({"id": 1, "name": "Hiking", "pictogram": "https://img.test/p1.svg"}),
        json!({"id": 2, "name": "Cycling", "pictogram": "https://img.test/p2.svg"}),
        json!({"name": "Missing id"}),
    ])
}

pub fn sample_course_types() -> Value {
    list(vec![
        json!({"id": 1, "route": "Loop"}),
        json!({"id": 2, "route": "Return trip"}),
    ])
}

pub fn sample_networks() -> Value {
    list(vec![json!({"id": 1, "label": "PR"}), json!({"id": 2, "label": "GR"})])
}

pub fn sample_sources() -> Value {
    list(vec![
        json!({"id": 1, "name": "Parc naturel", "website": "https://parc.test", "pictogram": ""}),
    ])
}

pub fn sample_information_desks() -> Value {
    list(vec![json!({
        "id": 1,
        "name": "Office de tourisme",
        "phone": "+33 4 50 00 00 00",
        "email": "",
        "latitude": 45.9,
        "longitude": 6.12
    })])
}

pub fn sample_pois() -> Value {
    list(vec![
        json!({
            "id": 21,
            "name": "Belvedere",
            "description": "<p>View over the lake.</p>",
            "attachments": [],
            "geometry": {"type": "Point", "coordinates": [6.2, 45.86]}
        }),
        json!({
            "id": 22,
            "name": "Broken",
            "geometry": {"type": "Point", "coordinates": []}
        }),
    ])
}

pub fn sample_touristic_contents() -> Value {
    list(vec![json!({
        "id": 31,
        "name": "Refuge",
        "cities": ["74010"],
        "geometry": {"type": "Point", "coordinates": [6.25, 45.84]}
    })])
}
