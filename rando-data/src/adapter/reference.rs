//! Adapters for reference collection entries.

use rando_core::{
    Accessibility, Activity, CourseType, Difficulty, InformationDesk, Label, Network, Source, Theme,
    geometry::Coordinate,
};

use super::non_empty;
use crate::raw::{
    RawAccessibility, RawActivity, RawCourseType, RawDifficulty, RawInformationDesk, RawLabel,
    RawNetwork, RawSource, RawTheme,
};

pub fn adapt_difficulty(raw: RawDifficulty) -> Difficulty {
    Difficulty {
        id: raw.id,
        label: raw.label,
        pictogram_uri: non_empty(raw.pictogram),
    }
}

pub fn adapt_theme(raw: RawTheme) -> Theme {
    Theme {
        id: raw.id,
        label: raw.label,
        pictogram_uri: non_empty(raw.pictogram),
    }
}

pub fn adapt_activity(raw: RawActivity) -> Activity {
    Activity {
        id: raw.id,
        label: raw.name,
        pictogram_uri: non_empty(raw.pictogram),
    }
}

pub fn adapt_course_type(raw: RawCourseType) -> CourseType {
    CourseType {
        id: raw.id,
        label: raw.route,
        pictogram_uri: non_empty(raw.pictogram),
    }
}

pub fn adapt_network(raw: RawNetwork) -> Network {
    Network {
        id: raw.id,
        label: raw.label,
        pictogram_uri: non_empty(raw.pictogram),
    }
}

pub fn adapt_accessibility(raw: RawAccessibility) -> Accessibility {
    Accessibility {
        id: raw.id,
        label: raw.name,
        pictogram_uri: non_empty(raw.pictogram),
    }
}

pub fn adapt_source(raw: RawSource) -> Source {
    Source {
        id: raw.id,
        name: raw.name,
        website: non_empty(raw.website),
        pictogram_uri: non_empty(raw.pictogram),
    }
}

/// Adapt an information desk; the desk is located only when both
/// ordinates are present.
pub fn adapt_information_desk(raw: RawInformationDesk) -> InformationDesk {
    let location = match (raw.longitude, raw.latitude) {
        (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Coordinate { x, y }),
        _ => None,
    };
    InformationDesk {
        id: raw.id,
        name: raw.name,
        description: non_empty(raw.description),
        phone: non_empty(raw.phone),
        email: non_empty(raw.email),
        website: non_empty(raw.website),
        photo_url: non_empty(raw.photo_url),
        street: non_empty(raw.street),
        postal_code: non_empty(raw.postal_code),
        municipality: non_empty(raw.municipality),
        location,
    }
}

pub fn adapt_label(raw: RawLabel) -> Label {
    Label {
        id: raw.id,
        name: raw.name,
        advice: non_empty(raw.advice),
        pictogram_uri: non_empty(raw.pictogram),
    }
}
