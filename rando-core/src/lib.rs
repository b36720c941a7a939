//! Core domain types for the Rando trek search engine.
//!
//! This crate holds the pure half of the search pipeline: filter
//! selections, the query builder that turns them into transport-agnostic
//! parameters, geometry normalisation, the normalized trek entities and the
//! reference collections used to resolve upstream ids. Nothing here performs
//! I/O.

#![forbid(unsafe_code)]

pub mod cycle;
pub mod filter;
pub mod geometry;
pub mod panel;
pub mod query;
pub mod reference;
#[doc(hidden)]
pub mod test_support;
pub mod trek;

pub use cycle::{CycleToken, CycleTracker};
pub use filter::{
    FilterCategory, FilterError, FilterOption, FilterState, SearchFilters, UnknownOptionError,
};
pub use geometry::{
    Bbox, Coordinate, Geometry, GeometryKind, MalformedGeometryError, RawGeometry,
};
pub use panel::{FilterDrawer, MenuEntry, MenuSection, PanelController, PanelState, PanelTransition};
pub use query::{ListEncoding, QueryBuilder, QueryParams, QueryValue};
pub use reference::{
    Accessibility, Activity, CourseType, Difficulty, Identified, InformationDesk, Label, Network,
    ReferenceCollection, Source, Theme,
};
pub use trek::{
    Attachment, Details, Poi, TouristicContent, TrekInformation, TrekPopup, TrekResult,
};
