//! Facade crate for the Rando trek search engine.
//!
//! This crate re-exports the core domain types and, behind the `data`
//! feature, the fetch seam, the HTTP source and the result aggregator.

#![forbid(unsafe_code)]

pub use rando_core::{
    Bbox, Coordinate, CycleToken, CycleTracker, Details, FilterCategory, FilterError,
    FilterOption, FilterState, Geometry, MalformedGeometryError, MenuEntry, MenuSection,
    PanelController, PanelState, QueryBuilder, QueryParams, QueryValue, SearchFilters,
    TrekPopup, TrekResult, UnknownOptionError,
};

#[cfg(feature = "data")]
pub use rando_data::{
    AggregateError, AggregationReport, AggregatorConfig, Completion, FetchError, HttpTrekSource,
    HttpTrekSourceConfig, Resource, ResultAggregator, ResultCache, SearchSession, TrekDetails,
    TrekResults, TrekSource,
};
