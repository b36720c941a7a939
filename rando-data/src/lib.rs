//! Data access and aggregation for the Rando engine.
//!
//! Responsibilities:
//! - Define the [`TrekSource`] fetch seam and its HTTP implementation.
//! - Decode untrusted upstream payloads into typed raw DTOs.
//! - Adapt raw payloads into the normalized entities of `rando-core`.
//! - Aggregate search results and detail pages from concurrent fetches.
//!
//! Boundaries:
//! - Do not encode filter or query rules (live in `rando-core`).
//! - Leave retries and caching of HTTP responses to the transport.
//!
//! Invariants:
//! - Adaptation never starts before every fetch of a cycle has resolved.
//! - A failed auxiliary fetch degrades; only the primary fetch aborts.
//! - No global mutable state.

pub mod adapter;
pub mod aggregate;
pub mod cache;
pub mod raw;
pub mod session;
mod source;

pub use aggregate::{
    AggregateError, AggregationReport, AggregatorConfig, Degradation, ResultAggregator,
    SkippedItem, TrekDetails, TrekResults,
};
pub use cache::{CacheEntry, ResultCache};
pub use session::{Completion, PendingSearch, SearchSession};
#[doc(hidden)]
pub use source::test_support;
pub use source::{
    DEFAULT_USER_AGENT, FetchError, HttpTrekSource, HttpTrekSourceConfig, Resource,
    SourceBuildError, TrekSource,
};
