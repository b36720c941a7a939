//! Search sessions: filter state, aggregation cycles and applied results.
//!
//! A [`SearchSession`] owns the user's [`SearchFilters`] and the results
//! currently shown for them. Each search snapshots the filters into owned
//! [`QueryParams`] and stamps them with a fresh [`CycleToken`] before any
//! fetch starts, so later filter edits never tear an in-flight query. When a
//! search completes, its outcome is applied only if no newer search has begun
//! since; otherwise it is discarded as stale.
//!
//! # Examples
//! ```
//! use rando_core::SearchFilters;
//! use rando_core::test_support::sample_catalogue;
//! use rando_data::session::{Completion, SearchSession};
//! use rando_data::test_support::{StubTrekSource, block_on_for_tests};
//! use rando_data::ResultAggregator;
//!
//! let filters = SearchFilters::from_catalogue(sample_catalogue())?;
//! let mut session = SearchSession::new(filters, rando_core::QueryBuilder::new("fr", 5));
//! let aggregator = ResultAggregator::new(StubTrekSource::with_samples());
//!
//! session.select("themes", "7")?;
//! let completion = block_on_for_tests(session.refresh(&aggregator))?;
//! assert_eq!(completion, Completion::Applied);
//! assert_eq!(session.current().map(|page| page.count), Some(12));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use log::debug;
use rando_core::{
    CycleToken, CycleTracker, FilterError, QueryBuilder, QueryParams, SearchFilters,
};

use crate::aggregate::{AggregateError, ResultAggregator, TrekResults};
use crate::cache::ResultCache;
use crate::TrekSource;

/// Number of distinct queries a session caches by default.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

/// A search that has started but not yet been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    token: CycleToken,
    params: QueryParams,
}

impl PendingSearch {
    /// Cycle that issued this search.
    pub fn token(&self) -> CycleToken {
        self.token
    }

    /// Query snapshot taken when the search began.
    pub fn params(&self) -> &QueryParams {
        &self.params
    }
}

/// What happened to a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The results are now the session's current results.
    Applied,
    /// A newer search began first; the outcome was discarded.
    Stale,
}

/// Filters, cycle tracking, cache and current results of one search UI.
#[derive(Debug)]
pub struct SearchSession {
    filters: SearchFilters,
    builder: QueryBuilder,
    cycles: CycleTracker,
    cache: ResultCache<TrekResults>,
    applied: Option<(CycleToken, TrekResults)>,
}

impl SearchSession {
    /// Create a session over `filters` building queries with `builder`.
    pub fn new(filters: SearchFilters, builder: QueryBuilder) -> Self {
        Self {
            filters,
            builder,
            cycles: CycleTracker::new(),
            cache: ResultCache::with_capacity(DEFAULT_CACHE_CAPACITY),
            applied: None,
        }
    }

    /// Keep at most `capacity` distinct queries in the result cache.
    ///
    /// Cached results are dropped.
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = ResultCache::with_capacity(capacity);
        self
    }

    /// Current filter state.
    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    /// Results of the latest applied search.
    pub fn current(&self) -> Option<&TrekResults> {
        self.applied.as_ref().map(|(_, results)| results)
    }

    /// Cycle that produced the current results.
    pub fn current_token(&self) -> Option<CycleToken> {
        self.applied.as_ref().map(|(token, _)| *token)
    }

    /// Select `value` in `category_id`.
    pub fn select(&mut self, category_id: &str, value: &str) -> Result<(), FilterError> {
        self.filters.select(category_id, value)
    }

    /// Deselect `value` in `category_id`.
    pub fn deselect(&mut self, category_id: &str, value: &str) -> Result<(), FilterError> {
        self.filters.deselect(category_id, value)
    }

    /// Toggle `value` in `category_id`, returning whether it is now selected.
    pub fn toggle(&mut self, category_id: &str, value: &str) -> Result<bool, FilterError> {
        self.filters.toggle(category_id, value)
    }

    /// Clear the selection of `category_id`.
    pub fn clear_category(&mut self, category_id: &str) -> Result<(), FilterError> {
        self.filters.clear_category(category_id)
    }

    /// Clear every selection.
    pub fn clear_all(&mut self) {
        self.filters.clear_all();
    }

    /// Drop every cached result.
    pub fn invalidate_cache(&mut self) {
        self.cache.clear();
    }

    /// Snapshot the filters and start a new cycle.
    ///
    /// Any search begun earlier becomes stale.
    pub fn begin_search(&mut self) -> PendingSearch {
        let params = self.builder.build(self.filters.states());
        let token = self.cycles.begin();
        debug!("Began search {token} for {}", params.canonical_key());
        PendingSearch { token, params }
    }

    /// Apply the outcome of `pending` unless a newer search has begun.
    ///
    /// # Errors
    ///
    /// Returns the aggregation error of a current search. Errors of stale
    /// searches are discarded like their results.
    pub fn complete(
        &mut self,
        pending: PendingSearch,
        outcome: Result<TrekResults, AggregateError>,
    ) -> Result<Completion, AggregateError> {
        if !self.cycles.is_current(pending.token) {
            debug!("Discarded stale search {}", pending.token);
            return Ok(Completion::Stale);
        }
        let results = outcome?;
        self.cache
            .insert(&pending.params, pending.token, results.clone());
        self.applied = Some((pending.token, results));
        Ok(Completion::Applied)
    }

    /// Run a search for the current filters, answering from the cache when
    /// an equal query has already succeeded.
    ///
    /// # Errors
    ///
    /// Propagates [`AggregateError`] when the primary fetch fails.
    pub async fn refresh<S: TrekSource>(
        &mut self,
        aggregator: &ResultAggregator<S>,
    ) -> Result<Completion, AggregateError> {
        let pending = self.begin_search();
        if let Some(entry) = self.cache.get(&pending.params) {
            debug!("Answered search {} from cache", pending.token);
            let cached = entry.value.clone();
            return self.complete(pending, Ok(cached));
        }
        let outcome = aggregator.fetch_trek_results(&pending.params).await;
        self.complete(pending, outcome)
    }
}
