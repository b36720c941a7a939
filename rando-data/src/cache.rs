//! Cycle-aware cache of aggregated results.
//!
//! Entries are keyed by [`QueryParams::canonical_key`] and remember the
//! [`CycleToken`] of the search that produced them. An insert from an older
//! cycle never overwrites a newer entry, so a late response cannot replace a
//! fresher one.
//!
//! A cache may be bounded. Once full, storing a new query evicts the entry
//! written by the oldest cycle.

use std::collections::HashMap;

use log::debug;
use rando_core::{CycleToken, QueryParams};

/// A cached value and the cycle that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    /// Cached value.
    pub value: T,
    /// Cycle that produced the value.
    pub token: CycleToken,
}

/// Results keyed by canonical query.
#[derive(Debug, Clone)]
pub struct ResultCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    capacity: Option<usize>,
}

impl<T> Default for ResultCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            capacity: None,
        }
    }
}

impl<T> ResultCache<T> {
    /// An empty, unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty cache holding at most `capacity` queries.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            capacity: Some(capacity.max(1)),
        }
    }

    /// Maximum number of queries kept, if bounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Entry cached for `params`.
    pub fn get(&self, params: &QueryParams) -> Option<&CacheEntry<T>> {
        self.entries.get(&params.canonical_key())
    }

    /// Store `value` for `params` unless a newer cycle already did.
    ///
    /// Returns whether the value was stored.
    ///
    /// # Examples
    /// ```
    /// use rando_core::{CycleTracker, QueryParams};
    /// use rando_data::cache::ResultCache;
    ///
    /// let mut cycles = CycleTracker::new();
    /// let older = cycles.begin();
    /// let newer = cycles.begin();
    /// let params = QueryParams::new().with("language", "fr");
    ///
    /// let mut cache = ResultCache::new();
    /// assert!(cache.insert(&params, newer, "fresh"));
    /// assert!(!cache.insert(&params, older, "late"));
    /// assert_eq!(cache.get(&params).map(|entry| entry.value), Some("fresh"));
    /// ```
    pub fn insert(&mut self, params: &QueryParams, token: CycleToken, value: T) -> bool {
        let key = params.canonical_key();
        if let Some(existing) = self.entries.get(&key) {
            if existing.token > token {
                debug!("Ignored {token} result for {key}: cached from {}", existing.token);
                return false;
            }
        } else {
            self.evict_for_insert();
        }
        self.entries.insert(key, CacheEntry { value, token });
        true
    }

    fn evict_for_insert(&mut self) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while self.entries.len() >= capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.token)
                .map(|(key, _)| key.clone());
            let Some(oldest) = oldest else {
                return;
            };
            debug!("Evicted cached result for {oldest}");
            self.entries.remove(&oldest);
        }
    }

    /// Drop the entry for `params`.
    pub fn invalidate(&mut self, params: &QueryParams) -> Option<CacheEntry<T>> {
        self.entries.remove(&params.canonical_key())
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached queries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rando_core::CycleTracker;
    use rstest::{fixture, rstest};

    #[fixture]
    fn params() -> QueryParams {
        QueryParams::new()
            .with("language", "fr")
            .with("themes", vec!["7".to_string()])
    }

    #[rstest]
    fn equal_params_share_an_entry(params: QueryParams) {
        let mut cycles = CycleTracker::new();
        let mut cache = ResultCache::new();
        cache.insert(&params, cycles.begin(), 1);

        let rebuilt = QueryParams::new()
            .with("language", "fr")
            .with("themes", vec!["7".to_string()]);
        assert_eq!(cache.get(&rebuilt).map(|entry| entry.value), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[rstest]
    fn newer_cycles_replace_entries(params: QueryParams) {
        let mut cycles = CycleTracker::new();
        let first = cycles.begin();
        let second = cycles.begin();
        let mut cache = ResultCache::new();

        assert!(cache.insert(&params, first, "first"));
        assert!(cache.insert(&params, second, "second"));
        let entry = cache.get(&params).expect("cached");
        assert_eq!(entry.value, "second");
        assert_eq!(entry.token, second);
    }

    #[rstest]
    fn bounded_cache_evicts_the_oldest_cycle(params: QueryParams) {
        let mut cycles = CycleTracker::new();
        let mut cache = ResultCache::with_capacity(2);
        let other = QueryParams::new().with("language", "en");
        let third = QueryParams::new().with("language", "it");

        cache.insert(&params, cycles.begin(), 1);
        cache.insert(&other, cycles.begin(), 2);
        cache.insert(&third, cycles.begin(), 3);

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&params).is_none());
        assert_eq!(cache.get(&other).map(|entry| entry.value), Some(2));
        assert_eq!(cache.get(&third).map(|entry| entry.value), Some(3));
    }

    #[rstest]
    fn replacing_an_entry_does_not_evict(params: QueryParams) {
        let mut cycles = CycleTracker::new();
        let mut cache = ResultCache::with_capacity(2);
        let other = QueryParams::new().with("language", "en");

        cache.insert(&params, cycles.begin(), 1);
        cache.insert(&other, cycles.begin(), 2);
        cache.insert(&params, cycles.begin(), 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&other).map(|entry| entry.value), Some(2));
        assert_eq!(cache.get(&params).map(|entry| entry.value), Some(3));
    }

    #[rstest]
    fn invalidate_and_clear_drop_entries(params: QueryParams) {
        let mut cycles = CycleTracker::new();
        let mut cache = ResultCache::new();
        cache.insert(&params, cycles.begin(), 1);
        cache.insert(&QueryParams::new(), cycles.begin(), 2);

        assert!(cache.invalidate(&params).is_some());
        assert!(cache.get(&params).is_none());
        cache.clear();
        assert!(cache.is_empty());
    }
}
