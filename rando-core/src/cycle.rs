//! Generation tokens identifying aggregation cycles.
//!
//! Each cycle takes a fresh [`CycleToken`] before its first fetch. Once the
//! cycle resolves, its result may only be applied while its token is still
//! the latest one handed out; anything older is stale and must be discarded.

use std::fmt;

/// Monotonically increasing identifier of one aggregation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CycleToken(u64);

impl CycleToken {
    /// Raw generation number.
    pub fn generation(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CycleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cycle #{}", self.0)
    }
}

/// Hands out cycle tokens and answers whether a token is still current.
///
/// # Examples
/// ```
/// use rando_core::CycleTracker;
///
/// let mut tracker = CycleTracker::new();
/// let first = tracker.begin();
/// let second = tracker.begin();
/// assert!(!tracker.is_current(first));
/// assert!(tracker.is_current(second));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CycleTracker {
    latest: Option<CycleToken>,
}

impl CycleTracker {
    /// A tracker that has not started any cycle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new cycle, superseding every earlier token.
    pub fn begin(&mut self) -> CycleToken {
        let next = self
            .latest
            .map_or(CycleToken(1), |CycleToken(n)| CycleToken(n.saturating_add(1)));
        self.latest = Some(next);
        next
    }

    /// Whether `token` belongs to the most recently started cycle.
    pub fn is_current(&self, token: CycleToken) -> bool {
        self.latest == Some(token)
    }

    /// The most recently issued token.
    pub fn latest(&self) -> Option<CycleToken> {
        self.latest
    }
}
