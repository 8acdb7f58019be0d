//! Duration overrides for behavioural systems.

use crate::controller::GroupId;
use alloc::collections::BTreeMap;
use core::time::Duration;

/// A named category of configurable duration.
///
/// Each behavioural system defines its own kinds and their compiled-in
/// defaults. Kinds without a default return [`Duration::ZERO`].
pub trait TimingKind: Copy + Ord {
    /// The default used when no override is present.
    fn standard(self) -> Duration;
}

/// A keyed table of duration overrides.
///
/// Lookups resolve per-group override, then global override, then
/// [`TimingKind::standard`]. A `None` group addresses the global slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingStore<K: TimingKind> {
    overrides: BTreeMap<(Option<GroupId>, K), Duration>,
}

impl<K: TimingKind> TimingStore<K> {
    /// Creates a store with no overrides.
    pub fn new() -> Self {
        Self {
            overrides: BTreeMap::new(),
        }
    }

    /// Sets the global override for `kind`.
    pub fn set(&mut self, kind: K, duration: Duration) {
        self.overrides.insert((None, kind), duration);
    }

    /// Sets the override for `kind` on a single group.
    pub fn set_for_group(&mut self, kind: K, duration: Duration, group: GroupId) {
        self.overrides.insert((Some(group), kind), duration);
    }

    /// Removes an override, returning it if it was set.
    pub fn remove(&mut self, kind: K, group: Option<GroupId>) -> Option<Duration> {
        self.overrides.remove(&(group, kind))
    }

    pub fn clear(&mut self) {
        self.overrides.clear();
    }

    /// The override stored at exactly this slot, without fallback.
    pub fn override_for(&self, kind: K, group: Option<GroupId>) -> Option<Duration> {
        self.overrides.get(&(group, kind)).copied()
    }

    /// Resolves `kind` for `group` with the full fallback chain.
    pub fn get(&self, kind: K, group: Option<GroupId>) -> Duration {
        group
            .and_then(|group| self.override_for(kind, Some(group)))
            .or_else(|| self.override_for(kind, None))
            .unwrap_or_else(|| kind.standard())
    }

    /// Resolves `kind` with only the global override considered.
    pub fn global(&self, kind: K) -> Duration {
        self.get(kind, None)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl<K: TimingKind> Default for TimingStore<K> {
    fn default() -> Self {
        Self::new()
    }
}
