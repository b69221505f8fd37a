//! Bounded snapshot history for cycle detection.
//!
//! A deque of recent snapshots, oldest first, paired with a reference-counted
//! membership index. Eviction from the front decrements the count and only
//! drops the index entry once no remaining snapshot in the window equals the
//! evicted one, so repeated states inside the window stay findable.

use std::collections::{HashMap, VecDeque};

use super::hash::CoordBuildHasher;
use super::snapshot::Snapshot;

#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<Snapshot>,
    index: HashMap<Snapshot, usize, CoordBuildHasher>,
    limit: usize,
}

impl History {
    /// History holding only `initial`. `limit` must be greater than one.
    pub fn new(limit: usize, initial: Snapshot) -> Self {
        debug_assert!(limit > 1, "history limit must exceed 1, got {limit}");
        let mut history = Self {
            entries: VecDeque::with_capacity(limit.min(1024) + 1),
            index: HashMap::default(),
            limit,
        };
        history.push(initial);
        history
    }

    /// Drop everything and start again from `initial`.
    pub fn reset(&mut self, initial: Snapshot) {
        self.entries.clear();
        self.index.clear();
        self.push(initial);
    }

    /// Append `snapshot` as the newest entry, evicting from the front while
    /// over the limit.
    pub fn push(&mut self, snapshot: Snapshot) {
        *self.index.entry(snapshot.clone()).or_insert(0) += 1;
        self.entries.push_back(snapshot);
        while self.entries.len() > self.limit {
            self.evict_oldest();
        }
    }

    fn evict_oldest(&mut self) {
        let Some(oldest) = self.entries.pop_front() else {
            return;
        };
        if let Some(count) = self.index.get_mut(&oldest) {
            *count -= 1;
            if *count == 0 {
                self.index.remove(&oldest);
                tracing::trace!(population = oldest.len(), "snapshot left history window");
            }
        }
    }

    #[inline]
    pub fn contains(&self, snapshot: &Snapshot) -> bool {
        self.index.contains_key(snapshot)
    }

    /// Index of the newest entry equal to `snapshot`, oldest entry being 0.
    pub fn most_recent_index(&self, snapshot: &Snapshot) -> Option<usize> {
        if !self.contains(snapshot) {
            return None;
        }
        self.entries.iter().rposition(|s| s == snapshot)
    }

    /// Steps between the newest equal entry and a snapshot appended next:
    /// `len() - most_recent_index`. `None` when `snapshot` is not in the
    /// window.
    pub fn distance_to(&self, snapshot: &Snapshot) -> Option<usize> {
        self.most_recent_index(snapshot)
            .map(|idx| self.entries.len() - idx)
    }

    #[inline]
    pub fn latest(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of distinct snapshots in the window.
    #[inline]
    pub fn distinct(&self) -> usize {
        self.index.len()
    }

    /// Snapshots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::History;
    use crate::lifeengine::coord::Coordinate;
    use crate::lifeengine::snapshot::Snapshot;

    fn snap(x: i64) -> Snapshot {
        [Coordinate::new(x, 0)].into_iter().collect()
    }

    #[test]
    fn starts_with_initial_snapshot() {
        let history = History::new(4, snap(0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), Some(&snap(0)));
        assert!(history.contains(&snap(0)));
    }

    #[test]
    fn trims_oldest_beyond_limit() {
        let mut history = History::new(3, snap(0));
        for x in 1..=4 {
            history.push(snap(x));
        }
        assert_eq!(history.len(), 3);
        assert!(!history.contains(&snap(0)));
        assert!(!history.contains(&snap(1)));
        let kept: Vec<_> = history.iter().cloned().collect();
        assert_eq!(kept, vec![snap(2), snap(3), snap(4)]);
    }

    #[test]
    fn duplicate_survives_eviction_of_its_twin() {
        let mut history = History::new(3, snap(0));
        history.push(snap(1));
        history.push(snap(0));
        assert_eq!(history.distinct(), 2);

        // Evicts the first snap(0); the second copy is still in the window.
        history.push(snap(2));
        assert!(history.contains(&snap(0)));
        assert_eq!(history.most_recent_index(&snap(0)), Some(1));

        history.push(snap(3));
        assert!(!history.contains(&snap(1)));
        assert!(history.contains(&snap(0)));

        history.push(snap(4));
        assert!(!history.contains(&snap(0)));
        assert_eq!(history.distinct(), 3);
    }

    #[test]
    fn distance_uses_most_recent_match() {
        let mut history = History::new(8, snap(0));
        history.push(snap(1));
        history.push(snap(0));
        history.push(snap(1));
        // [0, 1, 0, 1]: the newest snap(0) sits at index 2.
        assert_eq!(history.most_recent_index(&snap(0)), Some(2));
        assert_eq!(history.distance_to(&snap(0)), Some(2));
        assert_eq!(history.distance_to(&snap(1)), Some(1));
        assert_eq!(history.distance_to(&snap(9)), None);
    }

    #[test]
    fn reset_forgets_everything() {
        let mut history = History::new(4, snap(0));
        history.push(snap(1));
        history.reset(snap(7));
        assert_eq!(history.len(), 1);
        assert_eq!(history.distinct(), 1);
        assert!(!history.contains(&snap(0)));
        assert_eq!(history.latest(), Some(&snap(7)));
    }
}
