//! Canonical board snapshots.

use std::sync::Arc;

use super::coord::Coordinate;
use super::hash::CellSet;

/// Immutable canonical form of a board: its live cells sorted row-major.
///
/// Two snapshots are equal, and hash equal, iff they hold the same cells,
/// regardless of the order the cells were inserted into the source set.
/// Clones share the cell buffer.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snapshot {
    cells: Arc<[Coordinate]>,
}

impl Snapshot {
    /// Snapshot of an empty board.
    pub fn empty() -> Self {
        Self::from_vec(Vec::new())
    }

    fn from_vec(mut cells: Vec<Coordinate>) -> Self {
        cells.sort_unstable();
        cells.dedup();
        Self {
            cells: cells.into(),
        }
    }

    /// Sorted live cells.
    #[inline]
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<&CellSet> for Snapshot {
    fn from(set: &CellSet) -> Self {
        Self::from_vec(set.iter().copied().collect())
    }
}

impl FromIterator<Coordinate> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}
