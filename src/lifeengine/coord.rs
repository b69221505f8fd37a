//! Lattice coordinates and bounding rectangles.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Moore neighbourhood offsets, the cell itself excluded.
pub(crate) const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A cell on the unbounded integer lattice.
///
/// Ordered row-major: by `y` first, then by `x`. Canonical snapshots rely on
/// this order being total and independent of insertion history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

impl Coordinate {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The surrounding cells: eight, fewer on the `i64` edges where a
    /// neighbour would not be representable.
    #[inline]
    pub fn neighbors(self) -> impl Iterator<Item = Coordinate> {
        NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dx, dy)| {
            Some(Coordinate {
                x: self.x.checked_add(dx)?,
                y: self.y.checked_add(dy)?,
            })
        })
    }
}

impl Ord for Coordinate {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Coordinate {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Coordinate {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i64(self.x);
        state.write_i64(self.y);
    }
}

impl From<(i64, i64)> for Coordinate {
    #[inline]
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl From<Coordinate> for (i64, i64) {
    #[inline]
    fn from(c: Coordinate) -> Self {
        (c.x, c.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Minimal axis-aligned rectangle enclosing every live cell. Inclusive on
/// all four edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl Bounds {
    /// Single scan over `cells`; `None` when the iterator is empty.
    pub fn enclosing<I>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut cells = cells.into_iter();
        let first = cells.next()?;
        let mut bounds = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for c in cells {
            bounds.min_x = bounds.min_x.min(c.x);
            bounds.max_x = bounds.max_x.max(c.x);
            bounds.min_y = bounds.min_y.min(c.y);
            bounds.max_y = bounds.max_y.max(c.y);
        }
        Some(bounds)
    }

    /// Number of columns covered, `max_x - min_x + 1`. Widened so a span
    /// across the whole `i64` axis (2^64 columns) still fits.
    #[inline]
    pub fn width(&self) -> u128 {
        u128::from(self.max_x.abs_diff(self.min_x)) + 1
    }

    /// Number of rows covered, `max_y - min_y + 1`.
    #[inline]
    pub fn height(&self) -> u128 {
        u128::from(self.max_y.abs_diff(self.min_y)) + 1
    }

    #[inline]
    pub fn contains(&self, c: Coordinate) -> bool {
        (self.min_x..=self.max_x).contains(&c.x) && (self.min_y..=self.max_y).contains(&c.y)
    }
}
