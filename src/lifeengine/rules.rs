//! B3/S23 transition rule and neighbour-occurrence counting.

use rayon::prelude::*;

use super::config::CountBackend;
use super::coord::Coordinate;
use super::hash::{CellMap, CellSet};

/// Lookup of the next state, indexed by `[alive as usize][live neighbours]`.
pub struct RuleTable {
    table: [[bool; 9]; 2],
}

impl RuleTable {
    pub const B3S23: Self = Self::new();

    pub const fn new() -> Self {
        let mut table = [[false; 9]; 2];
        let mut count = 0;
        while count < 9 {
            table[0][count] = output_for(false, count as u8);
            table[1][count] = output_for(true, count as u8);
            count += 1;
        }
        Self { table }
    }

    #[inline(always)]
    pub fn lookup(&self, alive: bool, neighbors: u8) -> bool {
        self.table[alive as usize][neighbors as usize]
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

const fn output_for(alive: bool, neighbors: u8) -> bool {
    if alive {
        neighbors == 2 || neighbors == 3
    } else {
        neighbors == 3
    }
}

#[inline(always)]
fn bump_neighbors(counts: &mut CellMap<u8>, cell: Coordinate) {
    for n in cell.neighbors() {
        *counts.entry(n).or_insert(0) += 1;
    }
}

/// For every live cell, add one to each of its eight neighbours. Cells with
/// no live neighbour never appear.
pub fn count_neighbors_serial(cells: &CellSet) -> CellMap<u8> {
    let mut counts = CellMap::with_capacity_and_hasher(cells.len() * 4, Default::default());
    for &cell in cells {
        bump_neighbors(&mut counts, cell);
    }
    counts
}

/// Same result as [`count_neighbors_serial`], with per-worker partial maps
/// merged on the current rayon pool.
pub fn count_neighbors_parallel(cells: &CellSet) -> CellMap<u8> {
    cells
        .par_iter()
        .fold(CellMap::default, |mut counts, &cell| {
            bump_neighbors(&mut counts, cell);
            counts
        })
        .reduce(CellMap::default, |a, b| {
            let (mut into, from) = if a.len() >= b.len() { (a, b) } else { (b, a) };
            for (cell, n) in from {
                *into.entry(cell).or_insert(0) += n;
            }
            into
        })
}

/// Compute the generation after `cells`.
pub fn next_generation(cells: &CellSet, backend: CountBackend) -> CellSet {
    let rule = &RuleTable::B3S23;
    match backend {
        CountBackend::Serial => count_neighbors_serial(cells)
            .into_iter()
            .filter(|&(cell, n)| rule.lookup(cells.contains(&cell), n))
            .map(|(cell, _)| cell)
            .collect(),
        CountBackend::Parallel => count_neighbors_parallel(cells)
            .into_par_iter()
            .filter(|&(cell, n)| rule.lookup(cells.contains(&cell), n))
            .map(|(cell, _)| cell)
            .collect(),
    }
}
