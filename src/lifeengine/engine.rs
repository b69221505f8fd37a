//! LifeEngine core: live-cell storage, stepping and outcome classification.

use super::config::LifeConfig;
use super::coord::{Bounds, Coordinate};
use super::hash::CellSet;
use super::history::History;
use super::outcome::Outcome;
use super::rules::next_generation;
use super::snapshot::Snapshot;
use crate::error::LifeError;

/// Conway's Game of Life (B3/S23) on an unbounded lattice.
///
/// Holds the live cells, a generation counter reset by every editing call,
/// the outcome of the latest step and a bounded window of recent snapshots
/// used to spot cycles. Each instance is independent; there is no shared
/// state between engines.
#[derive(Clone, Debug)]
pub struct LifeEngine {
    live: CellSet,
    generation: u64,
    outcome: Outcome,
    history: History,
    config: LifeConfig,
}

impl Default for LifeEngine {
    fn default() -> Self {
        Self::empty()
    }
}

impl LifeEngine {
    /// Engine seeded with `cells`, keeping up to `history_limit` snapshots.
    ///
    /// Fails with [`LifeError::InvalidHistoryLimit`] when `history_limit <= 1`.
    pub fn new<I>(cells: I, history_limit: usize) -> Result<Self, LifeError>
    where
        I: IntoIterator,
        I::Item: Into<Coordinate>,
    {
        Self::with_config(cells, LifeConfig::default().history_limit(history_limit))
    }

    /// Create an engine with explicit configuration.
    pub fn with_config<I>(cells: I, config: LifeConfig) -> Result<Self, LifeError>
    where
        I: IntoIterator,
        I::Item: Into<Coordinate>,
    {
        if config.history_limit <= 1 {
            return Err(LifeError::InvalidHistoryLimit {
                limit: config.history_limit,
            });
        }
        let live: CellSet = cells.into_iter().map(Into::into).collect();
        let history = History::new(config.history_limit, Snapshot::from(&live));
        Ok(Self {
            live,
            generation: 0,
            outcome: Outcome::Advanced,
            history,
            config,
        })
    }

    /// Empty universe with the default history limit.
    pub fn empty() -> Self {
        let config = LifeConfig::default();
        Self {
            live: CellSet::default(),
            generation: 0,
            outcome: Outcome::Advanced,
            history: History::new(config.history_limit, Snapshot::empty()),
            config,
        }
    }

    /// Editing calls discard the run so far: generation 0, resting outcome,
    /// history holding only the edited board.
    fn reset_simulation(&mut self) {
        if self.generation > 0 {
            tracing::debug!(
                discarded_generations = self.generation,
                population = self.live.len(),
                "board edited, simulation reset"
            );
        }
        self.generation = 0;
        self.outcome = Outcome::Advanced;
        self.history.reset(Snapshot::from(&self.live));
    }

    #[inline]
    pub fn is_alive(&self, cell: impl Into<Coordinate>) -> bool {
        self.live.contains(&cell.into())
    }

    /// Make `cell` live or dead. Returns whether membership changed; when it
    /// did not, nothing is reset.
    pub fn set_alive(&mut self, alive: bool, cell: impl Into<Coordinate>) -> bool {
        let cell = cell.into();
        let changed = if alive {
            self.live.insert(cell)
        } else {
            self.live.remove(&cell)
        };
        if changed {
            self.reset_simulation();
        }
        changed
    }

    /// Flip `cell` and reset. Returns the cell's new state.
    pub fn toggle(&mut self, cell: impl Into<Coordinate>) -> bool {
        let cell = cell.into();
        let alive = if self.live.remove(&cell) {
            false
        } else {
            self.live.insert(cell);
            true
        };
        self.reset_simulation();
        alive
    }

    /// Batch-set many live cells, resetting once if any was newly added.
    /// Returns the number of cells that were not already alive.
    pub fn insert<I>(&mut self, cells: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Coordinate>,
    {
        let mut added = 0;
        for cell in cells {
            if self.live.insert(cell.into()) {
                added += 1;
            }
        }
        if added > 0 {
            self.reset_simulation();
        }
        added
    }

    /// Batch-kill many cells, resetting once if any was alive.
    /// Returns the number of cells removed.
    pub fn remove<I>(&mut self, cells: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Coordinate>,
    {
        let mut removed = 0;
        for cell in cells {
            if self.live.remove(&cell.into()) {
                removed += 1;
            }
        }
        if removed > 0 {
            self.reset_simulation();
        }
        removed
    }

    /// Kill every cell. No-op on an empty board.
    pub fn clear(&mut self) {
        if self.live.is_empty() {
            return;
        }
        self.live.clear();
        self.reset_simulation();
    }

    /// Advance one generation and classify the transition.
    pub fn step(&mut self) -> Outcome {
        let backend = self.config.backend_for(self.live.len());
        let next = next_generation(&self.live, backend);
        let next_snapshot = Snapshot::from(&next);
        let outcome = self.classify(&next, &next_snapshot);

        self.live = next;
        self.generation += 1;
        if outcome.is_terminal() && !self.outcome.is_terminal() {
            tracing::debug!(
                generation = self.generation,
                population = self.live.len(),
                %outcome,
                "simulation settled"
            );
        }
        self.outcome = outcome;
        self.history.push(next_snapshot);

        tracing::trace!(
            generation = self.generation,
            population = self.live.len(),
            ?backend,
            %outcome,
            "step"
        );
        outcome
    }

    /// Must run before `next` is committed: compares against the current
    /// board and the history as it stands before the append.
    fn classify(&self, next: &CellSet, next_snapshot: &Snapshot) -> Outcome {
        if next.is_empty() {
            return Outcome::Extinct;
        }
        if *next == self.live {
            return Outcome::Static;
        }
        match self.history.distance_to(next_snapshot) {
            Some(period) if period > 1 => Outcome::Cycled { period },
            _ => Outcome::Advanced,
        }
    }

    /// Run `n` steps and return the last outcome, or the current one when
    /// `n == 0`. Terminal outcomes do not stop the run.
    pub fn step_n(&mut self, n: u64) -> Outcome {
        for _ in 0..n {
            self.step();
        }
        self.outcome
    }

    /// Smallest rectangle holding every live cell, `None` when empty.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.live.iter().copied())
    }

    #[inline]
    pub fn live_cells(&self) -> &CellSet {
        &self.live
    }

    /// Visit live cells in canonical (row-major) order.
    pub fn for_each_live<F: FnMut(Coordinate)>(&self, mut f: F) {
        for &cell in self.snapshot().cells() {
            f(cell);
        }
    }

    /// Canonical form of the current board.
    pub fn snapshot(&self) -> Snapshot {
        match self.history.latest() {
            Some(latest) => latest.clone(),
            None => Snapshot::from(&self.live),
        }
    }

    #[inline]
    pub fn population(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Outcome of the latest step; `Advanced` after construction or an edit.
    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[inline]
    pub fn history_limit(&self) -> usize {
        self.history.limit()
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn config(&self) -> &LifeConfig {
        &self.config
    }
}
