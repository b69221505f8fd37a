//! Engine configuration.

/// Default number of snapshots kept for cycle detection.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Default live population at which automatic backend selection switches
/// neighbour counting onto the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 16_384;

const PARALLEL_ENV: &str = "LIFE_ENGINE_PARALLEL";

/// How neighbour occurrences are counted during a step. Both produce the
/// same next generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountBackend {
    Serial,
    Parallel,
}

/// Configuration for a [`LifeEngine`](super::LifeEngine) instance.
///
/// Use `LifeConfig::default()` for the defaults, or customise individual
/// knobs via the builder methods. `history_limit` is validated when the
/// engine is constructed, not here.
#[derive(Clone, Debug)]
pub struct LifeConfig {
    /// Maximum number of snapshots kept for cycle detection. Must be > 1.
    /// Cycles longer than this are not detected.
    pub history_limit: usize,
    /// Neighbour counting backend.
    /// `None` means pick per step: parallel once the population reaches
    /// `parallel_threshold`, if `allow_parallel` is set.
    pub backend: Option<CountBackend>,
    pub parallel_threshold: usize,
    /// Whether automatic selection may go parallel at all. Binaries set it
    /// from `LIFE_ENGINE_PARALLEL`; the engine never reads the environment.
    pub allow_parallel: bool,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            backend: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            allow_parallel: true,
        }
    }
}

impl LifeConfig {
    /// Set the number of snapshots kept for cycle detection.
    pub fn history_limit(mut self, n: usize) -> Self {
        self.history_limit = n;
        self
    }

    /// Force a specific counting backend.
    pub fn backend(mut self, backend: CountBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Population at which automatic selection goes parallel.
    pub fn parallel_threshold(mut self, n: usize) -> Self {
        self.parallel_threshold = n.max(1);
        self
    }

    /// Permit or forbid automatic parallel selection. A forced backend is
    /// unaffected.
    pub fn allow_parallel(mut self, allowed: bool) -> Self {
        self.allow_parallel = allowed;
        self
    }

    /// Apply `LIFE_ENGINE_PARALLEL` when it is set to a recognised value.
    pub fn with_env_overrides(self) -> Self {
        match parallel_switch_from_env() {
            Some(allowed) => self.allow_parallel(allowed),
            None => self,
        }
    }

    /// Resolve the backend for a step over `population` live cells.
    pub(crate) fn backend_for(&self, population: usize) -> CountBackend {
        match self.backend {
            Some(backend) => backend,
            None if self.allow_parallel && population >= self.parallel_threshold => {
                CountBackend::Parallel
            }
            None => CountBackend::Serial,
        }
    }
}

/// `LIFE_ENGINE_PARALLEL` as a switch; `None` when unset or unrecognised.
pub fn parallel_switch_from_env() -> Option<bool> {
    std::env::var(PARALLEL_ENV)
        .ok()
        .and_then(|v| parse_switch(&v))
}

fn parse_switch(v: &str) -> Option<bool> {
    let v = v.trim();
    if v == "1" || v.eq_ignore_ascii_case("true") {
        Some(true)
    } else if v == "0" || v.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
