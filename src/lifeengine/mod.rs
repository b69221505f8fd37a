//! LifeEngine internals and public API.

mod config;
mod coord;
mod engine;
mod hash;
mod history;
mod outcome;
mod rules;
mod snapshot;

pub use config::{
    CountBackend, DEFAULT_HISTORY_LIMIT, DEFAULT_PARALLEL_THRESHOLD, LifeConfig,
    parallel_switch_from_env,
};
pub use coord::{Bounds, Coordinate};
pub use engine::LifeEngine;
pub use hash::{CellSet, CoordBuildHasher};
pub use history::History;
pub use outcome::Outcome;
pub use rules::RuleTable;
pub use snapshot::Snapshot;
