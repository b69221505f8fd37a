//! Unbounded Conway's Game of Life engine (B3/S23) with still-life,
//! extinction and cycle detection.

pub mod error;
pub mod lifeengine;

pub use error::LifeError;
pub use lifeengine::{Bounds, Coordinate, LifeConfig, LifeEngine, Outcome, Snapshot};
