//! **gridpath-core**: data model for grid pathfinding.
//!
//! This crate provides the types every other *gridpath* crate builds on:
//! the [`Location`] coordinate, the [`Grid`] occupancy map with its
//! [`CellState`]s, and [`ScenarioConfig`] for validated setups.

pub mod config;
pub mod error;
pub mod geom;
pub mod grid;

pub use config::{Scenario, ScenarioConfig};
pub use error::ConfigError;
pub use geom::Location;
pub use grid::{CellState, Grid};
