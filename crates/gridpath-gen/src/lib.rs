//! Obstacle generation for gridpath scenarios.

pub mod obstacles;

pub use obstacles::{GenConfig, GenError, ObstacleGen};
