//! Random obstacle placement.
//!
//! - **Scatter**: blocks each open cell independently with a fixed
//!   probability (the maze variant's "sparseness").
//! - **Drops**: blocks one random open cell at a time, for obstacles that
//!   appear while an agent is already moving.
//! - **Solvable layouts**: scatters repeatedly until the goal is reachable.

use gridpath_core::{CellState, ConfigError, Grid, Location, Scenario, ScenarioConfig};
use gridpath_search::{Path, find_grid_path};
use rand::{Rng, RngExt};
use thiserror::Error;

/// Parameters for [`ObstacleGen::solvable`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenConfig {
    /// Probability in `[0, 1]` that an open cell becomes blocked.
    pub sparseness: f64,
    /// How many layouts to try before giving up.
    pub attempts: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            sparseness: 0.2,
            attempts: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("sparseness must be within [0, 1], got {0}")]
    InvalidSparseness(f64),

    #[error("no layout with a route to the goal after {attempts} attempts")]
    Unsolvable { attempts: usize },
}

/// Obstacle generator driven by a caller-supplied RNG.
pub struct ObstacleGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> ObstacleGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Block each `Open` cell with probability `sparseness`, leaving the
    /// cells in `keep` untouched. Start and goal markers are never blocked.
    ///
    /// Returns the number of cells blocked.
    pub fn scatter(&mut self, grid: &mut Grid, sparseness: f64, keep: &[Location]) -> usize {
        let mut placed = 0;
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let loc = Location::new(row, col);
                if grid.state(loc) != Some(CellState::Open) || keep.contains(&loc) {
                    continue;
                }
                if self.rng.random::<f64>() < sparseness {
                    grid.block(loc);
                    placed += 1;
                }
            }
        }
        placed
    }

    /// Block the in-bounds `Open` cells around `center`, cutting it off
    /// from its four neighbours. Returns the number of cells blocked.
    pub fn seal(&mut self, grid: &mut Grid, center: Location) -> usize {
        let mut placed = 0;
        for loc in center.neighbors_4() {
            if grid.state(loc) == Some(CellState::Open) {
                grid.block(loc);
                placed += 1;
            }
        }
        placed
    }

    /// A uniformly chosen `Open` cell, or `None` if there is none.
    pub fn random_open(&mut self, grid: &Grid) -> Option<Location> {
        let open: Vec<Location> = grid
            .iter()
            .filter(|&(_, s)| s == CellState::Open)
            .map(|(loc, _)| loc)
            .collect();
        self.pick(&open)
    }

    /// Block a random `Open` cell not listed in `avoid`. Returns the cell.
    pub fn drop_block(&mut self, grid: &mut Grid, avoid: &[Location]) -> Option<Location> {
        let candidates: Vec<Location> = grid
            .iter()
            .filter(|&(loc, s)| s == CellState::Open && !avoid.contains(&loc))
            .map(|(loc, _)| loc)
            .collect();
        let loc = self.pick(&candidates)?;
        grid.block(loc);
        Some(loc)
    }

    /// Block a random `Open` cell among `candidates`, skipping those in
    /// `avoid`. Returns the cell.
    pub fn drop_block_among(
        &mut self,
        grid: &mut Grid,
        candidates: impl IntoIterator<Item = Location>,
        avoid: &[Location],
    ) -> Option<Location> {
        let candidates: Vec<Location> = candidates
            .into_iter()
            .filter(|&loc| grid.state(loc) == Some(CellState::Open) && !avoid.contains(&loc))
            .collect();
        let loc = self.pick(&candidates)?;
        grid.block(loc);
        Some(loc)
    }

    /// Build `config` and scatter obstacles over it until the goal is
    /// reachable from the start.
    ///
    /// Returns the scenario together with its shortest path.
    pub fn solvable(
        &mut self,
        config: &ScenarioConfig,
        gen_config: &GenConfig,
    ) -> Result<(Scenario, Path), GenError> {
        if !(0.0..=1.0).contains(&gen_config.sparseness) {
            return Err(GenError::InvalidSparseness(gen_config.sparseness));
        }
        let base = config.build()?;
        let keep = [base.start, base.goal];

        for attempt in 1..=gen_config.attempts {
            let mut scenario = base.clone();
            self.scatter(&mut scenario.grid, gen_config.sparseness, &keep);
            if let Some(path) = find_grid_path(&scenario.grid, scenario.start, scenario.goal) {
                return Ok((scenario, path));
            }
            log::debug!(
                "layout {attempt} has no route from {} to {}, regenerating",
                base.start,
                base.goal
            );
        }

        Err(GenError::Unsolvable {
            attempts: gen_config.attempts,
        })
    }

    fn pick(&mut self, from: &[Location]) -> Option<Location> {
        if from.is_empty() {
            return None;
        }
        Some(from[self.rng.random_range(0..from.len())])
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn gen_config_round_trip() {
        let cfg = GenConfig {
            sparseness: 0.35,
            attempts: 7,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GenConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
