//! Keeps an agent's active path usable while the grid changes under it.
//!
//! The game loop calls [`Replanner::advance`] once per tick. The replanner
//! pops the next cell of the active path, checks it against the live grid,
//! and either moves the agent or searches again from the agent's last
//! confirmed cell. A failed search leaves the replanner in
//! [`PlanState::Failed`]; it does not retry on its own.

use std::collections::VecDeque;

use gridpath_core::{Grid, Location};

use crate::astar::find_grid_path;
use crate::path::Path;

/// When the active path is checked for newly blocked cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplanPolicy {
    /// Only the cell about to be entered is checked.
    #[default]
    OnStep,
    /// Every remaining cell is checked each tick, so the agent turns away
    /// as soon as anything ahead is blocked.
    Lookahead,
}

/// Configuration for a [`Replanner`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplannerConfig {
    pub policy: ReplanPolicy,
}

/// Where the replanner is in its cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlanState {
    /// No path has been requested.
    #[default]
    Idle,
    /// An active path has cells left to walk.
    HasPath,
    /// The agent stands on the goal.
    Reached,
    /// The last search found no route. Waits for a new request.
    Failed,
}

/// What happened during one [`Replanner::advance`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The agent entered this cell.
    Moved(Location),
    /// The agent entered the goal.
    Arrived(Location),
    /// The path ahead was blocked; this replacement starts at the agent's
    /// current cell. The agent did not move.
    Replanned(Path),
    /// The path ahead was blocked and no other route exists.
    NotFound,
    /// Nothing to do: no active path.
    Idle,
}

/// Holds an agent's active path and replaces it when it goes stale.
#[derive(Debug, Clone, Default)]
pub struct Replanner {
    config: ReplannerConfig,
    state: PlanState,
    position: Option<Location>,
    goal: Option<Location>,
    remaining: VecDeque<Location>,
    replans: u32,
}

impl Replanner {
    pub fn new(config: ReplannerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn state(&self) -> PlanState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> ReplannerConfig {
        self.config
    }

    /// The agent's last confirmed cell.
    #[inline]
    pub fn position(&self) -> Option<Location> {
        self.position
    }

    #[inline]
    pub fn goal(&self) -> Option<Location> {
        self.goal
    }

    /// Cells still to walk, excluding the current position.
    pub fn remaining(&self) -> impl Iterator<Item = Location> + '_ {
        self.remaining.iter().copied()
    }

    /// Number of replans since the last [`request_path`](Self::request_path).
    #[inline]
    pub fn replans(&self) -> u32 {
        self.replans
    }

    /// Drop the active path and forget the agent.
    pub fn clear(&mut self) {
        self.state = PlanState::Idle;
        self.position = None;
        self.goal = None;
        self.remaining.clear();
        self.replans = 0;
    }

    /// Search for a path from `from` to `goal` and make it the active one.
    ///
    /// Returns the full path, or `None` (state [`PlanState::Failed`]) if the
    /// goal is unreachable or either endpoint is outside the grid.
    pub fn request_path(&mut self, grid: &Grid, from: Location, goal: Location) -> Option<Path> {
        self.position = Some(from);
        self.goal = Some(goal);
        self.replans = 0;
        self.plan(grid, from, goal)
    }

    /// Search again from the current position toward a new goal.
    ///
    /// Returns `None` without searching when no agent position is known.
    pub fn retarget(&mut self, grid: &Grid, goal: Location) -> Option<Path> {
        let from = self.position?;
        self.goal = Some(goal);
        self.plan(grid, from, goal)
    }

    /// Move the agent one cell along the active path, replanning if the
    /// path ahead has become blocked.
    pub fn advance(&mut self, grid: &Grid) -> Step {
        if self.state != PlanState::HasPath {
            return Step::Idle;
        }
        let (Some(position), Some(goal)) = (self.position, self.goal) else {
            return Step::Idle;
        };

        if self.config.policy == ReplanPolicy::Lookahead {
            if let Some(blocked) = self
                .remaining
                .iter()
                .copied()
                .find(|&l| !grid.is_traversable(l))
            {
                return self.replan(grid, position, goal, blocked);
            }
        }

        // `plan` only leaves `HasPath` behind with cells still to walk.
        debug_assert!(!self.remaining.is_empty());
        let Some(next) = self.remaining.pop_front() else {
            return Step::Idle;
        };
        if !grid.is_traversable(next) {
            return self.replan(grid, position, goal, next);
        }

        self.position = Some(next);
        if next == goal {
            self.state = PlanState::Reached;
            self.remaining.clear();
            Step::Arrived(next)
        } else {
            Step::Moved(next)
        }
    }

    fn replan(&mut self, grid: &Grid, from: Location, goal: Location, blocked: Location) -> Step {
        self.replans += 1;
        log::debug!("{blocked} is blocked, replanning from {from} to {goal}");
        match self.plan(grid, from, goal) {
            Some(path) => Step::Replanned(path),
            None => {
                log::warn!("no route from {from} to {goal} after {blocked} was blocked");
                Step::NotFound
            }
        }
    }

    fn plan(&mut self, grid: &Grid, from: Location, goal: Location) -> Option<Path> {
        self.remaining.clear();
        match find_grid_path(grid, from, goal) {
            Some(path) => {
                self.remaining.extend(path.iter().skip(1));
                self.state = if self.remaining.is_empty() {
                    PlanState::Reached
                } else {
                    PlanState::HasPath
                };
                Some(path)
            }
            None => {
                self.state = PlanState::Failed;
                None
            }
        }
    }
}
