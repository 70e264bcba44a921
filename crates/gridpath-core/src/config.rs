//! Scenario setup: grid dimensions, endpoints and initial obstacles.
//!
//! A [`ScenarioConfig`] is validated once by [`ScenarioConfig::build`]; a
//! [`Scenario`] that comes out of it always has both endpoints inside the
//! grid and traversable.

use crate::error::ConfigError;
use crate::geom::Location;
use crate::grid::{CellState, Grid};

/// Configuration for a [`Scenario`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioConfig {
    pub rows: i32,
    pub cols: i32,
    pub start: Location,
    pub goal: Location,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocked: Vec<Location>,
}

impl ScenarioConfig {
    /// A `rows × cols` setup going from the top-left to the bottom-right
    /// corner with nothing blocked.
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows,
            cols,
            start: Location::ORIGIN,
            goal: Location::new(rows - 1, cols - 1),
            blocked: Vec::new(),
        }
    }

    pub fn with_start(mut self, start: Location) -> Self {
        self.start = start;
        self
    }

    pub fn with_goal(mut self, goal: Location) -> Self {
        self.goal = goal;
        self
    }

    /// Add initially blocked cells.
    pub fn with_blocked(mut self, blocked: impl IntoIterator<Item = Location>) -> Self {
        self.blocked.extend(blocked);
        self
    }

    /// Validate the setup and build the grid.
    pub fn build(&self) -> Result<Scenario, ConfigError> {
        if self.rows <= 0 || self.cols <= 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let mut grid = Grid::new(self.rows, self.cols);
        if !grid.contains(self.start) {
            return Err(ConfigError::StartOutOfBounds(self.start));
        }
        if !grid.contains(self.goal) {
            return Err(ConfigError::GoalOutOfBounds(self.goal));
        }
        for &loc in &self.blocked {
            if !grid.contains(loc) {
                return Err(ConfigError::BlockedOutOfBounds(loc));
            }
            if loc == self.start {
                return Err(ConfigError::StartBlocked(loc));
            }
            if loc == self.goal {
                return Err(ConfigError::GoalBlocked(loc));
            }
            grid.block(loc);
        }
        grid.set_state(self.start, CellState::Start);
        grid.set_state(self.goal, CellState::Goal);
        Ok(Scenario {
            grid,
            start: self.start,
            goal: self.goal,
        })
    }
}

/// A validated grid with its two endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub grid: Grid,
    pub start: Location,
    pub goal: Location,
}

impl Scenario {
    /// Parse an ASCII map: `.` open, `#` blocked, `S` start, `G` goal.
    ///
    /// Blank lines and surrounding whitespace are ignored. `S` and `G` must
    /// each appear exactly once.
    ///
    /// ```
    /// use gridpath_core::{Location, Scenario};
    ///
    /// let s = Scenario::from_ascii("S.#\n..G").unwrap();
    /// assert_eq!(s.start, Location::new(0, 0));
    /// assert_eq!(s.goal, Location::new(1, 2));
    /// assert!(!s.grid.is_traversable(Location::new(0, 2)));
    /// ```
    pub fn from_ascii(text: &str) -> Result<Self, ConfigError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: rows as i32,
                cols: cols as i32,
            });
        }

        let mut config = ScenarioConfig::new(rows as i32, cols as i32);
        let mut start = None;
        let mut goal = None;
        for (r, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(ConfigError::RaggedRows {
                    row: r,
                    expected: cols,
                    found,
                });
            }
            for (c, ch) in line.chars().enumerate() {
                let loc = Location::new(r as i32, c as i32);
                match CellState::from_char(ch) {
                    Some(CellState::Open) => {}
                    Some(CellState::Blocked) => config.blocked.push(loc),
                    Some(CellState::Start) => {
                        if start.replace(loc).is_some() {
                            return Err(ConfigError::DuplicateMarker(ch));
                        }
                    }
                    Some(CellState::Goal) => {
                        if goal.replace(loc).is_some() {
                            return Err(ConfigError::DuplicateMarker(ch));
                        }
                    }
                    None => return Err(ConfigError::UnknownCell { ch, row: r, col: c }),
                }
            }
        }

        config.start = start.ok_or(ConfigError::MissingMarker(CellState::Start.as_char()))?;
        config.goal = goal.ok_or(ConfigError::MissingMarker(CellState::Goal.as_char()))?;
        config.build()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_from_json() {
        let json = r#"{
            "rows": 4,
            "cols": 4,
            "start": {"row": 0, "col": 0},
            "goal": {"row": 3, "col": 3},
            "blocked": [{"row": 1, "col": 1}]
        }"#;
        let cfg: ScenarioConfig = serde_json::from_str(json).unwrap();
        let s = cfg.build().unwrap();
        assert!(!s.grid.is_traversable(Location::new(1, 1)));
    }

    #[test]
    fn blocked_defaults_to_empty() {
        let json = r#"{"rows": 2, "cols": 2,
            "start": {"row": 0, "col": 0}, "goal": {"row": 1, "col": 1}}"#;
        let cfg: ScenarioConfig = serde_json::from_str(json).unwrap();
        assert!(cfg.blocked.is_empty());
    }

    #[test]
    fn grid_round_trip() {
        let s = Scenario::from_ascii("S#\n.G").unwrap();
        let json = serde_json::to_string(&s.grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s.grid);
    }
}
