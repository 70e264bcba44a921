//! Rendering palette and the off-screen [`Canvas`] the models draw into.
//!
//! Colours are a pure lookup from [`Paint`]; the search core never sees
//! them.

use crossterm::style::Color;
use gridpath_core::{CellState, Grid, Location};

/// What a single cell shows on screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Paint {
    #[default]
    Empty,
    Blocked,
    Start,
    Goal,
    /// Planned but not yet walked.
    Path,
    /// Already walked.
    Trail,
    Agent,
}

impl Paint {
    pub fn color(self) -> Color {
        let (r, g, b) = match self {
            Self::Empty => (5, 5, 5),
            Self::Blocked => (127, 127, 127),
            Self::Start => (250, 5, 5),
            Self::Goal => (5, 5, 250),
            Self::Path => (20, 90, 20),
            Self::Trail => (40, 200, 40),
            Self::Agent => (250, 220, 80),
        };
        Color::Rgb { r, g, b }
    }
}

impl From<CellState> for Paint {
    fn from(s: CellState) -> Self {
        match s {
            CellState::Open => Self::Empty,
            CellState::Blocked => Self::Blocked,
            CellState::Start => Self::Start,
            CellState::Goal => Self::Goal,
        }
    }
}

/// A `rows × cols` buffer of [`Paint`]s plus a status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    rows: i32,
    cols: i32,
    cells: Vec<Paint>,
    pub status: String,
}

impl Canvas {
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        Self {
            rows,
            cols,
            cells: vec![Paint::Empty; rows as usize * cols as usize],
            status: String::new(),
        }
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    fn index(&self, loc: Location) -> Option<usize> {
        if loc.row >= 0 && loc.col >= 0 && loc.row < self.rows && loc.col < self.cols {
            Some(loc.row as usize * self.cols as usize + loc.col as usize)
        } else {
            None
        }
    }

    /// Paint at `loc`; `Empty` outside the canvas.
    pub fn get(&self, loc: Location) -> Paint {
        self.index(loc).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Set the paint at `loc`. No-op outside the canvas.
    pub fn set(&mut self, loc: Location, paint: Paint) {
        if let Some(i) = self.index(loc) {
            self.cells[i] = paint;
        }
    }

    /// Paint every cell from its grid state.
    pub fn paint_grid(&mut self, grid: &Grid) {
        for (loc, state) in grid.iter() {
            self.set(loc, Paint::from(state));
        }
    }

    /// Paint `locs` with `paint`, leaving start and goal markers visible.
    pub fn paint_route(&mut self, locs: impl IntoIterator<Item = Location>, paint: Paint) {
        for loc in locs {
            if !matches!(self.get(loc), Paint::Start | Paint::Goal) {
                self.set(loc, paint);
            }
        }
    }

    /// Every cell, row-major.
    pub fn cells(&self) -> Vec<(Location, Paint)> {
        let cols = self.cols.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &p)| (Location::new((i / cols) as i32, (i % cols) as i32), p))
            .collect()
    }

    /// Cells that differ from `prev`. Everything if the sizes differ.
    pub fn diff(&self, prev: &Canvas) -> Vec<(Location, Paint)> {
        if prev.rows != self.rows || prev.cols != self.cols {
            return self.cells();
        }
        self.cells()
            .into_iter()
            .filter(|&(loc, p)| prev.get(loc) != p)
            .collect()
    }
}
