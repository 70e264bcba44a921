//! The [`Grid`] type: a fixed-size occupancy map of [`CellState`]s.
//!
//! The grid is owned by the game loop and mutated in place; searches borrow
//! it and always read the live state. Queries outside the grid never panic:
//! reads report "not traversable" and writes are ignored.

use std::fmt;

use crate::error::ConfigError;
use crate::geom::Location;

// ---------------------------------------------------------------------------
// CellState
// ---------------------------------------------------------------------------

/// Traversability of a single cell.
///
/// `Start` and `Goal` are markers for the agent's endpoints and are
/// traversable like `Open`. How a state looks on screen is the renderer's
/// business.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Open,
    Blocked,
    Start,
    Goal,
}

impl CellState {
    /// Whether an agent may occupy a cell in this state.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        !matches!(self, Self::Blocked)
    }

    /// The character used by the ASCII map format.
    pub const fn as_char(self) -> char {
        match self {
            Self::Open => '.',
            Self::Blocked => '#',
            Self::Start => 'S',
            Self::Goal => 'G',
        }
    }

    /// Inverse of [`as_char`](CellState::as_char).
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Open),
            '#' => Some(Self::Blocked),
            'S' => Some(Self::Start),
            'G' => Some(Self::Goal),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `rows × cols` map holding exactly one [`CellState`] per in-bounds
/// location.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr")
)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create a new grid with every cell `Open`. Negative dimensions are
    /// clamped to zero.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        Self {
            rows,
            cols,
            cells: vec![CellState::Open; rows as usize * cols as usize],
        }
    }

    /// Number of rows.
    /// Build a grid from row-major `cells`.
    ///
    /// Fails unless both dimensions are non-negative and there is exactly
    /// one cell per location.
    pub fn from_cells(rows: i32, cols: i32, cells: Vec<CellState>) -> Result<Self, ConfigError> {
        let expected = (rows >= 0 && cols >= 0).then(|| rows as usize * cols as usize);
        if expected != Some(cells.len()) {
            return Err(ConfigError::InvalidShape {
                rows,
                cols,
                cells: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `loc` lies inside the grid.
    #[inline]
    pub fn contains(&self, loc: Location) -> bool {
        loc.row >= 0 && loc.col >= 0 && loc.row < self.rows && loc.col < self.cols
    }

    #[inline]
    fn index(&self, loc: Location) -> Option<usize> {
        if self.contains(loc) {
            Some(loc.row as usize * self.cols as usize + loc.col as usize)
        } else {
            None
        }
    }

    #[inline]
    fn location(&self, idx: usize) -> Location {
        let cols = self.cols as usize;
        Location::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// The state at `loc`, or `None` if it is outside the grid.
    #[inline]
    pub fn state(&self, loc: Location) -> Option<CellState> {
        self.index(loc).map(|i| self.cells[i])
    }

    /// Whether an agent may stand on `loc` right now. Always `false` outside
    /// the grid.
    #[inline]
    pub fn is_traversable(&self, loc: Location) -> bool {
        self.state(loc).is_some_and(CellState::is_traversable)
    }

    /// Set the state at `loc`. No-op if `loc` is outside the grid.
    pub fn set_state(&mut self, loc: Location, state: CellState) {
        if let Some(i) = self.index(loc) {
            self.cells[i] = state;
        }
    }

    /// Mark `loc` as blocked.
    #[inline]
    pub fn block(&mut self, loc: Location) {
        self.set_state(loc, CellState::Blocked);
    }

    /// Mark `loc` as open again.
    #[inline]
    pub fn unblock(&mut self, loc: Location) {
        self.set_state(loc, CellState::Open);
    }

    /// Flip `loc` between open and blocked. Start and goal markers are left
    /// alone. Returns the new state, or `None` outside the grid.
    pub fn toggle(&mut self, loc: Location) -> Option<CellState> {
        let i = self.index(loc)?;
        let next = match self.cells[i] {
            CellState::Open => CellState::Blocked,
            CellState::Blocked => CellState::Open,
            marker => marker,
        };
        self.cells[i] = next;
        Some(next)
    }

    /// Reset every cell to `Open`.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Open);
    }

    /// Traversable axis-aligned neighbours of `loc`, in the order up, down,
    /// left, right. Empty when `loc` itself is outside the grid.
    pub fn neighbors(&self, loc: Location) -> impl Iterator<Item = Location> + '_ {
        self.contains(loc)
            .then(|| loc.neighbors_4())
            .into_iter()
            .flatten()
            .filter(move |&n| self.is_traversable(n))
    }

    /// Row-major iterator over every location in the grid.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.cells.len()).map(move |i| self.location(i))
    }

    /// Row-major iterator over `(Location, CellState)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Location, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &s)| (self.location(i), s))
    }

    /// Locations of every blocked cell, row-major.
    pub fn blocked(&self) -> impl Iterator<Item = Location> + '_ {
        self.iter()
            .filter(|&(_, s)| s == CellState::Blocked)
            .map(|(loc, _)| loc)
    }

    /// Count the cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }
}

/// Wire form of a [`Grid`], checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    rows: i32,
    cols: i32,
    cells: Vec<CellState>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = ConfigError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        Grid::from_cells(repr.rows, repr.cols, repr.cells)
    }
}

impl fmt::Display for Grid {
    /// Renders the ASCII map format, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cols == 0 {
            return Ok(());
        }
        for row in self.cells.chunks(self.cols as usize) {
            for s in row {
                write!(f, "{}", s.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_new_is_all_open() {
        let g = Grid::new(3, 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.len(), 12);
        assert_eq!(g.count(CellState::Open), 12);
        assert!(g.locations().all(|l| g.is_traversable(l)));
    }

    #[test]
    fn negative_dimensions_clamp_to_empty() {
        let g = Grid::new(-2, 5);
        assert!(g.is_empty());
        assert!(!g.contains(Location::ORIGIN));
    }

    #[test]
    fn out_of_bounds_is_not_traversable() {
        let g = Grid::new(3, 3);
        assert!(!g.is_traversable(Location::new(-1, 0)));
        assert!(!g.is_traversable(Location::new(0, -1)));
        assert!(!g.is_traversable(Location::new(3, 0)));
        assert!(!g.is_traversable(Location::new(0, 3)));
        assert_eq!(g.state(Location::new(3, 3)), None);
    }

    #[test]
    fn set_state_out_of_bounds_is_ignored() {
        let mut g = Grid::new(2, 2);
        g.set_state(Location::new(5, 5), CellState::Blocked);
        g.block(Location::new(-1, 0));
        assert_eq!(g.count(CellState::Blocked), 0);
    }

    #[test]
    fn block_and_unblock() {
        let mut g = Grid::new(3, 3);
        let l = Location::new(1, 2);
        g.block(l);
        assert!(!g.is_traversable(l));
        assert_eq!(g.state(l), Some(CellState::Blocked));
        g.unblock(l);
        assert!(g.is_traversable(l));
    }

    #[test]
    fn markers_are_traversable() {
        let mut g = Grid::new(2, 2);
        g.set_state(Location::new(0, 0), CellState::Start);
        g.set_state(Location::new(1, 1), CellState::Goal);
        assert!(g.is_traversable(Location::new(0, 0)));
        assert!(g.is_traversable(Location::new(1, 1)));
    }

    #[test]
    fn toggle_flips_open_and_blocked_only() {
        let mut g = Grid::new(2, 2);
        let l = Location::new(0, 1);
        assert_eq!(g.toggle(l), Some(CellState::Blocked));
        assert_eq!(g.toggle(l), Some(CellState::Open));
        g.set_state(Location::ORIGIN, CellState::Start);
        assert_eq!(g.toggle(Location::ORIGIN), Some(CellState::Start));
        assert_eq!(g.toggle(Location::new(9, 9)), None);
    }

    #[test]
    fn neighbors_fixed_order() {
        let g = Grid::new(3, 3);
        let n: Vec<_> = g.neighbors(Location::new(1, 1)).collect();
        assert_eq!(
            n,
            vec![
                Location::new(0, 1),
                Location::new(2, 1),
                Location::new(1, 0),
                Location::new(1, 2),
            ]
        );
    }

    #[test]
    fn neighbors_skip_edges_and_blocked() {
        let mut g = Grid::new(3, 3);
        g.block(Location::new(1, 0));
        let n: Vec<_> = g.neighbors(Location::ORIGIN).collect();
        assert_eq!(n, vec![Location::new(0, 1)]);
    }

    #[test]
    fn neighbors_read_live_state() {
        let mut g = Grid::new(3, 3);
        let centre = Location::new(1, 1);
        assert_eq!(g.neighbors(centre).count(), 4);
        g.block(Location::new(0, 1));
        g.block(Location::new(1, 2));
        assert_eq!(g.neighbors(centre).count(), 2);
    }

    #[test]
    fn neighbors_of_outside_cell_are_empty() {
        let g = Grid::new(3, 3);
        assert_eq!(g.neighbors(Location::new(-1, 0)).count(), 0);
        assert_eq!(g.neighbors(Location::new(0, 3)).count(), 0);
        assert_eq!(g.neighbors(Location::new(i32::MAX, 0)).count(), 0);
        assert_eq!(g.neighbors(Location::new(0, i32::MIN)).count(), 0);
    }

    #[test]
    fn from_cells_checks_shape() {
        let g = Grid::from_cells(1, 2, vec![CellState::Open, CellState::Blocked]).unwrap();
        assert!(!g.is_traversable(Location::new(0, 1)));
        assert_eq!(
            Grid::from_cells(3, 3, vec![CellState::Open]),
            Err(ConfigError::InvalidShape {
                rows: 3,
                cols: 3,
                cells: 1
            })
        );
        assert!(Grid::from_cells(-1, 0, vec![]).is_err());
        assert_eq!(Grid::from_cells(0, 0, vec![]), Ok(Grid::new(0, 0)));
    }

    #[test]
    fn blocked_and_clear() {
        let mut g = Grid::new(2, 3);
        g.block(Location::new(1, 2));
        g.block(Location::new(0, 1));
        let b: Vec<_> = g.blocked().collect();
        assert_eq!(b, vec![Location::new(0, 1), Location::new(1, 2)]);
        g.clear();
        assert_eq!(g.blocked().count(), 0);
    }

    #[test]
    fn iter_is_row_major() {
        let g = Grid::new(2, 2);
        let locs: Vec<_> = g.locations().collect();
        assert_eq!(
            locs,
            vec![
                Location::new(0, 0),
                Location::new(0, 1),
                Location::new(1, 0),
                Location::new(1, 1),
            ]
        );
    }

    #[test]
    fn display_ascii() {
        let mut g = Grid::new(2, 3);
        g.set_state(Location::new(0, 0), CellState::Start);
        g.block(Location::new(0, 2));
        g.set_state(Location::new(1, 2), CellState::Goal);
        assert_eq!(g.to_string(), "S.#\n..G\n");
    }

    #[test]
    fn cell_char_round_trip() {
        for s in [
            CellState::Open,
            CellState::Blocked,
            CellState::Start,
            CellState::Goal,
        ] {
            assert_eq!(CellState::from_char(s.as_char()), Some(s));
        }
        assert_eq!(CellState::from_char('x'), None);
    }
}
