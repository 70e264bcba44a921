use std::ops::Deref;

use gridpath_core::{Grid, Location};

/// An ordered run of locations from start to goal, both inclusive.
///
/// A path always holds at least one location: when start and goal coincide
/// it is just that cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Location>", into = "Vec<Location>")
)]
pub struct Path(pub(crate) Vec<Location>);

impl Path {
    /// Wrap a sequence of locations. Returns `None` for an empty sequence.
    pub fn new(locations: Vec<Location>) -> Option<Self> {
        if locations.is_empty() {
            None
        } else {
            Some(Self(locations))
        }
    }

    /// First location.
    #[inline]
    pub fn start(&self) -> Location {
        self.0[0]
    }

    /// Last location.
    #[inline]
    pub fn goal(&self) -> Location {
        self.0[self.0.len() - 1]
    }

    /// Number of moves, one less than the number of cells.
    #[inline]
    pub fn steps(&self) -> usize {
        self.0.len() - 1
    }

    #[inline]
    pub fn as_slice(&self) -> &[Location] {
        &self.0
    }

    #[inline]
    pub fn into_vec(self) -> Vec<Location> {
        self.0
    }

    /// Whether every consecutive pair is adjacent and every cell after the
    /// start is traversable on `grid` right now.
    pub fn is_valid_on(&self, grid: &Grid) -> bool {
        self.0.windows(2).all(|w| w[0].is_adjacent(w[1]))
            && self.0[1..].iter().all(|&l| grid.is_traversable(l))
    }

    /// The first location after the start that is no longer traversable.
    pub fn first_blocked(&self, grid: &Grid) -> Option<Location> {
        self.0[1..].iter().copied().find(|&l| !grid.is_traversable(l))
    }
}

impl Deref for Path {
    type Target = [Location];

    fn deref(&self) -> &[Location] {
        &self.0
    }
}

impl From<Path> for Vec<Location> {
    fn from(p: Path) -> Self {
        p.0
    }
}

impl TryFrom<Vec<Location>> for Path {
    type Error = &'static str;

    fn try_from(locations: Vec<Location>) -> Result<Self, Self::Error> {
        Self::new(locations).ok_or("a path needs at least one location")
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locs(v: &[(i32, i32)]) -> Vec<Location> {
        v.iter().map(|&p| Location::from(p)).collect()
    }

    #[test]
    fn empty_is_not_a_path() {
        assert!(Path::new(Vec::new()).is_none());
    }

    #[test]
    fn endpoints_and_steps() {
        let p = Path::new(locs(&[(0, 0), (0, 1), (1, 1)])).unwrap();
        assert_eq!(p.start(), Location::new(0, 0));
        assert_eq!(p.goal(), Location::new(1, 1));
        assert_eq!(p.len(), 3);
        assert_eq!(p.steps(), 2);
        assert!(p.contains(&Location::new(0, 1)));
    }

    #[test]
    fn single_cell_path() {
        let p = Path::new(vec![Location::new(2, 2)]).unwrap();
        assert_eq!(p.start(), p.goal());
        assert_eq!(p.steps(), 0);
    }

    #[test]
    fn validity_checks_adjacency_and_live_state() {
        let mut grid = Grid::new(3, 3);
        let p = Path::new(locs(&[(0, 0), (0, 1), (0, 2)])).unwrap();
        assert!(p.is_valid_on(&grid));
        assert_eq!(p.first_blocked(&grid), None);

        grid.block(Location::new(0, 2));
        assert!(!p.is_valid_on(&grid));
        assert_eq!(p.first_blocked(&grid), Some(Location::new(0, 2)));

        let jump = Path::new(locs(&[(0, 0), (1, 1)])).unwrap();
        assert!(!jump.is_valid_on(&Grid::new(3, 3)));
    }

    #[test]
    fn blocked_start_is_allowed() {
        let mut grid = Grid::new(1, 2);
        grid.block(Location::new(0, 0));
        let p = Path::new(locs(&[(0, 0), (0, 1)])).unwrap();
        assert!(p.is_valid_on(&grid));
    }
}
