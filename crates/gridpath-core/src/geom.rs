//! The [`Location`] coordinate type.
//!
//! A location is always written `(row, col)`: rows grow downward, columns grow
//! to the right. Every API in the workspace takes the row first.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A cell coordinate on a grid. Identity is by value.
///
/// Coordinates are signed so that stepping off the top or left edge produces
/// a location the grid can reject, instead of wrapping around.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    /// The top-left cell.
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Create a new location.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a location shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four axis-aligned neighbours, in the fixed order
    /// up, down, left, right.
    ///
    /// Search tie-breaking depends on this order; do not change it.
    #[inline]
    pub const fn neighbors_4(self) -> [Location; 4] {
        [
            self.shift(-1, 0),
            self.shift(1, 0),
            self.shift(0, -1),
            self.shift(0, 1),
        ]
    }

    /// Whether `other` is exactly one axis-aligned step away.
    #[inline]
    pub fn is_adjacent(self, other: Location) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

// --- trait impls for Location ---

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    /// Row-major ordering.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Location {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Location {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Location {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn location_arithmetic() {
        let a = Location::new(1, 2);
        let b = Location::new(3, 4);
        assert_eq!(a + b, Location::new(4, 6));
        assert_eq!(b - a, Location::new(2, 2));
        assert_eq!(a.shift(-1, 1), Location::new(0, 3));
    }

    #[test]
    fn neighbors_are_up_down_left_right() {
        let n = Location::new(2, 2).neighbors_4();
        assert_eq!(
            n,
            [
                Location::new(1, 2),
                Location::new(3, 2),
                Location::new(2, 1),
                Location::new(2, 3),
            ]
        );
    }

    #[test]
    fn neighbors_of_origin_step_off_the_grid() {
        let n = Location::ORIGIN.neighbors_4();
        assert_eq!(n[0], Location::new(-1, 0));
        assert_eq!(n[2], Location::new(0, -1));
    }

    #[test]
    fn adjacency() {
        let a = Location::new(2, 2);
        assert!(a.is_adjacent(Location::new(1, 2)));
        assert!(a.is_adjacent(Location::new(2, 3)));
        assert!(!a.is_adjacent(a));
        assert!(!a.is_adjacent(Location::new(3, 3)));
        assert!(!a.is_adjacent(Location::new(2, 4)));
    }

    #[test]
    fn ordering_is_row_major() {
        let mut v = vec![
            Location::new(1, 0),
            Location::new(0, 5),
            Location::new(0, 1),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![Location::new(0, 1), Location::new(0, 5), Location::new(1, 0)]
        );
    }

    #[test]
    fn value_identity_as_set_key() {
        let mut set = HashSet::new();
        set.insert(Location::new(3, 4));
        assert!(set.contains(&Location::from((3, 4))));
        assert!(!set.contains(&Location::new(4, 3)));
    }

    #[test]
    fn display() {
        assert_eq!(Location::new(4, 7).to_string(), "(4, 7)");
    }
}
