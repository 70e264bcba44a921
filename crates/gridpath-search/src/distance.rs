use gridpath_core::Location;

/// Manhattan (L1) distance between two locations.
///
/// Admissible and consistent for 4-way movement with unit step cost.
#[inline]
pub fn manhattan(a: Location, b: Location) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// The Manhattan heuristic bound to `goal`, in the shape [`find_path`]
/// expects.
///
/// [`find_path`]: crate::find_path
#[inline]
pub fn manhattan_to(goal: Location) -> impl Fn(Location) -> i32 + Copy {
    move |loc| manhattan(loc, goal)
}
