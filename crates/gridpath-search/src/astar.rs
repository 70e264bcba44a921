use std::collections::{BinaryHeap, HashMap};

use gridpath_core::{Grid, Location};

use crate::cancel::CancelToken;
use crate::distance::manhattan_to;
use crate::frontier::{Entry, Visit};
use crate::path::Path;

/// Result of a cancellable search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A path from the start to a location satisfying the goal test.
    Found(Path),
    /// The frontier ran dry: no such location is reachable right now.
    NotFound,
    /// The token was cancelled before the search finished.
    Cancelled,
}

impl SearchOutcome {
    /// The path, if one was found.
    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound | Self::Cancelled => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Compute a shortest path from `start` using A*.
///
/// - `goal_test` decides which locations end the search.
/// - `successors` lists the locations reachable in one unit-cost step.
/// - `heuristic` estimates the remaining cost; it must never overestimate
///   for the result to be optimal.
///
/// Returns the full path (including both endpoints), or `None` if the
/// frontier empties first. A start that already satisfies `goal_test`
/// yields a one-cell path.
///
/// ```
/// use gridpath_core::{Grid, Location};
/// use gridpath_search::{find_path, manhattan_to};
///
/// let grid = Grid::new(5, 5);
/// let goal = Location::new(4, 4);
/// let path = find_path(
///     Location::new(0, 0),
///     |l| l == goal,
///     |l| grid.neighbors(l),
///     manhattan_to(goal),
/// )
/// .unwrap();
/// assert_eq!(path.len(), 9);
/// ```
pub fn find_path<G, S, I, H>(
    start: Location,
    goal_test: G,
    successors: S,
    heuristic: H,
) -> Option<Path>
where
    G: FnMut(Location) -> bool,
    S: FnMut(Location) -> I,
    I: IntoIterator<Item = Location>,
    H: FnMut(Location) -> i32,
{
    search(start, goal_test, successors, heuristic, None).into_path()
}

/// Like [`find_path`], but gives up as soon as `cancel` is triggered.
///
/// The token is checked before every expansion. A cancelled search never
/// returns a partial path.
pub fn find_path_cancellable<G, S, I, H>(
    start: Location,
    goal_test: G,
    successors: S,
    heuristic: H,
    cancel: &CancelToken,
) -> SearchOutcome
where
    G: FnMut(Location) -> bool,
    S: FnMut(Location) -> I,
    I: IntoIterator<Item = Location>,
    H: FnMut(Location) -> i32,
{
    search(start, goal_test, successors, heuristic, Some(cancel))
}

/// Shortest path between two cells of `grid`, moving through traversable
/// cells only.
///
/// Returns `None` if either endpoint is outside the grid or the goal cannot
/// be reached under the current blocking. The start cell itself may be
/// blocked.
pub fn find_grid_path(grid: &Grid, start: Location, goal: Location) -> Option<Path> {
    if !grid.contains(start) || !grid.contains(goal) {
        return None;
    }
    find_path(start, |l| l == goal, |l| grid.neighbors(l), manhattan_to(goal))
}

fn search<G, S, I, H>(
    start: Location,
    mut goal_test: G,
    mut successors: S,
    mut heuristic: H,
    cancel: Option<&CancelToken>,
) -> SearchOutcome
where
    G: FnMut(Location) -> bool,
    S: FnMut(Location) -> I,
    I: IntoIterator<Item = Location>,
    H: FnMut(Location) -> i32,
{
    log::trace!("A* search from {start}");

    let mut visited: HashMap<Location, Visit> = HashMap::new();
    let mut open: BinaryHeap<Entry> = BinaryHeap::new();
    let mut seq: u64 = 0;
    let mut expanded: usize = 0;

    visited.insert(
        start,
        Visit {
            cost: 0,
            parent: None,
        },
    );
    open.push(Entry {
        loc: start,
        cost: 0,
        estimate: heuristic(start),
        seq,
    });

    while let Some(current) = open.pop() {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            log::debug!("A* from {start} cancelled after {expanded} expansions");
            return SearchOutcome::Cancelled;
        }

        // Skip entries superseded by a cheaper route.
        if visited
            .get(&current.loc)
            .is_some_and(|v| v.cost < current.cost)
        {
            continue;
        }

        if goal_test(current.loc) {
            let path = reconstruct(&visited, current.loc);
            log::debug!(
                "A* from {start} reached {} in {} steps after {expanded} expansions",
                current.loc,
                path.steps()
            );
            return SearchOutcome::Found(path);
        }

        expanded += 1;
        let tentative = current.cost + 1;
        for next in successors(current.loc) {
            if visited.get(&next).is_some_and(|v| tentative >= v.cost) {
                continue;
            }
            visited.insert(
                next,
                Visit {
                    cost: tentative,
                    parent: Some(current.loc),
                },
            );
            seq += 1;
            open.push(Entry {
                loc: next,
                cost: tentative,
                estimate: tentative + heuristic(next),
                seq,
            });
        }
    }

    log::debug!("A* from {start} found no path after {expanded} expansions");
    SearchOutcome::NotFound
}

/// Walk parents back from `goal` to the start.
fn reconstruct(visited: &HashMap<Location, Visit>, goal: Location) -> Path {
    let mut locations = vec![goal];
    let mut current = goal;
    while let Some(parent) = visited.get(&current).and_then(|v| v.parent) {
        locations.push(parent);
        current = parent;
    }
    locations.reverse();
    Path(locations)
}
