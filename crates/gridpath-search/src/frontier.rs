use std::cmp::Ordering;

use gridpath_core::Location;

/// Best known way to reach a location during one search call.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Visit {
    pub(crate) cost: i32,
    pub(crate) parent: Option<Location>,
}

/// Frontier entry, ordered for use in `BinaryHeap`.
///
/// The heap pops the smallest `estimate` first; among equal estimates the
/// entry with the smallest `seq` (inserted earliest) wins.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Entry {
    pub(crate) loc: Location,
    pub(crate) cost: i32,
    pub(crate) estimate: i32,
    pub(crate) seq: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
