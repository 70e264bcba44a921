//! Setup errors.
//!
//! Out-of-bounds queries and unreachable goals are not errors: the grid
//! answers `false` and the search answers `None`. Only a nonsensical setup
//! is rejected, and it is rejected before any search runs.

use thiserror::Error;

use crate::geom::Location;

/// A scenario that cannot be searched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: i32, cols: i32 },

    #[error("start {0} is outside the grid")]
    StartOutOfBounds(Location),

    #[error("goal {0} is outside the grid")]
    GoalOutOfBounds(Location),

    #[error("start {0} is a blocked cell")]
    StartBlocked(Location),

    #[error("goal {0} is a blocked cell")]
    GoalBlocked(Location),

    #[error("blocked cell {0} is outside the grid")]
    BlockedOutOfBounds(Location),

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell {ch:?} at ({row}, {col})")]
    UnknownCell { ch: char, row: usize, col: usize },

    #[error("map has no {0:?} marker")]
    MissingMarker(char),

    #[error("map has more than one {0:?} marker")]
    DuplicateMarker(char),

    #[error("cannot lay out {cells} cells as a {rows}x{cols} grid")]
    InvalidShape { rows: i32, cols: i32, cells: usize },
}
