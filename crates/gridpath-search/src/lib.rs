//! Shortest-path search for grid-based games.
//!
//! - **A\*** over arbitrary successor functions ([`find_path`]), with a
//!   cancellable variant ([`find_path_cancellable`]) and a grid shortcut
//!   ([`find_grid_path`])
//! - **Manhattan** heuristic ([`manhattan`], [`manhattan_to`])
//! - **Replanning** of an agent's active path when the grid changes under
//!   it ([`Replanner`])
//!
//! Searches are deterministic: neighbours are expanded up, down, left,
//! right, and frontier ties go to the entry inserted first. The same grid
//! and endpoints always give the same [`Path`].

mod astar;
mod cancel;
mod distance;
mod frontier;
mod path;
mod replan;

pub use astar::{SearchOutcome, find_grid_path, find_path, find_path_cancellable};
pub use cancel::CancelToken;
pub use distance::{manhattan, manhattan_to};
pub use path::Path;
pub use replan::{PlanState, ReplanPolicy, Replanner, ReplannerConfig, Step};
