//! Terminal demos built on the gridpath search core.
//!
//! Three game variants share one fixed-tick terminal loop:
//!
//! - [`maze::MazeGame`]: scatter obstacles, search once, walk the path.
//! - [`pursuit::PursuitGame`]: obstacles keep appearing on the agent's route
//!   and the replanner routes around them. Left-click toggles a cell.
//! - [`snake::SnakeGame`]: a growing snake, steered by arrow keys or by an
//!   autopilot that retargets the replanner at every new snack.
//!
//! Everything here is glue; the game state lives in plain structs so it can
//! be driven without a terminal.

pub mod app;
pub mod maze;
pub mod palette;
pub mod pursuit;
pub mod snake;
pub mod term;

pub use app::{App, AppConfig, Arrow, Control, Input, Model};
pub use palette::{Canvas, Paint};

/// Grid height of every demo.
pub const ROWS: i32 = 20;
/// Grid width of every demo.
pub const COLS: i32 = 20;
/// Game ticks per second.
pub const TICKS_PER_SECOND: u32 = 5;
