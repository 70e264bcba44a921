//! Terminal snake: arrow keys steer, `a` hands the wheel to the A*
//! autopilot.
//!
//! Run: cargo run --bin snake

use gridpath_demos::snake::SnakeGame;
use gridpath_demos::{App, AppConfig, COLS, ROWS, TICKS_PER_SECOND};

fn main() {
    env_logger::init();

    let game = SnakeGame::new(ROWS, COLS, rand::rng());
    let mut app = App::new(AppConfig {
        model: game,
        ticks_per_second: TICKS_PER_SECOND,
        mouse: false,
    });

    if let Err(e) = app.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
