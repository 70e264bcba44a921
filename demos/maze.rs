//! Terminal maze solver: obstacles are scattered once, A* finds a route
//! and the agent walks it.
//!
//! Run: cargo run --bin maze

use gridpath_core::ScenarioConfig;
use gridpath_demos::maze::MazeGame;
use gridpath_demos::{App, AppConfig, COLS, ROWS, TICKS_PER_SECOND};
use gridpath_gen::GenConfig;

fn main() {
    env_logger::init();

    let config = ScenarioConfig::new(ROWS, COLS);
    let game = match MazeGame::generate(&config, GenConfig::default().sparseness, rand::rng()) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
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
