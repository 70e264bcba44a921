//! Terminal pursuit demo: obstacles drop onto the agent's route and the
//! replanner steers around them. Left-click toggles a cell.
//!
//! Run: cargo run --bin pursuit

use gridpath_core::ScenarioConfig;
use gridpath_demos::pursuit::PursuitGame;
use gridpath_demos::{App, AppConfig, COLS, ROWS, TICKS_PER_SECOND};
use gridpath_gen::GenConfig;

fn main() {
    env_logger::init();

    let config = ScenarioConfig::new(ROWS, COLS);
    let game = match PursuitGame::new(&config, &GenConfig::default(), rand::rng()) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let mut app = App::new(AppConfig {
        model: game,
        ticks_per_second: TICKS_PER_SECOND,
        mouse: true,
    });

    if let Err(e) = app.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
