//! Maze solver: one search up front, then the agent walks the result.

use gridpath_core::{ConfigError, Location, Scenario, ScenarioConfig};
use gridpath_gen::ObstacleGen;
use gridpath_search::{Path, find_grid_path};
use rand::Rng;

use crate::app::{Control, Model};
use crate::palette::{Canvas, Paint};

pub struct MazeGame {
    scenario: Scenario,
    path: Option<Path>,
    /// Index of the agent's cell in `path`.
    cursor: usize,
}

impl MazeGame {
    /// Scatter obstacles over `config` with the given density and solve
    /// the result once. The maze may turn out unsolvable.
    pub fn generate(
        config: &ScenarioConfig,
        sparseness: f64,
        rng: impl Rng,
    ) -> Result<Self, ConfigError> {
        let mut scenario = config.build()?;
        let keep = [scenario.start, scenario.goal];
        ObstacleGen::new(rng).scatter(&mut scenario.grid, sparseness, &keep);
        Ok(Self::from_scenario(scenario))
    }

    pub fn from_scenario(scenario: Scenario) -> Self {
        let path = find_grid_path(&scenario.grid, scenario.start, scenario.goal);
        match &path {
            Some(p) => log::info!("maze solved in {} steps", p.steps()),
            None => log::info!("no solution found using A*"),
        }
        Self {
            scenario,
            path,
            cursor: 0,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Where the agent stands.
    pub fn agent(&self) -> Location {
        self.path
            .as_ref()
            .map_or(self.scenario.start, |p| p[self.cursor])
    }

    pub fn is_done(&self) -> bool {
        self.path.as_ref().is_none_or(|p| self.cursor + 1 >= p.len())
    }

    fn status(&self) -> String {
        match &self.path {
            None => "No solution found using A*. q to quit".to_string(),
            Some(p) if self.is_done() => format!("Reached goal in {} steps. q to quit", p.steps()),
            Some(p) => format!("Step {}/{}", self.cursor, p.steps()),
        }
    }
}

impl Model for MazeGame {
    fn size(&self) -> (i32, i32) {
        (self.scenario.grid.rows(), self.scenario.grid.cols())
    }

    fn tick(&mut self) -> Control {
        if !self.is_done() {
            self.cursor += 1;
        }
        Control::Continue
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.paint_grid(&self.scenario.grid);
        if let Some(p) = &self.path {
            canvas.paint_route(p[1..].iter().copied(), Paint::Path);
            canvas.paint_route(p[..=self.cursor].iter().copied(), Paint::Trail);
        }
        canvas.set(self.agent(), Paint::Agent);
        canvas.status = self.status();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Input;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn walks_to_the_goal_and_stays() {
        let scenario = Scenario::from_ascii("S.#\n..#\n#.G").unwrap();
        let mut game = MazeGame::from_scenario(scenario);
        assert_eq!(game.path().map(|p| p.len()), Some(5));
        assert_eq!(game.agent(), Location::new(0, 0));

        for _ in 0..10 {
            assert_eq!(game.tick(), Control::Continue);
        }
        assert!(game.is_done());
        assert_eq!(game.agent(), Location::new(2, 2));

        let mut canvas = Canvas::new(3, 3);
        game.draw(&mut canvas);
        assert_eq!(canvas.get(Location::new(2, 2)), Paint::Agent);
        assert_eq!(canvas.get(Location::new(0, 0)), Paint::Start);
        assert_eq!(canvas.get(Location::new(0, 2)), Paint::Blocked);
        assert!(canvas.status.starts_with("Reached goal in 4 steps"));
    }

    #[test]
    fn unsolvable_maze_stays_put() {
        let scenario = Scenario::from_ascii("S#.\n##.\n..G").unwrap();
        let mut game = MazeGame::from_scenario(scenario);
        assert!(game.path().is_none());
        game.tick();
        assert_eq!(game.agent(), Location::ORIGIN);
        let mut canvas = Canvas::new(3, 3);
        game.draw(&mut canvas);
        assert!(canvas.status.starts_with("No solution"));
    }

    #[test]
    fn generated_maze_keeps_endpoints_open() {
        let config = ScenarioConfig::new(10, 10);
        let game = MazeGame::generate(&config, 0.3, StdRng::seed_from_u64(7)).unwrap();
        let grid = &game.scenario.grid;
        assert!(grid.is_traversable(config.start));
        assert!(grid.is_traversable(config.goal));
        if let Some(p) = game.path() {
            assert!(p.is_valid_on(grid));
        }
    }

    #[test]
    fn quit_stops() {
        let mut game = MazeGame::from_scenario(ScenarioConfig::new(2, 2).build().unwrap());
        assert_eq!(game.input(Input::Quit), Control::Stop);
        assert_eq!(game.input(Input::Key('x')), Control::Continue);
    }
}
