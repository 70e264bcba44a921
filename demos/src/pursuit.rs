//! Pursuit: the agent heads for the goal while obstacles keep landing on
//! its route. The replanner finds a way around or reports that none exists;
//! clicking a cell toggles it and lets a stuck agent try again. `s` walls
//! the goal in.

use gridpath_core::{Grid, Location, ScenarioConfig};
use gridpath_gen::{GenConfig, GenError, ObstacleGen};
use gridpath_search::{PlanState, ReplanPolicy, Replanner, ReplannerConfig, Step};
use rand::Rng;

use crate::app::{Control, Input, Model};
use crate::palette::{Canvas, Paint};

/// Ticks between obstacle drops.
pub const DROP_EVERY: u64 = 4;

pub struct PursuitGame<R: Rng> {
    grid: Grid,
    goal: Location,
    replanner: Replanner,
    obstacles: ObstacleGen<R>,
    trail: Vec<Location>,
    ticks: u64,
    drop_every: u64,
    status: String,
}

impl<R: Rng> PursuitGame<R> {
    /// Generate a solvable scenario and plan the first route.
    pub fn new(config: &ScenarioConfig, gen_config: &GenConfig, rng: R) -> Result<Self, GenError> {
        let mut obstacles = ObstacleGen::new(rng);
        let (scenario, _) = obstacles.solvable(config, gen_config)?;
        Ok(Self::with_grid(scenario.grid, scenario.start, scenario.goal, obstacles))
    }

    /// Start a game on an existing grid.
    pub fn with_grid(grid: Grid, start: Location, goal: Location, obstacles: ObstacleGen<R>) -> Self {
        let mut replanner = Replanner::new(ReplannerConfig {
            policy: ReplanPolicy::Lookahead,
        });
        let status = match replanner.request_path(&grid, start, goal) {
            Some(p) => format!("Route of {} steps", p.steps()),
            None => "No route to the goal".to_string(),
        };
        Self {
            grid,
            goal,
            replanner,
            obstacles,
            trail: vec![start],
            ticks: 0,
            drop_every: DROP_EVERY,
            status,
        }
    }

    /// Change how often obstacles drop. Zero disables drops.
    pub fn with_drop_every(mut self, ticks: u64) -> Self {
        self.drop_every = ticks;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn replanner(&self) -> &Replanner {
        &self.replanner
    }

    pub fn trail(&self) -> &[Location] {
        &self.trail
    }

    /// Block a random cell, preferring the remaining route. Never the
    /// agent's cell or the goal.
    fn drop_obstacle(&mut self) {
        let mut avoid = vec![self.goal];
        avoid.extend(self.replanner.position());
        let route: Vec<Location> = self.replanner.remaining().collect();
        let dropped = self
            .obstacles
            .drop_block_among(&mut self.grid, route, &avoid)
            .or_else(|| self.obstacles.drop_block(&mut self.grid, &avoid));
        if let Some(loc) = dropped {
            log::info!("obstacle dropped at {loc}");
        }
    }

    /// Wall the goal in.
    fn seal_goal(&mut self) {
        let placed = self.obstacles.seal(&mut self.grid, self.goal);
        log::info!("goal {} sealed with {placed} blocks", self.goal);
    }

    /// Toggle a clicked cell and let a stuck agent search again.
    fn click(&mut self, loc: Location) {
        if Some(loc) == self.replanner.position() || loc == self.goal {
            return;
        }
        if self.grid.toggle(loc).is_none() {
            return;
        }
        if self.replanner.state() == PlanState::Failed {
            self.status = match self.replanner.retarget(&self.grid, self.goal) {
                Some(p) => format!("Route of {} steps", p.steps()),
                None => "Still no route to the goal".to_string(),
            };
        }
    }
}

impl<R: Rng> Model for PursuitGame<R> {
    fn size(&self) -> (i32, i32) {
        (self.grid.rows(), self.grid.cols())
    }

    fn tick(&mut self) -> Control {
        self.ticks += 1;
        if self.replanner.state() != PlanState::HasPath {
            return Control::Continue;
        }
        if self.drop_every > 0 && self.ticks % self.drop_every == 0 {
            self.drop_obstacle();
        }
        match self.replanner.advance(&self.grid) {
            Step::Moved(loc) => self.trail.push(loc),
            Step::Arrived(loc) => {
                self.trail.push(loc);
                self.status = format!(
                    "Reached goal in {} moves, {} replans. q to quit",
                    self.trail.len() - 1,
                    self.replanner.replans()
                );
            }
            Step::Replanned(p) => self.status = format!("Replanned: {} steps to go", p.steps()),
            Step::NotFound => {
                self.status = "No route to the goal; click cells to clear a way".to_string()
            }
            Step::Idle => {}
        }
        Control::Continue
    }

    fn input(&mut self, input: Input) -> Control {
        match input {
            Input::Quit => return Control::Stop,
            Input::Click(loc) => self.click(loc),
            Input::Key('s') => self.seal_goal(),
            Input::Key(_) | Input::Arrow(_) => {}
        }
        Control::Continue
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.paint_grid(&self.grid);
        canvas.paint_route(self.replanner.remaining(), Paint::Path);
        canvas.paint_route(self.trail.iter().copied(), Paint::Trail);
        if let Some(agent) = self.replanner.position() {
            canvas.set(agent, Paint::Agent);
        }
        canvas.status = self.status.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::{CellState, Scenario};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game(map: &str) -> PursuitGame<StdRng> {
        let s = Scenario::from_ascii(map).unwrap();
        PursuitGame::with_grid(s.grid, s.start, s.goal, ObstacleGen::new(StdRng::seed_from_u64(1)))
    }

    #[test]
    fn reaches_goal_without_drops() {
        let mut g = game("S....\n.....\n....G").with_drop_every(0);
        for _ in 0..20 {
            g.tick();
        }
        assert_eq!(g.replanner().state(), PlanState::Reached);
        assert_eq!(g.trail().len(), 7);
        assert_eq!(g.trail().last(), Some(&Location::new(2, 4)));
    }

    #[test]
    fn drops_force_replans_but_agent_stays_on_open_cells() {
        let config = ScenarioConfig::new(12, 12);
        let gen_config = GenConfig {
            sparseness: 0.1,
            attempts: 50,
        };
        let mut g = PursuitGame::new(&config, &gen_config, StdRng::seed_from_u64(3))
            .unwrap()
            .with_drop_every(2);
        let mut last = g.trail().len();
        for _ in 0..400 {
            g.tick();
            if g.trail().len() > last {
                let agent = *g.trail().last().unwrap();
                assert!(g.grid().is_traversable(agent));
                last = g.trail().len();
            }
        }
        assert!(matches!(
            g.replanner().state(),
            PlanState::Reached | PlanState::Failed
        ));
        assert!(g.trail().windows(2).all(|w| w[0].is_adjacent(w[1])));
    }

    #[test]
    fn click_toggles_cells_but_not_endpoints() {
        let mut g = game("S..\n...\n..G").with_drop_every(0);
        g.input(Input::Click(Location::new(1, 1)));
        assert!(!g.grid().is_traversable(Location::new(1, 1)));
        g.input(Input::Click(Location::new(1, 1)));
        assert!(g.grid().is_traversable(Location::new(1, 1)));

        g.input(Input::Click(Location::new(0, 0)));
        g.input(Input::Click(Location::new(2, 2)));
        assert!(g.grid().is_traversable(Location::new(0, 0)));
        assert!(g.grid().is_traversable(Location::new(2, 2)));
    }

    #[test]
    fn click_unblocks_a_stuck_agent() {
        let mut g = game("S.#..\n..#..\n..#.G").with_drop_every(0);
        assert_eq!(g.replanner().state(), PlanState::Failed);
        let mut canvas = Canvas::new(3, 5);
        g.draw(&mut canvas);
        assert_eq!(canvas.status, "No route to the goal");

        g.input(Input::Click(Location::new(1, 2)));
        assert_eq!(g.replanner().state(), PlanState::HasPath);
        assert_eq!(g.replanner().remaining().last(), Some(Location::new(2, 4)));
    }

    #[test]
    fn draw_shows_agent_and_route() {
        let g = game("S...G").with_drop_every(0);
        let mut canvas = Canvas::new(1, 5);
        g.draw(&mut canvas);
        assert_eq!(canvas.get(Location::new(0, 0)), Paint::Agent);
        assert_eq!(canvas.get(Location::new(0, 2)), Paint::Path);
        assert_eq!(canvas.get(Location::new(0, 4)), Paint::Goal);
    }

    #[test]
    fn drops_off_route_when_route_has_no_room() {
        let mut g = game("SG\n..").with_drop_every(1);
        g.tick();
        assert_eq!(g.grid().count(CellState::Blocked), 1);
        assert!(g.grid().is_traversable(Location::new(0, 1)));
        assert_eq!(g.replanner().state(), PlanState::Reached);
    }

    #[test]
    fn sealing_the_goal_stops_the_agent() {
        let mut g = game("S....\n.....\n....G").with_drop_every(0);
        g.input(Input::Key('s'));
        assert_eq!(g.tick(), Control::Continue);
        assert_eq!(g.replanner().state(), PlanState::Failed);
        assert_eq!(g.trail().len(), 1);
    }

    #[test]
    fn quit_stops() {
        let mut g = game("SG").with_drop_every(0);
        assert_eq!(g.input(Input::Quit), Control::Stop);
    }
}
