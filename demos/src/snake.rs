//! Snake: arrow keys steer a snake that grows by one cell per snack.
//!
//! With autopilot on (`a` toggles it), the replanner chases the snack. The
//! snake's own body counts as blocked, and every new snack retargets the
//! search from the head. Running into a wall or the body resets the snake.

use std::collections::VecDeque;

use gridpath_core::{Grid, Location};
use gridpath_gen::ObstacleGen;
use gridpath_search::{Replanner, Step};
use rand::Rng;

use crate::app::{Arrow, Control, Input, Model};
use crate::palette::{Canvas, Paint};

pub struct SnakeGame<R: Rng> {
    grid: Grid,
    start: Location,
    /// Head first.
    body: VecDeque<Location>,
    heading: Arrow,
    snack: Option<Location>,
    autopilot: bool,
    replanner: Replanner,
    obstacles: ObstacleGen<R>,
    score: u32,
    crashes: u32,
}

impl<R: Rng> SnakeGame<R> {
    /// An empty `rows × cols` board with the snake in the top-left corner,
    /// heading down.
    pub fn new(rows: i32, cols: i32, rng: R) -> Self {
        Self::with_grid(Grid::new(rows, cols), Location::ORIGIN, ObstacleGen::new(rng))
    }

    /// Play on `grid`; its blocked cells are walls.
    pub fn with_grid(grid: Grid, start: Location, obstacles: ObstacleGen<R>) -> Self {
        let mut game = Self {
            grid,
            start,
            body: VecDeque::from([start]),
            heading: Arrow::Down,
            snack: None,
            autopilot: true,
            replanner: Replanner::default(),
            obstacles,
            score: 0,
            crashes: 0,
        };
        game.place_snack();
        game
    }

    pub fn with_autopilot(mut self, on: bool) -> Self {
        self.autopilot = on;
        self
    }

    #[inline]
    pub fn head(&self) -> Location {
        self.body.front().copied().unwrap_or(self.start)
    }

    pub fn body(&self) -> impl Iterator<Item = Location> + '_ {
        self.body.iter().copied()
    }

    pub fn snack(&self) -> Option<Location> {
        self.snack
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn crashes(&self) -> u32 {
        self.crashes
    }

    /// The walls plus every body cell behind the head.
    fn board(&self) -> Grid {
        let mut board = self.grid.clone();
        for &cell in self.body.iter().skip(1) {
            board.block(cell);
        }
        board
    }

    fn place_snack(&mut self) {
        let mut board = self.board();
        board.block(self.head());
        self.snack = self.obstacles.random_open(&board);
        match self.snack {
            Some(s) => log::debug!("snack placed at {s}"),
            None => log::info!("board is full"),
        }
    }

    fn steer(&mut self, arrow: Arrow) {
        let (dr, dc) = arrow.delta();
        let target = self.head().shift(dr, dc);
        // Never turn back into the neck.
        if self.body.get(1) == Some(&target) {
            return;
        }
        self.heading = arrow;
    }

    /// Pick the heading from the planned route toward the snack. Keeps the
    /// current heading when there is no route, or on a replan tick.
    fn autopilot_heading(&mut self) -> Option<Arrow> {
        let snack = self.snack?;
        let head = self.head();
        let board = self.board();
        if self.replanner.position() != Some(head) {
            self.replanner.request_path(&board, head, snack);
        } else if self.replanner.goal() != Some(snack) {
            self.replanner.retarget(&board, snack);
        }
        let next = match self.replanner.advance(&board) {
            Step::Moved(next) | Step::Arrived(next) => next,
            Step::Replanned(_) => return None,
            Step::NotFound | Step::Idle => return Some(self.heading),
        };
        [Arrow::Up, Arrow::Down, Arrow::Left, Arrow::Right]
            .into_iter()
            .find(|a| {
                let (dr, dc) = a.delta();
                head.shift(dr, dc) == next
            })
    }

    fn crash(&mut self, at: Location) {
        self.crashes += 1;
        log::info!("crashed at {at} with length {}", self.body.len());
        self.body.clear();
        self.body.push_back(self.start);
        self.heading = Arrow::Down;
        self.replanner.clear();
        if self.snack == Some(self.start) {
            self.place_snack();
        }
    }

    /// Move one cell along `heading`, eating or crashing as needed.
    fn slither(&mut self, heading: Arrow) {
        self.heading = heading;
        let (dr, dc) = heading.delta();
        let next = self.head().shift(dr, dc);
        let eating = Some(next) == self.snack;
        // The tail moves out of the way unless the snake grows.
        let body_len = if eating {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };
        if !self.grid.is_traversable(next) || self.body.iter().take(body_len).any(|&c| c == next) {
            self.crash(next);
            return;
        }
        self.body.push_front(next);
        if eating {
            self.score += 1;
            self.place_snack();
        } else {
            self.body.pop_back();
        }
    }

    fn status(&self) -> String {
        let mode = if self.autopilot { "autopilot" } else { "manual" };
        format!(
            "Score {}  length {}  crashes {}  [{mode}]  arrows steer, a autopilot, q quit",
            self.score,
            self.body.len(),
            self.crashes
        )
    }
}

impl<R: Rng> Model for SnakeGame<R> {
    fn size(&self) -> (i32, i32) {
        (self.grid.rows(), self.grid.cols())
    }

    fn tick(&mut self) -> Control {
        let heading = if self.autopilot {
            self.autopilot_heading()
        } else {
            Some(self.heading)
        };
        if let Some(heading) = heading {
            self.slither(heading);
        }
        Control::Continue
    }

    fn input(&mut self, input: Input) -> Control {
        match input {
            Input::Quit => return Control::Stop,
            Input::Arrow(arrow) => {
                self.autopilot = false;
                self.steer(arrow);
            }
            Input::Key('a') => self.autopilot = !self.autopilot,
            Input::Key(_) | Input::Click(_) => {}
        }
        Control::Continue
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.paint_grid(&self.grid);
        if self.autopilot {
            canvas.paint_route(self.replanner.remaining(), Paint::Path);
        }
        if let Some(snack) = self.snack {
            canvas.set(snack, Paint::Goal);
        }
        for &cell in self.body.iter().skip(1) {
            canvas.set(cell, Paint::Trail);
        }
        canvas.set(self.head(), Paint::Agent);
        canvas.status = self.status();
    }
}
