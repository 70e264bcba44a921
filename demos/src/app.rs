//! Fixed-tick application loop: [`Model`], [`AppConfig`], [`App`].

use std::time::{Duration, Instant};

use gridpath_core::Location;

use crate::palette::Canvas;
use crate::term::Terminal;

/// User input delivered to a [`Model`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Quit,
    Key(char),
    Arrow(Arrow),
    /// Left click on a grid cell.
    Click(Location),
}

/// Arrow keys, for steering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    /// The `(drow, dcol)` step this arrow points to.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Whether the loop keeps going.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Stop,
}

/// A demo's game state.
pub trait Model {
    /// Canvas size as `(rows, cols)`.
    fn size(&self) -> (i32, i32);

    /// Advance the game by one tick.
    fn tick(&mut self) -> Control;

    /// React to user input.
    fn input(&mut self, input: Input) -> Control {
        match input {
            Input::Quit => Control::Stop,
            _ => Control::Continue,
        }
    }

    /// Render the current state into `canvas`.
    fn draw(&self, canvas: &mut Canvas);
}

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model> {
    pub model: M,
    pub ticks_per_second: u32,
    pub mouse: bool,
}

/// The main application runner.
pub struct App<M: Model> {
    model: M,
    tick: Duration,
    mouse: bool,
}

impl<M: Model> App<M> {
    pub fn new(config: AppConfig<M>) -> Self {
        Self {
            model: config.model,
            tick: Duration::from_secs(1) / config.ticks_per_second.max(1),
            mouse: config.mouse,
        }
    }

    /// Run until the model stops or the user quits.
    ///
    /// The terminal is restored even when the loop fails.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let mut term = Terminal::new().with_mouse(self.mouse);
        term.init()?;
        let result = self.event_loop(&mut term);
        term.close();
        result
    }

    fn event_loop(&mut self, term: &mut Terminal) -> Result<(), Box<dyn std::error::Error>> {
        let mut prev: Option<Canvas> = None;
        let mut next_tick = Instant::now() + self.tick;

        loop {
            let (rows, cols) = self.model.size();
            let mut canvas = Canvas::new(rows, cols);
            self.model.draw(&mut canvas);
            let changes = match &prev {
                Some(p) => canvas.diff(p),
                None => canvas.cells(),
            };
            term.flush(&changes, rows, &canvas.status)?;
            prev = Some(canvas);

            let timeout = next_tick.saturating_duration_since(Instant::now());
            for input in term.poll(timeout)? {
                if self.model.input(input) == Control::Stop {
                    return Ok(());
                }
            }

            if Instant::now() >= next_tick {
                next_tick += self.tick;
                if self.model.tick() == Control::Stop {
                    return Ok(());
                }
            }
        }
    }
}
