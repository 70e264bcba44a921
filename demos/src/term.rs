//! Crossterm terminal back-end.
//!
//! Each grid cell is drawn as two spaces with a background colour, so a
//! screen column pair maps to one grid column. The status line sits just
//! below the grid.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    execute, queue,
    style::{Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};
use gridpath_core::Location;

use crate::app::{Arrow, Input};
use crate::palette::Paint;

/// Screen columns per grid column.
const CELL_WIDTH: u16 = 2;

/// Map a terminal event to a demo input.
fn to_input(ev: Event) -> Option<Input> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Input::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
            KeyCode::Char(c) => Some(Input::Key(c)),
            KeyCode::Up => Some(Input::Arrow(Arrow::Up)),
            KeyCode::Down => Some(Input::Arrow(Arrow::Down)),
            KeyCode::Left => Some(Input::Arrow(Arrow::Left)),
            KeyCode::Right => Some(Input::Arrow(Arrow::Right)),
            _ => None,
        },
        Event::Mouse(me) => match me.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Input::Click(Location::new(
                me.row as i32,
                (me.column / CELL_WIDTH) as i32,
            ))),
            _ => None,
        },
        _ => None,
    }
}

/// Terminal session: raw mode, alternate screen, mouse capture.
pub struct Terminal {
    mouse_enabled: bool,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse clicks are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    /// Wait up to `timeout` for input, then drain whatever else is queued.
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Vec<Input>> {
        let mut inputs = Vec::new();
        if !event::poll(timeout)? {
            return Ok(inputs);
        }
        while event::poll(Duration::ZERO)? {
            if let Some(input) = to_input(event::read()?) {
                inputs.push(input);
            }
        }
        Ok(inputs)
    }

    /// Draw changed cells and the status line at row `status_row`.
    pub fn flush(&mut self, cells: &[(Location, Paint)], status_row: i32, status: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        for &(loc, paint) in cells {
            queue!(
                stdout,
                cursor::MoveTo(loc.col as u16 * CELL_WIDTH, loc.row as u16),
                SetBackgroundColor(paint.color()),
                Print("  "),
                ResetColor
            )?;
        }
        queue!(
            stdout,
            cursor::MoveTo(0, status_row.max(0) as u16),
            terminal::Clear(ClearType::CurrentLine),
            Print(status)
        )?;
        stdout.flush()
    }

    pub fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}
