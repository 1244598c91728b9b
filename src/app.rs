//! Interactive board: input handling, status line and the event loop

use crate::canvas::Canvas;
use crate::config::{DisplayConfig, LifeConfig};
use crate::coord::Coord;
use crate::driver::{Driver, Toggled};
use crate::grid::SparseGrid;
use crate::help::{render_help_overlay, HELP_TEXT};
use crate::patterns::{PatternError, Seed};
use crate::terminal::{Input, Terminal};
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::style::Color;
use log::{debug, info};
use std::time::{Duration, Instant};

/// Rows reserved under the board for the status line
const STATUS_ROWS: u16 = 1;
/// Longest the loop sleeps while nothing is scheduled
const IDLE_POLL: Duration = Duration::from_millis(100);
/// Cells moved per pan keystroke
const PAN_STEP: i64 = 8;

pub struct App {
    driver: Driver<Canvas>,
    display: DisplayConfig,
    cursor: Coord,
    show_help: bool,
    notice: Option<&'static str>,
    dirty: bool,
}

impl App {
    pub fn new(
        config: &LifeConfig,
        display: DisplayConfig,
        width: u16,
        height: u16,
        seed: &Seed,
    ) -> Result<Self, PatternError> {
        let canvas = Canvas::new(&display, width, height.saturating_sub(STATUS_ROWS));
        let mut grid = SparseGrid::new(canvas);
        let born = seed.apply(&mut grid, Coord::default())?;
        info!("seeded {} with {} cells", seed.describe(), born);

        Ok(Self {
            driver: Driver::new(grid, config),
            display,
            cursor: Coord::default(),
            show_help: false,
            notice: None,
            dirty: true,
        })
    }

    pub fn driver(&self) -> &Driver<Canvas> {
        &self.driver
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Apply one input event, returns true if the user asked to quit
    pub fn handle_input(&mut self, input: Input, now: Instant) -> bool {
        self.dirty = true;
        self.notice = None;
        match input {
            Input::Key(code, modifiers) => return self.handle_key(code, modifiers, now),
            Input::Click { col, row } => {
                if let Some(at) = self.canvas().cell_at(col, row) {
                    self.cursor = at;
                    self.toggle(at);
                }
            }
            Input::Resize(width, height) => {
                self.driver
                    .grid_mut()
                    .visuals_mut()
                    .resize(width, height.saturating_sub(STATUS_ROWS));
            }
        }
        false
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, now: Instant) -> bool {
        let shift = modifiers.contains(KeyModifiers::SHIFT);
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Char('p') | KeyCode::Enter => {
                self.driver.toggle_run(now);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if !self.driver.speed_up() {
                    self.notice = Some("already at max rate");
                }
            }
            KeyCode::Char('-') | KeyCode::Char('_') => self.driver.speed_down(),
            KeyCode::Char(' ') => self.toggle(self.cursor),
            KeyCode::Char('n') => {
                if self.driver.step_once().is_none() {
                    self.notice = Some("pause to step manually");
                }
            }
            KeyCode::Char('c') => {
                if !self.driver.clear() {
                    self.notice = Some("pause to clear");
                }
            }
            KeyCode::Char('z') => {
                let canvas = self.driver.grid_mut().visuals_mut();
                canvas.zoom();
                self.display.cell_width = canvas.cell_width();
                if canvas.screen_pos(self.cursor).is_none() {
                    canvas.center_on(self.cursor);
                }
            }
            KeyCode::Char('0') => {
                self.cursor = Coord::default();
                self.driver.grid_mut().visuals_mut().center_on(self.cursor);
            }
            KeyCode::Left if shift => self.pan(-PAN_STEP, 0),
            KeyCode::Right if shift => self.pan(PAN_STEP, 0),
            KeyCode::Up if shift => self.pan(0, -PAN_STEP),
            KeyCode::Down if shift => self.pan(0, PAN_STEP),
            KeyCode::Char('H') => self.pan(-PAN_STEP, 0),
            KeyCode::Char('L') => self.pan(PAN_STEP, 0),
            KeyCode::Char('K') => self.pan(0, -PAN_STEP),
            KeyCode::Char('J') => self.pan(0, PAN_STEP),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            _ => self.dirty = false,
        }
        false
    }

    fn toggle(&mut self, at: Coord) {
        match self.driver.toggle_cell(at) {
            Toggled::Ignored => self.notice = Some("running: pause to edit"),
            outcome => debug!("toggled {} -> {:?}", at, outcome),
        }
    }

    fn move_cursor(&mut self, dx: i64, dy: i64) {
        let next = self.cursor + Coord::new(dx, dy);
        if !self.canvas().in_area(next) {
            return;
        }
        self.cursor = next;
        if self.canvas().screen_pos(next).is_none() {
            self.driver.grid_mut().visuals_mut().pan(dx, dy);
        }
    }

    fn pan(&mut self, dx: i64, dy: i64) {
        let canvas = self.driver.grid_mut().visuals_mut();
        canvas.pan(dx, dy);
        // keep the cursor on screen
        let origin = canvas.origin();
        let (cols, rows) = canvas.size();
        self.cursor = Coord::new(
            self.cursor.x.clamp(origin.x, origin.x + cols.max(1) - 1),
            self.cursor.y.clamp(origin.y, origin.y + rows.max(1) - 1),
        );
    }

    fn canvas(&self) -> &Canvas {
        self.driver.grid().visuals()
    }

    /// Redraw the whole frame into the back buffer
    pub fn draw(&self, term: &mut Terminal) {
        term.clear();
        let cursor_alive = self.driver.is_alive(self.cursor);
        self.canvas().draw(term, &self.display, Some((self.cursor, cursor_alive)));
        self.draw_status(term);
        if self.show_help {
            render_help_overlay(term, HELP_TEXT);
        }
    }

    fn draw_status(&self, term: &mut Terminal) {
        let (_, height) = term.size();
        let y = height.saturating_sub(1) as i32;
        let (state, color) = if self.driver.is_running() {
            ("RUNNING", Color::Green)
        } else {
            ("PAUSED", Color::Yellow)
        };
        term.set_str(0, y, state, Some(color), true);

        let grid = self.driver.grid();
        let mut status = format!(
            " gen {} | pop {} | {:.2} gen/s | cursor {} | ? help",
            self.driver.generation(),
            grid.population(),
            self.driver.rate(),
            self.cursor,
        );
        if let Some(notice) = self.notice {
            status.push_str(" | ");
            status.push_str(notice);
        }
        term.set_str(state.len() as i32, y, &status, Some(Color::Grey), false);
    }
}

/// Run the interactive board until the user quits
pub fn run(config: &LifeConfig, display: DisplayConfig, seed: &Seed) -> Result<(), crate::Error> {
    let mut term = Terminal::new()?;
    term.clear_screen()?;
    let (width, height) = term.size();
    let mut app = App::new(config, display, width, height, seed)?;

    loop {
        if app.driver.tick(Instant::now()).is_some() {
            app.dirty = true;
        }

        if app.dirty {
            app.draw(&mut term);
            term.render()?;
            app.dirty = false;
        }

        let wait = app
            .driver
            .time_until_next(Instant::now())
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL));
        if let Some(input) = term.poll_input(wait)? {
            if let Input::Resize(w, h) = input {
                term.resize(w, h);
                term.clear_screen()?;
            }
            if app.handle_input(input, Instant::now()) {
                break;
            }
        }
    }

    info!(
        "quit at generation {} with {} live cells",
        app.driver.generation(),
        app.driver.grid().population()
    );
    Ok(())
}
