//! Terminal view onto the unbounded grid

use crate::config::DisplayConfig;
use crate::coord::Coord;
use crate::grid::Visuals;
use crate::terminal::Terminal;
use std::collections::HashMap;

const MIN_CELL_WIDTH: u16 = 1;
const MAX_CELL_WIDTH: u16 = 2;

/// Handle to a drawn cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkId(u64);

/// Keeps one mark per live cell and a viewport (in cells) that can be panned
/// within `[-max_extent, max_extent]` on both axes.
pub struct Canvas {
    marks: HashMap<MarkId, Coord>,
    next_id: u64,
    origin: Coord,    // World cell shown at the top-left corner
    width: u16,
    height: u16,
    cols: i64,
    rows: i64,
    cell_width: u16,
    max_extent: i64,
}

impl Canvas {
    /// `width`/`height` are the terminal columns and rows given to the board
    pub fn new(display: &DisplayConfig, width: u16, height: u16) -> Self {
        let mut canvas = Self {
            marks: HashMap::new(),
            next_id: 0,
            origin: Coord::default(),
            width,
            height,
            cols: 0,
            rows: 0,
            cell_width: display.cell_width.clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH),
            max_extent: display.max_extent,
        };
        canvas.resize(width, height);
        canvas.center_on(Coord::default());
        canvas
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cols = (width / self.cell_width) as i64;
        self.rows = height as i64;
        self.origin = self.clamp_origin(self.origin);
    }

    pub fn center_on(&mut self, at: Coord) {
        self.origin = self.clamp_origin(at - Coord::new(self.cols / 2, self.rows / 2));
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    /// Switch between one and two columns per cell, keeping the view's centre
    pub fn zoom(&mut self) {
        let centre = self.origin + Coord::new(self.cols / 2, self.rows / 2);
        self.cell_width = if self.cell_width > MIN_CELL_WIDTH { MIN_CELL_WIDTH } else { MAX_CELL_WIDTH };
        self.resize(self.width, self.height);
        self.center_on(centre);
    }

    /// Move the viewport by whole cells; stops at the playable area's edge
    pub fn pan(&mut self, dx: i64, dy: i64) {
        self.origin = self.clamp_origin(self.origin + Coord::new(dx, dy));
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    /// Viewport size in cells
    pub fn size(&self) -> (i64, i64) {
        (self.cols, self.rows)
    }

    /// World cell under a terminal position, `None` outside the board
    pub fn cell_at(&self, col: u16, row: u16) -> Option<Coord> {
        let cx = (col / self.cell_width) as i64;
        let cy = row as i64;
        if cx >= self.cols || cy >= self.rows {
            return None;
        }
        let at = self.origin + Coord::new(cx, cy);
        self.in_area(at).then_some(at)
    }

    /// Terminal position of a world cell's first column, if visible
    pub fn screen_pos(&self, at: Coord) -> Option<(i32, i32)> {
        let rel = at - self.origin;
        if rel.x < 0 || rel.y < 0 || rel.x >= self.cols || rel.y >= self.rows {
            return None;
        }
        Some(((rel.x * self.cell_width as i64) as i32, rel.y as i32))
    }

    pub fn in_area(&self, at: Coord) -> bool {
        let range = -self.max_extent..self.max_extent;
        range.contains(&at.x) && range.contains(&at.y)
    }

    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    /// Paint grid dots, live cells and the cursor (with its liveness) into the back buffer
    pub fn draw(&self, term: &mut Terminal, display: &DisplayConfig, cursor: Option<(Coord, bool)>) {
        // dots would fill every column when zoomed out
        if display.show_grid && self.cell_width > MIN_CELL_WIDTH {
            for y in 0..self.rows {
                for x in 0..self.cols {
                    let col = (x * self.cell_width as i64) as i32;
                    term.set(col, y as i32, '·', Some(display.grid_color), false);
                }
            }
        }

        for &at in self.marks.values() {
            if let Some((x, y)) = self.screen_pos(at) {
                self.fill(term, x, y, display.draw_char, display, false);
            }
        }

        if let Some((at, alive)) = cursor {
            if let Some((x, y)) = self.screen_pos(at) {
                let ch = if alive { display.draw_char } else { '+' };
                self.fill(term, x, y, ch, display, true);
            }
        }
    }

    fn fill(&self, term: &mut Terminal, x: i32, y: i32, ch: char, display: &DisplayConfig, cursor: bool) {
        let color = if cursor { display.cursor_color } else { display.alive_color };
        for i in 0..self.cell_width as i32 {
            term.set(x + i, y, ch, Some(color), cursor);
        }
    }

    fn clamp_origin(&self, origin: Coord) -> Coord {
        let clamp = |v: i64, span: i64| {
            let hi = (self.max_extent - span).max(-self.max_extent);
            v.clamp(-self.max_extent, hi)
        };
        Coord::new(clamp(origin.x, self.cols), clamp(origin.y, self.rows))
    }
}

impl Visuals for Canvas {
    type Handle = MarkId;

    fn create_visual(&mut self, at: Coord) -> MarkId {
        self.next_id += 1;
        let id = MarkId(self.next_id);
        self.marks.insert(id, at);
        id
    }

    fn destroy_visual(&mut self, handle: MarkId) {
        self.marks.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SparseGrid;

    fn canvas(width: u16, height: u16, max_extent: i64) -> Canvas {
        let display = DisplayConfig { max_extent, ..DisplayConfig::default() };
        Canvas::new(&display, width, height)
    }

    #[test]
    fn starts_centred_on_origin() {
        let c = canvas(80, 20, 65536);
        assert_eq!(c.size(), (40, 20));
        assert_eq!(c.origin(), Coord::new(-20, -10));
        assert_eq!(c.screen_pos(Coord::default()), Some((40, 10)));
    }

    #[test]
    fn snaps_screen_positions_to_cells() {
        let c = canvas(80, 20, 65536);
        assert_eq!(c.cell_at(40, 10), Some(Coord::new(0, 0)));
        assert_eq!(c.cell_at(41, 10), Some(Coord::new(0, 0)));
        assert_eq!(c.cell_at(39, 10), Some(Coord::new(-1, 0)));
        assert_eq!(c.cell_at(0, 0), Some(c.origin()));
        assert_eq!(c.cell_at(10, 20), None);
    }

    #[test]
    fn pan_stops_at_playable_edge() {
        let mut c = canvas(20, 10, 50);
        c.pan(-1000, -1000);
        assert_eq!(c.origin(), Coord::new(-50, -50));
        c.pan(1000, 1000);
        // 10 cells wide, 10 rows high
        assert_eq!(c.origin(), Coord::new(40, 40));
        assert_eq!(c.cell_at(19, 9), Some(Coord::new(49, 49)));
        c.pan(-5, 0);
        assert_eq!(c.origin(), Coord::new(35, 40));
    }

    #[test]
    fn viewport_larger_than_area_pins_to_low_edge() {
        let mut c = canvas(200, 100, 10);
        c.pan(3, 3);
        assert_eq!(c.origin(), Coord::new(-10, -10));
        assert_eq!(c.cell_at(199, 0), None);
    }

    #[test]
    fn zoom_keeps_the_centre_cell() {
        let mut c = canvas(80, 20, 65536);
        c.pan(7, 3);
        let centre = c.origin() + Coord::new(20, 10);

        c.zoom();
        assert_eq!(c.cell_width(), 1);
        assert_eq!(c.size(), (80, 20));
        assert_eq!(c.origin() + Coord::new(40, 10), centre);
        assert_eq!(c.cell_at(40, 10), Some(centre));

        c.zoom();
        assert_eq!(c.cell_width(), 2);
        assert_eq!(c.size(), (40, 20));
        assert_eq!(c.origin(), Coord::new(-13, -7));
    }

    #[test]
    fn grid_dots_hidden_when_zoomed_out() {
        let display = DisplayConfig::default();
        let mut c = canvas(20, 4, 65536);
        let mut term = Terminal::with_size(20, 4);
        c.draw(&mut term, &display, None);
        assert_eq!(term.get(0, 0).map(|t| t.ch), Some('·'));

        c.zoom();
        let mut term = Terminal::with_size(20, 4);
        c.draw(&mut term, &display, None);
        assert!((0..20).all(|x| term.get(x, 0).map(|t| t.ch) == Some(' ')));
    }

    #[test]
    fn tracks_one_mark_per_live_cell() {
        let mut grid = SparseGrid::new(canvas(80, 20, 65536));
        grid.toggle(Coord::new(0, 0));
        grid.toggle(Coord::new(1, 0));
        grid.toggle(Coord::new(0, 0));
        assert_eq!(grid.visuals().mark_count(), 1);

        grid.toggle(Coord::new(1, 1));
        grid.toggle(Coord::new(1, 2));
        grid.step();
        assert_eq!(grid.visuals().mark_count(), grid.population());
    }
}
