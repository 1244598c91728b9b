use crate::terminal::Terminal;
use crossterm::style::Color;

pub const HELP_TEXT: &str = "\
LIFETERM
p / Enter    Start or stop the simulation
+ / -        Speed up / slow down
space        Toggle cell under cursor (paused only)
click        Toggle clicked cell (paused only)
arrows hjkl  Move cursor
H J K L      Pan the view
n            Single step (paused only)
c            Clear the board (paused only)
0            Centre view on origin
z            Zoom in / out
?            Show / hide this help
q / Esc      Quit";

/// Render a centered help overlay box with the provided text.
pub fn render_help_overlay(term: &mut Terminal, help_text: &str) {
    if help_text.is_empty() {
        return;
    }
    let (width, height) = term.size();

    let lines: Vec<&str> = help_text.lines().collect();
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4; // 2 chars padding each side
    let box_height = lines.len() + 2; // 1 row padding top/bottom

    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;

    let border_color = Color::White;
    let text_color = Color::Grey;

    // Top border: ┌─────┐
    term.set(start_x as i32, start_y as i32, '┌', Some(border_color), false);
    for x in 1..box_width - 1 {
        term.set((start_x + x) as i32, start_y as i32, '─', Some(border_color), false);
    }
    term.set((start_x + box_width - 1) as i32, start_y as i32, '┐', Some(border_color), false);

    for (i, line) in lines.iter().enumerate() {
        let y = (start_y + 1 + i) as i32;
        term.set(start_x as i32, y, '│', Some(border_color), false);

        let padding = max_width.saturating_sub(line.chars().count());
        let padded = format!(" {}{} ", line, " ".repeat(padding));
        term.set_str((start_x + 1) as i32, y, &padded, Some(text_color), i == 0);

        term.set((start_x + box_width - 1) as i32, y, '│', Some(border_color), false);
    }

    // Bottom border: └─────┘
    let bottom_y = (start_y + box_height - 1) as i32;
    term.set(start_x as i32, bottom_y, '└', Some(border_color), false);
    for x in 1..box_width - 1 {
        term.set((start_x + x) as i32, bottom_y, '─', Some(border_color), false);
    }
    term.set((start_x + box_width - 1) as i32, bottom_y, '┘', Some(border_color), false);
}

#[cfg(test)]
mod tests {
    use super::{render_help_overlay, HELP_TEXT};
    use crate::terminal::Terminal;

    #[test]
    fn overlay_is_centred_and_boxed() {
        let mut term = Terminal::with_size(80, 24);
        render_help_overlay(&mut term, "ab\ncd");
        // 6 wide, 4 high box centred in 80x24
        assert_eq!(term.get(37, 10).map(|c| c.ch), Some('┌'));
        assert_eq!(term.get(42, 13).map(|c| c.ch), Some('┘'));
        assert_eq!(term.get(39, 11).map(|c| c.ch), Some('a'));
    }

    #[test]
    fn empty_text_draws_nothing() {
        let mut term = Terminal::with_size(20, 5);
        render_help_overlay(&mut term, "");
        assert!((0..20).all(|x| term.get(x, 2).map(|c| c.ch) == Some(' ')));
    }

    #[test]
    fn help_lists_run_and_speed_keys() {
        assert!(HELP_TEXT.contains("Start or stop"));
        assert!(HELP_TEXT.contains("Speed up"));
    }
}
