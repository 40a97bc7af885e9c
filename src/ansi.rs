//! A [`CellRenderer`] that turns one row of cells into an ANSI string.
//!
//! Used by the `highlight` subcommand to print highlighted text straight to
//! a terminal without a full-screen UI.

use crate::highlight::CellRenderer;
use par_timeline_config::Color;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AnsiCell {
    ch: char,
    fg: Color,
    bg: Color,
}

/// Collects the cells of a single row; cells on other rows are ignored.
#[derive(Debug, Default)]
pub struct AnsiLineRenderer {
    row: usize,
    cells: Vec<Option<AnsiCell>>,
    /// Columns covered by the right half of a wide character
    covered: Vec<bool>,
}

impl AnsiLineRenderer {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            ..Self::default()
        }
    }

    /// Render the collected cells with 24-bit color escapes.
    ///
    /// Gaps are filled with uncolored spaces; the string always ends with a
    /// reset so colors do not leak into following output.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut current: Option<(Color, Color)> = None;
        for (x, cell) in self.cells.iter().enumerate() {
            match cell {
                Some(cell) => {
                    if current != Some((cell.fg, cell.bg)) {
                        let _ = write!(
                            out,
                            "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m",
                            cell.fg.r, cell.fg.g, cell.fg.b, cell.bg.r, cell.bg.g, cell.bg.b
                        );
                        current = Some((cell.fg, cell.bg));
                    }
                    out.push(cell.ch);
                }
                None if self.covered.get(x).copied().unwrap_or(false) => {}
                None => {
                    if current.take().is_some() {
                        out.push_str("\x1b[0m");
                    }
                    out.push(' ');
                }
            }
        }
        out.push_str("\x1b[0m");
        out
    }

    /// The characters alone, without escapes.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(x, cell)| match cell {
                Some(cell) => Some(cell.ch),
                None if self.covered.get(x).copied().unwrap_or(false) => None,
                None => Some(' '),
            })
            .collect()
    }

    fn ensure_len(&mut self, len: usize) {
        if self.cells.len() < len {
            self.cells.resize(len, None);
            self.covered.resize(len, false);
        }
    }
}

impl CellRenderer for AnsiLineRenderer {
    fn set_cell(&mut self, x: usize, y: usize, ch: char, fg: Color, bg: Color) {
        if y != self.row {
            return;
        }
        let wide = unicode_width::UnicodeWidthChar::width(ch) == Some(2);
        self.ensure_len(x + if wide { 2 } else { 1 });
        self.cells[x] = Some(AnsiCell { ch, fg, bg });
        self.covered[x] = false;
        if wide {
            self.cells[x + 1] = None;
            self.covered[x + 1] = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{HighlightColors, draw_text_with_highlights};

    #[test]
    fn test_plain_text_round_trips_with_wide_chars() {
        let mut renderer = AnsiLineRenderer::new(0);
        draw_text_with_highlights(&mut renderer, "日本 @you", 0, 0, &HighlightColors::default());
        assert_eq!(renderer.plain_text(), "日本 @you");
    }

    #[test]
    fn test_render_switches_colors_only_on_change() {
        let fg = Color::new(1, 2, 3);
        let bg = Color::new(4, 5, 6);
        let mut renderer = AnsiLineRenderer::new(0);
        renderer.set_cell(0, 0, 'a', fg, bg);
        renderer.set_cell(1, 0, 'b', fg, bg);
        assert_eq!(
            renderer.render(),
            "\x1b[38;2;1;2;3m\x1b[48;2;4;5;6mab\x1b[0m"
        );
    }

    #[test]
    fn test_other_rows_and_gaps() {
        let c = Color::new(0, 0, 0);
        let mut renderer = AnsiLineRenderer::new(2);
        renderer.set_cell(0, 1, 'x', c, c);
        renderer.set_cell(2, 2, 'y', c, c);
        assert_eq!(renderer.plain_text(), "  y");
    }
}
