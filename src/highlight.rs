//! Drawing timeline text with `@mention` and `#hashtag` highlights.
//!
//! [`draw_text_with_highlights`] walks a line once, left to right, with one
//! character of lookahead, and emits one cell per character. Columns advance
//! by display width, so wide (CJK, emoji) characters take two cells.
//!
//! Highlight rules:
//!
//! - A mention starts at `@` when the next character can appear in a screen
//!   name (`[A-Za-z0-9_]`). It ends at the first character that cannot; that
//!   character is drawn normally. Mentions change the background.
//! - A hashtag starts at `#` when the `#` opens the line or follows a space,
//!   and the next character exists and is not a space. At each space inside a
//!   hashtag the next character is checked: another `#` keeps the highlight
//!   running through the space (`#a #b` is one span), anything else ends the
//!   hashtag at that space. Hashtags change the foreground.
//! - The two never overlap; a mention is checked first.

use crate::terminal::TerminalSizeProvider;
use par_timeline_config::{Color, ColorConfig};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Sink for drawn cells, usually the terminal back buffer.
pub trait CellRenderer {
    fn set_cell(&mut self, x: usize, y: usize, ch: char, fg: Color, bg: Color);
}

/// Colors used while scanning one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightColors {
    pub foreground: Color,
    pub background: Color,
    pub mention_background: Color,
    pub hashtag_foreground: Color,
}

impl From<&ColorConfig> for HighlightColors {
    fn from(config: &ColorConfig) -> Self {
        Self {
            foreground: config.foreground,
            background: config.background,
            mention_background: config.mention_background,
            hashtag_foreground: config.hashtag_foreground,
        }
    }
}

impl Default for HighlightColors {
    fn default() -> Self {
        Self::from(&ColorConfig::default())
    }
}

/// Which span the scanner is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightMode {
    Normal,
    Mention,
    Hashtag,
}

impl HighlightMode {
    /// Mode for `current`, given the mode at the previous character.
    ///
    /// A span never opens on the last character of a line: both triggers
    /// need a following character to look at.
    fn advance(self, prev: Option<char>, current: char, next: Option<char>) -> Self {
        match self {
            HighlightMode::Normal => {
                if current == '@' && next.is_some_and(is_screen_name_usable) {
                    HighlightMode::Mention
                } else if current == '#'
                    && prev.is_none_or(|p| p == ' ')
                    && next.is_some_and(|n| n != ' ')
                {
                    HighlightMode::Hashtag
                } else {
                    HighlightMode::Normal
                }
            }
            HighlightMode::Mention if is_screen_name_usable(current) => HighlightMode::Mention,
            HighlightMode::Mention => HighlightMode::Normal,
            HighlightMode::Hashtag if current == ' ' && next != Some('#') => HighlightMode::Normal,
            HighlightMode::Hashtag => HighlightMode::Hashtag,
        }
    }

    fn colors(self, colors: &HighlightColors) -> (Color, Color) {
        match self {
            HighlightMode::Normal => (colors.foreground, colors.background),
            HighlightMode::Mention => (colors.foreground, colors.mention_background),
            HighlightMode::Hashtag => (colors.hashtag_foreground, colors.background),
        }
    }
}

/// Characters allowed in a screen name.
pub fn is_screen_name_usable(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether every character of `s` is allowed in a screen name.
pub fn is_screen_name(s: &str) -> bool {
    s.chars().all(is_screen_name_usable)
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Draw `text` at `(x, y)` in one color pair. Returns the columns used.
pub fn draw_text<R: CellRenderer + ?Sized>(
    renderer: &mut R,
    text: &str,
    x: usize,
    y: usize,
    fg: Color,
    bg: Color,
) -> usize {
    let mut col = 0;
    for c in text.chars() {
        renderer.set_cell(x + col, y, c, fg, bg);
        col += char_width(c);
    }
    col
}

/// Draw `text` at `(x, y)` with mentions and hashtags highlighted.
/// Returns the columns used.
pub fn draw_text_with_highlights<R: CellRenderer + ?Sized>(
    renderer: &mut R,
    text: &str,
    x: usize,
    y: usize,
    colors: &HighlightColors,
) -> usize {
    let mut mode = HighlightMode::Normal;
    let mut prev = None;
    let mut col = 0;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        mode = mode.advance(prev, c, chars.peek().copied());
        let (fg, bg) = mode.colors(colors);
        renderer.set_cell(x + col, y, c, fg, bg);
        col += char_width(c);
        prev = Some(c);
    }
    col
}

/// Paint row `y` from column `offset` to the right edge with `bg`.
pub fn fill_line<R: CellRenderer + ?Sized>(
    renderer: &mut R,
    size: &dyn TerminalSizeProvider,
    offset: usize,
    y: usize,
    fg: Color,
    bg: Color,
) {
    let (width, _) = size.size();
    for x in offset..usize::from(width) {
        renderer.set_cell(x, y, ' ', fg, bg);
    }
}

/// Pad `text` with spaces so it sits centered in `width` columns.
///
/// An odd amount of padding puts the extra space on the left. Text already
/// as wide as `width` is returned unchanged.
pub fn centered(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let pad = width - text_width;
    let right = pad / 2;
    let left = pad - right;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}
