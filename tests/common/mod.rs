//! Shared integration test helpers for par-timeline.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` keeps files that use a subset of helpers quiet.

#![allow(dead_code)]

use par_timeline::config::{Color, Config};
use par_timeline::highlight::{CellRenderer, HighlightColors};
use std::path::PathBuf;
use tempfile::TempDir;

/// One drawn cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawnCell {
    pub x: usize,
    pub y: usize,
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

/// Renderer that records every cell in draw order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub cells: Vec<DrawnCell>,
}

impl CellRenderer for RecordingRenderer {
    fn set_cell(&mut self, x: usize, y: usize, ch: char, fg: Color, bg: Color) {
        self.cells.push(DrawnCell { x, y, ch, fg, bg });
    }
}

/// Distinct, easy to tell apart highlight colors.
pub fn test_colors() -> HighlightColors {
    HighlightColors {
        foreground: Color::new(255, 255, 255),
        background: Color::new(0, 0, 0),
        mention_background: Color::new(80, 80, 80),
        hashtag_foreground: Color::new(0, 0, 255),
    }
}

/// Writes `config` into a fresh temp dir and returns its path.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub fn config_file(config: &Config) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    config.save_to(&path).expect("Failed to write config");
    (path, temp_dir)
}
