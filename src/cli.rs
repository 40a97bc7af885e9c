//! Command-line interface for par-timeline.
//!
//! The subcommands expose the rendering and attachment helpers on their own,
//! which is handy for checking a palette or a media link without starting
//! the full-screen client.

use crate::ansi::AnsiLineRenderer;
use crate::config::Config;
use crate::highlight::{HighlightColors, draw_text_with_highlights};
use crate::label_color::{LabelColorAssigner, UserId};
use crate::lock::AdvisoryLock;
use crate::media::MediaFetcher;
use crate::status::StatusBar;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;
use std::sync::Arc;

/// par-timeline - a terminal social timeline client
#[derive(Parser, Debug)]
#[command(name = "par-timeline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level for the debug log file (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", global = true, value_parser = crate::debug::parse_level)]
    pub log_level: Option<LevelFilter>,

    /// Use this config file instead of the default one
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download attachments and open them in the system viewer
    Open {
        /// Attachment URLs, in timeline order
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Print text with mentions and hashtags highlighted
    Highlight {
        /// Lines of text to render
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Show the label color assigned to user ids
    LabelColor {
        /// Numeric user ids
        #[arg(required = true, allow_negative_numbers = true)]
        ids: Vec<UserId>,
    },
}

/// Held while an `open` runs, so a repeated request is turned away.
static FETCH_LOCK: AdvisoryLock = AdvisoryLock::new();

/// Load the config named on the command line, or the default one.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    Ok(config)
}

/// Run a parsed command. Returns the process exit code.
pub fn run(cli: &Cli, config: &Config) -> Result<i32> {
    match &cli.command {
        Commands::Open { urls } => run_open(config, urls),
        Commands::Highlight { text } => {
            let colors = HighlightColors::from(&config.colors);
            for line in text {
                println!("{}", render_highlighted(line, &colors));
            }
            Ok(0)
        }
        Commands::LabelColor { ids } => {
            let palette = &config.colors.label_palette;
            let assigner = LabelColorAssigner::new(palette.len());
            for &id in ids {
                println!("{}", describe_label(&assigner, palette, id));
            }
            Ok(0)
        }
    }
}

/// Render one line of text through the highlighter as an ANSI string.
pub fn render_highlighted(line: &str, colors: &HighlightColors) -> String {
    let mut renderer = AnsiLineRenderer::new(0);
    draw_text_with_highlights(&mut renderer, line, 0, 0, colors);
    renderer.render()
}

fn describe_label(
    assigner: &LabelColorAssigner,
    palette: &[crate::config::Color],
    id: UserId,
) -> String {
    let index = assigner.color_for(id);
    match assigner.label_color(id, palette) {
        Some(color) => format!(
            "{}\t{}\t#{:02x}{:02x}{:02x}\t\x1b[48;2;{};{};{}m    \x1b[0m",
            id, index, color.r, color.g, color.b, color.r, color.g, color.b
        ),
        None => format!("{}\t{}", id, index),
    }
}

fn run_open(config: &Config, urls: &[String]) -> Result<i32> {
    let _busy = match FETCH_LOCK.try_guard() {
        Ok(guard) => guard,
        Err(e) => {
            log::warn!("Attachment fetch requested while one is running: {}", e);
            eprintln!("par-timeline: attachment download already in progress");
            return Ok(1);
        }
    };

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let summary = runtime.block_on(async {
        let (sender, mut bar) = StatusBar::channel(config.status_clear_after());
        let printer = tokio::spawn(async move {
            while let Some(text) = bar.next().await {
                if !text.is_empty() {
                    eprintln!("{}", text);
                }
            }
        });

        let fetcher = MediaFetcher::from_config(&config.media, Arc::new(sender));
        let summary = fetcher.fetch_and_open(urls).await;
        // Dropping the fetcher drops the last sender and ends the printer.
        drop(fetcher);
        if let Err(e) = printer.await {
            log::error!("Status printer panicked: {}", e);
        }
        summary
    });

    Ok(if summary.failures == 0 { 0 } else { 1 })
}
