//! File-backed logging for par-timeline.
//!
//! Every `log::info!()` etc. in the workspace ends up in
//! `/tmp/par_timeline_debug.log` on Unix/macOS, or
//! `%TEMP%\par_timeline_debug.log` on Windows. Writing to a file keeps log
//! output from tearing up the terminal UI. When `RUST_LOG` is set the same
//! lines are mirrored to stderr.
//!
//! Level precedence: `--log-level` on the command line, then `RUST_LOG`,
//! then the `log_level` config key (applied later via [`apply_config_level`]).

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Set when the CLI or `RUST_LOG` chose the level, so config cannot override it.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

struct FileLogger {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl FileLogger {
    fn write_raw(&self, msg: &str) {
        if let Some(ref mut file) = *self.file.lock() {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        self.write_raw(&line);
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(ref mut file) = *self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/par_timeline_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("par_timeline_debug.log")
    }
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Parse `RUST_LOG` when it holds a bare level name (`debug`, `warn`, ...).
fn env_level() -> Option<LevelFilter> {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|value| LevelFilter::from_str(value.trim()).ok())
}

/// Install the file logger as the `log` backend.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let env = env_level();
    let level = cli_level.or(env).unwrap_or(LevelFilter::Info);
    LEVEL_PINNED.store(cli_level.is_some() || env.is_some(), Ordering::SeqCst);

    let mut installed = false;
    let logger = LOGGER.get_or_init(|| {
        installed = true;
        // Silently run without a file if it can't be opened; stderr would
        // interfere with whatever is drawing to the terminal.
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok();
        FileLogger {
            file: Mutex::new(file),
            mirror_stderr: std::env::var_os("RUST_LOG").is_some(),
        }
    });

    if installed && log::set_logger(logger).is_ok() {
        logger.write_raw(&format!(
            "\n{}\npar-timeline debug session started at {} (level={})\n{}\n",
            "=".repeat(80),
            get_timestamp(),
            level,
            "=".repeat(80)
        ));
    }
    log::set_max_level(level);
}

/// Apply the config file's level unless the CLI or `RUST_LOG` already chose one.
pub fn apply_config_level(level: LevelFilter) {
    if !LEVEL_PINNED.load(Ordering::SeqCst) {
        log::set_max_level(level);
    }
}

/// clap value parser for `--log-level`.
pub fn parse_level(value: &str) -> Result<LevelFilter, String> {
    LevelFilter::from_str(value.trim()).map_err(|_| {
        format!(
            "invalid log level '{}' (expected off, error, warn, info, debug or trace)",
            value
        )
    })
}
