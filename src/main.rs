use anyhow::Result;
use clap::Parser;
use par_timeline::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Route all log::info!() etc. to the debug log file. CLI --log-level takes
    // highest precedence, then RUST_LOG, then config (applied below).
    par_timeline::debug::init_log_bridge(cli.log_level);
    log::info!("Starting par-timeline {}", par_timeline::VERSION);

    let config = match cli::load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("par-timeline: error: {e:#}");
            std::process::exit(2);
        }
    };
    par_timeline::debug::apply_config_level(config.log_level.to_level_filter());

    let code = cli::run(&cli, &config)?;
    log::info!("par-timeline exiting with code {}", code);
    if code != 0 {
        // Non-zero exit: use process::exit so the shell sees the correct code.
        std::process::exit(code);
    }
    Ok(())
}
