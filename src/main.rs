// Main entry point for tapreport

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use tapreport::cli::{Cli, Commands, ReplayArgs};
use tapreport::commands::{handle_completion, handle_replay};
use tapreport::config::Config;
use tapreport::logging;

fn main() -> Result<()> {
    // Load configuration from file (if exists)
    let config = Config::load();

    let cli = Cli::parse();

    let verbose = cli.verbose || config.as_ref().is_some_and(|cfg| cfg.general.verbose);
    logging::init(verbose);

    if verbose {
        info!("Starting tapreport v{}", env!("CARGO_PKG_VERSION"));
    }

    if let Some(shell) = cli.completion {
        return handle_completion(shell, &mut std::io::stdout());
    }

    if let Some(config_file) = cli.init_config {
        Config::default().write_to_file(&config_file)?;
        println!("Created configuration file: {}", config_file.display());
        return Ok(());
    }

    let args = match cli.command {
        Some(Commands::Replay(args)) => args,
        None => ReplayArgs::default(),
    };

    match handle_replay(&args, config.as_ref()) {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(2);
        }
    }
}
