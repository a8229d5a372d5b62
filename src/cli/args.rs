// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Render recorded test-lifecycle events as a nested TAP 13 stream
#[derive(Parser, Debug)]
#[command(name = "tapreport")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render test-lifecycle events as TAP version 13", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose debug output (on stderr)
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,

    /// Print shell completion script (bash, zsh, fish, elvish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_enum)]
    pub completion: Option<Shell>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a JSON-lines event stream through the TAP reporter
    Replay(ReplayArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReplayArgs {
    /// Event stream file ("-" or omitted for stdin)
    #[arg(required = false)]
    pub input: Option<PathBuf>,

    /// Write TAP to this file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Do not flush the output after every event
    #[arg(long, default_value_t = false)]
    pub no_flush: bool,
}

impl ReplayArgs {
    /// Input path, or `None` when reading stdin
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }
}
