// Commands module - handles CLI command execution

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::Write;

pub mod replay;

pub use replay::handle_replay;

/// Write a completion script for `shell` to `out`
pub fn handle_completion(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = crate::cli::Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut *out);

    out.flush().context("Failed to write completion script")
}
