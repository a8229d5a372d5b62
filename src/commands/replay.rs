// Replay command - feed a recorded event stream through the TAP reporter

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::cli::args::ReplayArgs;
use crate::config::Config;
use crate::events::replay_events;
use crate::report::{Reporter, TapReporter};

/// Run `replay`. Returns whether the replayed run passed.
///
/// Events are parsed and rendered one line at a time, so TAP for earlier
/// events is written even if a later line is malformed.
pub fn handle_replay(args: &ReplayArgs, config: Option<&Config>) -> Result<bool> {
    let (reader, source): (Box<dyn BufRead>, String) = match args.input_path() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open event stream: {}", path.display()))?;
            (Box::new(BufReader::new(file)), path.display().to_string())
        }
        None => (Box::new(io::stdin().lock()), String::from("stdin")),
    };

    let output_path = args.output.clone().or_else(|| {
        config
            .and_then(|cfg| cfg.output.path.as_ref())
            .map(PathBuf::from)
    });
    let flush = !args.no_flush && config.map(|cfg| cfg.output.flush).unwrap_or(true);

    let sink: Box<dyn Write> = match &output_path {
        Some(path) => {
            info!("Writing TAP to {}", path.display());
            Box::new(File::create(path).with_context(|| {
                format!("Failed to create TAP output file: {}", path.display())
            })?)
        }
        None => Box::new(io::stdout()),
    };

    let mut reporter = TapReporter::new(sink).with_flush(flush);
    debug!("Replaying events from {}", source);
    let replayed = replay_events(reader, &mut reporter)
        .with_context(|| format!("Failed to replay events from {}", source));
    let passed = reporter.did_we_pass();

    let sink_error = reporter.take_sink_error();
    let flushed = reporter.into_inner().flush();

    let summary = replayed?;
    if let Some(err) = sink_error {
        return Err(err).context("Failed to write TAP output");
    }
    flushed.context("Failed to flush TAP output")?;

    if summary.events == 0 {
        warn!("Event stream is empty, no TAP was produced");
    } else if !summary.completed {
        warn!("Event stream does not end with run_complete");
    }

    Ok(passed)
}
