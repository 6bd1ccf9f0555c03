//! Events command - list the game events recorded with a run

use anyhow::{Context, Result};
use clap::Args;
use ghostride_core::{RecordedGameEvent, ReplayReader, format_time};
use std::path::PathBuf;

/// Arguments for the events command
#[derive(Args)]
pub struct EventsArgs {
    /// Replay file (.rpl)
    pub replay: PathBuf,
}

/// Execute the events command
pub fn execute(args: EventsArgs) -> Result<()> {
    let reader = ReplayReader::open(&args.replay)
        .with_context(|| format!("Failed to open replay: {}", args.replay.display()))?;

    if reader.events().is_empty() {
        println!("No events recorded.");
        return Ok(());
    }

    for recorded in reader.events() {
        println!("{}", format_event(recorded));
    }
    println!();
    println!("{} event(s)", reader.events().len());
    Ok(())
}

fn format_event(recorded: &RecordedGameEvent) -> String {
    format!(
        "{:>9}  [{:>2}] {:<28} {:?}",
        format_time(recorded.time),
        recorded.event.tag(),
        recorded.event.type_name(),
        recorded.event
    )
}
