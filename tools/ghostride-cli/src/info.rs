//! Info command - print a replay's header and counts

use anyhow::{Context, Result};
use clap::Args;
use ghostride_core::{ReplayInfo, ReplayReader};
use std::path::PathBuf;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Replay file (.rpl)
    pub replay: PathBuf,
}

/// Execute the info command
pub fn execute(args: InfoArgs) -> Result<()> {
    let reader = ReplayReader::open(&args.replay)
        .with_context(|| format!("Failed to open replay: {}", args.replay.display()))?;

    println!("=== {} ===", args.replay.display());
    println!("{}", ReplayInfo::from_data(reader.data()));
    Ok(())
}
