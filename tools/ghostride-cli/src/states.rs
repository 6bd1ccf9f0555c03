//! States command - dump decoded bike states

use anyhow::{Context, Result};
use clap::Args;
use ghostride_core::{BikeState, GhostConfig, ReplayReader};
use std::path::PathBuf;

/// Arguments for the states command
#[derive(Args)]
pub struct StatesArgs {
    /// Replay file (.rpl)
    pub replay: PathBuf,

    /// Maximum number of states to print
    #[arg(long, default_value = "20")]
    pub limit: usize,
}

/// Execute the states command
pub fn execute(args: StatesArgs, config: &GhostConfig) -> Result<()> {
    let reader = ReplayReader::open(&args.replay)
        .with_context(|| format!("Failed to open replay: {}", args.replay.display()))?;

    let data = reader.data();
    let shown = args.limit.min(data.state_count());
    for (index, record) in data.states().take(shown).enumerate() {
        let record = record.with_context(|| format!("Failed to decode state {}", index))?;
        let state = BikeState::deserialize(&record, &config.physics);
        println!("{:>6}  {}", index, format_state(&state));
    }

    if shown < data.state_count() {
        println!("... {} more state(s)", data.state_count() - shown);
    }
    Ok(())
}

pub fn format_state(state: &BikeState) -> String {
    format!(
        "t={:>8.2} {:?} center=({:.3}, {:.3}) front=({:.3}, {:.3}) rear=({:.3}, {:.3}) rpm={:.0}",
        state.game_time,
        state.dir,
        state.center.x,
        state.center.y,
        state.front_wheel.x,
        state.front_wheel.y,
        state.rear_wheel.x,
        state.rear_wheel.y,
        state.engine_rpm
    )
}
