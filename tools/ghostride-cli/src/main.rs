//! Ghostride CLI - Inspect bike replays and drive ghosts
//!
//! # Commands
//!
//! - `ghostride info` - Print a replay's header and counts
//! - `ghostride events` - List the recorded game events
//! - `ghostride states` - Dump decoded bike states
//! - `ghostride ghost` - Play a replay as a ghost over its own level
//!
//! # Usage
//!
//! ```bash
//! ghostride info run.rpl
//! ghostride states run.rpl --limit 50
//! ghostride ghost run.rpl --step 4 --config ghostride.toml
//! ```
//!
//! # Configuration (ghostride.toml)
//!
//! ```toml
//! interpolation = true
//! max_interpolation_time = 300.0
//! max_interpolation_distance = 5.0
//!
//! [physics]
//! engine_rpm_min = 400.0
//! engine_rpm_max = 8000.0
//! ```

mod events;
mod ghost;
mod info;
mod states;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ghostride_core::GhostConfig;
use std::path::{Path, PathBuf};

/// Ghostride CLI - Inspect bike replays and drive ghosts
#[derive(Parser)]
#[command(name = "ghostride")]
#[command(about = "Inspect bike replays and drive ghosts")]
#[command(version)]
struct Cli {
    /// Ghost configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a replay's header and counts
    Info(info::InfoArgs),

    /// List the recorded game events
    Events(events::EventsArgs),

    /// Dump decoded bike states
    States(states::StatesArgs),

    /// Play a replay as a ghost over its own level
    Ghost(ghost::GhostArgs),
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info(args) => info::execute(args),
        Commands::Events(args) => events::execute(args),
        Commands::States(args) => states::execute(args, &config),
        Commands::Ghost(args) => ghost::execute(args, config),
    }
}

/// Load the configuration file, or defaults when none is given
fn load_config(path: Option<&Path>) -> Result<GhostConfig> {
    match path {
        Some(path) => GhostConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(GhostConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_global_config() {
        let cli = Cli::try_parse_from([
            "ghostride",
            "states",
            "run.rpl",
            "--limit",
            "5",
            "--config",
            "ghostride.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ghostride.toml")));
        match cli.command {
            Commands::States(args) => {
                assert_eq!(args.replay, PathBuf::from("run.rpl"));
                assert_eq!(args.limit, 5);
            }
            _ => panic!("expected states command"),
        }
    }

    #[test]
    fn test_load_config_default_and_file() {
        assert_eq!(load_config(None).unwrap(), GhostConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghostride.toml");
        std::fs::write(&path, "interpolation = false\n").unwrap();
        assert!(!load_config(Some(&path)).unwrap().interpolation);

        assert!(load_config(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
