//! Ghost command - play a replay as a ghost over its own level
//!
//! The level is rebuilt from the entities named by the replay's events, so
//! event application and collectible timing can be inspected without the
//! game.

use anyhow::{Context, Result};
use clap::Args;
use ghostride_core::{Entity, GameEvent, Ghost, GhostConfig, Level, ReplayReader, format_time};
use glam::Vec2;
use std::path::PathBuf;

use crate::states::format_state;

/// Smallest accepted `--step`, one ten-thousandth of a second
const MIN_STEP: f32 = 0.01;

/// Arguments for the ghost command
#[derive(Args)]
pub struct GhostArgs {
    /// Replay file (.rpl)
    pub replay: PathBuf,

    /// Time step between printed poses, in hundredths
    #[arg(long, default_value = "10")]
    pub step: f32,

    /// Disable interpolation between recorded states
    #[arg(long)]
    pub no_interpolation: bool,
}

/// Execute the ghost command
pub fn execute(args: GhostArgs, config: GhostConfig) -> Result<()> {
    check_step(args.step)?;

    let reader = ReplayReader::open(&args.replay)
        .with_context(|| format!("Failed to open replay: {}", args.replay.display()))?;
    let end = reader
        .data()
        .state(reader.state_count() - 1)
        .context("Failed to decode the last state")?
        .game_time;

    let mut level = level_from_events(reader.level_id(), reader.events().iter().map(|e| &e.event));
    let mut ghost = Ghost::new(reader, config).context("Failed to create ghost")?;
    apply_overrides(&mut ghost, &args);
    ghost.init_to_take_entities(&level);

    println!("=== {} on {} ===", ghost.description(), ghost.level_id());

    for tick in 0u64.. {
        let time = tick as f32 * args.step;
        ghost.update(time, Some(&mut level));
        println!(
            "{:>9}  {}  v={:.3}",
            format_time(time),
            format_state(ghost.state()),
            ghost.linear_velocity()
        );
        if ghost.is_finished() || ghost.is_dead() || time > end {
            break;
        }
    }

    println!();
    if ghost.is_finished() {
        println!("Finished in {}", format_time(ghost.finish_time()));
    } else if ghost.is_dead() {
        println!("Died at {}", format_time(ghost.state().game_time));
    }
    println!("Collectibles taken at: {:?}", ghost.to_take_times());
    println!("Destroyed entities: {:?}", level.destroyed_entities());
    tracing::debug!("{} scripted event(s) left applied", level.script_events().len());
    Ok(())
}

fn check_step(step: f32) -> Result<()> {
    if !step.is_finite() || step < MIN_STEP {
        anyhow::bail!("--step must be at least {} (got {})", MIN_STEP, step);
    }
    Ok(())
}

/// Command-line switches only ever narrow the loaded config
fn apply_overrides(ghost: &mut Ghost, args: &GhostArgs) {
    if args.no_interpolation {
        ghost.set_interpolation(false);
    }
}

/// Level holding every entity the events destroy, placed where they died
fn level_from_events<'a>(id: &str, events: impl Iterator<Item = &'a GameEvent>) -> Level {
    let mut level = Level::new(id);
    for event in events {
        if let GameEvent::EntityDestroyed {
            entity_id,
            speciality,
            size,
            x,
            y,
        } = event
        {
            level.add_entity(Entity::new(entity_id.clone(), *speciality, Vec2::new(*x, *y), *size));
        }
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostride_core::{
        BikeState, EntitySpeciality, PhysicsSettings, Recorder, RecorderConfig, Scene,
    };

    fn args(no_interpolation: bool) -> GhostArgs {
        GhostArgs {
            replay: PathBuf::from("run.rpl"),
            step: 10.0,
            no_interpolation,
        }
    }

    /// Frame moves one unit per state, states at 0, 100 and 200
    fn ghost(config: GhostConfig) -> Ghost {
        let settings = PhysicsSettings::default();
        let mut recorder = Recorder::new(RecorderConfig {
            frame_rate: 1.0,
            ..Default::default()
        });
        for i in 0..3 {
            let state = BikeState {
                center: Vec2::new(i as f32, 0.0),
                game_time: i as f32 * 100.0,
                ..Default::default()
            };
            recorder.store_state(&state, &settings);
        }
        let reader = ReplayReader::from_data(recorder.finish(true, 200.0)).unwrap();
        Ghost::new(reader, config).unwrap()
    }

    #[test]
    fn test_check_step() {
        assert!(check_step(10.0).is_ok());
        assert!(check_step(MIN_STEP).is_ok());
        assert!(check_step(1e-9).is_err());
        assert!(check_step(0.0).is_err());
        assert!(check_step(-1.0).is_err());
        assert!(check_step(f32::NAN).is_err());
        assert!(check_step(f32::INFINITY).is_err());
    }

    #[test]
    fn test_config_interpolation_survives_without_flag() {
        let config = GhostConfig {
            interpolation: false,
            ..Default::default()
        };
        let mut ghost = ghost(config);
        apply_overrides(&mut ghost, &args(false));

        ghost.update(0.0, None);
        ghost.update(50.0, None);
        assert_eq!(ghost.state().game_time, 0.0);
    }

    #[test]
    fn test_no_interpolation_flag_disables_blending() {
        let mut ghost = ghost(GhostConfig::default());
        ghost.update(0.0, None);
        ghost.update(50.0, None);
        assert_eq!(ghost.state().game_time, 50.0);

        apply_overrides(&mut ghost, &args(true));
        ghost.update(60.0, None);
        assert_eq!(ghost.state().game_time, 0.0);
    }

    #[test]
    fn test_level_from_events() {
        let events = [
            GameEvent::EntityDestroyed {
                entity_id: "berry".into(),
                speciality: EntitySpeciality::IsToTake,
                size: 0.5,
                x: 3.0,
                y: 4.0,
            },
            GameEvent::ClearMessages,
        ];
        let level = level_from_events("tut1", events.iter());

        assert_eq!(level.id(), "tut1");
        let berry = level.entity("berry").unwrap();
        assert!(berry.is_to_take());
        assert!(berry.is_alive());
        assert_eq!(berry.position, Vec2::new(3.0, 4.0));
    }
}
