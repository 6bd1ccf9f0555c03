//! Ghostride Core - bike replays and ghost playback
//!
//! This crate provides the compressed bike state format, the replay file
//! format built on it, and the ghost engine that replays a recorded run
//! next to a live player.
//!
//! # Architecture
//!
//! - [`BikeState`] - Decoded pose of a bike and its rider
//! - [`SerializedBikeState`] - Fixed 40-byte record stored in replays
//! - [`ReplayReader`] - Cursor over the states and events of a replay file
//! - [`Recorder`] - Builds a replay while a run is played
//! - [`Ghost`] - Interpolated playback with event synchronization
//! - [`Scene`] - What a ghost needs from the level it plays in

pub mod bike;
pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod ghost;
pub mod replay;
pub mod scene;

/// Game time in hundredths of a second
pub type GameTime = f32;

// Re-export core types
pub use bike::{
    BikeGeometry, BikeState, DriveDir, PhysicsSettings, RiderPose, SERIALIZED_STATE_SIZE,
    SerializedBikeState, StateFlags,
};
pub use config::GhostConfig;
pub use error::{ConfigError, EventError, ReplayError, SceneError};
pub use events::{EntitySpeciality, GameEvent, RecordedGameEvent};
pub use ghost::{Ghost, StateWindow, format_time};
pub use replay::{Recorder, RecorderConfig, ReplayData, ReplayInfo, ReplayReader};
pub use scene::{Entity, Level, Scene};
