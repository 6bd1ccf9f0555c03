//! Recorded game events
//!
//! Scripted level changes, collected entities and camera moves are logged
//! with their game time while recording. A ghost replays them against the
//! live scene and reverts them when the clock moves back.

mod types;
mod wire;

pub use types::{
    DynamicRotation, DynamicTranslation, EntitySpeciality, GameEvent, RecordedGameEvent,
};
pub use wire::{MAX_STRING_LEN, decode_events, encode_events, write_event};
pub(crate) use wire::{read_string, write_string};
