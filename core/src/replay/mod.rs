//! Replay files
//!
//! A replay is a header, a log of game events and a chunked list of
//! compressed bike states, recorded at a fixed rate:
//!
//! - **Binary format (`.rpl`)**: see [`binary`] for the layout
//! - **[`ReplayReader`]**: cursor used by ghosts to walk the states
//! - **[`Recorder`]**: builds a replay while a run is played
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Recording Mode                            │
//! │ bike state → Recorder → ReplayData → .rpl (binary)          │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Playback Mode                             │
//! │ .rpl → ReplayReader → Ghost → interpolated pose + events    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use ghostride_core::replay::{Recorder, RecorderConfig, ReplayReader};
//!
//! let mut recorder = Recorder::new(RecorderConfig {
//!     level_id: "tut1".into(),
//!     player_name: "rider".into(),
//!     frame_rate: 25.0,
//! });
//!
//! // During the game loop:
//! recorder.store_state(&bike, &settings);
//!
//! recorder.finish(true, finish_time).save("run.rpl")?;
//!
//! let mut reader = ReplayReader::open("run.rpl")?;
//! while !reader.end_of_file() {
//!     let state = reader.load_state(&settings)?;
//! }
//! ```

pub mod binary;
mod info;
mod playback;
mod recorder;
pub mod types;

pub use types::{
    ENDIANNESS_GUARD, FORMAT_VERSION, MIN_FORMAT_VERSION, ReplayData, ReplayHeader,
    STATES_PER_CHUNK, StateChunk,
};

pub use binary::{BinaryReader, BinaryWriter};

pub use info::ReplayInfo;
pub use playback::{ReplayPosition, ReplayReader};
pub use recorder::{Recorder, RecorderConfig};
