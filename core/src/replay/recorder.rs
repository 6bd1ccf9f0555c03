//! Replay recorder
//!
//! Records bike states and game events for later playback.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::GameTime;
use crate::bike::{BikeState, PhysicsSettings};
use crate::error::ReplayError;
use crate::events::{GameEvent, RecordedGameEvent};
use crate::replay::binary::BinaryWriter;
use crate::replay::types::{ReplayData, ReplayHeader, StateChunk};

/// Configuration for the recorder
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Level being played
    pub level_id: String,
    /// Who is driving
    pub player_name: String,
    /// States stored per second
    pub frame_rate: f32,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            level_id: String::new(),
            player_name: String::new(),
            frame_rate: 25.0,
        }
    }
}

/// Replay recorder state
pub struct Recorder {
    config: RecorderConfig,
    events: Vec<RecordedGameEvent>,
    chunks: Vec<StateChunk>,
}

impl Recorder {
    /// Create a new recorder with the given configuration
    pub fn new(config: RecorderConfig) -> Self {
        Self {
            config,
            events: Vec::new(),
            chunks: Vec::new(),
        }
    }

    /// Append one bike state, opening a new chunk when the current one is full
    pub fn store_state(&mut self, state: &BikeState, settings: &PhysicsSettings) {
        let record = state.serialize(settings);
        match self.chunks.last_mut() {
            Some(chunk) if !chunk.is_full() => chunk.push(&record),
            _ => {
                let mut chunk = StateChunk::default();
                chunk.push(&record);
                self.chunks.push(chunk);
            }
        }
    }

    /// Append an event that happened at `time`
    pub fn store_event(&mut self, time: GameTime, event: GameEvent) {
        self.events.push(RecordedGameEvent::new(time, event));
    }

    /// Number of states stored so far
    pub fn state_count(&self) -> usize {
        self.chunks.iter().map(StateChunk::len).sum()
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Close the run and hand back the replay
    pub fn finish(self, finished: bool, finish_time: GameTime) -> ReplayData {
        ReplayData {
            header: ReplayHeader {
                level_id: self.config.level_id,
                player_name: self.config.player_name,
                frame_rate: self.config.frame_rate,
                finished,
                finish_time,
                ..Default::default()
            },
            events: self.events,
            chunks: self.chunks,
        }
    }
}

impl ReplayData {
    /// Write to a file in the current format
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReplayError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        BinaryWriter::new(BufWriter::new(file)).write_replay(self)?;
        tracing::info!("Saved replay {} ({} states)", path.display(), self.state_count());
        Ok(())
    }
}
