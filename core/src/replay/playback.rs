//! Replay reader
//!
//! Cursor over the decoded states of a replay, used by ghosts and tools.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::GameTime;
use crate::bike::{BikeState, PhysicsSettings, SerializedBikeState};
use crate::error::ReplayError;
use crate::events::RecordedGameEvent;
use crate::replay::binary::BinaryReader;
use crate::replay::types::{ReplayData, ReplayHeader};

/// Saved cursor, see [`ReplayReader::position`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayPosition(usize);

/// Sequential state reader with rewind support
#[derive(Debug)]
pub struct ReplayReader {
    data: ReplayData,
    cursor: usize,
    eof: bool,
}

impl ReplayReader {
    /// Open and fully decode a replay file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            "Opened replay {} ({} on {}, {} states)",
            path.display(),
            reader.player_name(),
            reader.level_id(),
            reader.state_count()
        );
        Ok(reader)
    }

    /// Decode a replay from any byte source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReplayError> {
        let data = BinaryReader::new(reader).read_replay()?;
        Self::from_data(data)
    }

    /// Wrap already decoded replay data; it must hold at least one state
    pub fn from_data(data: ReplayData) -> Result<Self, ReplayError> {
        if data.state_count() == 0 {
            return Err(ReplayError::Empty);
        }
        Ok(Self {
            data,
            cursor: 0,
            eof: false,
        })
    }

    pub fn header(&self) -> &ReplayHeader {
        &self.data.header
    }

    pub fn data(&self) -> &ReplayData {
        &self.data
    }

    pub fn level_id(&self) -> &str {
        &self.data.header.level_id
    }

    pub fn player_name(&self) -> &str {
        &self.data.header.player_name
    }

    /// States per second
    pub fn frame_rate(&self) -> f32 {
        self.data.header.frame_rate
    }

    pub fn did_finish(&self) -> bool {
        self.data.header.finished
    }

    pub fn finish_time(&self) -> GameTime {
        self.data.header.finish_time
    }

    pub fn state_count(&self) -> usize {
        self.data.state_count()
    }

    pub fn events(&self) -> &[RecordedGameEvent] {
        &self.data.events
    }

    /// Events with mutable `passed` bookkeeping
    pub fn events_mut(&mut self) -> &mut [RecordedGameEvent] {
        &mut self.data.events
    }

    /// Record under the cursor
    pub fn peek_serialized(&self) -> Result<SerializedBikeState, ReplayError> {
        self.data.state(self.cursor)
    }

    /// Decode the state under the cursor without moving it
    pub fn peek_state(&self, settings: &PhysicsSettings) -> Result<BikeState, ReplayError> {
        let record = self.peek_serialized()?;
        Ok(BikeState::deserialize(&record, settings))
    }

    /// Decode the state under the cursor and move past it
    ///
    /// On the last state the cursor stays put and end of file is flagged.
    pub fn load_state(&mut self, settings: &PhysicsSettings) -> Result<BikeState, ReplayError> {
        let state = self.peek_state(settings)?;
        if self.cursor + 1 >= self.state_count() {
            if !self.eof {
                tracing::debug!("Replay reached its last state at {}", state.game_time);
            }
            self.eof = true;
        } else {
            self.cursor += 1;
        }
        Ok(state)
    }

    /// Whether the last state has been loaded
    pub fn end_of_file(&self) -> bool {
        self.eof
    }

    /// Move back by `time` hundredths worth of states, at least `min_states`
    pub fn fast_rewind(&mut self, time: GameTime, min_states: usize) {
        let states = self.states_for(time).max(min_states);
        self.cursor = self.cursor.saturating_sub(states);
        self.eof = false;
    }

    /// Move forward by `time` hundredths worth of states, stopping on the last
    pub fn fast_forward(&mut self, time: GameTime) {
        let states = self.states_for(time);
        self.cursor = (self.cursor + states).min(self.state_count() - 1);
    }

    /// Move back one state; false when already on the first
    pub fn step_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.eof = false;
        true
    }

    pub fn at_start(&self) -> bool {
        self.cursor == 0
    }

    /// Current cursor, to be restored with [`rewind_at`](Self::rewind_at)
    pub fn position(&self) -> ReplayPosition {
        ReplayPosition(self.cursor)
    }

    /// Restore a saved cursor
    pub fn rewind_at(&mut self, position: ReplayPosition) {
        self.cursor = position.0.min(self.state_count() - 1);
        self.eof = false;
    }

    /// Back to the first state with every event unapplied
    pub fn reinitialize(&mut self) {
        self.cursor = 0;
        self.eof = false;
        for event in &mut self.data.events {
            event.passed = false;
        }
    }

    fn states_for(&self, time: GameTime) -> usize {
        let states = time * self.frame_rate() / 100.0;
        if states.is_finite() && states > 0.0 {
            states as usize
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::GameEvent;
    use crate::replay::types::StateChunk;

    /// `count` states 4 hundredths apart at 25 states per second
    fn reader(count: usize) -> ReplayReader {
        let mut chunk = StateChunk::default();
        for i in 0..count {
            chunk.push(&SerializedBikeState {
                game_time: i as f32 * 4.0,
                ..Default::default()
            });
        }
        let data = ReplayData {
            events: vec![RecordedGameEvent::new(8.0, GameEvent::HideArrow)],
            chunks: vec![chunk],
            ..Default::default()
        };
        ReplayReader::from_data(data).unwrap()
    }

    fn time(reader: &ReplayReader) -> f32 {
        reader.peek_serialized().unwrap().game_time
    }

    #[test]
    fn test_empty_replay_rejected() {
        let data = ReplayData {
            chunks: vec![StateChunk::default()],
            ..Default::default()
        };
        assert!(matches!(ReplayReader::from_data(data), Err(ReplayError::Empty)));
    }

    #[test]
    fn test_load_until_eof() {
        let settings = PhysicsSettings::default();
        let mut reader = reader(3);

        assert_eq!(reader.load_state(&settings).unwrap().game_time, 0.0);
        assert_eq!(reader.load_state(&settings).unwrap().game_time, 4.0);
        assert!(!reader.end_of_file());
        assert_eq!(reader.load_state(&settings).unwrap().game_time, 8.0);
        assert!(reader.end_of_file());

        // the last state repeats once at the end
        assert_eq!(reader.load_state(&settings).unwrap().game_time, 8.0);
    }

    #[test]
    fn test_peek_does_not_move() {
        let settings = PhysicsSettings::default();
        let reader = reader(3);
        reader.peek_state(&settings).unwrap();
        assert!(reader.at_start());
        assert_eq!(time(&reader), 0.0);
    }

    #[test]
    fn test_fast_rewind_by_time() {
        let settings = PhysicsSettings::default();
        let mut reader = reader(20);
        for _ in 0..20 {
            reader.load_state(&settings).unwrap();
        }
        assert!(reader.end_of_file());

        // 20 hundredths at 25 states/s is 5 states
        reader.fast_rewind(20.0, 1);
        assert!(!reader.end_of_file());
        assert_eq!(time(&reader), 14.0 * 4.0);

        // below one state, min_states applies
        reader.fast_rewind(0.5, 1);
        assert_eq!(time(&reader), 13.0 * 4.0);

        reader.fast_rewind(10_000.0, 1);
        assert!(reader.at_start());
    }

    #[test]
    fn test_fast_forward_clamps() {
        let mut reader = reader(10);
        reader.fast_forward(20.0);
        assert_eq!(time(&reader), 5.0 * 4.0);
        reader.fast_forward(10_000.0);
        assert_eq!(time(&reader), 9.0 * 4.0);
    }

    #[test]
    fn test_step_back() {
        let settings = PhysicsSettings::default();
        let mut reader = reader(3);
        assert!(!reader.step_back());
        reader.load_state(&settings).unwrap();
        assert!(reader.step_back());
        assert!(reader.at_start());
    }

    #[test]
    fn test_position_and_reinitialize() {
        let settings = PhysicsSettings::default();
        let mut reader = reader(10);
        for _ in 0..4 {
            reader.load_state(&settings).unwrap();
        }
        let saved = reader.position();
        reader.load_state(&settings).unwrap();
        reader.events_mut()[0].passed = true;

        reader.rewind_at(saved);
        assert_eq!(time(&reader), 16.0);

        reader.reinitialize();
        assert!(reader.at_start());
        assert!(!reader.events()[0].passed);
    }
}
