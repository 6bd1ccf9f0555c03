//! Core types for replay files

use crate::GameTime;
use crate::bike::{SERIALIZED_STATE_SIZE, SerializedBikeState};
use crate::error::ReplayError;
use crate::events::RecordedGameEvent;

/// Version written by [`BinaryWriter`](super::BinaryWriter)
pub const FORMAT_VERSION: u8 = 3;

/// Oldest version still readable
pub const MIN_FORMAT_VERSION: u8 = 1;

/// Written right after the version byte; reads back differently on a
/// byte-swapped file
pub const ENDIANNESS_GUARD: i32 = 0x1234_5678;

/// States stored per chunk
pub const STATES_PER_CHUNK: usize = 512;

/// Replay header
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayHeader {
    /// File format version
    pub version: u8,
    /// Level the run was recorded on
    pub level_id: String,
    /// Who drove
    pub player_name: String,
    /// Recorded states per second
    pub frame_rate: f32,
    /// Whether the run ended by finishing the level (otherwise the rider died)
    pub finished: bool,
    /// Game time of the finish, in hundredths
    pub finish_time: GameTime,
}

impl Default for ReplayHeader {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            level_id: String::new(),
            player_name: String::new(),
            frame_rate: 25.0,
            finished: false,
            finish_time: 0.0,
        }
    }
}

/// A block of consecutive raw state records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateChunk {
    data: Vec<u8>,
}

impl StateChunk {
    /// Wrap raw record bytes; the length must be a whole number of records
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, ReplayError> {
        if data.len() % SERIALIZED_STATE_SIZE != 0 {
            return Err(ReplayError::CorruptBody("partial state record in chunk"));
        }
        Ok(Self { data })
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.data.len() / SERIALIZED_STATE_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= STATES_PER_CHUNK
    }

    /// Raw record bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Append one record
    pub fn push(&mut self, state: &SerializedBikeState) {
        self.data.extend_from_slice(&state.to_bytes());
    }

    /// Decode record `index`
    pub fn get(&self, index: usize) -> Result<SerializedBikeState, ReplayError> {
        let start = index * SERIALIZED_STATE_SIZE;
        let bytes = self
            .data
            .get(start..start + SERIALIZED_STATE_SIZE)
            .ok_or(ReplayError::CorruptBody("state index out of range"))?;
        Ok(SerializedBikeState::from_bytes(bytes)?)
    }
}

/// Complete replay (in-memory representation)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayData {
    pub header: ReplayHeader,
    pub events: Vec<RecordedGameEvent>,
    pub chunks: Vec<StateChunk>,
}

impl ReplayData {
    /// Total number of states across chunks
    pub fn state_count(&self) -> usize {
        self.chunks.iter().map(StateChunk::len).sum()
    }

    /// Decode the state at a global index
    pub fn state(&self, mut index: usize) -> Result<SerializedBikeState, ReplayError> {
        for chunk in &self.chunks {
            if index < chunk.len() {
                return chunk.get(index);
            }
            index -= chunk.len();
        }
        Err(ReplayError::CorruptBody("state index out of range"))
    }

    /// Decode every state in order
    pub fn states(&self) -> impl Iterator<Item = Result<SerializedBikeState, ReplayError>> + '_ {
        self.chunks
            .iter()
            .flat_map(|chunk| (0..chunk.len()).map(move |i| chunk.get(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time: f32) -> SerializedBikeState {
        SerializedBikeState {
            game_time: time,
            ..Default::default()
        }
    }

    #[test]
    fn test_chunk_push_and_get() {
        let mut chunk = StateChunk::default();
        assert!(chunk.is_empty());
        chunk.push(&record(1.0));
        chunk.push(&record(2.0));
        assert_eq!(chunk.len(), 2);
        assert_eq!(chunk.get(1).unwrap().game_time, 2.0);
        assert!(chunk.get(2).is_err());
    }

    #[test]
    fn test_chunk_rejects_partial_record() {
        assert!(StateChunk::from_bytes(vec![0; SERIALIZED_STATE_SIZE + 1]).is_err());
        assert_eq!(StateChunk::from_bytes(vec![0; SERIALIZED_STATE_SIZE * 3]).unwrap().len(), 3);
    }

    #[test]
    fn test_state_index_spans_chunks() {
        let mut first = StateChunk::default();
        let mut second = StateChunk::default();
        for i in 0..3 {
            first.push(&record(i as f32));
        }
        for i in 3..5 {
            second.push(&record(i as f32));
        }
        let data = ReplayData {
            chunks: vec![first, second],
            ..Default::default()
        };

        assert_eq!(data.state_count(), 5);
        assert_eq!(data.state(3).unwrap().game_time, 3.0);
        assert!(data.state(5).is_err());

        let times: Vec<f32> = data.states().map(|s| s.unwrap().game_time).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }
}
