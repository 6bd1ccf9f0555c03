//! Binary replay format reader
//!
//! Reads `.rpl` files of every supported version, decompressing the body.

use byteorder::{LittleEndian, ReadBytesExt};
use lz4_flex::decompress_size_prepended;
use std::io::{Cursor, Read};

use crate::bike::SERIALIZED_STATE_SIZE;
use crate::error::ReplayError;
use crate::events::{decode_events, read_string};
use crate::replay::types::*;

/// Reader for binary replay format
pub struct BinaryReader<R: Read> {
    reader: R,
}

impl<R: Read> BinaryReader<R> {
    /// Create a new binary reader
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read a complete replay from the input
    pub fn read_replay(&mut self) -> Result<ReplayData, ReplayError> {
        let mut header = self.read_header()?;
        let body = self.read_body(header.version)?;
        let (events, chunks) = parse_body(&body)?;

        let mut replay = ReplayData {
            header: ReplayHeader::default(),
            events,
            chunks,
        };

        // Older versions do not store the finish time; the last state is it
        if header.version < 3 && header.finished {
            let last = replay.state_count() - 1;
            header.finish_time = replay.state(last)?.game_time;
        }
        replay.header = header;

        Ok(replay)
    }

    /// Read the header fields preceding the body
    fn read_header(&mut self) -> Result<ReplayHeader, ReplayError> {
        let version = self.reader.read_u8()?;
        if !(MIN_FORMAT_VERSION..=FORMAT_VERSION).contains(&version) {
            return Err(ReplayError::UnsupportedVersion(version));
        }

        let guard = self.reader.read_i32::<LittleEndian>()?;
        if guard != ENDIANNESS_GUARD {
            return Err(ReplayError::BadEndianness(guard));
        }

        let level_id = read_string(&mut self.reader)?;
        let player_name = read_string(&mut self.reader)?;
        let frame_rate = self.reader.read_f32::<LittleEndian>()?;

        let state_size = self.reader.read_i32::<LittleEndian>()?;
        if state_size != SERIALIZED_STATE_SIZE as i32 {
            return Err(ReplayError::BadStateSize {
                found: state_size,
                expected: SERIALIZED_STATE_SIZE,
            });
        }

        let finished = self.reader.read_u8()? != 0;
        let finish_time = if version >= 3 {
            self.reader.read_f32::<LittleEndian>()?
        } else {
            0.0
        };

        Ok(ReplayHeader {
            version,
            level_id,
            player_name,
            frame_rate,
            finished,
            finish_time,
        })
    }

    /// Read the (possibly compressed) body
    fn read_body(&mut self, version: u8) -> Result<Vec<u8>, ReplayError> {
        if version < 2 {
            let mut body = Vec::new();
            self.reader.read_to_end(&mut body)?;
            return Ok(body);
        }

        let uncompressed_len = self.reader.read_i32::<LittleEndian>()?;
        let compressed_len = self.reader.read_i32::<LittleEndian>()?;
        if uncompressed_len < 0 || compressed_len < 0 {
            return Err(ReplayError::CorruptBody("negative body size"));
        }

        if compressed_len == 0 {
            let mut body = vec![0u8; uncompressed_len as usize];
            self.reader.read_exact(&mut body)?;
            return Ok(body);
        }

        let mut compressed = vec![0u8; compressed_len as usize];
        self.reader.read_exact(&mut compressed)?;

        let body = decompress_size_prepended(&compressed)
            .map_err(|e| ReplayError::Decompress(e.to_string()))?;
        if body.len() != uncompressed_len as usize {
            return Err(ReplayError::CorruptBody("body size mismatch"));
        }
        Ok(body)
    }
}

/// Split a body into its event log and state chunks
fn parse_body(
    body: &[u8],
) -> Result<(Vec<crate::events::RecordedGameEvent>, Vec<StateChunk>), ReplayError> {
    let mut cursor = Cursor::new(body);

    let events_len = cursor.read_i32::<LittleEndian>()?;
    if events_len < 0 {
        return Err(ReplayError::CorruptBody("negative event stream size"));
    }
    let mut event_bytes = vec![0u8; events_len as usize];
    cursor.read_exact(&mut event_bytes)?;
    let events = decode_events(&event_bytes)?;

    let chunk_count = cursor.read_u32::<LittleEndian>()?;
    if chunk_count == 0 {
        return Err(ReplayError::NoChunk);
    }

    let mut chunks = Vec::with_capacity(chunk_count as usize);
    for _ in 0..chunk_count {
        let state_count = cursor.read_i32::<LittleEndian>()?;
        if state_count <= 0 || state_count as usize > STATES_PER_CHUNK {
            return Err(ReplayError::CorruptBody("invalid chunk state count"));
        }
        let mut data = vec![0u8; state_count as usize * SERIALIZED_STATE_SIZE];
        cursor.read_exact(&mut data)?;
        chunks.push(StateChunk::from_bytes(data)?);
    }

    Ok((events, chunks))
}
