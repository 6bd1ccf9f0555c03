//! Binary replay format writer
//!
//! Writes `.rpl` replay files with optional compression.

use crate::bike::SERIALIZED_STATE_SIZE;
use crate::error::ReplayError;
use crate::events::{encode_events, write_string};
use crate::replay::types::*;
use byteorder::{LittleEndian, WriteBytesExt};
use lz4_flex::compress_prepend_size;
use std::io::Write;

/// Writer for binary replay format
pub struct BinaryWriter<W: Write> {
    writer: W,
    version: u8,
    compress: bool,
}

impl<W: Write> BinaryWriter<W> {
    /// Create a new binary writer producing the current version, compressed
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            version: FORMAT_VERSION,
            compress: true,
        }
    }

    /// Write an older format version instead
    pub fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Store the body raw
    pub fn uncompressed(mut self) -> Self {
        self.compress = false;
        self
    }

    /// Write a complete replay to the output
    pub fn write_replay(&mut self, replay: &ReplayData) -> Result<(), ReplayError> {
        if !(MIN_FORMAT_VERSION..=FORMAT_VERSION).contains(&self.version) {
            return Err(ReplayError::UnsupportedVersion(self.version));
        }
        if replay.chunks.is_empty() {
            return Err(ReplayError::NoChunk);
        }

        self.write_header(&replay.header)?;
        let body = build_body(replay)?;

        if self.version < 2 {
            self.writer.write_all(&body)?;
        } else if self.compress {
            let compressed = compress_prepend_size(&body);
            self.writer.write_i32::<LittleEndian>(body.len() as i32)?;
            self.writer.write_i32::<LittleEndian>(compressed.len() as i32)?;
            self.writer.write_all(&compressed)?;
        } else {
            self.writer.write_i32::<LittleEndian>(body.len() as i32)?;
            self.writer.write_i32::<LittleEndian>(0)?;
            self.writer.write_all(&body)?;
        }

        self.writer.flush()?;
        Ok(())
    }

    fn write_header(&mut self, header: &ReplayHeader) -> Result<(), ReplayError> {
        self.writer.write_u8(self.version)?;
        self.writer.write_i32::<LittleEndian>(ENDIANNESS_GUARD)?;
        write_string(&mut self.writer, &header.level_id)?;
        write_string(&mut self.writer, &header.player_name)?;
        self.writer.write_f32::<LittleEndian>(header.frame_rate)?;
        self.writer.write_i32::<LittleEndian>(SERIALIZED_STATE_SIZE as i32)?;
        self.writer.write_u8(header.finished as u8)?;
        if self.version >= 3 {
            self.writer.write_f32::<LittleEndian>(header.finish_time)?;
        }
        Ok(())
    }
}

/// Event log followed by the state chunks
fn build_body(replay: &ReplayData) -> Result<Vec<u8>, ReplayError> {
    let events = encode_events(&replay.events)?;
    let mut body =
        Vec::with_capacity(8 + events.len() + replay.state_count() * SERIALIZED_STATE_SIZE);

    body.write_i32::<LittleEndian>(events.len() as i32)?;
    body.extend_from_slice(&events);

    body.write_u32::<LittleEndian>(replay.chunks.len() as u32)?;
    for chunk in &replay.chunks {
        body.write_i32::<LittleEndian>(chunk.len() as i32)?;
        body.extend_from_slice(chunk.as_bytes());
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bike::SerializedBikeState;
    use crate::events::{GameEvent, RecordedGameEvent};
    use crate::replay::binary::BinaryReader;

    fn sample_replay() -> ReplayData {
        let mut chunk = StateChunk::default();
        for i in 0..10 {
            chunk.push(&SerializedBikeState {
                game_time: i as f32 * 4.0,
                frame_x: i as f32,
                ..Default::default()
            });
        }
        ReplayData {
            header: ReplayHeader {
                level_id: "tut1".into(),
                player_name: "rider".into(),
                frame_rate: 25.0,
                finished: true,
                finish_time: 36.0,
                ..Default::default()
            },
            events: vec![RecordedGameEvent::new(
                12.0,
                GameEvent::SetGravity { x: 0.0, y: -9.81 },
            )],
            chunks: vec![chunk],
        }
    }

    fn write(replay: &ReplayData, version: u8, compress: bool) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut writer = BinaryWriter::new(&mut buffer).with_version(version);
        if !compress {
            writer = writer.uncompressed();
        }
        writer.write_replay(replay).unwrap();
        buffer
    }

    #[test]
    fn test_write_header_layout() {
        let buffer = write(&sample_replay(), FORMAT_VERSION, true);

        assert_eq!(buffer[0], FORMAT_VERSION);
        assert_eq!(&buffer[1..5], &ENDIANNESS_GUARD.to_le_bytes());
        // level id length prefix
        assert_eq!(&buffer[5..9], &4i32.to_le_bytes());
        assert_eq!(&buffer[9..13], b"tut1");
    }

    #[test]
    fn test_round_trip_compressed() {
        let replay = sample_replay();
        let buffer = write(&replay, FORMAT_VERSION, true);

        let read = BinaryReader::new(buffer.as_slice()).read_replay().unwrap();
        assert_eq!(read, replay);
    }

    #[test]
    fn test_round_trip_uncompressed() {
        let replay = sample_replay();
        let buffer = write(&replay, FORMAT_VERSION, false);

        let read = BinaryReader::new(buffer.as_slice()).read_replay().unwrap();
        assert_eq!(read, replay);
    }

    #[test]
    fn test_old_versions_derive_finish_time() {
        let mut replay = sample_replay();
        replay.header.finish_time = 0.0;

        for version in [1u8, 2] {
            let buffer = write(&replay, version, true);
            let read = BinaryReader::new(buffer.as_slice()).read_replay().unwrap();
            assert_eq!(read.header.version, version);
            assert_eq!(read.header.finish_time, 36.0);
            assert_eq!(read.state_count(), 10);
        }
    }

    #[test]
    fn test_unfinished_old_version_has_zero_finish_time() {
        let mut replay = sample_replay();
        replay.header.finished = false;
        replay.header.finish_time = 0.0;
        let buffer = write(&replay, 2, true);

        let read = BinaryReader::new(buffer.as_slice()).read_replay().unwrap();
        assert_eq!(read.header.finish_time, 0.0);
    }

    #[test]
    fn test_reject_empty_replay() {
        let mut buffer = Vec::new();
        let result = BinaryWriter::new(&mut buffer).write_replay(&ReplayData::default());
        assert!(matches!(result, Err(ReplayError::NoChunk)));
    }

    #[test]
    fn test_reject_unknown_version() {
        let buffer = write(&sample_replay(), FORMAT_VERSION, true);

        let mut bad = buffer.clone();
        bad[0] = 9;
        assert!(matches!(
            BinaryReader::new(bad.as_slice()).read_replay(),
            Err(ReplayError::UnsupportedVersion(9))
        ));

        let mut swapped = buffer;
        swapped[1..5].copy_from_slice(&ENDIANNESS_GUARD.to_be_bytes());
        assert!(matches!(
            BinaryReader::new(swapped.as_slice()).read_replay(),
            Err(ReplayError::BadEndianness(_))
        ));
    }

    #[test]
    fn test_reject_wrong_state_size() {
        let mut buffer = write(&sample_replay(), FORMAT_VERSION, true);
        // version + guard + two strings + frame rate
        let offset = 1 + 4 + (4 + 4) + (4 + 5) + 4;
        buffer[offset..offset + 4].copy_from_slice(&36i32.to_le_bytes());

        assert!(matches!(
            BinaryReader::new(buffer.as_slice()).read_replay(),
            Err(ReplayError::BadStateSize { found: 36, .. })
        ));
    }

    #[test]
    fn test_truncated_file_fails() {
        let buffer = write(&sample_replay(), FORMAT_VERSION, false);
        let truncated = &buffer[..buffer.len() - 7];
        assert!(BinaryReader::new(truncated).read_replay().is_err());
    }
}
