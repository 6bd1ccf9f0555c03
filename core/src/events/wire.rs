//! Event stream encoding
//!
//! Each record is `time: f32`, `tag: i32`, then the payload fields of the
//! variant in declaration order. Strings are an `i32` byte length followed
//! by the raw bytes.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Write};

use super::types::{
    DynamicRotation, DynamicTranslation, EntitySpeciality, GameEvent, RecordedGameEvent,
};
use crate::GameTime;
use crate::error::EventError;

/// Strings must be strictly shorter than this many bytes
pub const MAX_STRING_LEN: usize = 512;

/// Size of the timestamp that starts every record
const TIME_SIZE: u64 = 4;

// ============================================================================
// Primitive helpers
// ============================================================================

pub(crate) fn read_string<R: Read>(reader: &mut R) -> Result<String, EventError> {
    let len = reader.read_i32::<LittleEndian>()?;
    if len < 0 || len as usize >= MAX_STRING_LEN {
        return Err(EventError::StringTooLong {
            len,
            limit: MAX_STRING_LEN,
        });
    }
    let mut bytes = vec![0u8; len as usize];
    reader.read_exact(&mut bytes)?;
    Ok(String::from_utf8(bytes)?)
}

fn read_id<R: Read>(reader: &mut R, event: &'static str) -> Result<String, EventError> {
    let id = read_string(reader)?;
    if id.is_empty() {
        return Err(EventError::EmptyIdentifier { event });
    }
    Ok(id)
}

pub(crate) fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<(), EventError> {
    if value.len() >= MAX_STRING_LEN {
        return Err(EventError::StringTooLong {
            len: value.len() as i32,
            limit: MAX_STRING_LEN,
        });
    }
    writer.write_i32::<LittleEndian>(value.len() as i32)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn write_id<W: Write>(writer: &mut W, value: &str, event: &'static str) -> Result<(), EventError> {
    if value.is_empty() {
        return Err(EventError::EmptyIdentifier { event });
    }
    write_string(writer, value)
}

fn read_f32<R: Read>(reader: &mut R) -> Result<f32, EventError> {
    Ok(reader.read_f32::<LittleEndian>()?)
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32, EventError> {
    Ok(reader.read_i32::<LittleEndian>()?)
}

fn read_bool<R: Read>(reader: &mut R) -> Result<bool, EventError> {
    Ok(reader.read_u8()? != 0)
}

fn read_rotation<R: Read>(reader: &mut R) -> Result<DynamicRotation, EventError> {
    Ok(DynamicRotation {
        init_angle: read_f32(reader)?,
        radius: read_f32(reader)?,
        period: read_f32(reader)?,
        start_time: read_i32(reader)?,
        end_time: read_i32(reader)?,
    })
}

fn read_translation<R: Read>(reader: &mut R) -> Result<DynamicTranslation, EventError> {
    Ok(DynamicTranslation {
        x: read_f32(reader)?,
        y: read_f32(reader)?,
        period: read_f32(reader)?,
        start_time: read_i32(reader)?,
        end_time: read_i32(reader)?,
    })
}

fn write_rotation<W: Write>(writer: &mut W, m: &DynamicRotation) -> Result<(), EventError> {
    writer.write_f32::<LittleEndian>(m.init_angle)?;
    writer.write_f32::<LittleEndian>(m.radius)?;
    writer.write_f32::<LittleEndian>(m.period)?;
    writer.write_i32::<LittleEndian>(m.start_time)?;
    writer.write_i32::<LittleEndian>(m.end_time)?;
    Ok(())
}

fn write_translation<W: Write>(writer: &mut W, m: &DynamicTranslation) -> Result<(), EventError> {
    writer.write_f32::<LittleEndian>(m.x)?;
    writer.write_f32::<LittleEndian>(m.y)?;
    writer.write_f32::<LittleEndian>(m.period)?;
    writer.write_i32::<LittleEndian>(m.start_time)?;
    writer.write_i32::<LittleEndian>(m.end_time)?;
    Ok(())
}

// ============================================================================
// Payloads
// ============================================================================

impl GameEvent {
    /// Read the payload of an event whose tag was already consumed
    pub fn read<R: Read>(tag: i32, r: &mut R) -> Result<Self, EventError> {
        let event = match tag {
            4 => GameEvent::EntityDestroyed {
                entity_id: read_id(r, "EntityDestroyed")?,
                speciality: EntitySpeciality::try_from(read_i32(r)?)?,
                size: read_f32(r)?,
                x: read_f32(r)?,
                y: read_f32(r)?,
            },
            5 => GameEvent::ClearMessages,
            6 => GameEvent::PlaceInGameArrow {
                x: read_f32(r)?,
                y: read_f32(r)?,
                angle: read_f32(r)?,
            },
            7 => GameEvent::PlaceScreenArrow {
                x: read_f32(r)?,
                y: read_f32(r)?,
                angle: read_f32(r)?,
            },
            8 => GameEvent::HideArrow,
            9 => GameEvent::Message {
                text: read_string(r)?,
            },
            10 => GameEvent::MoveBlock {
                block_id: read_id(r, "MoveBlock")?,
                x: read_f32(r)?,
                y: read_f32(r)?,
            },
            11 => GameEvent::SetBlockPos {
                block_id: read_id(r, "SetBlockPos")?,
                x: read_f32(r)?,
                y: read_f32(r)?,
            },
            12 => GameEvent::SetGravity {
                x: read_f32(r)?,
                y: read_f32(r)?,
            },
            13 => GameEvent::SetPlayersPosition {
                x: read_f32(r)?,
                y: read_f32(r)?,
                right: read_bool(r)?,
            },
            14 => GameEvent::SetEntityPos {
                entity_id: read_id(r, "SetEntityPos")?,
                x: read_f32(r)?,
                y: read_f32(r)?,
            },
            15 => GameEvent::SetBlockCenter {
                block_id: read_id(r, "SetBlockCenter")?,
                x: read_f32(r)?,
                y: read_f32(r)?,
            },
            16 => GameEvent::SetBlockRotation {
                block_id: read_id(r, "SetBlockRotation")?,
                angle: read_f32(r)?,
            },
            17 => GameEvent::SetDynamicEntityRotation {
                entity_id: read_id(r, "SetDynamicEntityRotation")?,
                motion: read_rotation(r)?,
            },
            18 => GameEvent::SetDynamicEntityTranslation {
                entity_id: read_id(r, "SetDynamicEntityTranslation")?,
                motion: read_translation(r)?,
            },
            19 => GameEvent::SetDynamicEntityNone {
                entity_id: read_id(r, "SetDynamicEntityNone")?,
            },
            20 => GameEvent::CameraZoom {
                zoom: read_f32(r)?,
            },
            21 => GameEvent::CameraMove {
                x: read_f32(r)?,
                y: read_f32(r)?,
            },
            22 => GameEvent::SetDynamicBlockRotation {
                block_id: read_id(r, "SetDynamicBlockRotation")?,
                motion: read_rotation(r)?,
            },
            23 => GameEvent::SetDynamicBlockTranslation {
                block_id: read_id(r, "SetDynamicBlockTranslation")?,
                motion: read_translation(r)?,
            },
            24 => GameEvent::SetDynamicBlockNone {
                block_id: read_id(r, "SetDynamicBlockNone")?,
            },
            25 => GameEvent::PenaltyTime {
                penalty: read_f32(r)?,
            },
            26 => GameEvent::PlayerDies,
            30 => GameEvent::SetPlayerPosition {
                x: read_f32(r)?,
                y: read_f32(r)?,
                right: read_bool(r)?,
                player: read_i32(r)?,
            },
            31 => GameEvent::SetDynamicBlockSelfRotation {
                block_id: read_id(r, "SetDynamicBlockSelfRotation")?,
                period: read_f32(r)?,
                start_time: read_i32(r)?,
                end_time: read_i32(r)?,
            },
            33 => GameEvent::CameraRotate {
                angle: read_f32(r)?,
            },
            43 => GameEvent::CameraSetPos {
                x: read_f32(r)?,
                y: read_f32(r)?,
            },
            44 => GameEvent::PlayerWins,
            other => return Err(EventError::UnknownTag(other)),
        };
        Ok(event)
    }

    /// Write the payload (without time and tag)
    pub fn write<W: Write>(&self, w: &mut W) -> Result<(), EventError> {
        let name = self.type_name();
        match self {
            GameEvent::EntityDestroyed {
                entity_id,
                speciality,
                size,
                x,
                y,
            } => {
                write_id(w, entity_id, name)?;
                w.write_i32::<LittleEndian>(speciality.to_i32())?;
                write_f32s(w, &[*size, *x, *y])?;
            }
            GameEvent::ClearMessages
            | GameEvent::HideArrow
            | GameEvent::PlayerDies
            | GameEvent::PlayerWins => {}
            GameEvent::PlaceInGameArrow { x, y, angle }
            | GameEvent::PlaceScreenArrow { x, y, angle } => {
                write_f32s(w, &[*x, *y, *angle])?;
            }
            GameEvent::Message { text } => write_string(w, text)?,
            GameEvent::MoveBlock { block_id, x, y }
            | GameEvent::SetBlockPos { block_id, x, y }
            | GameEvent::SetBlockCenter { block_id, x, y } => {
                write_id(w, block_id, name)?;
                write_f32s(w, &[*x, *y])?;
            }
            GameEvent::SetEntityPos { entity_id, x, y } => {
                write_id(w, entity_id, name)?;
                write_f32s(w, &[*x, *y])?;
            }
            GameEvent::SetGravity { x, y }
            | GameEvent::CameraMove { x, y }
            | GameEvent::CameraSetPos { x, y } => write_f32s(w, &[*x, *y])?,
            GameEvent::SetPlayersPosition { x, y, right } => {
                write_f32s(w, &[*x, *y])?;
                w.write_u8(u8::from(*right))?;
            }
            GameEvent::SetBlockRotation { block_id, angle } => {
                write_id(w, block_id, name)?;
                write_f32s(w, &[*angle])?;
            }
            GameEvent::SetDynamicEntityRotation { entity_id, motion } => {
                write_id(w, entity_id, name)?;
                write_rotation(w, motion)?;
            }
            GameEvent::SetDynamicEntityTranslation { entity_id, motion } => {
                write_id(w, entity_id, name)?;
                write_translation(w, motion)?;
            }
            GameEvent::SetDynamicEntityNone { entity_id } => write_id(w, entity_id, name)?,
            GameEvent::CameraZoom { zoom } => write_f32s(w, &[*zoom])?,
            GameEvent::SetDynamicBlockRotation { block_id, motion } => {
                write_id(w, block_id, name)?;
                write_rotation(w, motion)?;
            }
            GameEvent::SetDynamicBlockTranslation { block_id, motion } => {
                write_id(w, block_id, name)?;
                write_translation(w, motion)?;
            }
            GameEvent::SetDynamicBlockNone { block_id } => write_id(w, block_id, name)?,
            GameEvent::PenaltyTime { penalty } => write_f32s(w, &[*penalty])?,
            GameEvent::SetPlayerPosition {
                x,
                y,
                right,
                player,
            } => {
                write_f32s(w, &[*x, *y])?;
                w.write_u8(u8::from(*right))?;
                w.write_i32::<LittleEndian>(*player)?;
            }
            GameEvent::SetDynamicBlockSelfRotation {
                block_id,
                period,
                start_time,
                end_time,
            } => {
                write_id(w, block_id, name)?;
                w.write_f32::<LittleEndian>(*period)?;
                w.write_i32::<LittleEndian>(*start_time)?;
                w.write_i32::<LittleEndian>(*end_time)?;
            }
            GameEvent::CameraRotate { angle } => write_f32s(w, &[*angle])?,
        }
        Ok(())
    }
}

fn write_f32s<W: Write>(writer: &mut W, values: &[f32]) -> Result<(), EventError> {
    for value in values {
        writer.write_f32::<LittleEndian>(*value)?;
    }
    Ok(())
}

// ============================================================================
// Streams
// ============================================================================

/// Write one complete record: time, tag, payload
pub fn write_event<W: Write>(
    writer: &mut W,
    time: GameTime,
    event: &GameEvent,
) -> Result<(), EventError> {
    writer.write_f32::<LittleEndian>(time)?;
    writer.write_i32::<LittleEndian>(event.tag())?;
    event.write(writer)
}

/// Encode a list of recorded events
///
/// The `passed` flags are not part of the stream.
pub fn encode_events(events: &[RecordedGameEvent]) -> Result<Vec<u8>, EventError> {
    let mut buffer = Vec::new();
    for recorded in events {
        write_event(&mut buffer, recorded.time, &recorded.event)?;
    }
    Ok(buffer)
}

/// Decode a whole event stream
///
/// Any malformed record fails the entire decode; no partial list is
/// returned. Trailing bytes too short to hold a timestamp are ignored.
pub fn decode_events(bytes: &[u8]) -> Result<Vec<RecordedGameEvent>, EventError> {
    let mut cursor = Cursor::new(bytes);
    let total = bytes.len() as u64;
    let mut events = Vec::new();

    while total - cursor.position() > TIME_SIZE {
        let time = cursor.read_f32::<LittleEndian>()?;
        let tag = cursor.read_i32::<LittleEndian>()?;
        let event = GameEvent::read(tag, &mut cursor)?;
        events.push(RecordedGameEvent::new(time, event));
    }

    Ok(events)
}
