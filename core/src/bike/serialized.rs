//! Compact on-disk bike state record
//!
//! Every record is exactly [`SERIALIZED_STATE_SIZE`] bytes, little endian:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ game_time: f32                               │
//! │ flags: u8          (DIR_LEFT | DIR_RIGHT)    │
//! │ engine_rpm: u8                               │
//! │ frame_x, frame_y: f32                        │
//! │ max_x_diff, max_y_diff: f32                  │
//! │ 6 × [i8; 2]  wheels, elbow, shoulder,        │
//! │              lower body, knee                │
//! │ 3 × u16      frame, front, rear rotation     │
//! └──────────────────────────────────────────────┘
//! ```

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::Vec2;
use std::io::{self, Read, Write};

use super::state::DriveDir;
use crate::GameTime;

/// Size of one serialized state record in bytes
pub const SERIALIZED_STATE_SIZE: usize = 40;

bitflags::bitflags! {
    /// Direction bits of a serialized state
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StateFlags: u8 {
        /// Rider faces left, joints belong to the mirrored set
        const DIR_LEFT = 0x01;
        /// Rider faces right
        const DIR_RIGHT = 0x02;
    }
}

impl StateFlags {
    /// Flags for a driving direction
    pub fn from_dir(dir: DriveDir) -> Self {
        match dir {
            DriveDir::Left => StateFlags::DIR_LEFT,
            DriveDir::Right => StateFlags::DIR_RIGHT,
        }
    }

    /// Driving direction, `None` if no direction bit is set
    ///
    /// Right wins when both bits are present.
    pub fn dir(self) -> Option<DriveDir> {
        if self.contains(StateFlags::DIR_RIGHT) {
            Some(DriveDir::Right)
        } else if self.contains(StateFlags::DIR_LEFT) {
            Some(DriveDir::Left)
        } else {
            None
        }
    }
}

/// One recorded bike state in its compact form
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SerializedBikeState {
    pub game_time: GameTime,
    pub flags: StateFlags,
    pub engine_rpm: u8,
    pub frame_x: f32,
    pub frame_y: f32,
    pub max_x_diff: f32,
    pub max_y_diff: f32,
    pub front_wheel: [i8; 2],
    pub rear_wheel: [i8; 2],
    pub elbow: [i8; 2],
    pub shoulder: [i8; 2],
    pub lower_body: [i8; 2],
    pub knee: [i8; 2],
    pub frame_rot: u16,
    pub front_wheel_rot: u16,
    pub rear_wheel_rot: u16,
}

impl SerializedBikeState {
    /// Frame center, stored at full precision
    pub fn frame(&self) -> Vec2 {
        Vec2::new(self.frame_x, self.frame_y)
    }

    /// Per-axis maximum deviation used to scale the 8-bit offsets
    pub fn max_diff(&self) -> Vec2 {
        Vec2::new(self.max_x_diff, self.max_y_diff)
    }

    /// Coarse interpolation between two records
    ///
    /// Only the frame position and the game time move; every other field is
    /// carried over from `a`.
    pub fn interpolate(a: &Self, b: &Self, t: f32) -> Self {
        Self {
            frame_x: a.frame_x + (b.frame_x - a.frame_x) * t,
            frame_y: a.frame_y + (b.frame_y - a.frame_y) * t,
            game_time: a.game_time + (b.game_time - a.game_time) * t,
            ..*a
        }
    }

    /// Read one record
    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let game_time = reader.read_f32::<LittleEndian>()?;
        let flags = StateFlags::from_bits_truncate(reader.read_u8()?);
        let engine_rpm = reader.read_u8()?;
        let frame_x = reader.read_f32::<LittleEndian>()?;
        let frame_y = reader.read_f32::<LittleEndian>()?;
        let max_x_diff = reader.read_f32::<LittleEndian>()?;
        let max_y_diff = reader.read_f32::<LittleEndian>()?;

        let mut offsets = [[0i8; 2]; 6];
        for pair in &mut offsets {
            pair[0] = reader.read_i8()?;
            pair[1] = reader.read_i8()?;
        }
        let [front_wheel, rear_wheel, elbow, shoulder, lower_body, knee] = offsets;

        let frame_rot = reader.read_u16::<LittleEndian>()?;
        let front_wheel_rot = reader.read_u16::<LittleEndian>()?;
        let rear_wheel_rot = reader.read_u16::<LittleEndian>()?;

        Ok(Self {
            game_time,
            flags,
            engine_rpm,
            frame_x,
            frame_y,
            max_x_diff,
            max_y_diff,
            front_wheel,
            rear_wheel,
            elbow,
            shoulder,
            lower_body,
            knee,
            frame_rot,
            front_wheel_rot,
            rear_wheel_rot,
        })
    }

    /// Write one record
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_f32::<LittleEndian>(self.game_time)?;
        writer.write_u8(self.flags.bits())?;
        writer.write_u8(self.engine_rpm)?;
        writer.write_f32::<LittleEndian>(self.frame_x)?;
        writer.write_f32::<LittleEndian>(self.frame_y)?;
        writer.write_f32::<LittleEndian>(self.max_x_diff)?;
        writer.write_f32::<LittleEndian>(self.max_y_diff)?;

        for pair in [
            self.front_wheel,
            self.rear_wheel,
            self.elbow,
            self.shoulder,
            self.lower_body,
            self.knee,
        ] {
            writer.write_i8(pair[0])?;
            writer.write_i8(pair[1])?;
        }

        writer.write_u16::<LittleEndian>(self.frame_rot)?;
        writer.write_u16::<LittleEndian>(self.front_wheel_rot)?;
        writer.write_u16::<LittleEndian>(self.rear_wheel_rot)?;
        Ok(())
    }

    /// Decode a record from a byte slice of at least [`SERIALIZED_STATE_SIZE`] bytes
    pub fn from_bytes(bytes: &[u8]) -> io::Result<Self> {
        let mut cursor = bytes;
        Self::read_from(&mut cursor)
    }

    /// Encode to a fixed-size byte array
    pub fn to_bytes(&self) -> [u8; SERIALIZED_STATE_SIZE] {
        let mut out = [0u8; SERIALIZED_STATE_SIZE];
        let mut cursor = &mut out[..];
        // Writing into a slice of the exact record size cannot run short
        let _ = self.write_to(&mut cursor);
        out
    }
}
