//! Binary replay format (.rpl)
//!
//! All integers and floats are little-endian. Versions 1 to 3 are read;
//! version 3 is written.
//!
//! # File Structure
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ Header                                         │
//! │ ├─ version: u8                                 │
//! │ ├─ endianness guard: i32 (0x12345678)          │
//! │ ├─ level_id: i32 len + bytes                   │
//! │ ├─ player_name: i32 len + bytes                │
//! │ ├─ frame_rate: f32                             │
//! │ ├─ state_size: i32 (40)                        │
//! │ ├─ finished: u8                                │
//! │ └─ finish_time: f32 (v3 only)                  │
//! ├────────────────────────────────────────────────┤
//! │ Body sizes (v2+)                               │
//! │ ├─ uncompressed: i32                           │
//! │ └─ compressed: i32 (0 = stored raw)            │
//! ├────────────────────────────────────────────────┤
//! │ Body (LZ4 when compressed)                     │
//! │ ├─ events_size: i32, event stream              │
//! │ ├─ chunk_count: u32                            │
//! │ └─ per chunk: state_count: i32, records        │
//! └────────────────────────────────────────────────┘
//! ```

mod reader;
mod writer;

pub use reader::BinaryReader;
pub use writer::BinaryWriter;
