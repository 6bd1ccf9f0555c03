//! Error types

use std::io;

/// Errors decoding or encoding a game event stream
///
/// Any of these aborts the whole stream.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("string length {len} out of range (limit {limit})")]
    StringTooLong { len: i32, limit: usize },

    #[error("empty identifier in {event} event")]
    EmptyIdentifier { event: &'static str },

    #[error("string is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("unknown event type {0}")]
    UnknownTag(i32),

    #[error("invalid entity type ({0})")]
    UnknownEntitySpeciality(i32),

    #[error("event stream truncated")]
    Truncated,

    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for EventError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            EventError::Truncated
        } else {
            EventError::Io(err)
        }
    }
}

/// Errors opening, reading or writing a replay
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("unsupported replay file version ({0})")]
    UnsupportedVersion(u8),

    #[error("unable to open the replay: bad endianness guard {0:#x}")]
    BadEndianness(i32),

    #[error("replay state size {found} does not match expected {expected}")]
    BadStateSize { found: i32, expected: usize },

    #[error("replay contains no state chunk")]
    NoChunk,

    #[error("failed to decompress replay body: {0}")]
    Decompress(String),

    #[error("corrupt replay body: {0}")]
    CorruptBody(&'static str),

    #[error("invalid event stream: {0}")]
    Events(#[from] EventError),

    #[error("replay contains no state")]
    Empty,
}

/// Errors raised by a scene collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("entity '{0}' not found")]
    EntityNotFound(String),
}

/// Errors loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
