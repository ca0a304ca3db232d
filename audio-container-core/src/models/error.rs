use std::io;

use thiserror::Error;

use super::chunk::{ChunkTag, Diagnostics};

/// Errors that can occur while reading or writing audio containers.
///
/// Every failure aborts the call that produced it; no partial results are
/// returned alongside an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// The stream ended before the required bytes were available.
    #[error("short read: stream ended before the required bytes were available")]
    ShortRead,

    /// An unrecognized top-level or mid-stream chunk tag.
    #[error("invalid chunk id: {tag}")]
    InvalidChunkId { tag: ChunkTag },

    /// `RIFF` outer tag with a form type other than `WAVE`.
    #[error("invalid RIFF chunk format: expected WAVE, found {tag}")]
    InvalidRiffChunkFormat { tag: ChunkTag },

    /// `FORM` outer tag with a form type other than `AIFF`.
    #[error("invalid FORM chunk format: expected AIFF, found {tag}")]
    InvalidFormChunkFormat { tag: ChunkTag },

    #[error("audio data too large: {bytes} bytes does not fit a 32-bit size field")]
    AudioDataTooLarge { bytes: u64 },

    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    #[error("invalid channel count: {0}")]
    InvalidChannelCount(u16),

    /// A `data` chunk was reached before any format chunk.
    #[error("data chunk precedes the format chunk")]
    MissingFormatChunk,

    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("chunk limit exceeded: more than {limit} chunks")]
    ChunkLimitExceeded { limit: usize },

    #[error("data chunk of {size} bytes exceeds the configured limit of {limit} bytes")]
    DataLimitExceeded { size: u64, limit: u64 },

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("writer is already finalized")]
    WriterClosed,

    #[error("i/o error: {0}")]
    Io(String),
}

impl ContainerError {
    /// The offending chunk tag, for chunk-identification failures only.
    ///
    /// Returns `None` for every other failure, including `ShortRead`.
    pub fn diagnostics(&self) -> Option<Diagnostics> {
        match self {
            Self::InvalidChunkId { tag }
            | Self::InvalidRiffChunkFormat { tag }
            | Self::InvalidFormChunkFormat { tag } => Some(Diagnostics { chunk_id: *tag }),
            _ => None,
        }
    }
}

impl From<io::Error> for ContainerError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Self::ShortRead,
            _ => Self::Io(err.to_string()),
        }
    }
}
