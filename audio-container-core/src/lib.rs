//! # audio-container-core
//!
//! Reads and writes uncompressed PCM audio in chunk-based containers.
//!
//! WAV files are read and written; AIFF files are identified and their
//! `COMM` format chunk is parsed, but AIFF sample data and AIFF output fail
//! with [`ContainerError::NotImplemented`]. Samples are exchanged as
//! interleaved normalized `f32` at 16, 24 or 32 bits on disk.
//!
//! ## Architecture
//!
//! ```text
//! audio-container-core (this crate)
//! ├── container/    ← sniffer, ChunkScanner, format chunk parser, per-container layouts
//! ├── models/       ← ContainerError, Format, AudioBuffer, ChunkTag, ScanConfiguration
//! ├── processing/   ← sample codec (bytes ↔ normalized f32)
//! └── storage/      ← ContainerReader, WAV writer, StreamingWavWriter
//! ```
//!
//! Read path: file header → chunk scan → `fmt `/`COMM` parse → `data` decode.
//! The library logs through the `log` facade and never installs a logger.

pub mod container;
pub mod models;
pub mod processing;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types at crate root for convenience.
pub use container::layout::ByteOrder;
pub use models::chunk::{ChunkHeader, ChunkTag, Diagnostics};
pub use models::config::ScanConfiguration;
pub use models::error::ContainerError;
pub use models::format::{AudioBuffer, ContainerKind, Format};
pub use storage::reader::{read_all, read_format, ContainerReader};
pub use storage::streaming_writer::StreamingWavWriter;
pub use storage::wav_writer::{write_all, write_wav};
