use std::fmt;

/// A 4-byte chunk identifier (FourCC), kept as raw bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkTag(pub [u8; 4]);

impl ChunkTag {
    pub const RIFF: Self = Self(*b"RIFF");
    pub const WAVE: Self = Self(*b"WAVE");
    pub const FMT: Self = Self(*b"fmt ");
    pub const DATA: Self = Self(*b"data");
    pub const FORM: Self = Self(*b"FORM");
    pub const AIFF: Self = Self(*b"AIFF");
    pub const COMM: Self = Self(*b"COMM");

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for ChunkTag {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

/// Printable ASCII is shown as-is, anything else as `\xNN`.
impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkTag(\"{}\")", self)
    }
}

/// Header preceding every chunk body.
///
/// `size` is the body length in native order, excluding the 8-byte header
/// and the pad byte that follows an odd-sized body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub tag: ChunkTag,
    pub size: u32,
}

impl ChunkHeader {
    /// Body length plus the pad byte, i.e. the distance to the next header.
    pub fn padded_size(&self) -> u64 {
        padded_len(self.size)
    }
}

/// `size + (size & 1)`, widened so that `u32::MAX` does not overflow.
pub fn padded_len(size: u32) -> u64 {
    size as u64 + (size & 1) as u64
}

/// Error context for chunk-identification failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    pub chunk_id: ChunkTag,
}
