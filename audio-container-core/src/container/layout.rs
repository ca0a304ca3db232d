//! Per-container layout constants and the byte-order conversion table.
//!
//! Every multi-byte field the crate reads or writes goes through
//! [`ByteOrder`]; which order applies is a property of the container
//! ([`ContainerLayout::size_order`] for chunk size fields,
//! [`ContainerLayout::field_order`] for format-chunk fields).
//!
//! ```text
//!              size fields   format fields   format chunk   body
//! WAV  (RIFF)  little        little          "fmt "         16 bytes
//! AIFF (FORM)  big           big             "COMM"         18 bytes
//! ```

use crate::models::chunk::ChunkTag;
use crate::models::error::ContainerError;
use crate::models::format::ContainerKind;

/// On-wire byte order of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    pub fn u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::Little => u16::from_le_bytes(bytes),
            Self::Big => u16::from_be_bytes(bytes),
        }
    }

    pub fn u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }

    pub fn u64(self, bytes: [u8; 8]) -> u64 {
        match self {
            Self::Little => u64::from_le_bytes(bytes),
            Self::Big => u64::from_be_bytes(bytes),
        }
    }

    pub fn u16_bytes(self, value: u16) -> [u8; 2] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }

    pub fn u32_bytes(self, value: u32) -> [u8; 4] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }

    /// Read a u16 at `offset`. `body` must hold at least `offset + 2` bytes.
    pub fn u16_at(self, body: &[u8], offset: usize) -> u16 {
        self.u16([body[offset], body[offset + 1]])
    }

    /// Read a u32 at `offset`. `body` must hold at least `offset + 4` bytes.
    pub fn u32_at(self, body: &[u8], offset: usize) -> u32 {
        self.u32([body[offset], body[offset + 1], body[offset + 2], body[offset + 3]])
    }
}

/// Encoding of the sample-rate field inside the format chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleRateField {
    /// Unsigned 32-bit integer at `offset`.
    Integer { offset: usize },
    /// 80-bit IEEE-754 extended float at `offset`, truncated to u32.
    Extended { offset: usize },
}

/// What the scanner does with a chunk tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkRole {
    Format,
    Data,
    Skip,
    Unknown,
}

/// Layout constants owned by one container kind.
#[derive(Debug)]
pub struct ContainerLayout {
    pub kind: ContainerKind,
    pub outer_tag: ChunkTag,
    pub form_type: ChunkTag,
    pub size_order: ByteOrder,
    pub field_order: ByteOrder,
    pub format_tag: ChunkTag,
    /// Chunk holding decodable sample data, if this crate reads it.
    pub data_tag: Option<ChunkTag>,
    /// Known chunks that are skipped without parsing.
    pub skip_tags: &'static [ChunkTag],
    /// Leading bytes of the format chunk that carry the fields below.
    pub format_body_len: usize,
    pub channels_offset: usize,
    pub bit_depth_offset: usize,
    pub sample_rate: SampleRateField,
}

pub static WAV_LAYOUT: ContainerLayout = ContainerLayout {
    kind: ContainerKind::Wav,
    outer_tag: ChunkTag::RIFF,
    form_type: ChunkTag::WAVE,
    size_order: ByteOrder::Little,
    field_order: ByteOrder::Little,
    format_tag: ChunkTag::FMT,
    data_tag: Some(ChunkTag::DATA),
    skip_tags: &[
        ChunkTag(*b"bext"),
        ChunkTag(*b"id3 "),
        ChunkTag(*b"Fake"),
        ChunkTag(*b"junk"),
    ],
    format_body_len: 16,
    channels_offset: 2,
    bit_depth_offset: 14,
    sample_rate: SampleRateField::Integer { offset: 4 },
};

pub static AIFF_LAYOUT: ContainerLayout = ContainerLayout {
    kind: ContainerKind::Aiff,
    outer_tag: ChunkTag::FORM,
    form_type: ChunkTag::AIFF,
    size_order: ByteOrder::Big,
    field_order: ByteOrder::Big,
    format_tag: ChunkTag::COMM,
    data_tag: None,
    skip_tags: &[ChunkTag(*b"COMT"), ChunkTag(*b"INST"), ChunkTag(*b"MARK")],
    format_body_len: 18,
    channels_offset: 0,
    bit_depth_offset: 6,
    sample_rate: SampleRateField::Extended { offset: 8 },
};

impl ContainerLayout {
    pub fn role_of(&self, tag: ChunkTag) -> ChunkRole {
        if tag == self.format_tag {
            ChunkRole::Format
        } else if Some(tag) == self.data_tag {
            ChunkRole::Data
        } else if self.skip_tags.contains(&tag) {
            ChunkRole::Skip
        } else {
            ChunkRole::Unknown
        }
    }

    /// Error for a recognized outer tag followed by the wrong form type.
    pub fn form_type_mismatch(&self, tag: ChunkTag) -> ContainerError {
        match self.kind {
            ContainerKind::Wav => ContainerError::InvalidRiffChunkFormat { tag },
            ContainerKind::Aiff => ContainerError::InvalidFormChunkFormat { tag },
        }
    }
}

impl ContainerKind {
    pub fn layout(self) -> &'static ContainerLayout {
        match self {
            Self::Wav => &WAV_LAYOUT,
            Self::Aiff => &AIFF_LAYOUT,
        }
    }

    /// Container whose outer tag is `tag`.
    pub fn from_outer_tag(tag: ChunkTag) -> Option<Self> {
        [Self::Wav, Self::Aiff]
            .into_iter()
            .find(|kind| kind.layout().outer_tag == tag)
    }
}
