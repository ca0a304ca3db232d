//! Byte-level container fixtures shared by the unit tests.

use crate::container::extended::encode_extended_be;
use crate::container::layout::ByteOrder;
use crate::models::format::ContainerKind;

/// Assembles a container file chunk by chunk, with correct size fields and
/// pad bytes.
pub struct ContainerBuilder {
    kind: ContainerKind,
    form_type: [u8; 4],
    chunks: Vec<u8>,
}

impl ContainerBuilder {
    pub fn wav() -> Self {
        Self::new(ContainerKind::Wav)
    }

    pub fn aiff() -> Self {
        Self::new(ContainerKind::Aiff)
    }

    fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            form_type: kind.layout().form_type.0,
            chunks: Vec::new(),
        }
    }

    pub fn form_type(mut self, form_type: &[u8; 4]) -> Self {
        self.form_type = *form_type;
        self
    }

    fn order(&self) -> ByteOrder {
        self.kind.layout().size_order
    }

    /// Append a chunk whose declared size is the body length.
    pub fn chunk(self, tag: &[u8; 4], body: &[u8]) -> Self {
        let size = body.len() as u32;
        self.chunk_with_size(tag, size, body, true)
    }

    /// Append a chunk with an arbitrary declared size and optional pad byte.
    pub fn chunk_with_size(mut self, tag: &[u8; 4], size: u32, body: &[u8], pad: bool) -> Self {
        let order = self.order();
        self.chunks.extend_from_slice(tag);
        self.chunks.extend_from_slice(&order.u32_bytes(size));
        self.chunks.extend_from_slice(body);
        if pad && body.len() % 2 == 1 {
            self.chunks.push(0);
        }
        self
    }

    /// WAV `fmt ` chunk with derived byte rate and block align.
    pub fn fmt(self, audio_format: u16, channels: u16, sample_rate: u32, bits: u16) -> Self {
        let body = wav_fmt_body(audio_format, channels, sample_rate, bits);
        self.chunk(b"fmt ", &body)
    }

    pub fn data(self, body: &[u8]) -> Self {
        self.chunk(b"data", body)
    }

    /// AIFF `COMM` chunk.
    pub fn comm(self, channels: u16, frames: u32, bits: u16, sample_rate: f64) -> Self {
        let mut body = Vec::with_capacity(18);
        body.extend_from_slice(&channels.to_be_bytes());
        body.extend_from_slice(&frames.to_be_bytes());
        body.extend_from_slice(&bits.to_be_bytes());
        body.extend_from_slice(&encode_extended_be(sample_rate));
        self.chunk(b"COMM", &body)
    }

    /// Just the chunk sequence, without the 12-byte file header.
    pub fn chunks(&self) -> Vec<u8> {
        self.chunks.clone()
    }

    pub fn build(self) -> Vec<u8> {
        let layout = self.kind.layout();
        let mut out = Vec::with_capacity(12 + self.chunks.len());
        out.extend_from_slice(&layout.outer_tag.0);
        out.extend_from_slice(&layout.size_order.u32_bytes(4 + self.chunks.len() as u32));
        out.extend_from_slice(&self.form_type);
        out.extend_from_slice(&self.chunks);
        out
    }
}

pub fn wav_fmt_body(audio_format: u16, channels: u16, sample_rate: u32, bits: u16) -> Vec<u8> {
    let block_align = channels * (bits / 8);
    let mut body = Vec::with_capacity(16);
    body.extend_from_slice(&audio_format.to_le_bytes());
    body.extend_from_slice(&channels.to_le_bytes());
    body.extend_from_slice(&sample_rate.to_le_bytes());
    body.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
    body.extend_from_slice(&block_align.to_le_bytes());
    body.extend_from_slice(&bits.to_le_bytes());
    body
}

/// Unique path under the system temp dir.
pub fn temp_file_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("audio_container_test_{}_{}", std::process::id(), name))
}
