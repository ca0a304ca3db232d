use serde::{Deserialize, Serialize};

use super::error::ContainerError;
use crate::processing::sample_codec;

/// Outer container structure of an audio file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Wav,
    Aiff,
}

/// Canonical description of the PCM stream stored in a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    pub kind: ContainerKind,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per encoded sample. Only 16, 24 and 32 can be decoded.
    pub bit_depth: u16,
    /// Number of interleaved channels.
    pub channels: u16,
}

impl Format {
    pub fn new(kind: ContainerKind, sample_rate: u32, bit_depth: u16, channels: u16) -> Self {
        Self {
            kind,
            sample_rate,
            bit_depth,
            channels,
        }
    }

    /// Check that the codec can handle this format.
    pub fn validate(&self) -> Result<(), ContainerError> {
        if self.channels == 0 {
            return Err(ContainerError::InvalidChannelCount(self.channels));
        }
        sample_codec::bytes_per_sample(self.bit_depth)?;
        Ok(())
    }

    pub fn bytes_per_sample(&self) -> usize {
        self.bit_depth as usize / 8
    }

    /// Bytes per interleaved frame (`channels * bytes_per_sample`).
    pub fn block_align(&self) -> u32 {
        self.channels as u32 * self.bytes_per_sample() as u32
    }

    pub fn byte_rate(&self) -> u64 {
        self.sample_rate as u64 * self.block_align() as u64
    }
}

/// Decoded audio: the source format plus interleaved normalized samples.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub format: Format,
    pub samples: Vec<f32>,
}

impl AudioBuffer {
    pub fn new(format: Format, samples: Vec<f32>) -> Self {
        Self { format, samples }
    }

    /// Number of complete interleaved frames.
    pub fn frames(&self) -> usize {
        match self.format.channels {
            0 => 0,
            channels => self.samples.len() / channels as usize,
        }
    }
}
