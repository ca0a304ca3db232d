//! Conversion between on-disk little-endian PCM and normalized f32 samples.
//!
//! | bit depth | wire layout                  | normalization            |
//! |-----------|------------------------------|--------------------------|
//! | 16        | signed LE 16-bit             | `value / 32768.0`        |
//! | 24        | signed LE 24-bit (3 bytes)   | `value / 8388608.0`      |
//! | 32        | IEEE-754 LE float32          | bit-exact passthrough    |

use crate::models::error::ContainerError;

const SCALE_16: f32 = 32768.0;
const SCALE_24: f32 = 8388608.0;

/// Bytes occupied by one sample on the wire.
pub fn bytes_per_sample(bit_depth: u16) -> Result<usize, ContainerError> {
    match bit_depth {
        16 => Ok(2),
        24 => Ok(3),
        32 => Ok(4),
        other => Err(ContainerError::UnsupportedBitDepth(other)),
    }
}

/// Decode raw sample bytes into normalized f32 samples.
///
/// `raw.len()` must be an exact multiple of the sample width. A trailing
/// fragment fails with `ShortRead` before any sample is produced.
pub fn decode(raw: &[u8], bit_depth: u16, channels: u16) -> Result<Vec<f32>, ContainerError> {
    let width = bytes_per_sample(bit_depth)?;
    if channels == 0 {
        return Err(ContainerError::InvalidChannelCount(channels));
    }
    if raw.len() % width != 0 {
        return Err(ContainerError::ShortRead);
    }

    let samples = match bit_depth {
        16 => raw
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]) as f32 / SCALE_16)
            .collect(),
        24 => raw
            .chunks_exact(3)
            .map(|b| {
                // Place the 3 bytes in the high end and shift back to sign-extend.
                let value = i32::from_le_bytes([0, b[0], b[1], b[2]]) >> 8;
                value as f32 / SCALE_24
            })
            .collect(),
        _ => raw
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect(),
    };
    Ok(samples)
}

/// Encode normalized f32 samples to little-endian PCM bytes.
///
/// Integer depths scale, clamp to `[-scale, scale - 1]` and truncate toward
/// zero. NaN encodes as 0. 32-bit writes the float bit pattern unchanged.
pub fn encode(samples: &[f32], bit_depth: u16) -> Result<Vec<u8>, ContainerError> {
    let width = bytes_per_sample(bit_depth)?;
    let mut data = Vec::with_capacity(samples.len() * width);
    encode_into(samples, bit_depth, &mut data)?;
    Ok(data)
}

/// Append encoded samples to `out`.
pub fn encode_into(samples: &[f32], bit_depth: u16, out: &mut Vec<u8>) -> Result<(), ContainerError> {
    bytes_per_sample(bit_depth)?;
    match bit_depth {
        16 => {
            for &sample in samples {
                let value = (sample * SCALE_16).clamp(-SCALE_16, SCALE_16 - 1.0) as i16;
                out.extend_from_slice(&value.to_le_bytes());
            }
        }
        24 => {
            for &sample in samples {
                let value = (sample * SCALE_24).clamp(-SCALE_24, SCALE_24 - 1.0) as i32;
                out.extend_from_slice(&value.to_le_bytes()[..3]);
            }
        }
        _ => {
            for &sample in samples {
                out.extend_from_slice(&sample.to_le_bytes());
            }
        }
    }
    Ok(())
}
