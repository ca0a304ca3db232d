//! WAV serialization.
//!
//! Output layout (44-byte header followed by sample data):
//! ```text
//! [0-3]    "RIFF"
//! [4-7]    RIFF size = 4 + 24 + 8 + data_size
//! [8-11]   "WAVE"
//! [12-15]  "fmt "
//! [16-19]  16
//! [20-21]  audio format (1 = integer PCM, 3 = IEEE float)
//! [22-23]  channels
//! [24-27]  sample_rate
//! [28-31]  byte_rate = sample_rate * channels * bytes_per_sample
//! [32-33]  block_align = channels * bytes_per_sample
//! [34-35]  bits_per_sample
//! [36-39]  "data"
//! [40-43]  data_size
//! [44-..]  samples, then one zero pad byte if data_size is odd
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::container::layout::WAV_LAYOUT;
use crate::models::chunk::ChunkTag;
use crate::models::error::ContainerError;
use crate::models::format::{ContainerKind, Format};
use crate::processing::sample_codec;

/// Size of the header emitted by this writer.
pub const WAV_HEADER_SIZE: usize = 44;

/// Offset of the RIFF size field.
pub const RIFF_SIZE_OFFSET: u64 = 4;

/// Offset of the `data` chunk size field.
pub const DATA_SIZE_OFFSET: u64 = 40;

const FMT_CHUNK_SIZE: u32 = 16;
const WAVE_FORMAT_PCM: u16 = 1;
const WAVE_FORMAT_IEEE_FLOAT: u16 = 3;

/// Samples encoded per write call.
const ENCODE_BLOCK: usize = 4096;

/// Check that `format` can be written as WAV.
///
/// AIFF output is not implemented and fails here, before any byte is written.
pub fn check_writable(format: &Format) -> Result<(), ContainerError> {
    if format.kind != ContainerKind::Wav {
        return Err(ContainerError::NotImplemented("AIFF writing".into()));
    }
    format.validate()?;
    if u16::try_from(format.block_align()).is_err() || u32::try_from(format.byte_rate()).is_err() {
        return Err(ContainerError::ConfigurationFailed(format!(
            "{} channels at {} Hz overflow the fmt chunk fields",
            format.channels, format.sample_rate
        )));
    }
    Ok(())
}

/// `data` chunk size for `data_bytes` of samples, if the RIFF size field can
/// still hold it.
pub fn data_chunk_size(data_bytes: u64) -> Result<u32, ContainerError> {
    let riff_size = 4 + 24 + 8 + data_bytes;
    if riff_size > u32::MAX as u64 {
        return Err(ContainerError::AudioDataTooLarge { bytes: data_bytes });
    }
    Ok(data_bytes as u32)
}

/// RIFF size field value for a given `data` chunk size. The pad byte after
/// an odd data chunk is not counted.
pub fn riff_size(data_size: u32) -> u32 {
    // data_chunk_size() guarantees this fits
    4 + 24 + 8 + data_size
}

/// Build the 44-byte header for `data_size` bytes of samples.
///
/// `format` must have passed [`check_writable`] and `data_size` must come
/// from [`data_chunk_size`].
pub(crate) fn generate_wav_header(format: &Format, data_size: u32) -> [u8; WAV_HEADER_SIZE] {
    let order = WAV_LAYOUT.field_order;
    let audio_format = match format.bit_depth {
        32 => WAVE_FORMAT_IEEE_FLOAT,
        _ => WAVE_FORMAT_PCM,
    };

    let mut header = [0u8; WAV_HEADER_SIZE];
    header[0..4].copy_from_slice(ChunkTag::RIFF.as_bytes());
    header[4..8].copy_from_slice(&order.u32_bytes(riff_size(data_size)));
    header[8..12].copy_from_slice(ChunkTag::WAVE.as_bytes());

    header[12..16].copy_from_slice(ChunkTag::FMT.as_bytes());
    header[16..20].copy_from_slice(&order.u32_bytes(FMT_CHUNK_SIZE));
    header[20..22].copy_from_slice(&order.u16_bytes(audio_format));
    header[22..24].copy_from_slice(&order.u16_bytes(format.channels));
    header[24..28].copy_from_slice(&order.u32_bytes(format.sample_rate));
    header[28..32].copy_from_slice(&order.u32_bytes(format.byte_rate() as u32));
    header[32..34].copy_from_slice(&order.u16_bytes(format.block_align() as u16));
    header[34..36].copy_from_slice(&order.u16_bytes(format.bit_depth));

    header[36..40].copy_from_slice(ChunkTag::DATA.as_bytes());
    header[40..44].copy_from_slice(&order.u32_bytes(data_size));

    header
}

/// Validate `format` and size the `data` chunk for `samples`.
fn prepare(format: &Format, samples: &[f32]) -> Result<u32, ContainerError> {
    check_writable(format)?;
    data_chunk_size(samples.len() as u64 * format.bytes_per_sample() as u64)
}

/// Serialize `format` and `samples` as a complete WAV stream.
pub fn write_wav<W: Write>(writer: &mut W, format: &Format, samples: &[f32]) -> Result<(), ContainerError> {
    let data_size = prepare(format, samples)?;
    write_checked(writer, format, data_size, samples)
}

fn write_checked<W: Write>(
    writer: &mut W,
    format: &Format,
    data_size: u32,
    samples: &[f32],
) -> Result<(), ContainerError> {
    writer.write_all(&generate_wav_header(format, data_size))?;

    let mut block = Vec::with_capacity(ENCODE_BLOCK * format.bytes_per_sample());
    for chunk in samples.chunks(ENCODE_BLOCK) {
        block.clear();
        sample_codec::encode_into(chunk, format.bit_depth, &mut block)?;
        writer.write_all(&block)?;
    }
    if data_size & 1 == 1 {
        writer.write_all(&[0])?;
    }
    Ok(())
}

/// Write `samples` to a new WAV file at `path`.
///
/// All validation happens before the file is created.
pub fn write_all(path: impl AsRef<Path>, format: &Format, samples: &[f32]) -> Result<(), ContainerError> {
    let path = path.as_ref();
    let data_size = prepare(format, samples)?;

    let file = File::create(path)
        .map_err(|e| ContainerError::Io(format!("failed to create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    write_checked(&mut writer, format, data_size, samples)?;
    writer.flush()?;

    log::debug!(
        "wrote {} samples ({}-bit, {} channel(s)) to {}",
        samples.len(),
        format.bit_depth,
        format.channels,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_file_path;
    use std::fs;

    fn le_u16(bytes: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([bytes[at], bytes[at + 1]])
    }

    fn le_u32(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    }

    #[test]
    fn header_magic_and_sizes() {
        let format = Format::new(ContainerKind::Wav, 48000, 16, 2);
        let header = generate_wav_header(&format, 9600);

        assert_eq!(&header[0..4], b"RIFF");
        assert_eq!(&header[8..12], b"WAVE");
        assert_eq!(&header[12..16], b"fmt ");
        assert_eq!(&header[36..40], b"data");

        assert_eq!(le_u32(&header, 4), 4 + 24 + 8 + 9600);
        assert_eq!(le_u32(&header, 16), 16);
        assert_eq!(le_u16(&header, 20), 1);
        assert_eq!(le_u16(&header, 22), 2);
        assert_eq!(le_u32(&header, 24), 48000);
        assert_eq!(le_u32(&header, 28), 192000);
        assert_eq!(le_u16(&header, 32), 4);
        assert_eq!(le_u16(&header, 34), 16);
        assert_eq!(le_u32(&header, 40), 9600);
    }

    #[test]
    fn single_24bit_sample_riff_size() {
        let format = Format::new(ContainerKind::Wav, 44100, 24, 1);
        let mut out = Vec::new();
        write_wav(&mut out, &format, &[0.25]).unwrap();
        assert_eq!(le_u32(&out, 4), 39);
        assert_eq!(le_u32(&out, 40), 3);
        assert_eq!(out.len(), 44 + 3 + 1);
    }

    #[test]
    fn float_format_tag_for_32bit() {
        let format = Format::new(ContainerKind::Wav, 44100, 32, 1);
        let header = generate_wav_header(&format, 0);
        assert_eq!(le_u16(&header, 20), 3);
        assert_eq!(le_u32(&header, 28), 176400);
    }

    #[test]
    fn riff_size_excludes_pad_byte() {
        assert_eq!(riff_size(6), 42);
        assert_eq!(riff_size(9), 45);
    }

    #[test]
    fn data_size_overflow_is_reported() {
        assert_eq!(data_chunk_size(1000), Ok(1000));
        let too_big = u32::MAX as u64;
        assert_eq!(
            data_chunk_size(too_big),
            Err(ContainerError::AudioDataTooLarge { bytes: too_big })
        );
        // Largest payload that still fits the RIFF size field.
        assert_eq!(data_chunk_size(u32::MAX as u64 - 36), Ok(u32::MAX - 36));
        assert_eq!(
            data_chunk_size(u32::MAX as u64 - 35),
            Err(ContainerError::AudioDataTooLarge { bytes: u32::MAX as u64 - 35 })
        );
    }

    #[test]
    fn write_wav_emits_header_samples_and_pad() {
        let format = Format::new(ContainerKind::Wav, 8000, 24, 1);
        let mut out = Vec::new();
        write_wav(&mut out, &format, &[0.5, -0.5, 0.0]).unwrap();

        assert_eq!(out.len(), 44 + 9 + 1);
        assert_eq!(le_u32(&out, 40), 9);
        assert_eq!(le_u32(&out, 4), 4 + 24 + 8 + 9);
        assert_eq!(&out[44..47], &[0x00, 0x00, 0x40]);
        assert_eq!(&out[47..50], &[0x00, 0x00, 0xc0]);
        assert_eq!(out[53], 0);
    }

    #[test]
    fn write_wav_spans_multiple_blocks() {
        let format = Format::new(ContainerKind::Wav, 44100, 16, 2);
        let samples = vec![0.25f32; ENCODE_BLOCK * 2 + 10];
        let mut out = Vec::new();
        write_wav(&mut out, &format, &samples).unwrap();
        assert_eq!(out.len(), 44 + samples.len() * 2);
        assert_eq!(&out[out.len() - 2..], &8192i16.to_le_bytes());
    }

    #[test]
    fn aiff_output_is_not_implemented() {
        let format = Format::new(ContainerKind::Aiff, 44100, 16, 1);
        let mut out = Vec::new();
        let err = write_wav(&mut out, &format, &[0.0]).unwrap_err();
        assert!(matches!(err, ContainerError::NotImplemented(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn invalid_format_is_rejected() {
        let mut out = Vec::new();
        let format = Format::new(ContainerKind::Wav, 44100, 8, 1);
        assert_eq!(write_wav(&mut out, &format, &[0.0]), Err(ContainerError::UnsupportedBitDepth(8)));
        let format = Format::new(ContainerKind::Wav, 44100, 16, 0);
        assert_eq!(write_wav(&mut out, &format, &[0.0]), Err(ContainerError::InvalidChannelCount(0)));
        let format = Format::new(ContainerKind::Wav, u32::MAX, 32, 8);
        assert!(matches!(
            write_wav(&mut out, &format, &[]),
            Err(ContainerError::ConfigurationFailed(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn write_all_creates_file() {
        let path = temp_file_path("write_all.wav");
        let format = Format::new(ContainerKind::Wav, 22050, 16, 1);
        write_all(&path, &format, &[0.0, 0.5, -0.5, 1.0]).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 44 + 8);
        assert_eq!(le_u32(&bytes, 24), 22050);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn write_all_fails_before_creating_aiff() {
        let path = temp_file_path("never_created.aiff");
        let format = Format::new(ContainerKind::Aiff, 44100, 16, 1);
        assert!(matches!(write_all(&path, &format, &[]), Err(ContainerError::NotImplemented(_))));
        assert!(!path.exists());
    }
}
