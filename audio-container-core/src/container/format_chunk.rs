use super::extended::{decode_extended, sample_rate_to_u32};
use super::layout::{ContainerLayout, SampleRateField};
use crate::models::format::{ContainerKind, Format};

/// WAV `audio_format` tags.
const WAVE_FORMAT_PCM: u16 = 1;
const WAVE_FORMAT_IEEE_FLOAT: u16 = 3;
const WAVE_FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Decode the leading field block of a format chunk.
///
/// `body` holds exactly `layout.format_body_len` bytes. Bit depth is passed
/// through unchecked; the codec rejects depths it cannot decode.
pub fn parse_format_body(layout: &ContainerLayout, body: &[u8]) -> Format {
    let order = layout.field_order;
    let channels = order.u16_at(body, layout.channels_offset);
    let bit_depth = order.u16_at(body, layout.bit_depth_offset);

    let sample_rate = match layout.sample_rate {
        SampleRateField::Integer { offset } => order.u32_at(body, offset),
        SampleRateField::Extended { offset } => {
            let mut raw = [0u8; 10];
            raw.copy_from_slice(&body[offset..offset + 10]);
            sample_rate_to_u32(decode_extended(&raw, order))
        }
    };

    if layout.kind == ContainerKind::Wav {
        check_wave_format_tag(order.u16_at(body, 0), bit_depth);
    }

    Format::new(layout.kind, sample_rate, bit_depth, channels)
}

/// The codec treats 16/24-bit as integer PCM and 32-bit as float; flag
/// headers that say otherwise.
fn check_wave_format_tag(audio_format: u16, bit_depth: u16) {
    let consistent = match audio_format {
        WAVE_FORMAT_PCM => bit_depth != 32,
        WAVE_FORMAT_IEEE_FLOAT => bit_depth == 32,
        WAVE_FORMAT_EXTENSIBLE => true,
        _ => false,
    };
    if !consistent {
        log::warn!(
            "fmt chunk audio format {} does not match {}-bit decoding",
            audio_format,
            bit_depth
        );
    }
}
