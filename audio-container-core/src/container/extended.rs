//! 80-bit IEEE-754 extended precision floats, as used for the AIFF sample rate.
//!
//! Layout: 1 sign bit, 15-bit exponent (bias 16383), 64-bit significand with
//! an explicit integer bit.

use super::layout::ByteOrder;

const EXPONENT_BIAS: i32 = 16383;

/// Decode an 80-bit extended float stored in `order`.
pub fn decode_extended(bytes: &[u8; 10], order: ByteOrder) -> f64 {
    let (sign_exp, significand) = match order {
        ByteOrder::Big => (
            order.u16([bytes[0], bytes[1]]),
            order.u64([
                bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7], bytes[8], bytes[9],
            ]),
        ),
        ByteOrder::Little => (
            order.u16([bytes[8], bytes[9]]),
            order.u64([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]),
        ),
    };

    let negative = sign_exp & 0x8000 != 0;
    let exponent = (sign_exp & 0x7fff) as i32;

    let magnitude = if exponent == 0 && significand == 0 {
        0.0
    } else if exponent == 0x7fff {
        // Any significand bits besides the integer bit mean NaN.
        if significand << 1 == 0 {
            f64::INFINITY
        } else {
            f64::NAN
        }
    } else {
        // Denormals (exponent 0) use the minimum exponent 1 - bias.
        let unbiased = exponent.max(1) - EXPONENT_BIAS - 63;
        significand as f64 * 2f64.powi(unbiased)
    };

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Truncate a decoded sample rate to u32.
///
/// NaN and negative values become 0; values above `u32::MAX` saturate.
pub fn sample_rate_to_u32(rate: f64) -> u32 {
    if !rate.is_finite() || rate < 0.0 || rate > u32::MAX as f64 {
        log::warn!("AIFF sample rate {} is outside the u32 range", rate);
    }
    rate as u32
}

/// Encode a non-negative finite value as a big-endian 80-bit extended float.
#[cfg(test)]
pub(crate) fn encode_extended_be(value: f64) -> [u8; 10] {
    let mut out = [0u8; 10];
    if value == 0.0 {
        return out;
    }
    let exponent = value.log2().floor() as i32;
    let significand = (value / 2f64.powi(exponent - 63)) as u64;
    out[0..2].copy_from_slice(&((exponent + EXPONENT_BIAS) as u16).to_be_bytes());
    out[2..10].copy_from_slice(&significand.to_be_bytes());
    out
}
