//! Conversions between big-endian bit strings and arrays of fixed-width fields.
//!
//! Candidate strings and packed solutions are both sequences of `bit_len`-bit fields
//! stored most-significant-bit first. Expanding right-aligns every field in its own
//! group of bytes so that it can be read back as a big-endian integer; compressing
//! is the exact inverse.

use std::mem::size_of;

use crate::params::Params;

pub(crate) fn expand_array(vin: &[u8], bit_len: usize, byte_pad: usize) -> Vec<u8> {
    assert!(bit_len >= 8);
    assert!(u32::BITS as usize >= 7 + bit_len);

    let out_width = (bit_len + 7) / 8 + byte_pad;
    let out_len = 8 * out_width * vin.len() / bit_len;

    // Shortcut for parameters where expansion is a no-op
    if out_len == vin.len() {
        return vin.to_vec();
    }

    let mut vout: Vec<u8> = vec![0; out_len];
    let bit_len_mask: u32 = (1 << bit_len) - 1;

    // The acc_bits least-significant bits of acc_value represent a bit sequence
    // in big-endian order.
    let mut acc_bits = 0;
    let mut acc_value: u32 = 0;

    let mut j = 0;
    for b in vin {
        acc_value = (acc_value << 8) | u32::from(*b);
        acc_bits += 8;

        // When we have bit_len or more bits in the accumulator, write the next
        // output element.
        if acc_bits >= bit_len {
            acc_bits -= bit_len;
            for x in byte_pad..out_width {
                vout[j + x] = ((
                    // Big-endian
                    acc_value >> (acc_bits + (8 * (out_width - x - 1)))
                ) & (
                    // Apply bit_len_mask across byte boundaries
                    (bit_len_mask >> (8 * (out_width - x - 1))) & 0xFF
                )) as u8;
            }
            j += out_width;
        }
    }

    vout
}

pub(crate) fn compress_array(vin: &[u8], bit_len: usize, byte_pad: usize) -> Vec<u8> {
    assert!(bit_len >= 8);
    assert!(u32::BITS as usize >= 7 + bit_len);

    let in_width = (bit_len + 7) / 8 + byte_pad;
    let out_len = bit_len * vin.len() / (8 * in_width);

    let mut vout: Vec<u8> = Vec::with_capacity(out_len);
    let bit_len_mask: u32 = (1 << bit_len) - 1;

    // As in expand_array, the acc_bits least-significant bits of acc_value hold the
    // pending big-endian bit sequence.
    let mut acc_bits = 0;
    let mut acc_value: u32 = 0;

    let mut j = 0;
    for _ in 0..out_len {
        // Pull in the next field once fewer than eight bits are pending.
        if acc_bits < 8 {
            acc_value <<= bit_len;
            for x in byte_pad..in_width {
                acc_value |= u32::from(
                    vin[j + x] & ((bit_len_mask >> (8 * (in_width - x - 1))) & 0xFF) as u8,
                ) << (8 * (in_width - x - 1));
            }
            j += in_width;
            acc_bits += bit_len;
        }

        acc_bits -= 8;
        vout.push((acc_value >> acc_bits) as u8);
    }

    vout
}

/// Splits a big-endian bit string into `bit_len`-bit words, filling `vout`.
///
/// This is [`expand_array`] with a four-byte output width, read back as big-endian
/// integers, without the intermediate byte buffer.
pub(crate) fn read_words(vin: &[u8], bit_len: usize, vout: &mut [u32]) {
    assert!(bit_len >= 8);
    assert!(u32::BITS as usize >= 7 + bit_len);

    let bit_len_mask: u32 = (1 << bit_len) - 1;
    let mut acc_bits = 0;
    let mut acc_value: u32 = 0;

    let mut j = 0;
    for b in vin {
        acc_value = (acc_value << 8) | u32::from(*b);
        acc_bits += 8;

        if acc_bits >= bit_len {
            acc_bits -= bit_len;
            vout[j] = (acc_value >> acc_bits) & bit_len_mask;
            j += 1;
        }
    }
}

pub(crate) fn words_from_bits(vin: &[u8], bit_len: usize) -> Vec<u32> {
    let mut ret = vec![0; 8 * vin.len() / bit_len];
    read_words(vin, bit_len, &mut ret);
    ret
}

/// Returns `None` if the parameters are invalid for this minimal encoding.
pub(crate) fn indices_from_minimal(p: Params, minimal: &[u8]) -> Option<Vec<u32>> {
    if minimal.len() != p.solution_size() {
        return None;
    }

    Some(words_from_bits(minimal, p.index_bit_length()))
}

/// Packs `indices` into the minimal solution encoding: each index occupies exactly
/// [`Params::index_bit_length`] bits, most-significant bit first.
pub(crate) fn minimal_from_indices(p: Params, indices: &[u32]) -> Vec<u8> {
    let c_bit_len = p.index_bit_length();
    let digit_bytes = (c_bit_len + 7) / 8;
    let byte_pad = size_of::<u32>() - digit_bytes;

    let array: Vec<u8> = indices.iter().flat_map(|i| i.to_be_bytes()).collect();
    compress_array(&array, c_bit_len, byte_pad)
}
