
//! Reversible 2D wavelet transform of 16-bit samples.
//! A Haar-like lifting scheme replaces pairs of samples with
//! their truncated average and their difference, level by level,
//! doubling the pair distance until the smaller dimension is exhausted.

use crate::error::UnitResult;
use crate::math::Vec2;


/// Values smaller than this threshold are transformed without modulo arithmetic.
/// The encoder and decoder must agree on the same `max_value`,
/// which is why it travels in the block header.
const MODULO_THRESHOLD: u16 = 1 << 14;


/// Transform the `size.y() × size.x()` samples addressed by
/// `buffer[y * strides.y() + x * strides.x()]` in place.
/// The strides are sample counts, not byte counts.
/// Lossless for any sample values in `[0, max_value]`.
pub fn encode(
    buffer: &mut [u16],
    Vec2(count_x, count_y): Vec2<usize>,
    Vec2(offset_x, offset_y): Vec2<usize>,
    max_value: u16,
) -> UnitResult
{
    let is_14_bit = max_value < MODULO_THRESHOLD;
    let count = count_x.min(count_y);

    let mut p = 1_usize; // pair distance at the current level
    let mut p2 = 2_usize; // pair distance at the next level

    while p2 <= count {
        let mut position_y = 0;
        let end_y = offset_y * (count_y - p2);
        let (offset1_x, offset1_y) = (offset_x * p, offset_y * p);
        let (offset2_x, offset2_y) = (offset_x * p2, offset_y * p2);

        while position_y <= end_y {
            let mut position_x = position_y;
            let end_x = position_y + offset_x * (count_x - p2);

            while position_x <= end_x {
                let p01 = position_x + offset1_x;
                let p10 = position_x + offset1_y;
                let p11 = p10 + offset1_x;

                if is_14_bit {
                    let (i00, i01) = encode_14bit(buffer[position_x], buffer[p01]);
                    let (i10, i11) = encode_14bit(buffer[p10], buffer[p11]);

                    let (low0, high0) = encode_14bit(i00, i10);
                    let (low1, high1) = encode_14bit(i01, i11);

                    buffer[position_x] = low0;
                    buffer[p10] = high0;
                    buffer[p01] = low1;
                    buffer[p11] = high1;
                }
                else {
                    let (i00, i01) = encode_16bit(buffer[position_x], buffer[p01]);
                    let (i10, i11) = encode_16bit(buffer[p10], buffer[p11]);

                    let (low0, high0) = encode_16bit(i00, i10);
                    let (low1, high1) = encode_16bit(i01, i11);

                    buffer[position_x] = low0;
                    buffer[p10] = high0;
                    buffer[p01] = low1;
                    buffer[p11] = high1;
                }

                position_x += offset2_x;
            }

            // encode the remaining odd column, still within this row pair
            if count_x & p != 0 {
                let p10 = position_x + offset1_y;

                let (low, high) =
                    if is_14_bit { encode_14bit(buffer[position_x], buffer[p10]) }
                    else { encode_16bit(buffer[position_x], buffer[p10]) };

                buffer[position_x] = low;
                buffer[p10] = high;
            }

            position_y += offset2_y;
        }

        // encode the remaining odd row
        if count_y & p != 0 {
            let mut position_x = position_y;
            let end_x = position_y + offset_x * (count_x - p2);

            while position_x <= end_x {
                let p01 = position_x + offset1_x;

                let (low, high) =
                    if is_14_bit { encode_14bit(buffer[position_x], buffer[p01]) }
                    else { encode_16bit(buffer[position_x], buffer[p01]) };

                buffer[position_x] = low;
                buffer[p01] = high;

                position_x += offset2_x;
            }
        }

        p = p2;
        p2 <<= 1;
    }

    Ok(())
}


/// The exact inverse of `encode`, given the same dimensions,
/// strides and `max_value`.
pub fn decode(
    buffer: &mut [u16],
    Vec2(count_x, count_y): Vec2<usize>,
    Vec2(offset_x, offset_y): Vec2<usize>,
    max_value: u16,
) -> UnitResult
{
    let is_14_bit = max_value < MODULO_THRESHOLD;
    let count = count_x.min(count_y);

    // find the coarsest level
    let mut p = 1_usize;
    while p <= count { p <<= 1; }

    p >>= 1;
    let mut p2 = p;
    p >>= 1;

    while p >= 1 {
        let mut position_y = 0;
        let end_y = offset_y * (count_y - p2);
        let (offset1_x, offset1_y) = (offset_x * p, offset_y * p);
        let (offset2_x, offset2_y) = (offset_x * p2, offset_y * p2);

        while position_y <= end_y {
            let mut position_x = position_y;
            let end_x = position_y + offset_x * (count_x - p2);

            while position_x <= end_x {
                let p01 = position_x + offset1_x;
                let p10 = position_x + offset1_y;
                let p11 = p10 + offset1_x;

                if is_14_bit {
                    let (i00, i10) = decode_14bit(buffer[position_x], buffer[p10]);
                    let (i01, i11) = decode_14bit(buffer[p01], buffer[p11]);

                    let (top_left, top_right) = decode_14bit(i00, i01);
                    let (bottom_left, bottom_right) = decode_14bit(i10, i11);

                    buffer[position_x] = top_left;
                    buffer[p01] = top_right;
                    buffer[p10] = bottom_left;
                    buffer[p11] = bottom_right;
                }
                else {
                    let (i00, i10) = decode_16bit(buffer[position_x], buffer[p10]);
                    let (i01, i11) = decode_16bit(buffer[p01], buffer[p11]);

                    let (top_left, top_right) = decode_16bit(i00, i01);
                    let (bottom_left, bottom_right) = decode_16bit(i10, i11);

                    buffer[position_x] = top_left;
                    buffer[p01] = top_right;
                    buffer[p10] = bottom_left;
                    buffer[p11] = bottom_right;
                }

                position_x += offset2_x;
            }

            // decode the remaining odd column, still within this row pair
            if count_x & p != 0 {
                let p10 = position_x + offset1_y;

                let (first, second) =
                    if is_14_bit { decode_14bit(buffer[position_x], buffer[p10]) }
                    else { decode_16bit(buffer[position_x], buffer[p10]) };

                buffer[position_x] = first;
                buffer[p10] = second;
            }

            position_y += offset2_y;
        }

        // decode the remaining odd row
        if count_y & p != 0 {
            let mut position_x = position_y;
            let end_x = position_y + offset_x * (count_x - p2);

            while position_x <= end_x {
                let p01 = position_x + offset1_x;

                let (first, second) =
                    if is_14_bit { decode_14bit(buffer[position_x], buffer[p01]) }
                    else { decode_16bit(buffer[position_x], buffer[p01]) };

                buffer[position_x] = first;
                buffer[p01] = second;

                position_x += offset2_x;
            }
        }

        p2 = p;
        p >>= 1;
    }

    Ok(())
}


// Wavelet basis functions without modulo arithmetic.
// They produce the best compression ratios when the transformed data
// is Huffman-encoded, but work only for values smaller than 1 << 14.
// Arithmetic is widened to i32 so that out-of-range input
// from a corrupt stream wraps instead of overflowing.

#[inline]
fn encode_14bit(a: u16, b: u16) -> (u16, u16) {
    let (a, b) = (a as i16 as i32, b as i16 as i32);

    let average = (a + b) >> 1;
    let difference = a - b;

    (average as u16, difference as u16)
}

#[inline]
fn decode_14bit(low: u16, high: u16) -> (u16, u16) {
    let (low, high) = (low as i16 as i32, high as i16 as i32);

    let a = low + (high & 1) + (high >> 1);
    let b = a - high;

    (a as u16, b as u16)
}


// Wavelet basis functions with modulo arithmetic.
// They work with full 16-bit data, but Huffman-encoding the
// transformed data does not compress quite as well.

const BIT_COUNT: i32 = 16;
const OFFSET_A: i32 = 1 << (BIT_COUNT - 1);
const OFFSET_M: i32 = 1 << (BIT_COUNT - 1);
const MOD_MASK: i32 = (1 << BIT_COUNT) - 1;

#[inline]
fn encode_16bit(a: u16, b: u16) -> (u16, u16) {
    let (a, b) = (a as i32, b as i32);

    let offset_a = (a + OFFSET_A) & MOD_MASK;
    let mut average = (offset_a + b) >> 1;
    let difference = offset_a - b;

    if difference < 0 { average = (average + OFFSET_M) & MOD_MASK; }

    (average as u16, (difference & MOD_MASK) as u16)
}

#[inline]
fn decode_16bit(low: u16, high: u16) -> (u16, u16) {
    let (average, difference) = (low as i32, high as i32);

    let b = (average - (difference >> 1)) & MOD_MASK;
    let a = (difference + b - OFFSET_A) & MOD_MASK;

    (a as u16, b as u16)
}
