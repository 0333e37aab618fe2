// In: src/kernels/bits.rs

//! Pure, stateless primitives for LSB-first bit addressing over u32 words.
//! Every packer in this crate is built on the four functions here. Widths are
//! capped at 32 bits, so a field spans at most two words and every shift
//! amount stays in 0..32; the functions are fully panic-free for any
//! `k <= 32` as long as the addressed words exist.

/// Returns a mask covering the low `k` bits of a u32.
/// Yields 0 when `k` is 0 and all-ones when `k >= 32`.
#[inline]
pub fn mask(k: u32) -> u32 {
    if k == 0 {
        0
    } else if k >= 32 {
        u32::MAX
    } else {
        (1u32 << k) - 1
    }
}

/// Ceiling division. `ceil_div(0, b)` is 0.
#[inline]
pub fn ceil_div(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

/// Number of bits needed to represent `x` unsigned: 0 for 0, otherwise the
/// position of the highest set bit plus one.
#[inline]
pub fn bits_needed(x: u32) -> u32 {
    if x == 0 {
        0
    } else {
        32 - x.leading_zeros()
    }
}

/// Reads `k <= 32` bits starting at absolute bit offset `bit_off`.
#[inline]
pub fn read_bits(words: &[u32], bit_off: usize, k: u32) -> u32 {
    debug_assert!(k <= 32);
    if k == 0 {
        return 0;
    }
    let w = bit_off / 32;
    let shift = (bit_off % 32) as u32;
    if shift + k <= 32 {
        return (words[w] >> shift) & mask(k);
    }
    // Field straddles two words.
    let low = 32 - shift;
    let part1 = words[w] >> shift;
    let part2 = words[w + 1] & mask(k - low);
    part1 | (part2 << low)
}

/// Writes the low `k <= 32` bits of `value` at absolute bit offset `bit_off`.
/// Words must be pre-zeroed where the field lands; the write ORs into place,
/// so disjoint fields can be written in any order.
#[inline]
pub fn write_bits(words: &mut [u32], bit_off: usize, k: u32, value: u32) {
    debug_assert!(k <= 32);
    if k == 0 {
        return;
    }
    let value = value & mask(k);
    let w = bit_off / 32;
    let shift = (bit_off % 32) as u32;
    if shift + k <= 32 {
        words[w] |= value << shift;
        return;
    }
    // Field straddles two words.
    let low = 32 - shift;
    words[w] |= value << shift;
    words[w + 1] |= value >> low;
}

//==================================================================================
// Unit Tests
//==================================================================================
