// In: src/kernels/overflow.rs

//! The patched fixed-width packer. Every value occupies a fixed slot of
//! `s = 1 + max(k', p)` bits: a flag bit (0 = inline, 1 = reference) followed
//! by the payload. Values that fit in `k'` bits are stored inline; the rest
//! go to an out-of-line overflow table of `k_over`-bit entries and the slot
//! payload holds the `p`-bit table index. Slot parameters come from an
//! exhaustive cost search over every admissible `k'` unless a pinned width
//! was configured.
//!
//! Slots can reach 33 bits (`k' == 32`), so they are written and read as two
//! fields, flag then payload, keeping each primitive call within the 32-bit
//! word contract.

use crate::artifact::PackedData;
use crate::error::WordpackError;
use crate::kernels::bits::{bits_needed, ceil_div, mask, read_bits, write_bits};
use crate::kernels::checked_n;
use crate::traits::BitPacking;

/// Slot parameters for one dataset, plus the encoded size they imply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowParams {
    pub k_prime: u32,
    pub p: u32,
    pub k_over: u32,
    pub total_bits: u64,
}

/// Ceiling of log2: 0 for n <= 1, otherwise the bit length of n - 1.
fn log2_ceil(n: u64) -> u32 {
    if n <= 1 {
        0
    } else {
        64 - (n - 1).leading_zeros()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OverflowPacker {
    pinned_k_prime: Option<u32>,
    auto_select: bool,
}

impl Default for OverflowPacker {
    fn default() -> Self {
        Self {
            pinned_k_prime: None,
            auto_select: true,
        }
    }
}

impl OverflowPacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the inline width and skips the parameter search.
    pub fn with_pinned_k_prime(k_prime: u32) -> Self {
        Self {
            pinned_k_prime: Some(k_prime),
            auto_select: false,
        }
    }

    /// A pin is honored only when auto-selection is off.
    pub(crate) fn with_options(k_prime: Option<u32>, auto_select: bool) -> Self {
        Self {
            pinned_k_prime: k_prime,
            auto_select,
        }
    }

    /// Evaluates one candidate inline width against the data.
    fn cost_for(values: &[u32], k_prime: u32) -> OverflowParams {
        let mut m = 0u64;
        let mut over_max = 0u32;
        for &x in values {
            if bits_needed(x) > k_prime {
                m += 1;
                over_max = over_max.max(x);
            }
        }
        let p = if m <= 1 { 0 } else { log2_ceil(m) };
        let k_over = bits_needed(over_max);
        let s = 1 + k_prime.max(p);
        let total_bits = values.len() as u64 * s as u64 + m * k_over as u64;
        OverflowParams {
            k_prime,
            p,
            k_over,
            total_bits,
        }
    }

    /// Picks `(k', p, k_over)` minimizing the total encoded size.
    ///
    /// The search is a plain linear scan over at most 33 candidates; ties keep
    /// the smallest `k'`. A pinned width bypasses the scan entirely.
    fn choose_params(&self, values: &[u32]) -> OverflowParams {
        if values.is_empty() {
            return OverflowParams {
                k_prime: 0,
                p: 0,
                k_over: 0,
                total_bits: 0,
            };
        }

        if let (Some(pinned), false) = (self.pinned_k_prime, self.auto_select) {
            let params = Self::cost_for(values, pinned.min(32));
            log::debug!(
                "overflow: pinned k'={} -> p={} k_over={} cost={} bits",
                params.k_prime,
                params.p,
                params.k_over,
                params.total_bits
            );
            return params;
        }

        let maxv = values.iter().copied().max().unwrap_or(0);
        let kmax = bits_needed(maxv).min(32);
        let mut best = Self::cost_for(values, 0);
        log::debug!(
            "  - candidate k'={:<2} | p={:<2} k_over={:<2} | cost (bits): {}",
            best.k_prime,
            best.p,
            best.k_over,
            best.total_bits
        );
        for k_prime in 1..=kmax {
            let cand = Self::cost_for(values, k_prime);
            log::debug!(
                "  - candidate k'={:<2} | p={:<2} k_over={:<2} | cost (bits): {}",
                cand.k_prime,
                cand.p,
                cand.k_over,
                cand.total_bits
            );
            if cand.total_bits < best.total_bits {
                best = cand;
            }
        }
        log::debug!(
            "overflow: selected k'={} p={} k_over={} cost={} bits for n={}",
            best.k_prime,
            best.p,
            best.k_over,
            best.total_bits,
            values.len()
        );
        best
    }
}

impl BitPacking for OverflowPacker {
    fn compress(&self, values: &[u32]) -> Result<PackedData, WordpackError> {
        let n = checked_n(values)?;
        if n == 0 {
            return Ok(PackedData::for_overflow(0, 0, 0, 0, 0, 0, vec![]));
        }
        let n = n as usize;

        let params = self.choose_params(values);
        let (k_prime, p, k_over) = (params.k_prime, params.p, params.k_over);
        let s = 1 + k_prime.max(p);
        let payload = s - 1;

        // Assign table indices in input order.
        let mut overflow_values: Vec<u32> = Vec::new();
        let mut overflow_index: Vec<Option<u32>> = vec![None; n];
        for (i, &x) in values.iter().enumerate() {
            if bits_needed(x) > k_prime {
                overflow_index[i] = Some(overflow_values.len() as u32);
                overflow_values.push(x);
            }
        }

        let m = overflow_values.len() as u64;
        let main_bits = n as u64 * s as u64;
        let over_bits = m * k_over as u64;
        let total_bits = main_bits + over_bits;
        if total_bits > u32::MAX as u64 {
            return Err(WordpackError::FormatError(format!(
                "packed size of {} bits does not fit the u32 envelope fields",
                total_bits
            )));
        }
        let mut words = vec![0u32; ceil_div(total_bits as usize, 32)];

        let mut bit_off = 0usize;
        for (i, &x) in values.iter().enumerate() {
            let (flag, field) = match overflow_index[i] {
                None => (0, x & mask(k_prime)),
                Some(idx) => {
                    // Unreachable while the search sets p >= 1 for m > 1.
                    if p == 0 && idx != 0 {
                        return Err(WordpackError::InternalError(
                            "p == 0 but multiple overflow indices".into(),
                        ));
                    }
                    (1, idx & mask(p))
                }
            };
            write_bits(&mut words, bit_off, 1, flag);
            write_bits(&mut words, bit_off + 1, payload, field);
            bit_off += s as usize;
        }

        let mut off_over = main_bits as usize;
        for &v in &overflow_values {
            write_bits(&mut words, off_over, k_over, v);
            off_over += k_over as usize;
        }

        log::debug!(
            "overflow: packed n={} (m={} in table) into {} words",
            n,
            m,
            words.len()
        );
        Ok(PackedData::for_overflow(
            n as u32,
            k_prime,
            p,
            k_over,
            main_bits as u32,
            over_bits as u32,
            words,
        ))
    }

    fn get(&self, i: usize, data: &PackedData) -> Result<u32, WordpackError> {
        let n = data.n as usize;
        if i >= n {
            return Err(WordpackError::IndexOutOfBounds(i, n));
        }
        let payload = data.k_prime.max(data.p);
        let bit_off = i * (1 + payload) as usize;
        let flag = read_bits(&data.words, bit_off, 1);
        let field = read_bits(&data.words, bit_off + 1, payload);
        if flag == 0 {
            return Ok(field & mask(data.k_prime));
        }
        let idx = if data.p > 0 { field & mask(data.p) } else { 0 };
        if data.k_over == 0 {
            return Ok(0);
        }
        let off_over = data.main_bits as usize + idx as usize * data.k_over as usize;
        Ok(read_bits(&data.words, off_over, data.k_over))
    }

    fn decompress(&self, out: &mut [u32], data: &PackedData) -> Result<(), WordpackError> {
        let n = data.n as usize;
        if out.len() != n {
            return Err(WordpackError::BufferMismatch(n, out.len()));
        }
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.get(i, data)?;
        }
        Ok(())
    }
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Kind;

    #[test]
    fn test_overflow_reference_example() {
        // Two outliers among small values: the search should land on k'=3
        // with a 1-bit table index and 12-bit table entries.
        let arr = [1u32, 2, 3, 1024, 4, 5, 2048];
        let packer = OverflowPacker::new();
        let data = packer.compress(&arr).unwrap();
        assert_eq!(data.kind, Kind::Overflow);
        assert_eq!(data.k_prime, 3);
        assert_eq!(data.p, 1);
        assert_eq!(data.k_over, 12);
        assert_eq!(data.main_bits, 28); // 7 slots of 4 bits
        assert_eq!(data.over_bits, 24); // 2 entries of 12 bits
        assert_eq!(data.words.len(), 2);
        for (i, &v) in arr.iter().enumerate() {
            assert_eq!(packer.get(i, &data).unwrap(), v);
        }
        let mut out = vec![0u32; arr.len()];
        packer.decompress(&mut out, &data).unwrap();
        assert_eq!(out, arr);
    }

    #[test]
    fn test_overflow_choose_params_costs() {
        let arr = [1u32, 2, 3, 1024, 4, 5, 2048];
        let params = OverflowPacker::cost_for(&arr, 3);
        assert_eq!(
            params,
            OverflowParams {
                k_prime: 3,
                p: 1,
                k_over: 12,
                total_bits: 52,
            }
        );
        // One admissible neighbor for comparison: k'=2 keeps four values
        // out of line and costs more.
        let worse = OverflowPacker::cost_for(&arr, 2);
        assert_eq!(worse.p, 2);
        assert!(worse.total_bits > params.total_bits);
    }

    #[test]
    fn test_overflow_pinned_width_no_table() {
        let arr = [0u32, 1, 2, 3, 4];
        let packer = OverflowPacker::with_pinned_k_prime(3);
        let data = packer.compress(&arr).unwrap();
        assert_eq!(data.k_prime, 3);
        assert_eq!(data.k_over, 0);
        assert_eq!(data.over_bits, 0);
        let mut out = vec![0u32; arr.len()];
        packer.decompress(&mut out, &data).unwrap();
        assert_eq!(out, arr);
    }

    #[test]
    fn test_overflow_pinned_width_with_table() {
        let arr = [1u32, 2, 3, 1024, 4, 5, 2048];
        let packer = OverflowPacker::with_pinned_k_prime(2);
        let data = packer.compress(&arr).unwrap();
        assert_eq!(data.k_prime, 2);
        assert_eq!(data.p, 2); // four values out of line
        assert_eq!(data.k_over, 12);
        let mut out = vec![0u32; arr.len()];
        packer.decompress(&mut out, &data).unwrap();
        assert_eq!(out, arr);
    }

    #[test]
    fn test_overflow_pin_is_ignored_when_auto_select_stays_on() {
        let arr = [1u32, 2, 3, 1024, 4, 5, 2048];
        let packer = OverflowPacker::with_options(Some(7), true);
        let data = packer.compress(&arr).unwrap();
        assert_eq!(data.k_prime, 3);
    }

    #[test]
    fn test_overflow_single_outlier_gets_zero_index_bits() {
        let arr = [1u32, 1, 1_000_000];
        let packer = OverflowPacker::new();
        let data = packer.compress(&arr).unwrap();
        assert_eq!(data.k_prime, 1);
        assert_eq!(data.p, 0);
        assert_eq!(data.k_over, 20);
        for (i, &v) in arr.iter().enumerate() {
            assert_eq!(packer.get(i, &data).unwrap(), v);
        }
    }

    #[test]
    fn test_overflow_top_bit_values_use_33_bit_slots() {
        // All values need the full 32 bits, so the search settles on k'=32
        // and slots grow to 33 bits. The flag/payload split must keep the
        // top bit intact across the word straddles.
        let arr = [u32::MAX, 0x8000_0001, u32::MAX, 0xFFFF_FFFE];
        let packer = OverflowPacker::new();
        let data = packer.compress(&arr).unwrap();
        assert_eq!(data.k_prime, 32);
        assert_eq!(data.p, 0);
        assert_eq!(data.k_over, 0);
        assert_eq!(data.main_bits, 132);
        for (i, &v) in arr.iter().enumerate() {
            assert_eq!(packer.get(i, &data).unwrap(), v);
        }
        let mut out = vec![0u32; arr.len()];
        packer.decompress(&mut out, &data).unwrap();
        assert_eq!(out, arr);
    }

    #[test]
    fn test_overflow_all_zeroes() {
        let arr = [0u32; 40];
        let packer = OverflowPacker::new();
        let data = packer.compress(&arr).unwrap();
        assert_eq!(data.k_prime, 0);
        assert_eq!(data.p, 0);
        assert_eq!(data.k_over, 0);
        assert_eq!(data.main_bits, 40); // one flag bit per value
        assert_eq!(data.words.len(), 2);
        let mut out = vec![9u32; 40];
        packer.decompress(&mut out, &data).unwrap();
        assert_eq!(out, arr);
    }

    #[test]
    fn test_overflow_empty_input() {
        let packer = OverflowPacker::new();
        let data = packer.compress(&[]).unwrap();
        assert_eq!(data.n, 0);
        assert_eq!(data.k_prime, 0);
        assert!(data.words.is_empty());
    }

    #[test]
    fn test_overflow_index_and_buffer_errors() {
        let packer = OverflowPacker::new();
        let data = packer.compress(&[1, 2, 3]).unwrap();
        assert!(matches!(
            packer.get(3, &data),
            Err(WordpackError::IndexOutOfBounds(3, 3))
        ));
        let mut out = vec![0u32; 5];
        assert!(matches!(
            packer.decompress(&mut out, &data),
            Err(WordpackError::BufferMismatch(3, 5))
        ));
    }

    #[test]
    fn test_log2_ceil() {
        assert_eq!(log2_ceil(0), 0);
        assert_eq!(log2_ceil(1), 0);
        assert_eq!(log2_ceil(2), 1);
        assert_eq!(log2_ceil(4), 2);
        assert_eq!(log2_ceil(5), 3);
    }
}
