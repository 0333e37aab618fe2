// In: src/kernels/crossing.rs

//! The straddling fixed-width packer. Values are written back to back at a
//! `k`-bit stride, so a field may cross a word boundary; this is the densest
//! layout of the family and `get` pays for it with an occasional two-word
//! read. `k` is derived from the maximum value and capped at 32.

use crate::artifact::PackedData;
use crate::error::WordpackError;
use crate::kernels::bits::{bits_needed, ceil_div, mask, read_bits, write_bits};
use crate::kernels::checked_n;
use crate::traits::BitPacking;

#[derive(Debug, Clone, Copy, Default)]
pub struct CrossingPacker;

impl CrossingPacker {
    pub fn new() -> Self {
        CrossingPacker
    }

    fn k_from_data(values: &[u32]) -> u32 {
        let maxv = values.iter().copied().max().unwrap_or(0);
        bits_needed(maxv).min(32)
    }
}

impl BitPacking for CrossingPacker {
    fn compress(&self, values: &[u32]) -> Result<PackedData, WordpackError> {
        let n = checked_n(values)?;
        let k = Self::k_from_data(values);
        if k == 0 {
            return Ok(PackedData::for_crossing(n, 0, vec![]));
        }

        let n = n as usize;
        let total_bits = n * k as usize;
        let mut words = vec![0u32; ceil_div(total_bits, 32)];
        let limit = mask(k);
        let mut bit_off = 0;
        for &x in values {
            // Unreachable when k comes from the data's own maximum; guards
            // against parameter reuse by out-of-band callers.
            if x > limit {
                return Err(WordpackError::WidthOverflow(x as u64, k));
            }
            write_bits(&mut words, bit_off, k, x);
            bit_off += k as usize;
        }

        log::debug!(
            "crossing: packed n={} at k={} into {} words",
            n,
            k,
            words.len()
        );
        Ok(PackedData::for_crossing(n as u32, k, words))
    }

    fn get(&self, i: usize, data: &PackedData) -> Result<u32, WordpackError> {
        let n = data.n as usize;
        if i >= n {
            return Err(WordpackError::IndexOutOfBounds(i, n));
        }
        let k = data.k;
        if k == 0 {
            return Ok(0);
        }
        Ok(read_bits(&data.words, i * k as usize, k))
    }

    fn decompress(&self, out: &mut [u32], data: &PackedData) -> Result<(), WordpackError> {
        let n = data.n as usize;
        if out.len() != n {
            return Err(WordpackError::BufferMismatch(n, out.len()));
        }
        let k = data.k;
        if k == 0 {
            out.fill(0);
            return Ok(());
        }
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = read_bits(&data.words, i * k as usize, k);
        }
        Ok(())
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
