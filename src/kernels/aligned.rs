// In: src/kernels/aligned.rs

//! The word-aligned fixed-width packer. Each word holds `cap = floor(32/k)`
//! values and no field ever straddles a word boundary, so `get` is a single
//! shift-and-mask on one word. The padding left at the top of each word is
//! the price paid for that access path.

use crate::artifact::PackedData;
use crate::error::WordpackError;
use crate::kernels::bits::{bits_needed, ceil_div, mask};
use crate::kernels::checked_n;
use crate::traits::BitPacking;

#[derive(Debug, Clone, Copy, Default)]
pub struct AlignedPacker;

impl AlignedPacker {
    pub fn new() -> Self {
        AlignedPacker
    }

    fn k_from_data(values: &[u32]) -> u32 {
        let maxv = values.iter().copied().max().unwrap_or(0);
        bits_needed(maxv).min(32)
    }
}

impl BitPacking for AlignedPacker {
    fn compress(&self, values: &[u32]) -> Result<PackedData, WordpackError> {
        let n = checked_n(values)?;
        let k = Self::k_from_data(values);
        if k == 0 {
            return Ok(PackedData::for_aligned(n, 0, 0, vec![]));
        }

        let n = n as usize;
        let cap = (32 / k).max(1); // k==32 gives cap 1
        let words_count = ceil_div(n, cap as usize);
        let mut words = vec![0u32; words_count];
        let limit = mask(k);
        for (i, &x) in values.iter().enumerate() {
            // Same out-of-band guard as the crossing packer.
            if x > limit {
                return Err(WordpackError::WidthOverflow(x as u64, k));
            }
            let w = i / cap as usize;
            let shift = (i as u32 % cap) * k;
            words[w] |= x << shift;
        }

        log::debug!(
            "aligned: packed n={} at k={} cap={} into {} words",
            n,
            k,
            cap,
            words_count
        );
        Ok(PackedData::for_aligned(n as u32, k, cap, words))
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
        // A zero cap in a hand-built header must not divide by zero.
        let cap = if data.cap != 0 {
            data.cap
        } else {
            (32 / k).max(1)
        };
        let w = i / cap as usize;
        let shift = (i as u32 % cap) * k;
        Ok((data.words[w] >> shift) & mask(k))
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
        let cap = if data.cap != 0 {
            data.cap
        } else {
            (32 / k).max(1)
        };
        let m = mask(k);
        for (i, slot) in out.iter_mut().enumerate() {
            let w = i / cap as usize;
            let shift = (i as u32 % cap) * k;
            *slot = (data.words[w] >> shift) & m;
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
    fn test_aligned_basic_k12() {
        let arr = [1u32, 2, 3, 4095, 4, 5];
        let packer = AlignedPacker::new();
        let data = packer.compress(&arr).unwrap();
        assert_eq!(data.kind, Kind::Aligned);
        assert_eq!(data.k, 12);
        assert_eq!(data.cap, 2); // floor(32/12)
        assert_eq!(data.words.len(), 3);
        for (i, &v) in arr.iter().enumerate() {
            assert_eq!(packer.get(i, &data).unwrap(), v);
        }
        let mut out = vec![0u32; arr.len()];
        packer.decompress(&mut out, &data).unwrap();
        assert_eq!(out, arr);
    }

    #[test]
    fn test_aligned_k32_cap1() {
        let arr = [0xFFFF_FFFFu32, 0x1234_5678, 0];
        let packer = AlignedPacker::new();
        let data = packer.compress(&arr).unwrap();
        assert_eq!(data.k, 32);
        assert_eq!(data.cap, 1);
        assert_eq!(data.words.len(), 3);
        let mut out = vec![0u32; arr.len()];
        packer.decompress(&mut out, &data).unwrap();
        assert_eq!(out, arr);
    }

    #[test]
    fn test_aligned_zeroes_k0() {
        let arr = [0u32; 4];
        let packer = AlignedPacker::new();
        let data = packer.compress(&arr).unwrap();
        assert_eq!(data.k, 0);
        assert_eq!(data.cap, 0);
        assert!(data.words.is_empty());
        assert_eq!(packer.get(3, &data).unwrap(), 0);
        let mut out = vec![7u32; 4];
        packer.decompress(&mut out, &data).unwrap();
        assert_eq!(out, arr);
    }

    #[test]
    fn test_aligned_get_recomputes_zero_cap() {
        let packer = AlignedPacker::new();
        let mut data = packer.compress(&[1u32, 2, 3, 4095, 4, 5]).unwrap();
        data.cap = 0;
        assert_eq!(packer.get(3, &data).unwrap(), 4095);
        let mut out = vec![0u32; 6];
        packer.decompress(&mut out, &data).unwrap();
        assert_eq!(out, [1, 2, 3, 4095, 4, 5]);
    }

    #[test]
    fn test_aligned_padding_stays_zero() {
        // k=12, cap=2: bits 24..32 of every word are padding.
        let arr = [4095u32, 4095, 4095];
        let packer = AlignedPacker::new();
        let data = packer.compress(&arr).unwrap();
        for w in &data.words {
            assert_eq!(w >> 24, 0);
        }
    }

    #[test]
    fn test_aligned_index_and_buffer_errors() {
        let packer = AlignedPacker::new();
        let data = packer.compress(&[1, 2, 3]).unwrap();
        assert!(matches!(
            packer.get(5, &data),
            Err(WordpackError::IndexOutOfBounds(5, 3))
        ));
        let mut out = vec![0u32; 4];
        assert!(matches!(
            packer.decompress(&mut out, &data),
            Err(WordpackError::BufferMismatch(3, 4))
        ));
    }
}
