// In: src/packer.rs

//! Strategy dispatch for the packing kernels.
//!
//! `Packer` is the single entry point callers should reach for: it owns one
//! concrete kernel and forwards the `BitPacking` calls to it. Construction is
//! driven by a `Kind`, so the string-to-strategy mapping stays at the
//! application boundary and everything below works with the enum.

use crate::artifact::PackedData;
use crate::config::PackerConfig;
use crate::error::WordpackError;
use crate::format::Kind;
use crate::kernels::{AlignedPacker, CrossingPacker, OverflowPacker};
use crate::traits::BitPacking;

#[derive(Debug, Clone, Copy)]
pub enum Packer {
    Crossing(CrossingPacker),
    Aligned(AlignedPacker),
    Overflow(OverflowPacker),
}

impl Packer {
    /// Builds the default packer for a strategy.
    pub fn new(kind: Kind) -> Self {
        match kind {
            Kind::Crossing => Packer::Crossing(CrossingPacker::new()),
            Kind::Aligned => Packer::Aligned(AlignedPacker::new()),
            Kind::Overflow => Packer::Overflow(OverflowPacker::new()),
        }
    }

    /// Builds a packer honoring the configuration knobs.
    pub fn from_config(kind: Kind, config: &PackerConfig) -> Result<Self, WordpackError> {
        config.validate()?;
        Ok(match kind {
            Kind::Crossing => Packer::Crossing(CrossingPacker::new()),
            Kind::Aligned => Packer::Aligned(AlignedPacker::new()),
            Kind::Overflow => Packer::Overflow(OverflowPacker::with_options(
                config.k_prime,
                config.auto_select,
            )),
        })
    }

    /// The packer matching an artifact's recorded strategy.
    pub fn for_artifact(data: &PackedData) -> Self {
        Packer::new(data.kind)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Packer::Crossing(_) => Kind::Crossing,
            Packer::Aligned(_) => Kind::Aligned,
            Packer::Overflow(_) => Kind::Overflow,
        }
    }
}

impl BitPacking for Packer {
    fn compress(&self, values: &[u32]) -> Result<PackedData, WordpackError> {
        match self {
            Packer::Crossing(p) => p.compress(values),
            Packer::Aligned(p) => p.compress(values),
            Packer::Overflow(p) => p.compress(values),
        }
    }

    fn get(&self, i: usize, data: &PackedData) -> Result<u32, WordpackError> {
        match self {
            Packer::Crossing(p) => p.get(i, data),
            Packer::Aligned(p) => p.get(i, data),
            Packer::Overflow(p) => p.get(i, data),
        }
    }

    fn decompress(&self, out: &mut [u32], data: &PackedData) -> Result<(), WordpackError> {
        match self {
            Packer::Crossing(p) => p.decompress(out, data),
            Packer::Aligned(p) => p.decompress(out, data),
            Packer::Overflow(p) => p.decompress(out, data),
        }
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
