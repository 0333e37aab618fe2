// In: src/traits.rs

//! Defines the behavioral contract shared by every packing strategy.
//!
//! The `BitPacking` trait is the seam between the strategy kernels and every
//! consumer of the library: the dispatching `Packer` enum, the CLI, the bench
//! harness and the validators all talk to a packer exclusively through it.
//! Packers hold configuration only; all per-dataset state travels inside the
//! `PackedData` artifact, so one packer instance can serve many datasets.

use crate::artifact::PackedData;
use crate::error::WordpackError;

/// A trait implemented by every packing strategy.
pub trait BitPacking {
    /// Packs `values` into a self-describing `PackedData` artifact.
    ///
    /// Fails fast: on any error nothing is returned, never a partial artifact.
    fn compress(&self, values: &[u32]) -> Result<PackedData, WordpackError>;

    /// Reads back the `i`-th original value directly from the packed words,
    /// without decompressing the rest.
    fn get(&self, i: usize, data: &PackedData) -> Result<u32, WordpackError>;

    /// Reconstructs every value into `out`, which the caller must size to
    /// exactly `data.n` elements.
    fn decompress(&self, out: &mut [u32], data: &PackedData) -> Result<(), WordpackError>;
}
