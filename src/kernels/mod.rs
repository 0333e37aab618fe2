// In: src/kernels/mod.rs

//! This module collects the pure, stateless packing kernels and the bit-level
//! primitives they are built from.
//!
//! Each kernel implements the `BitPacking` trait over the same artifact type;
//! strategy selection lives one level up in `packer::Packer`. Kernels never
//! look at the artifact's `kind` field, so an artifact produced by one kernel
//! handed to another is the caller's mistake, not a panic.

use crate::error::WordpackError;

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// LSB-first bit addressing over little-endian u32 words.
pub mod bits;

/// Densest layout; fields may straddle word boundaries.
pub mod crossing;

/// Word-aligned layout; single shift-and-mask access.
pub mod aligned;

/// Patched layout; outliers move to an out-of-line table.
pub mod overflow;

pub use aligned::AlignedPacker;
pub use crossing::CrossingPacker;
pub use overflow::OverflowPacker;

//==================================================================================
// 2. Shared Input Checks
//==================================================================================

/// The envelope stores the element count in a u32 field. Inputs beyond that
/// cannot be represented and must be refused before any packing work starts.
pub(crate) fn checked_n(values: &[u32]) -> Result<u32, WordpackError> {
    u32::try_from(values.len()).map_err(|_| {
        WordpackError::FormatError(format!(
            "array length {} does not fit the u32 envelope field",
            values.len()
        ))
    })
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
