// In: src/format.rs

//! Defines all on-disk constants for the wordpack envelope format.
//! This is the single source of truth for the fixed header layout codes and
//! the closed set of packing strategies they select. It establishes the
//! contract between the packers and any reader of a serialized artifact.

use crate::error::WordpackError;
use serde::{Deserialize, Serialize};
use std::fmt;

//==================================================================================
// I. Envelope Constants
//==================================================================================

/// The current version of the wordpack envelope format.
pub const FORMAT_VERSION: u32 = 1;
/// Header code for little-endian payload words. The only endianness ever written.
pub const ENDIAN_LITTLE: u32 = 0;
/// Header code reserved for big-endian payloads. Never produced by this library.
pub const ENDIAN_BIG: u32 = 1;
/// Width in bits of a payload word. The codecs are defined over u32 words only.
pub const WORD_BITS: u32 = 32;
/// Size in bytes of the fixed envelope header: thirteen little-endian u32 fields.
pub const HEADER_LEN: usize = 52;

//==================================================================================
// II. Strategy Kinds
//==================================================================================

/// The canonical, closed set of packing strategies.
///
/// This enum is the selection mechanism at the library boundary. The string
/// names ("crossing", "aligned", "overflow") exist only at the CLI surface,
/// which maps them to a `Kind` before touching the core.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Back-to-back k-bit fields; values may straddle word boundaries.
    Crossing,
    /// floor(32/k) values per word; no field ever straddles a boundary.
    Aligned,
    /// Fixed slots with a flag bit; oversized values live in an overflow table.
    Overflow,
}

impl Kind {
    /// The code stored in the envelope header for this strategy.
    pub fn as_code(&self) -> u32 {
        match self {
            Kind::Crossing => 0,
            Kind::Aligned => 1,
            Kind::Overflow => 2,
        }
    }

    /// Converts a header code back into a `Kind`.
    pub fn from_code(code: u32) -> Result<Self, WordpackError> {
        match code {
            0 => Ok(Kind::Crossing),
            1 => Ok(Kind::Aligned),
            2 => Ok(Kind::Overflow),
            other => Err(WordpackError::FormatError(format!(
                "unknown strategy kind code: {}",
                other
            ))),
        }
    }
}

/// Provides the canonical lowercase name for a `Kind`.
impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Crossing => "crossing",
            Kind::Aligned => "aligned",
            Kind::Overflow => "overflow",
        };
        write!(f, "{}", s)
    }
}

//==================================================================================
// III. Unit Tests
//==================================================================================
