// In: src/config.rs

//! The single source of truth for packer configuration.
//!
//! This module defines the `PackerConfig` struct, created once at the
//! application boundary (CLI flags or a JSON document) and handed to
//! `Packer::from_config`. Strategy choice itself is not configuration; it is
//! data, carried as a `Kind` next to the config.

use serde::{Deserialize, Serialize};

use crate::error::WordpackError;
use crate::format::WORD_BITS;

//==================================================================================
// I. The Unified PackerConfig
//==================================================================================

/// Knobs shared by every packing strategy. Only the overflow packer reads
/// `k_prime` and `auto_select`; the others ignore them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct PackerConfig {
    /// Storage word width in bits. Only 32 is supported; the field exists so
    /// that serialized configs state their assumption explicitly.
    #[serde(default = "default_word_bits")]
    pub word_bits: u32,

    /// Pinned inline width for the overflow packer. Ignored unless
    /// `auto_select` is false.
    #[serde(default)]
    pub k_prime: Option<u32>,

    /// If true, the overflow packer searches for the cheapest inline width
    /// and any pinned `k_prime` is ignored.
    #[serde(default = "default_true")]
    pub auto_select: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            word_bits: default_word_bits(),
            k_prime: None,
            auto_select: true,
        }
    }
}

impl PackerConfig {
    /// Rejects configurations this build cannot honor.
    pub fn validate(&self) -> Result<(), WordpackError> {
        if self.word_bits != WORD_BITS {
            return Err(WordpackError::ConfigError(format!(
                "only {}-bit words are supported, got {}",
                WORD_BITS, self.word_bits
            )));
        }
        Ok(())
    }
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}

/// Helper for `serde` to default the word width.
fn default_word_bits() -> u32 {
    WORD_BITS
}

//==================================================================================
// II. Unit Tests
//==================================================================================
