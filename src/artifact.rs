// In: src/artifact.rs

//! Defines the self-describing serialized form of a packed array.
//! This module is the single source of truth for envelope serialization and
//! deserialization: a fixed 52-byte header of thirteen little-endian u32
//! fields, followed by the payload words, each little-endian. The header
//! carries the superset of every strategy's parameters; fields a strategy
//! does not use stay zero.

use crate::error::WordpackError;
use crate::format::{Kind, ENDIAN_LITTLE, FORMAT_VERSION, HEADER_LEN, WORD_BITS};
use std::io::{Cursor, Read};

//==================================================================================
// Public Structs
//==================================================================================

/// A packed array together with all parameters needed to read it back.
///
/// Produced by a packer's `compress` and treated as immutable afterwards;
/// `get` and `decompress` only ever borrow it. The field order below mirrors
/// the header layout exactly (with `words.len()` serialized as the final
/// `words_count` field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedData {
    pub version: u32,
    pub kind: Kind,
    pub endianness: u32,
    pub word_bits: u32,
    /// Number of original values.
    pub n: u32,
    /// Crossing/Aligned: fixed field width in bits.
    pub k: u32,
    /// Aligned: values per word.
    pub cap: u32,
    /// Overflow: inline payload width in bits.
    pub k_prime: u32,
    /// Overflow: overflow-table index width in bits.
    pub p: u32,
    /// Overflow: width in bits of one overflow-table entry.
    pub k_over: u32,
    /// Overflow: size in bits of the slot region.
    pub main_bits: u32,
    /// Overflow: size in bits of the overflow-table region.
    pub over_bits: u32,
    /// The packed payload, LSB-first bit addressing over little-endian words.
    pub words: Vec<u32>,
}

//==================================================================================
// Core Implementation
//==================================================================================

impl PackedData {
    /// Builds the artifact for a crossing-packed array.
    pub(crate) fn for_crossing(n: u32, k: u32, words: Vec<u32>) -> Self {
        Self {
            version: FORMAT_VERSION,
            kind: Kind::Crossing,
            endianness: ENDIAN_LITTLE,
            word_bits: WORD_BITS,
            n,
            k,
            cap: 0,
            k_prime: 0,
            p: 0,
            k_over: 0,
            main_bits: 0,
            over_bits: 0,
            words,
        }
    }

    /// Builds the artifact for an aligned-packed array.
    pub(crate) fn for_aligned(n: u32, k: u32, cap: u32, words: Vec<u32>) -> Self {
        Self {
            version: FORMAT_VERSION,
            kind: Kind::Aligned,
            endianness: ENDIAN_LITTLE,
            word_bits: WORD_BITS,
            n,
            k,
            cap,
            k_prime: 0,
            p: 0,
            k_over: 0,
            main_bits: 0,
            over_bits: 0,
            words,
        }
    }

    /// Builds the artifact for an overflow-packed array.
    pub(crate) fn for_overflow(
        n: u32,
        k_prime: u32,
        p: u32,
        k_over: u32,
        main_bits: u32,
        over_bits: u32,
        words: Vec<u32>,
    ) -> Self {
        Self {
            version: FORMAT_VERSION,
            kind: Kind::Overflow,
            endianness: ENDIAN_LITTLE,
            word_bits: WORD_BITS,
            n,
            k: 0,
            cap: 0,
            k_prime,
            p,
            k_over,
            main_bits,
            over_bits,
            words,
        }
    }

    /// Serializes the artifact into its canonical byte form.
    ///
    /// Every field is converted explicitly to little-endian, so the output is
    /// byte-identical across platforms regardless of host endianness.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.words.len() * 4);
        let header = [
            self.version,
            self.kind.as_code(),
            self.endianness,
            self.word_bits,
            self.n,
            self.k,
            self.cap,
            self.k_prime,
            self.p,
            self.k_over,
            self.main_bits,
            self.over_bits,
            self.words.len() as u32,
        ];
        for field in header {
            buf.extend_from_slice(&field.to_le_bytes());
        }
        for w in &self.words {
            buf.extend_from_slice(&w.to_le_bytes());
        }
        buf
    }

    /// Serialized size in bytes, without building the byte vector.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.words.len() * 4
    }

    /// Deserializes a byte slice back into a `PackedData`.
    ///
    /// Rejects buffers shorter than the fixed header, non-little-endian
    /// payloads, unknown strategy codes, and payloads whose byte count does
    /// not match the declared word count. On success the reconstruction is
    /// verbatim: re-serializing yields the identical byte sequence.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WordpackError> {
        if bytes.len() < HEADER_LEN {
            return Err(WordpackError::FormatError(format!(
                "buffer too small for header: need {} bytes, got {}",
                HEADER_LEN,
                bytes.len()
            )));
        }

        let mut cursor = Cursor::new(bytes);
        let mut fields = [0u32; 13];
        for field in fields.iter_mut() {
            *field = read_u32(&mut cursor)?;
        }
        let [version, kind_code, endianness, word_bits, n, k, cap, k_prime, p, k_over, main_bits, over_bits, words_count] =
            fields;

        if endianness != ENDIAN_LITTLE {
            return Err(WordpackError::FormatError(
                "only little-endian payloads are supported".into(),
            ));
        }
        let kind = Kind::from_code(kind_code)?;

        let body = &bytes[HEADER_LEN..];
        let expected = (words_count as usize).saturating_mul(4);
        if body.len() != expected {
            return Err(WordpackError::BufferMismatch(expected, body.len()));
        }

        let mut words = Vec::with_capacity(words_count as usize);
        for chunk in body.chunks_exact(4) {
            words.push(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
        }

        Ok(Self {
            version,
            kind,
            endianness,
            word_bits,
            n,
            k,
            cap,
            k_prime,
            p,
            k_over,
            main_bits,
            over_bits,
            words,
        })
    }
}

//==================================================================================
// Private Helpers
//==================================================================================

fn read_u32(cursor: &mut Cursor<&[u8]>) -> Result<u32, WordpackError> {
    let mut buf = [0u8; 4];
    cursor
        .read_exact(&mut buf)
        .map_err(|e| WordpackError::FormatError(e.to_string()))?;
    Ok(u32::from_le_bytes(buf))
}

//==================================================================================
// Unit Tests
//==================================================================================
