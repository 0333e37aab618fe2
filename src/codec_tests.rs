// In: src/codec_tests.rs

//! End-to-end tests that drive every strategy through the full path:
//! compress, serialize, parse back, random access, decompress.

use crate::artifact::PackedData;
use crate::format::Kind;
use crate::packer::Packer;
use crate::scenarios;
use crate::traits::BitPacking;

const ALL_KINDS: [Kind; 3] = [Kind::Crossing, Kind::Aligned, Kind::Overflow];

//==============================================================================
// 1. The Authoritative Roundtrip Helper
//==============================================================================

/// Compresses `values` with `kind`, pushes the artifact through its byte
/// form, then verifies both access paths against the source array.
fn roundtrip_test(kind: Kind, values: &[u32]) {
    // --- 1. Compress ---
    let packer = Packer::new(kind);
    let packed = packer
        .compress(values)
        .expect("compression failed during test");
    assert_eq!(packed.kind, kind);
    assert_eq!(packed.n as usize, values.len());

    // --- 2. Serialize and parse back ---
    let bytes = packed.to_bytes();
    assert_eq!(bytes.len(), packed.encoded_len());
    let parsed = PackedData::from_bytes(&bytes).expect("parsing failed during test");
    assert_eq!(packed, parsed, "artifact changed across serialization");

    // --- 3. Random access on the parsed artifact ---
    let reader = Packer::for_artifact(&parsed);
    for (i, &v) in values.iter().enumerate() {
        assert_eq!(
            reader.get(i, &parsed).expect("get failed during test"),
            v,
            "value mismatch at index {}",
            i
        );
    }

    // --- 4. Full decompression ---
    let mut out = vec![0u32; values.len()];
    reader
        .decompress(&mut out, &parsed)
        .expect("decompression failed during test");
    assert_eq!(out, values, "decompressed array differs from the original");
}

//==============================================================================
// 2. Data-Shape Test Cases
//==============================================================================

#[test]
fn test_roundtrip_uniform_data() {
    let values = scenarios::uniform_u32(3000, 12, scenarios::DEFAULT_SEED).unwrap();
    for kind in ALL_KINDS {
        roundtrip_test(kind, &values);
    }
}

#[test]
fn test_roundtrip_skewed_data() {
    let values = scenarios::skewed(3000, 4, 20, 0.01, scenarios::DEFAULT_SEED).unwrap();
    for kind in ALL_KINDS {
        roundtrip_test(kind, &values);
    }
}

#[test]
fn test_roundtrip_empty_array() {
    for kind in ALL_KINDS {
        roundtrip_test(kind, &[]);
    }
}

#[test]
fn test_roundtrip_single_value() {
    for kind in ALL_KINDS {
        roundtrip_test(kind, &[0]);
        roundtrip_test(kind, &[42]);
        roundtrip_test(kind, &[u32::MAX]);
    }
}

#[test]
fn test_roundtrip_all_zeroes() {
    for kind in ALL_KINDS {
        roundtrip_test(kind, &[0u32; 100]);
    }
}

#[test]
fn test_roundtrip_full_width_values() {
    let values = [u32::MAX, 0, 0x8000_0000, 1, 0xDEAD_BEEF];
    for kind in ALL_KINDS {
        roundtrip_test(kind, &values);
    }
}

//==============================================================================
// 3. Cross-Strategy Properties
//==============================================================================

#[test]
fn test_artifacts_are_byte_deterministic() {
    let values = scenarios::uniform_u32(500, 9, scenarios::DEFAULT_SEED).unwrap();
    for kind in ALL_KINDS {
        let packer = Packer::new(kind);
        let a = packer.compress(&values).unwrap().to_bytes();
        let b = packer.compress(&values).unwrap().to_bytes();
        assert_eq!(a, b);
    }
}

#[test]
fn test_overflow_beats_crossing_on_skewed_data() {
    // The overflow strategy exists for exactly this shape: a thin tail of
    // wide outliers that would otherwise force k up for every value.
    let values = scenarios::skewed(5000, 4, 20, 0.01, scenarios::DEFAULT_SEED).unwrap();
    let crossing = Packer::new(Kind::Crossing).compress(&values).unwrap();
    let overflow = Packer::new(Kind::Overflow).compress(&values).unwrap();
    assert!(overflow.encoded_len() < crossing.encoded_len());
}

#[test]
fn test_aligned_never_smaller_than_crossing() {
    let values = scenarios::uniform_u32(2000, 12, scenarios::DEFAULT_SEED).unwrap();
    let crossing = Packer::new(Kind::Crossing).compress(&values).unwrap();
    let aligned = Packer::new(Kind::Aligned).compress(&values).unwrap();
    assert!(aligned.encoded_len() >= crossing.encoded_len());
}
