// In: src/timing.rs

//! Measurement helpers for the bench harness, plus the transfer-time model
//! that decides whether compressing before sending an array pays off.
//!
//! The model compares
//!   `T_no  = latency + raw_bits / bandwidth`
//! against
//!   `T_yes = latency + t_comp + payload_bits / bandwidth + t_decomp`
//! where the payload includes the envelope header. Wall-clock numbers come
//! from median-of-repeats timing so one scheduler hiccup cannot flip the
//! verdict.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::artifact::PackedData;
use crate::error::WordpackError;
use crate::packer::Packer;
use crate::traits::BitPacking;

/// Seed for the random-access sampling loops.
pub const ACCESS_SEED: u64 = 12345;

//==================================================================================
// 1. Repeated-Run Timing
//==================================================================================

/// Summary of one timed operation over several repeats. The standard
/// deviation is the population form, 0.0 for a single sample.
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub samples_ns: Vec<u64>,
    pub median_ns: u64,
    pub mean_ns: f64,
    pub stdev_ns: f64,
}

impl Stats {
    /// `samples` must be non-empty.
    fn from_samples(samples: Vec<u64>) -> Self {
        let mut sorted = samples.clone();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        let median_ns = if sorted.len() % 2 == 1 {
            sorted[mid]
        } else {
            (sorted[mid - 1] + sorted[mid]) / 2
        };
        let mean_ns = samples.iter().sum::<u64>() as f64 / samples.len() as f64;
        let stdev_ns = if samples.len() > 1 {
            let var = samples
                .iter()
                .map(|&s| {
                    let d = s as f64 - mean_ns;
                    d * d
                })
                .sum::<f64>()
                / samples.len() as f64;
            var.sqrt()
        } else {
            0.0
        };
        Stats {
            samples_ns: samples,
            median_ns,
            mean_ns,
            stdev_ns,
        }
    }
}

/// Runs `f` for `warmups` unmeasured iterations, then times `max(repeats, 1)`
/// measured ones.
pub fn time_repeated<F>(mut f: F, warmups: u32, repeats: u32) -> Result<Stats, WordpackError>
where
    F: FnMut() -> Result<(), WordpackError>,
{
    for _ in 0..warmups {
        f()?;
    }
    let repeats = repeats.max(1);
    let mut samples = Vec::with_capacity(repeats as usize);
    for _ in 0..repeats {
        let t0 = Instant::now();
        f()?;
        samples.push(t0.elapsed().as_nanos() as u64);
    }
    Ok(Stats::from_samples(samples))
}

//==================================================================================
// 2. Transfer-Time Model
//==================================================================================

pub fn ns_to_s(ns: f64) -> f64 {
    ns / 1_000_000_000.0
}

/// Transmission time in seconds for `bits` at `bandwidth_mbps` megabits per
/// second. A non-positive bandwidth means the link never completes.
pub fn bits_to_seconds(bits: u64, bandwidth_mbps: f64) -> f64 {
    if bandwidth_mbps <= 0.0 {
        return f64::INFINITY;
    }
    bits as f64 / (bandwidth_mbps * 1_000_000.0)
}

/// `T_no = latency + raw_bits / bandwidth`, raw being 32 bits per value.
pub fn total_time_without_compression(n: usize, bandwidth_mbps: f64, latency_ms: f64) -> f64 {
    let raw_bits = 32 * n as u64;
    latency_ms / 1000.0 + bits_to_seconds(raw_bits, bandwidth_mbps)
}

/// `T_yes = latency + t_comp + payload_bits / bandwidth + t_decomp`. The
/// payload is the full serialized artifact, header included.
pub fn total_time_with_compression(
    packed: &PackedData,
    t_comp_ns: u64,
    t_decomp_ns: u64,
    bandwidth_mbps: f64,
    latency_ms: f64,
) -> f64 {
    let payload_bits = (packed.encoded_len() * 8) as u64;
    latency_ms / 1000.0
        + ns_to_s(t_comp_ns as f64)
        + bits_to_seconds(payload_bits, bandwidth_mbps)
        + ns_to_s(t_decomp_ns as f64)
}

/// Serialized size over raw size; 1.0 for an empty array.
pub fn compression_ratio(packed: &PackedData, n: usize) -> f64 {
    let raw_bits = 32 * n as u64;
    if raw_bits == 0 {
        return 1.0;
    }
    (packed.encoded_len() * 8) as f64 / raw_bits as f64
}

//==================================================================================
// 3. The Bench Harness
//==================================================================================

/// Raw measurements of one packer over one dataset.
#[derive(Debug, Clone)]
pub struct BenchMeasurement {
    pub packed: PackedData,
    pub comp: Stats,
    pub decomp: Stats,
    pub avg_get_ns: f64,
}

/// Times compress and decompress over `repeats` runs each, then averages
/// `get` over up to `get_samples` random indices (seeded, so every run reads
/// the same positions). The accesses are folded into an xor accumulator and
/// black-boxed so the optimizer cannot drop the loop.
pub fn bench_pack(
    packer: &Packer,
    values: &[u32],
    warmups: u32,
    repeats: u32,
    get_samples: usize,
    seed: u64,
) -> Result<BenchMeasurement, WordpackError> {
    let comp = time_repeated(
        || {
            std::hint::black_box(packer.compress(values)?);
            Ok(())
        },
        warmups,
        repeats,
    )?;

    // Reference artifact for the read-side measurements.
    let packed = packer.compress(values)?;

    let mut out = vec![0u32; values.len()];
    let decomp = time_repeated(|| packer.decompress(&mut out, &packed), warmups, repeats)?;

    let n = values.len();
    let m = n.min(get_samples);
    let avg_get_ns = if m == 0 {
        0.0
    } else {
        let mut rng = StdRng::seed_from_u64(seed);
        let idxs: Vec<usize> = (0..m).map(|_| rng.random_range(0..n)).collect();
        let mut acc = 0u32;
        let t0 = Instant::now();
        for &i in &idxs {
            acc ^= packer.get(i, &packed)?;
        }
        let elapsed_ns = t0.elapsed().as_nanos() as f64;
        std::hint::black_box(acc);
        elapsed_ns / m as f64
    };

    Ok(BenchMeasurement {
        packed,
        comp,
        decomp,
        avg_get_ns,
    })
}

/// One results row, shaped for the CSV and JSON outputs of the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct BenchRow {
    pub format: String,
    pub scenario: String,
    pub n: usize,
    pub raw_bits: u64,
    pub comp_bits: u64,
    pub ratio: f64,
    pub t_comp_ns_median: u64,
    pub t_decomp_ns_median: u64,
    pub t_get_ns_avg: f64,
    pub latency_ms: f64,
    pub bandwidth_mbps: f64,
    #[serde(rename = "T_no_ms")]
    pub t_no_ms: f64,
    #[serde(rename = "T_yes_ms")]
    pub t_yes_ms: f64,
    pub gain_ms: f64,
}

impl BenchRow {
    pub fn new(
        format: String,
        scenario: String,
        n: usize,
        m: &BenchMeasurement,
        latency_ms: f64,
        bandwidth_mbps: f64,
    ) -> Self {
        let raw_bits = 32 * n as u64;
        let comp_bits = (m.packed.encoded_len() * 8) as u64;
        let ratio = compression_ratio(&m.packed, n);
        let t_no = total_time_without_compression(n, bandwidth_mbps, latency_ms);
        let t_yes = total_time_with_compression(
            &m.packed,
            m.comp.median_ns,
            m.decomp.median_ns,
            bandwidth_mbps,
            latency_ms,
        );
        BenchRow {
            format,
            scenario,
            n,
            raw_bits,
            comp_bits,
            ratio,
            t_comp_ns_median: m.comp.median_ns,
            t_decomp_ns_median: m.decomp.median_ns,
            t_get_ns_avg: m.avg_get_ns,
            latency_ms,
            bandwidth_mbps,
            t_no_ms: t_no * 1000.0,
            t_yes_ms: t_yes * 1000.0,
            gain_ms: (t_no - t_yes) * 1000.0,
        }
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
