// In benches/pack_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use wordpack::scenarios;
use wordpack::{BitPacking, Kind, Packer};

// --- Mock Data Generation ---

const BENCH_DATA_SIZE: usize = 65536; // 64K values, 256 KB raw

/// Dense 12-bit values: the shape where crossing and aligned shine.
fn generate_uniform_values() -> Vec<u32> {
    scenarios::uniform_u32(BENCH_DATA_SIZE, 12, scenarios::DEFAULT_SEED)
        .expect("uniform generation failed")
}

/// Mostly 4-bit values with a 1% tail of 20-bit outliers: the overflow
/// packer's target shape.
fn generate_skewed_values() -> Vec<u32> {
    scenarios::skewed(BENCH_DATA_SIZE, 4, 20, 0.01, scenarios::DEFAULT_SEED)
        .expect("skewed generation failed")
}

// --- Benchmark Suite ---

fn bench_pack_kernels(c: &mut Criterion) {
    // --- Setup Data ---
    let uniform_values = generate_uniform_values();
    let skewed_values = generate_skewed_values();

    let mut group = c.benchmark_group("Packing Kernels Comparison");
    group.throughput(criterion::Throughput::Elements(BENCH_DATA_SIZE as u64));

    for kind in [Kind::Crossing, Kind::Aligned, Kind::Overflow] {
        let packer = Packer::new(kind);

        // Prepare packed data once so decode-side benchmarks measure only reads.
        let packed_uniform = packer.compress(&uniform_values).unwrap();
        let packed_skewed = packer.compress(&skewed_values).unwrap();

        // --- Compression Benchmarks ---
        group.bench_function(format!("Compress [{}] (Uniform k=12)", kind), |b| {
            b.iter(|| black_box(packer.compress(black_box(&uniform_values))))
        });
        group.bench_function(format!("Compress [{}] (Skewed 4/20)", kind), |b| {
            b.iter(|| black_box(packer.compress(black_box(&skewed_values))))
        });

        // --- Decompression Benchmarks ---
        group.bench_function(format!("Decompress [{}] (Uniform k=12)", kind), |b| {
            let mut out = vec![0u32; BENCH_DATA_SIZE];
            b.iter(|| packer.decompress(black_box(&mut out), black_box(&packed_uniform)))
        });
        group.bench_function(format!("Decompress [{}] (Skewed 4/20)", kind), |b| {
            let mut out = vec![0u32; BENCH_DATA_SIZE];
            b.iter(|| packer.decompress(black_box(&mut out), black_box(&packed_skewed)))
        });

        // --- Random Access Benchmarks ---
        group.bench_function(format!("Get [{}] (Uniform k=12)", kind), |b| {
            let mut i = 0usize;
            b.iter(|| {
                // Prime stride walks the whole array without an RNG in the loop.
                i = (i + 7919) % BENCH_DATA_SIZE;
                black_box(packer.get(black_box(i), &packed_uniform))
            })
        });
        group.bench_function(format!("Get [{}] (Skewed 4/20)", kind), |b| {
            let mut i = 0usize;
            b.iter(|| {
                i = (i + 7919) % BENCH_DATA_SIZE;
                black_box(packer.get(black_box(i), &packed_skewed))
            })
        });
    }

    group.finish();
}

// These two lines generate the main function and register the benchmark group.
criterion_group!(benches, bench_pack_kernels);
criterion_main!(benches);
