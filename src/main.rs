// In: src/main.rs

//! Command-line front end for the packing library: compress/get/decompress
//! on raw u32 files, plus the bench and validate harnesses and a dataset
//! generator. Strategy names are mapped to `Kind` here and nowhere else.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use wordpack::scenarios;
use wordpack::timing::{self, BenchRow};
use wordpack::validate::{render_markdown_report, validate_access};
use wordpack::{BitPacking, Kind, PackedData, Packer, WordpackError};

//==================================================================================
// 1. Argument Definitions
//==================================================================================

#[derive(Debug, Parser)]
#[clap(name = "wordpack", version, about = "Fixed-width bit packing for u32 arrays")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compress a raw u32 file into a packed artifact
    Compress(CompressArgs),
    /// Read the i-th value from a packed file without decompressing it
    Get(GetArgs),
    /// Decompress a packed file back into a raw u32 file
    Decompress(DecompressArgs),
    /// Benchmark compress/decompress/get and compute the transfer break-even
    Bench(BenchArgs),
    /// Validate random access and decompression fidelity; emit a Markdown report
    Validate(ValidateArgs),
    /// Generate a raw u32 dataset file
    Gen(GenArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Crossing,
    Aligned,
    Overflow,
}

impl FormatArg {
    fn kind(self) -> Kind {
        match self {
            FormatArg::Crossing => Kind::Crossing,
            FormatArg::Aligned => Kind::Aligned,
            FormatArg::Overflow => Kind::Overflow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScenarioArg {
    Uniform,
    Skewed,
}

#[derive(Debug, Args)]
struct CompressArgs {
    /// Raw little-endian u32 input file.
    #[clap(long)]
    input: PathBuf,
    /// Packing strategy.
    #[clap(long, value_enum)]
    format: FormatArg,
    /// Output path for the packed artifact.
    #[clap(long)]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct GetArgs {
    /// Packed artifact file.
    #[clap(long)]
    file: PathBuf,
    /// Strategy the file is expected to contain.
    #[clap(long, value_enum)]
    format: FormatArg,
    /// Zero-based index to read.
    #[clap(long)]
    index: usize,
}

#[derive(Debug, Args)]
struct DecompressArgs {
    /// Packed artifact file.
    #[clap(long)]
    file: PathBuf,
    /// Strategy the file is expected to contain.
    #[clap(long, value_enum)]
    format: FormatArg,
    /// Output path for the raw u32 file.
    #[clap(long)]
    out: PathBuf,
}

/// Dataset selection shared by `bench` and `validate`: either a raw u32 file
/// or one of the seeded generators.
#[derive(Debug, Args)]
#[clap(group(ArgGroup::new("source").required(true).args(["input", "scenario"])))]
struct DatasetArgs {
    /// Raw little-endian u32 file to use as the dataset.
    #[clap(long)]
    input: Option<PathBuf>,
    /// Data generator scenario.
    #[clap(long, value_enum)]
    scenario: Option<ScenarioArg>,
    /// Element count for generator scenarios.
    #[clap(long)]
    n: Option<usize>,
    /// Significant bits for the uniform scenario.
    #[clap(long)]
    k: Option<u32>,
    /// Small-value bits for the skewed scenario.
    #[clap(long = "k-small")]
    k_small: Option<u32>,
    /// Large-value bits for the skewed scenario.
    #[clap(long = "k-large")]
    k_large: Option<u32>,
    /// Share of large values in the skewed scenario.
    #[clap(long = "ratio-large", default_value_t = 0.001)]
    ratio_large: f64,
    /// Seed for the generators.
    #[clap(long, default_value_t = scenarios::DEFAULT_SEED)]
    seed: u64,
}

#[derive(Debug, Args)]
struct BenchArgs {
    /// Packing strategy.
    #[clap(long, value_enum)]
    format: FormatArg,
    #[clap(flatten)]
    dataset: DatasetArgs,
    /// Unmeasured warmup iterations before timing.
    #[clap(long, default_value_t = 3)]
    warmups: u32,
    /// Measured iterations per operation.
    #[clap(long, default_value_t = 10)]
    repeats: u32,
    /// Random `get` accesses to average.
    #[clap(long = "get-samples", default_value_t = 100_000)]
    get_samples: usize,
    /// Network latency for the break-even model (ms).
    #[clap(long = "latency-ms", default_value_t = 30.0)]
    latency_ms: f64,
    /// Network bandwidth for the break-even model (Mbps).
    #[clap(long = "bandwidth-mbps", default_value_t = 10.0)]
    bandwidth_mbps: f64,
    /// Optional path to write the results row as CSV.
    #[clap(long)]
    csv: Option<PathBuf>,
    /// Optional path to write the results row as JSON.
    #[clap(long)]
    json: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Packing strategy.
    #[clap(long, value_enum)]
    format: FormatArg,
    #[clap(flatten)]
    dataset: DatasetArgs,
    /// Random `get` accesses to check.
    #[clap(long, default_value_t = 100_000)]
    samples: usize,
    /// Output path for the Markdown report.
    #[clap(long)]
    report: PathBuf,
}

#[derive(Debug, Args)]
struct GenArgs {
    /// Output path for the raw little-endian u32 file.
    #[clap(long)]
    out: PathBuf,
    /// Data generator scenario.
    #[clap(long, value_enum, default_value = "uniform")]
    scenario: ScenarioArg,
    /// Element count.
    #[clap(long, default_value_t = 200_000)]
    n: usize,
    /// Significant bits for the uniform scenario.
    #[clap(long, default_value_t = 12)]
    k: u32,
    /// Small-value bits for the skewed scenario.
    #[clap(long = "k-small", default_value_t = 8)]
    k_small: u32,
    /// Large-value bits for the skewed scenario.
    #[clap(long = "k-large", default_value_t = 20)]
    k_large: u32,
    /// Share of large values in the skewed scenario.
    #[clap(long = "ratio-large", default_value_t = 0.001)]
    ratio_large: f64,
    /// Seed for the generator.
    #[clap(long, default_value_t = scenarios::DEFAULT_SEED)]
    seed: u64,
}

//==================================================================================
// 2. File Helpers
//==================================================================================

fn read_u32_file(path: &Path) -> Result<Vec<u32>, WordpackError> {
    let bytes = fs::read(path)?;
    if bytes.len() % 4 != 0 {
        return Err(WordpackError::FormatError(format!(
            "input file {} length is not a multiple of 4 bytes (u32)",
            path.display()
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

fn write_u32_file(path: &Path, values: &[u32]) -> Result<(), WordpackError> {
    let mut buf = Vec::with_capacity(values.len() * 4);
    for x in values {
        buf.extend_from_slice(&x.to_le_bytes());
    }
    fs::write(path, buf)?;
    Ok(())
}

/// Reads a packed file and checks that it holds the strategy the caller
/// asked for. The packers themselves never look at `kind`, so this is the
/// one place where a mismatched file is caught.
fn read_artifact(path: &Path, expected: Kind) -> Result<PackedData, WordpackError> {
    let bytes = fs::read(path)?;
    let packed = PackedData::from_bytes(&bytes)?;
    if packed.kind != expected {
        return Err(WordpackError::FormatError(format!(
            "format mismatch: file contains kind={}, CLI asked for {}",
            packed.kind, expected
        )));
    }
    Ok(packed)
}

/// Loads or generates the dataset; returns the values, the scenario label
/// used in result rows, and a human-readable parameter description.
fn load_dataset(d: &DatasetArgs) -> Result<(Vec<u32>, String, String), WordpackError> {
    if let Some(path) = &d.input {
        let values = read_u32_file(path)?;
        return Ok((values, "file".to_string(), path.display().to_string()));
    }
    match d.scenario {
        Some(ScenarioArg::Uniform) => {
            let (n, k) = match (d.n, d.k) {
                (Some(n), Some(k)) => (n, k),
                _ => {
                    return Err(WordpackError::ConfigError(
                        "uniform scenario requires --n and --k".into(),
                    ))
                }
            };
            let values = scenarios::uniform_u32(n, k, d.seed)?;
            let desc = format!("n={}, k={}, seed={}", n, k, d.seed);
            Ok((values, "uniform".to_string(), desc))
        }
        Some(ScenarioArg::Skewed) => {
            let (n, k_small, k_large) = match (d.n, d.k_small, d.k_large) {
                (Some(n), Some(ks), Some(kl)) => (n, ks, kl),
                _ => {
                    return Err(WordpackError::ConfigError(
                        "skewed scenario requires --n, --k-small and --k-large".into(),
                    ))
                }
            };
            let values = scenarios::skewed(n, k_small, k_large, d.ratio_large, d.seed)?;
            let desc = format!(
                "n={}, k_small={}, k_large={}, ratio_large={}, seed={}",
                n, k_small, k_large, d.ratio_large, d.seed
            );
            Ok((values, "skewed".to_string(), desc))
        }
        None => Err(WordpackError::ConfigError(
            "a dataset source is required: --input or --scenario".into(),
        )),
    }
}

//==================================================================================
// 3. Subcommand Implementations
//==================================================================================

fn exec_compress(args: &CompressArgs) -> Result<(), WordpackError> {
    let values = read_u32_file(&args.input)?;
    let packer = Packer::new(args.format.kind());
    let packed = packer.compress(&values)?;
    let bytes = packed.to_bytes();
    fs::write(&args.out, &bytes)?;
    log::info!(
        "compressed {} values ({} bytes) into {} bytes at {}",
        values.len(),
        values.len() * 4,
        bytes.len(),
        args.out.display()
    );
    Ok(())
}

fn exec_get(args: &GetArgs) -> Result<u32, WordpackError> {
    let packed = read_artifact(&args.file, args.format.kind())?;
    let packer = Packer::for_artifact(&packed);
    packer.get(args.index, &packed)
}

fn exec_decompress(args: &DecompressArgs) -> Result<(), WordpackError> {
    let packed = read_artifact(&args.file, args.format.kind())?;
    let packer = Packer::for_artifact(&packed);
    let mut out = vec![0u32; packed.n as usize];
    packer.decompress(&mut out, &packed)?;
    write_u32_file(&args.out, &out)?;
    log::info!("decompressed {} values to {}", out.len(), args.out.display());
    Ok(())
}

const CSV_HEADER: &str = "format,scenario,n,raw_bits,comp_bits,ratio,\
t_comp_ns_median,t_decomp_ns_median,t_get_ns_avg,\
latency_ms,bandwidth_mbps,T_no_ms,T_yes_ms,gain_ms";

fn csv_line(row: &BenchRow) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
        row.format,
        row.scenario,
        row.n,
        row.raw_bits,
        row.comp_bits,
        row.ratio,
        row.t_comp_ns_median,
        row.t_decomp_ns_median,
        row.t_get_ns_avg,
        row.latency_ms,
        row.bandwidth_mbps,
        row.t_no_ms,
        row.t_yes_ms,
        row.gain_ms
    )
}

fn exec_bench(args: &BenchArgs) -> Result<(), WordpackError> {
    let (values, label, desc) = load_dataset(&args.dataset)?;
    let kind = args.format.kind();
    let packer = Packer::new(kind);
    let m = timing::bench_pack(
        &packer,
        &values,
        args.warmups,
        args.repeats,
        args.get_samples,
        timing::ACCESS_SEED,
    )?;
    let row = BenchRow::new(
        kind.to_string(),
        label,
        values.len(),
        &m,
        args.latency_ms,
        args.bandwidth_mbps,
    );

    println!("=== Bench Summary ===");
    println!("Format           : {}", row.format);
    println!("Scenario         : {} ({})", row.scenario, desc);
    println!("n                : {}", row.n);
    println!("Raw size (bits)  : {}", row.raw_bits);
    println!("Comp size (bits) : {}", row.comp_bits);
    println!("Compression ratio: {:.4}", row.ratio);
    println!();
    println!(
        "T_comp median    : {} ns  ({:.3} ms)",
        row.t_comp_ns_median,
        row.t_comp_ns_median as f64 / 1e6
    );
    println!(
        "T_decomp median  : {} ns  ({:.3} ms)",
        row.t_decomp_ns_median,
        row.t_decomp_ns_median as f64 / 1e6
    );
    println!("T_get avg        : {:.1} ns per access", row.t_get_ns_avg);
    println!();
    println!("Latency (ms)     : {}", row.latency_ms);
    println!("Bandwidth (Mbps) : {}", row.bandwidth_mbps);
    println!("T_no-compress    : {:.3} ms", row.t_no_ms);
    println!("T_with-compress  : {:.3} ms", row.t_yes_ms);
    let verdict = if row.gain_ms > 0.0 {
        "beneficial".green()
    } else {
        "not beneficial".red()
    };
    println!("Gain             : {:.3} ms  ({})", row.gain_ms, verdict);

    if let Some(path) = &args.csv {
        fs::write(path, format!("{}\n{}\n", CSV_HEADER, csv_line(&row)))?;
        println!();
        println!("CSV written: {}", path.display());
    }
    if let Some(path) = &args.json {
        fs::write(path, serde_json::to_string_pretty(&row)?)?;
        println!();
        println!("JSON written: {}", path.display());
    }
    Ok(())
}

fn exec_validate(args: &ValidateArgs) -> Result<(), WordpackError> {
    let (values, _, _) = load_dataset(&args.dataset)?;
    let packer = Packer::new(args.format.kind());
    let res = validate_access(&packer, &values, args.samples, timing::ACCESS_SEED)?;
    let md = render_markdown_report(&res);
    fs::write(&args.report, md)?;
    let verdict = if res.passed() {
        "OK".green()
    } else {
        "FAIL".red()
    };
    println!("Verdict          : {}", verdict);
    println!("Validation report written to: {}", args.report.display());
    Ok(())
}

fn exec_gen(args: &GenArgs) -> Result<(), WordpackError> {
    let values = match args.scenario {
        ScenarioArg::Uniform => scenarios::uniform_u32(args.n, args.k, args.seed)?,
        ScenarioArg::Skewed => scenarios::skewed(
            args.n,
            args.k_small,
            args.k_large,
            args.ratio_large,
            args.seed,
        )?,
    };
    write_u32_file(&args.out, &values)?;
    println!(
        "✅ {} created: {} values (~{} KiB)",
        args.out.display(),
        values.len(),
        values.len() * 4 / 1024
    );
    Ok(())
}

//==================================================================================
// 4. Entry Point
//==================================================================================

fn run(cli: Cli) -> Result<(), WordpackError> {
    match &cli.command {
        Command::Compress(args) => exec_compress(args),
        Command::Get(args) => {
            let value = exec_get(args)?;
            println!("{}", value);
            Ok(())
        }
        Command::Decompress(args) => exec_decompress(args),
        Command::Bench(args) => exec_bench(args),
        Command::Validate(args) => exec_validate(args),
        Command::Gen(args) => exec_gen(args),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

//==================================================================================
// 5. Unit Tests
//==================================================================================
