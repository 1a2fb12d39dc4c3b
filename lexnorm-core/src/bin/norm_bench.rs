//! Normalization throughput benchmark.
//!
//! Measures the pipeline on a large text file (a mail corpus dump, a
//! Wikipedia abstract file, anything UTF-8). Each line is treated as one
//! message, the way the pipeline sees them in production.
//!
//! ## Stages
//!
//! 1. **Filter**: case fold and character filtering over the whole file
//! 2. **Tokenize**: whitespace split of the filtered text
//! 3. **Pipeline**: full normalization, one call per line
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/norm_bench /path/to/corpus.txt
//!
//! # With a config file (filter mode, stemming, stopword list)
//! ./target/release/norm_bench /path/to/corpus.txt lexnorm.toml
//!
//! # Log config loading at debug level
//! ./target/release/norm_bench /path/to/corpus.txt lexnorm.toml -v
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Pipeline ===
//! --------------------------------
//! Mode        : Pipeline
//! Elapsed     : 0.913 s
//! Throughput  : 0.214 GiB/s
//! Tokens      : 21_402_117
//! Tokens/sec  : 23_441_530
//! --------------------------------
//! ```
//!
//! Build with `--release`; debug numbers are meaningless.

use std::env;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use lexnorm_core::analyzer::filter::CharFilter;
use lexnorm_core::analyzer::tokenizer::Tokenizer;
use lexnorm_core::config::NormalizerConfig;
use lexnorm_core::pipeline::Normalizer;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (flags, args): (Vec<String>, Vec<String>) =
        env::args().skip(1).partition(|a| a.starts_with('-'));
    let verbose = flags.iter().any(|f| f == "-v" || f == "--verbose");

    if args.is_empty() {
        eprintln!("Usage: norm_bench <path> [config.toml] [-v]");
        std::process::exit(1);
    }

    setup_logging(verbose);

    let config = match args.get(1) {
        Some(cfg) => NormalizerConfig::load(Path::new(cfg))?,
        None => NormalizerConfig::default(),
    };
    let normalizer = Normalizer::from_config(&config)?;

    println!("Loading file...");
    let bytes = fs::read(&args[0])?;
    let input = std::str::from_utf8(&bytes).expect("input must be valid UTF-8");

    println!("File size: {}", fmt_bytes(input.len() as u64));
    println!("Messages:  {}", fmt_count(input.lines().count() as u64));
    println!(
        "Stopwords: {} ({} words, {})",
        normalizer.stopwords().label(),
        normalizer.stopwords().len(),
        &normalizer.stopwords().fingerprint()[..16]
    );
    println!("Stemming:  {}\n", normalizer.stems());

    bench_filter(input, normalizer.filter());
    bench_tokenize(input, normalizer.filter());
    bench_pipeline(input, &normalizer);

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn bench_filter(input: &str, filter: CharFilter) {
    let mut out = String::with_capacity(input.len());

    println!("=== Filter ===");

    warmup(|| {
        filter.filter_into(input, &mut out);
    });

    let elapsed = measure(|| {
        filter.filter_into(input, &mut out);
    });

    print_perf("Filter", input.len(), elapsed, 0);
}

fn bench_tokenize(input: &str, filter: CharFilter) {
    let tokenizer = Tokenizer::new();
    let filtered = filter.filter(input);

    println!("=== Tokenize ===");

    warmup(|| {
        let mut sink = 0u64;
        tokenizer.for_each_token(&filtered, |_t, _p| {
            sink += 1;
        });
        std::hint::black_box(sink);
    });

    let mut tokens = 0u64;
    let elapsed = measure(|| {
        let mut local = 0u64;
        tokenizer.for_each_token(&filtered, |_t, _p| {
            local += 1;
        });
        tokens = local;
        std::hint::black_box(tokens);
    });

    print_perf("Tokenize", filtered.len(), elapsed, tokens);
}

fn bench_pipeline(input: &str, normalizer: &Normalizer) {
    let mut scratch = String::new();

    println!("=== Pipeline ===");

    warmup(|| {
        for line in input.lines() {
            std::hint::black_box(normalizer.normalize_with(line, &mut scratch));
        }
    });

    let mut tokens = 0u64;
    let elapsed = measure(|| {
        let mut local = 0u64;
        for line in input.lines() {
            let result = normalizer.normalize_with(line, &mut scratch);
            local += result.len() as u64;
            std::hint::black_box(result);
        }
        tokens = local;
    });

    print_perf("Pipeline", input.len(), elapsed, tokens);
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, input_bytes: usize, elapsed: Duration, tokens: u64) {
    let secs = elapsed.as_secs_f64();
    let gib = input_bytes as f64 / (1024.0 * 1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} s", secs);
    println!("Throughput  : {:.3} GiB/s", gib / secs);

    if tokens > 0 {
        println!("Tokens      : {}", fmt_count(tokens));
        println!("Tokens/sec  : {}", fmt_count((tokens as f64 / secs) as u64));
    }

    println!("--------------------------------\n");
}

fn fmt_bytes(b: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    match b {
        b if b >= GIB => format!("{:.2} GiB", b as f64 / GIB as f64),
        b if b >= MIB => format!("{:.2} MiB", b as f64 / MIB as f64),
        b if b >= KIB => format!("{:.2} KiB", b as f64 / KIB as f64),
        b => format!("{} B", b),
    }
}

fn fmt_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out
}
