//! Demonstration and benchmark for the compact TLV codec.
//!
//! Round-trips a handful of sample values, then times encode/decode over
//! inputs of increasing size.
//!
//! Usage: `tlv-bench [MULTIPLIER] [--json]`
//!
//! `MULTIPLIER` scales every iteration count (default 1). With `--json` the
//! report is printed as JSON instead of text. Progress is logged to stderr;
//! set `RUST_LOG` to adjust verbosity.

use std::process::ExitCode;
use std::time::{Duration, Instant};

use compact_tlv::{decode, encode, structural_equals, ListBuilder, Value};
use serde::Serialize;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

// =============================================================================
// REPORT STRUCTURES
// =============================================================================

#[derive(Debug, Serialize)]
struct SampleResult {
    name: &'static str,
    encoded_bytes: usize,
    matched: bool,
}

#[derive(Debug, Serialize)]
struct BenchResult {
    name: &'static str,
    elements: usize,
    encoded_bytes: usize,
    iterations: u32,
    encode_us_per_op: f64,
    decode_us_per_op: f64,
    encode_mb_per_s: f64,
    decode_mb_per_s: f64,
}

#[derive(Debug, Serialize)]
struct Report {
    version: &'static str,
    samples: Vec<SampleResult>,
    benchmarks: Vec<BenchResult>,
}

// =============================================================================
// SAMPLE DATA
// =============================================================================

fn samples() -> Vec<(&'static str, Value)> {
    let large: String = (0..100_000).map(|i| (b'A' + (i % 26) as u8) as char).collect();

    vec![
        (
            "basic nested",
            ListBuilder::new().text("foo").list(|l| l.text("bar").int32(42)).build(),
        ),
        (
            "complex nested",
            ListBuilder::new()
                .text("user_metrics")
                .int32(1234567)
                .list(|l| {
                    l.text("events")
                        .int32(42)
                        .text("click")
                        .list(|n| n.text("nested").int32(-999).text("deep"))
                        .text("timestamp")
                })
                .text("end")
                .build(),
        ),
        ("large text", ListBuilder::new().text(large).int32(999).build()),
        (
            "utf-8 text",
            ListBuilder::new()
                .text("Hello")
                .text("\u{1F680} Rocket")
                .int32(2025)
                .text("abcdefg")
                .build(),
        ),
        (
            "edge cases",
            ListBuilder::new()
                .text("")
                .int32(0)
                .list(|l| l)
                .int32(i32::MIN)
                .null()
                .build(),
        ),
    ]
}

/// `pairs` Text/Int32 pairs in one flat List.
fn flat_pairs(pairs: usize) -> Value {
    let mut builder = ListBuilder::with_capacity(pairs * 2);
    for i in 0..pairs {
        builder = builder.text(format!("field_{}", i)).int32(i as i32);
    }
    builder.build()
}

/// Ten Lists of ten Text/Int32 pairs each.
fn nested_grid() -> Value {
    (0..10)
        .map(|i| {
            let mut inner = ListBuilder::with_capacity(20);
            for j in 0..10 {
                inner = inner.text(format!("data_{}_{}", i, j)).int32(i * 10 + j);
            }
            inner.build()
        })
        .collect()
}

/// 1000 elements, every third a Text, the rest Int32.
fn max_array() -> Value {
    (0..1000)
        .map(|i| {
            if i % 3 == 0 {
                Value::Text(format!("element_{}", i))
            } else {
                Value::Int32(i)
            }
        })
        .collect()
}

// =============================================================================
// RUNNERS
// =============================================================================

fn run_samples() -> Vec<SampleResult> {
    samples()
        .into_iter()
        .map(|(name, value)| {
            let encoded = encode(&value);
            let matched = match decode(&encoded) {
                Ok(decoded) => structural_equals(&value, &decoded),
                Err(e) => {
                    error!(sample = name, error = %e, "decode failed");
                    false
                }
            };
            debug!(sample = name, value = %value, "round-tripped");
            SampleResult {
                name,
                encoded_bytes: encoded.len(),
                matched,
            }
        })
        .collect()
}

fn mb_per_s(bytes: usize, iterations: u32, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs == 0.0 {
        return f64::INFINITY;
    }
    (bytes as f64 * iterations as f64) / secs / 1024.0 / 1024.0
}

fn bench(name: &'static str, value: &Value, iterations: u32) -> Result<BenchResult, String> {
    info!(bench = name, iterations, "running");

    // Warmup
    let encoded = encode(value);
    decode(&encoded).map_err(|e| format!("{}: {}", name, e))?;

    let start = Instant::now();
    for _ in 0..iterations {
        std::hint::black_box(encode(std::hint::black_box(value)));
    }
    let encode_time = start.elapsed();

    let start = Instant::now();
    for _ in 0..iterations {
        let decoded = decode(std::hint::black_box(&encoded)).map_err(|e| format!("{}: {}", name, e))?;
        std::hint::black_box(decoded);
    }
    let decode_time = start.elapsed();

    let per_op = |d: Duration| d.as_secs_f64() * 1_000_000.0 / iterations as f64;

    Ok(BenchResult {
        name,
        elements: value.as_list().map_or(1, <[Value]>::len),
        encoded_bytes: encoded.len(),
        iterations,
        encode_us_per_op: per_op(encode_time),
        decode_us_per_op: per_op(decode_time),
        encode_mb_per_s: mb_per_s(encoded.len(), iterations, encode_time),
        decode_mb_per_s: mb_per_s(encoded.len(), iterations, decode_time),
    })
}

fn run_benchmarks(multiplier: u32) -> Result<Vec<BenchResult>, String> {
    let cases: [(&'static str, Value, u32); 4] = [
        ("small (10 pairs)", flat_pairs(10), 10_000),
        ("medium (100 pairs)", flat_pairs(100), 1_000),
        ("nested (10x10)", nested_grid(), 1_000),
        ("max array (1000 elements)", max_array(), 100),
    ];

    cases
        .into_iter()
        .map(|(name, value, iterations)| bench(name, &value, iterations.saturating_mul(multiplier)))
        .collect()
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_text(report: &Report) {
    println!("=== Samples ===");
    for s in &report.samples {
        println!(
            "{:<16} {:>8} bytes  match: {}",
            s.name, s.encoded_bytes, s.matched
        );
    }

    println!("\n=== Benchmarks ===");
    for b in &report.benchmarks {
        println!(
            "\n{}: {} elements, {} bytes encoded",
            b.name, b.elements, b.encoded_bytes
        );
        println!(
            "  Encode: {} iterations ({:.2} µs/op, {:.2} MB/s)",
            b.iterations, b.encode_us_per_op, b.encode_mb_per_s
        );
        println!(
            "  Decode: {} iterations ({:.2} µs/op, {:.2} MB/s)",
            b.iterations, b.decode_us_per_op, b.decode_mb_per_s
        );
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut multiplier = 1u32;
    let mut json = false;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else if let Ok(m) = arg.parse::<u32>() {
            multiplier = m.max(1);
        } else {
            error!(arg = %arg, "unrecognized argument");
            eprintln!("usage: tlv-bench [MULTIPLIER] [--json]");
            return ExitCode::FAILURE;
        }
    }

    info!(version = compact_tlv::VERSION, multiplier, "starting");

    let samples = run_samples();
    let benchmarks = match run_benchmarks(multiplier) {
        Ok(b) => b,
        Err(e) => {
            error!(error = %e, "benchmark failed");
            return ExitCode::FAILURE;
        }
    };

    let all_matched = samples.iter().all(|s| s.matched);
    let report = Report {
        version: compact_tlv::VERSION,
        samples,
        benchmarks,
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                error!(error = %e, "failed to serialize report");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_text(&report);
    }

    if all_matched {
        ExitCode::SUCCESS
    } else {
        error!("one or more samples did not round-trip");
        ExitCode::FAILURE
    }
}
