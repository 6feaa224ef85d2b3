pub mod corpus;
pub mod crc32;
pub mod emit;
pub mod golden;
pub mod hash;
pub mod report;
pub mod sampler;
pub mod utils;
pub mod vectors;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crc32::Crc32;
use emit::{VectorEmitter, VectorFormat};
use hash::{A5Hash, HashContract};
use report::{find_size_class, BenchmarkReport, Workload, SIZE_CLASSES};
use utils::{log_to, Logger};
use vectors::{catalog, evaluate_all, large_catalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Throughput of every primitive across all size classes
    Bench,
    /// Emit the conformance vector catalog
    Vectors,
    /// Check the hash implementation against the reference vectors
    Verify,
    /// Bench, then vectors, then verify
    All,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Pipeline to run
    #[arg(long, value_enum, default_value_t = Mode::Bench)]
    pub mode: Mode,

    /// Benchmark a single size class (e.g., 4B, 1KB, 1MB); 4B and 8B also
    /// sample the fixed-width key entry points
    #[arg(long)]
    pub size: Option<String>,

    /// Benchmark UTF-16 string hashing (8c to 1Kc) instead of the byte corpus
    #[arg(long, conflicts_with = "size")]
    pub strings: bool,

    /// Vector output encoding
    #[arg(long, value_enum, default_value_t = VectorFormat::Table)]
    pub format: VectorFormat,

    /// Write vectors to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Audit log file path
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,
}

pub fn run(args: Args) -> Result<()> {
    let logger = args.log.as_ref().map(Logger::new);
    let hasher = A5Hash;

    match args.mode {
        Mode::Bench => run_bench(&args, &hasher, logger.as_ref()),
        Mode::Vectors => run_vectors(&args, &hasher, logger.as_ref()),
        Mode::Verify => run_verify(&hasher, logger.as_ref()),
        Mode::All => {
            run_bench(&args, &hasher, logger.as_ref())?;
            run_vectors(&args, &hasher, logger.as_ref())?;
            run_verify(&hasher, logger.as_ref())
        }
    }
}

fn run_bench<H: HashContract>(args: &Args, hasher: &H, logger: Option<&Logger>) -> Result<()> {
    let crc = Crc32::new();
    let report = if args.strings {
        BenchmarkReport::new(hasher, &crc).with_workload(Workload::Strings)
    } else {
        let sizes = match &args.size {
            Some(label) => match find_size_class(label) {
                Some(size) => vec![size],
                None => {
                    let known: Vec<&str> = SIZE_CLASSES.iter().map(|s| s.label).collect();
                    bail!("Unknown size class {:?} (expected one of {})", label, known.join(", "));
                }
            },
            None => SIZE_CLASSES.to_vec(),
        };
        BenchmarkReport::new(hasher, &crc)
            .with_sizes(sizes)
            .with_value_keys(args.size.is_some())
    };

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(report.sample_count())
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg} (ETA: {eta})")?
            .progress_chars("=>-"),
    );

    log_to(logger, &format!("Benchmark started: {} samples", report.sample_count()))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let results = report.run(&mut out, &pb, logger)?;
    pb.finish_and_clear();
    log_to(logger, &format!("Benchmark finished: {} samples", results.len()))?;
    Ok(())
}

fn run_vectors<H: HashContract>(args: &Args, hasher: &H, logger: Option<&Logger>) -> Result<()> {
    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {:?}", path))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let boundary = evaluate_all(hasher, &catalog());
    let large = evaluate_all(hasher, &large_catalog());

    let mut emitter = VectorEmitter::new(out, args.format);
    emitter.write_header()?;
    emitter.write_section("Boundary cases", &boundary)?;
    emitter.write_section(
        "Large inputs (sequential bytes 0x00, 0x01, ...)",
        &large,
    )?;
    let emitted = emitter.emitted();
    emitter.finish().context("Failed to write vectors")?;

    if let Some(path) = &args.output {
        println!("Wrote {} vectors to {:?}", emitted, path);
    }
    log_to(logger, &format!("Emitted {} vectors ({:?})", emitted, args.format))?;
    Ok(())
}

fn run_verify<H: HashContract>(hasher: &H, logger: Option<&Logger>) -> Result<()> {
    let cases: Vec<_> = catalog().into_iter().chain(large_catalog()).collect();
    let results = evaluate_all(hasher, &cases);
    let mismatches = golden::verify(&results);

    if mismatches.is_empty() {
        println!("All {} vectors match the reference.", results.len());
        log_to(logger, &format!("Verified {} vectors", results.len()))?;
        return Ok(());
    }

    for mismatch in &mismatches {
        eprintln!("MISMATCH {}", mismatch);
        log_to(logger, &format!("Mismatch: {}", mismatch))?;
    }
    bail!(
        "{} of {} reference values differ",
        mismatches.len(),
        results.len() * 4
    )
}
