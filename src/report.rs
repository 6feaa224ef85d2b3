//! Benchmark matrix: every primitive against every size class.

use crate::corpus;
use crate::crc32::Crc32;
use crate::hash::{utf16_le_bytes, HashContract};
use crate::sampler::{SampleResult, Sampler};
use crate::utils::{format_bytes, log_to, Logger};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::io::Write;

/// A fixed input length used uniformly across all primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeClass {
    pub label: &'static str,
    pub len: usize,
}

const fn size(label: &'static str, len: usize) -> SizeClass {
    SizeClass { label, len }
}

pub const SIZE_CLASSES: [SizeClass; 13] = [
    size("4B", 4),
    size("8B", 8),
    size("16B", 16),
    size("32B", 32),
    size("64B", 64),
    size("128B", 128),
    size("256B", 256),
    size("512B", 512),
    size("1KB", 1024),
    size("4KB", 4096),
    size("16KB", 16384),
    size("64KB", 65536),
    size("1MB", 1048576),
];

/// String lengths in UTF-16 code units; each is hashed as `2 * len` bytes.
pub const STRING_SIZES: [SizeClass; 5] = [
    size("8c", 8),
    size("16c", 16),
    size("64c", 64),
    size("256c", 256),
    size("1Kc", 1024),
];

/// Looks up a size class by label, ignoring case.
pub fn find_size_class(label: &str) -> Option<SizeClass> {
    SIZE_CLASSES
        .iter()
        .copied()
        .find(|s| s.label.eq_ignore_ascii_case(label))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Hash64,
    Hash32,
    Hash128,
    Crc32,
}

impl Primitive {
    /// Report order.
    pub const ALL: [Primitive; 4] = [
        Primitive::Hash64,
        Primitive::Hash32,
        Primitive::Hash128,
        Primitive::Crc32,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Primitive::Hash64 => "a5hash",
            Primitive::Hash32 => "a5hash32",
            Primitive::Hash128 => "a5hash128",
            Primitive::Crc32 => "crc32",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Primitive::Hash64 => "64-bit",
            Primitive::Hash32 => "32-bit",
            Primitive::Hash128 => "128-bit",
            Primitive::Crc32 => "table-driven baseline",
        }
    }
}

/// What the matrix feeds each primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workload {
    /// Prefixes of the deterministic corpus.
    Corpus,
    /// Strings of repeated `'a'`, hashed in their UTF-16 little-endian form.
    Strings,
}

impl Workload {
    pub fn sizes(&self) -> &'static [SizeClass] {
        match self {
            Workload::Corpus => &SIZE_CLASSES,
            Workload::Strings => &STRING_SIZES,
        }
    }

    /// Bytes per size unit.
    pub fn unit_bytes(&self) -> usize {
        match self {
            Workload::Corpus => 1,
            Workload::Strings => 2,
        }
    }

    /// One buffer whose prefixes are every input the matrix needs.
    pub fn buffer(&self, units: usize) -> Result<Vec<u8>> {
        match self {
            Workload::Corpus => corpus::generate(units),
            Workload::Strings => Ok(utf16_le_bytes(&vec![u16::from(b'a'); units])),
        }
    }
}

/// Reads the little-endian key at the start of `data`, if it is long enough.
fn key_u32(data: &[u8]) -> Option<u32> {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(data.get(..4)?);
    Some(u32::from_le_bytes(buf))
}

fn key_u64(data: &[u8]) -> Option<u64> {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(data.get(..8)?);
    Some(u64::from_le_bytes(buf))
}

/// Primitives with fixed-width key entry points.
pub const KEYED_PRIMITIVES: [Primitive; 3] =
    [Primitive::Hash64, Primitive::Hash32, Primitive::Hash128];

/// One report line: label, size, ops/sec, GB/s.
pub fn format_sample_line(result: &SampleResult) -> String {
    format!(
        "{:<9} {:>12}: {:>12.0} ops/sec, {:>8.3} GB/s",
        result.primitive,
        result.size_label,
        result.ops_per_sec(),
        result.gib_per_sec()
    )
}

pub struct BenchmarkReport<'a, H: HashContract> {
    hasher: &'a H,
    crc: &'a Crc32,
    sampler: Sampler,
    workload: Workload,
    sizes: Vec<SizeClass>,
    value_keys: bool,
}

impl<'a, H: HashContract> BenchmarkReport<'a, H> {
    pub fn new(hasher: &'a H, crc: &'a Crc32) -> Self {
        Self {
            hasher,
            crc,
            sampler: Sampler::default(),
            workload: Workload::Corpus,
            sizes: SIZE_CLASSES.to_vec(),
            value_keys: false,
        }
    }

    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Switches the input kind and resets the sizes to its full set.
    pub fn with_workload(mut self, workload: Workload) -> Self {
        self.workload = workload;
        self.sizes = workload.sizes().to_vec();
        self
    }

    /// Also samples the fixed-width key entry points for the 4B and 8B
    /// classes, plus scalar against batched 32-bit hashing at 4B.
    /// Only applies to the corpus workload.
    pub fn with_value_keys(mut self, enabled: bool) -> Self {
        self.value_keys = enabled;
        self
    }

    /// Restricts the matrix to `sizes`, kept in the given order.
    pub fn with_sizes(mut self, sizes: Vec<SizeClass>) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn sizes(&self) -> &[SizeClass] {
        &self.sizes
    }

    pub fn workload(&self) -> Workload {
        self.workload
    }

    fn keyed_sizes(&self) -> Vec<SizeClass> {
        if !self.value_keys || self.workload != Workload::Corpus {
            return Vec::new();
        }
        self.sizes
            .iter()
            .copied()
            .filter(|s| s.len == 4 || s.len == 8)
            .collect()
    }

    /// Number of samples [`run`](Self::run) will take.
    pub fn sample_count(&self) -> u64 {
        let keyed = self.keyed_sizes();
        let batched = if keyed.iter().any(|s| s.len == 4) { 2 } else { 0 };
        (Primitive::ALL.len() * self.sizes.len() + KEYED_PRIMITIVES.len() * keyed.len() + batched)
            as u64
    }

    pub fn sample(&self, primitive: Primitive, size: SizeClass, data: &[u8]) -> SampleResult {
        let label = primitive.label();
        match primitive {
            Primitive::Hash64 => self
                .sampler
                .sample(label, size.label, data, |d| self.hasher.hash64(d, 0)),
            Primitive::Hash32 => self
                .sampler
                .sample(label, size.label, data, |d| self.hasher.hash32(d, 0)),
            Primitive::Hash128 => self
                .sampler
                .sample(label, size.label, data, |d| self.hasher.hash128(d, 0)),
            Primitive::Crc32 => self
                .sampler
                .sample(label, size.label, data, |d| self.crc.checksum(d)),
        }
    }

    /// Samples a key entry point; `data` holds the key's little-endian bytes.
    pub fn sample_key(
        &self,
        primitive: Primitive,
        size: SizeClass,
        data: &[u8],
    ) -> Option<SampleResult> {
        let label = primitive.label();
        let size_label = format!("{} key", size.label);
        let h = self.hasher;
        let result = match (primitive, size.len) {
            (Primitive::Hash64, 4) => {
                self.sampler
                    .sample_with(label, &size_label, key_u32(data)?, 4, |v| h.hash64_u32(v, 0))
            }
            (Primitive::Hash64, 8) => {
                self.sampler
                    .sample_with(label, &size_label, key_u64(data)?, 8, |v| h.hash64_u64(v, 0))
            }
            (Primitive::Hash32, 4) => {
                self.sampler
                    .sample_with(label, &size_label, key_u32(data)?, 4, |v| h.hash32_u32(v, 0))
            }
            (Primitive::Hash32, 8) => {
                self.sampler
                    .sample_with(label, &size_label, key_u64(data)?, 8, |v| h.hash32_u64(v, 0))
            }
            (Primitive::Hash128, 4) => {
                self.sampler
                    .sample_with(label, &size_label, key_u32(data)?, 4, |v| h.hash128_u32(v, 0))
            }
            (Primitive::Hash128, 8) => {
                self.sampler
                    .sample_with(label, &size_label, key_u64(data)?, 8, |v| h.hash128_u64(v, 0))
            }
            _ => return None,
        };
        Some(result)
    }

    /// Scalar and four-lane 32-bit hashing of one 4-byte key. The batched
    /// rate counts each lane as one operation.
    pub fn sample_batched(&self, data: &[u8]) -> Option<(SampleResult, SampleResult)> {
        let key = key_u32(data)?;
        let h = self.hasher;
        let label = Primitive::Hash32.label();
        let scalar = self
            .sampler
            .sample_with(label, "scalar", key, 4, |v| h.hash32_u32(v, 0));
        let mut batched = self
            .sampler
            .sample_with(label, "batched", [key; 4], 4, |v| h.hash32_x4(v, 0));
        batched.iterations *= 4;
        Some((scalar, batched))
    }

    /// Runs the whole matrix, primitive-major, writing one line per sample.
    ///
    /// Each line is written and flushed only after its measurement window
    /// has closed.
    pub fn run<W: Write>(
        &self,
        out: &mut W,
        progress: &ProgressBar,
        logger: Option<&Logger>,
    ) -> Result<Vec<SampleResult>> {
        let units = self.sizes.iter().map(|s| s.len).max().unwrap_or(0);
        let unit_bytes = self.workload.unit_bytes();
        let data = self.workload.buffer(units)?;

        writeln!(out, "a5hash Rust Performance Benchmark")?;
        writeln!(out, "=================================")?;
        writeln!(
            out,
            "Each benchmark runs for {:.1} seconds",
            self.sampler.min_duration().as_secs_f64()
        )?;
        if self.workload == Workload::Strings {
            writeln!(out, "Inputs: UTF-16 strings of 'a', sizes in chars")?;
        }
        writeln!(out)?;
        out.flush().context("Failed to write benchmark header")?;
        log_to(
            logger,
            &format!("Input buffer: {} ({:?})", format_bytes(data.len() as u64), self.workload),
        )?;

        let mut results = Vec::with_capacity(self.sample_count() as usize);
        let mut record = |out: &mut W, result: SampleResult| -> Result<()> {
            let line = format_sample_line(&result);
            writeln!(out, "{}", line)?;
            out.flush().context("Failed to write benchmark line")?;
            log_to(
                logger,
                &format!("Sampled: {} ({} iterations)", line, result.iterations),
            )?;
            progress.inc(1);
            results.push(result);
            Ok(())
        };

        for primitive in Primitive::ALL {
            writeln!(
                out,
                "--- {} ({}) ---",
                primitive.label(),
                primitive.description()
            )?;

            for size in &self.sizes {
                progress.set_message(format!("{} {}", primitive.label(), size.label));
                let result = self.sample(primitive, *size, &data[..size.len * unit_bytes]);
                record(out, result)?;
            }
            writeln!(out)?;
        }

        let keyed = self.keyed_sizes();
        for size in &keyed {
            writeln!(out, "--- fixed-width keys ({}) ---", size.label)?;
            for primitive in KEYED_PRIMITIVES {
                progress.set_message(format!("{} {} key", primitive.label(), size.label));
                if let Some(result) = self.sample_key(primitive, *size, &data) {
                    record(out, result)?;
                }
            }
            writeln!(out)?;
        }

        if keyed.iter().any(|s| s.len == 4) {
            writeln!(out, "--- a5hash32 4B: scalar vs batched ---")?;
            progress.set_message("a5hash32 scalar vs batched");
            if let Some((scalar, batched)) = self.sample_batched(&data) {
                record(out, scalar)?;
                record(out, batched)?;
            }
            writeln!(out)?;
        }

        writeln!(out, "Benchmark complete.")?;
        out.flush()?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::A5Hash;
    use std::time::Duration;

    #[test]
    fn test_size_classes_are_fixed() {
        let lens: Vec<usize> = SIZE_CLASSES.iter().map(|s| s.len).collect();
        assert_eq!(
            lens,
            vec![4, 8, 16, 32, 64, 128, 256, 512, 1024, 4096, 16384, 65536, 1048576]
        );
        assert!(SIZE_CLASSES.windows(2).all(|w| w[0].len < w[1].len));
        assert_eq!(find_size_class("1mb"), Some(size("1MB", 1048576)));
        assert_eq!(find_size_class("3B"), None);
    }

    #[test]
    fn test_format_sample_line() {
        let result = SampleResult {
            primitive: "a5hash".to_string(),
            size_label: "1KB".to_string(),
            input_len: 1024,
            iterations: 1_048_576,
            elapsed: Duration::from_secs(1),
        };
        assert_eq!(
            format_sample_line(&result),
            "a5hash             1KB:      1048576 ops/sec,    1.000 GB/s"
        );
    }

    #[test]
    fn test_run_covers_matrix_in_order() -> Result<()> {
        let hasher = A5Hash;
        let crc = Crc32::new();
        let sizes = vec![find_size_class("4B").unwrap(), find_size_class("64B").unwrap()];
        let report = BenchmarkReport::new(&hasher, &crc)
            .with_sampler(Sampler::new(Duration::from_millis(2)))
            .with_sizes(sizes);

        let mut out = Vec::new();
        let results = report.run(&mut out, &ProgressBar::hidden(), None)?;

        let order: Vec<(String, String)> = results
            .iter()
            .map(|r| (r.primitive.clone(), r.size_label.clone()))
            .collect();
        let expected: Vec<(String, String)> = Primitive::ALL
            .iter()
            .flat_map(|p| ["4B", "64B"].map(|s| (p.label().to_string(), s.to_string())))
            .collect();
        assert_eq!(order, expected);
        assert!(crc.is_initialized());

        let text = String::from_utf8(out)?;
        assert!(text.contains("--- crc32 (table-driven baseline) ---"));
        assert!(text.trim_end().ends_with("Benchmark complete."));
        assert_eq!(text.matches(" ops/sec, ").count(), 8);
        assert!(!text.contains("fixed-width keys"));
        Ok(())
    }

    #[test]
    fn test_header_is_fixed() -> Result<()> {
        let hasher = A5Hash;
        let crc = Crc32::new();
        let report = BenchmarkReport::new(&hasher, &crc)
            .with_sampler(Sampler::new(Duration::from_millis(1)))
            .with_sizes(vec![find_size_class("16B").unwrap()]);

        let mut out = Vec::new();
        report.run(&mut out, &ProgressBar::hidden(), None)?;
        let text = String::from_utf8(out)?;
        assert!(text.starts_with(
            "a5hash Rust Performance Benchmark\n\
             =================================\n\
             Each benchmark runs for 0.0 seconds\n\n\
             --- a5hash (64-bit) ---\n"
        ));
        Ok(())
    }

    #[test]
    fn test_string_workload() -> Result<()> {
        let hasher = A5Hash;
        let crc = Crc32::new();
        let report = BenchmarkReport::new(&hasher, &crc)
            .with_sampler(Sampler::new(Duration::from_millis(1)))
            .with_workload(Workload::Strings)
            .with_value_keys(true);
        let labels: Vec<&str> = report.sizes().iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["8c", "16c", "64c", "256c", "1Kc"]);
        assert_eq!(report.sample_count(), 20);

        let mut out = Vec::new();
        let results = report.run(&mut out, &ProgressBar::hidden(), None)?;
        assert_eq!(results.len(), 20);
        let first = &results[0];
        assert_eq!((first.primitive.as_str(), first.size_label.as_str()), ("a5hash", "8c"));
        assert_eq!(first.input_len, 16);
        assert_eq!(results[4].input_len, 2048);

        let text = String::from_utf8(out)?;
        assert!(text.contains("Inputs: UTF-16 strings of 'a'"));
        assert!(!text.contains("fixed-width keys"));
        Ok(())
    }

    #[test]
    fn test_string_buffer_is_utf16_a() -> Result<()> {
        let buf = Workload::Strings.buffer(3)?;
        assert_eq!(buf, vec![0x61, 0x00, 0x61, 0x00, 0x61, 0x00]);
        assert_eq!(Workload::Corpus.buffer(2)?, vec![17, 48]);
        Ok(())
    }

    #[test]
    fn test_value_keys_for_small_sizes() -> Result<()> {
        let hasher = A5Hash;
        let crc = Crc32::new();
        let sizes = vec![find_size_class("4B").unwrap(), find_size_class("8B").unwrap()];
        let report = BenchmarkReport::new(&hasher, &crc)
            .with_sampler(Sampler::new(Duration::from_millis(1)))
            .with_sizes(sizes)
            .with_value_keys(true);
        assert_eq!(report.sample_count(), 8 + 6 + 2);

        let mut out = Vec::new();
        let results = report.run(&mut out, &ProgressBar::hidden(), None)?;
        assert_eq!(results.len(), 16);

        let keyed: Vec<(&str, &str)> = results[8..14]
            .iter()
            .map(|r| (r.primitive.as_str(), r.size_label.as_str()))
            .collect();
        assert_eq!(
            keyed,
            vec![
                ("a5hash", "4B key"),
                ("a5hash32", "4B key"),
                ("a5hash128", "4B key"),
                ("a5hash", "8B key"),
                ("a5hash32", "8B key"),
                ("a5hash128", "8B key"),
            ]
        );

        let (scalar, batched) = (&results[14], &results[15]);
        assert_eq!(scalar.size_label, "scalar");
        assert_eq!(batched.size_label, "batched");
        assert_eq!(batched.iterations % (4 * crate::sampler::BATCH_SIZE), 0);

        let text = String::from_utf8(out)?;
        assert!(text.contains("--- fixed-width keys (4B) ---"));
        assert!(text.contains("--- a5hash32 4B: scalar vs batched ---"));
        Ok(())
    }

    #[test]
    fn test_value_keys_skip_larger_sizes() {
        let hasher = A5Hash;
        let crc = Crc32::new();
        let report = BenchmarkReport::new(&hasher, &crc)
            .with_sizes(vec![find_size_class("16B").unwrap()])
            .with_value_keys(true);
        assert_eq!(report.sample_count(), 4);
        assert!(report
            .sample_key(Primitive::Hash64, find_size_class("16B").unwrap(), &[0; 16])
            .is_none());
        assert!(report
            .sample_key(Primitive::Crc32, find_size_class("4B").unwrap(), &[0; 4])
            .is_none());
    }
}
