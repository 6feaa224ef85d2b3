//! Fixed-budget throughput sampling.
//!
//! A sample runs a warm-up phase, then executes the primitive in batches
//! until the measurement floor has elapsed. Every result is passed through
//! [`black_box`] so the optimizer cannot prove a measured call dead.

use std::hint::black_box;
use std::time::{Duration, Instant};

/// Calls executed and discarded before timing starts.
pub const WARMUP_ITERATIONS: u64 = 1000;

/// Calls executed between two clock reads.
pub const BATCH_SIZE: u64 = 1000;

/// Minimum measured wall time per sample.
pub const MEASUREMENT_FLOOR: Duration = Duration::from_secs(1);

/// Bytes in one GiB; the unit behind every reported "GB/s".
pub const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Rate statistics for one (primitive, size class) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleResult {
    pub primitive: String,
    pub size_label: String,
    pub input_len: usize,
    pub iterations: u64,
    pub elapsed: Duration,
}

impl SampleResult {
    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / secs
    }

    pub fn bytes_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 * self.input_len as f64 / secs
    }

    pub fn gib_per_sec(&self) -> f64 {
        self.bytes_per_sec() / GIB
    }
}

/// Measures sustained call rate of a primitive over a borrowed input slice.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    min_duration: Duration,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(MEASUREMENT_FLOOR)
    }
}

impl Sampler {
    pub fn new(min_duration: Duration) -> Self {
        Self { min_duration }
    }

    pub fn min_duration(&self) -> Duration {
        self.min_duration
    }

    /// Samples `call` over `data`.
    ///
    /// `data` is never copied; every call receives the same slice.
    pub fn sample<F, R>(
        &self,
        primitive: &str,
        size_label: &str,
        data: &[u8],
        call: F,
    ) -> SampleResult
    where
        F: FnMut(&[u8]) -> R,
    {
        self.sample_with(primitive, size_label, data, data.len(), call)
    }

    /// Samples `call` over any copyable input, such as a fixed-width key.
    /// `input_len` is the byte count one call consumes.
    pub fn sample_with<I, F, R>(
        &self,
        primitive: &str,
        size_label: &str,
        input: I,
        input_len: usize,
        mut call: F,
    ) -> SampleResult
    where
        I: Copy,
        F: FnMut(I) -> R,
    {
        for _ in 0..WARMUP_ITERATIONS {
            black_box(call(black_box(input)));
        }

        let mut iterations = 0u64;
        let start = Instant::now();
        let elapsed = loop {
            for _ in 0..BATCH_SIZE {
                black_box(call(black_box(input)));
            }
            iterations += BATCH_SIZE;

            let elapsed = start.elapsed();
            if elapsed >= self.min_duration {
                break elapsed;
            }
        };

        SampleResult {
            primitive: primitive.to_string(),
            size_label: size_label.to_string(),
            input_len,
            iterations,
            elapsed,
        }
    }
}
