//! The conformance vector catalog.
//!
//! Case names, bytes, seeds and order are fixed data shared with every other
//! implementation checked against this harness. Append new cases at the end
//! and bump [`CATALOG_VERSION`]; never edit or reorder existing ones.

use crate::corpus;
use crate::hash::HashContract;

pub const CATALOG_VERSION: u32 = 1;

/// Slice lengths taken from the 256-byte sequential buffer.
pub const LARGE_LENGTHS: [usize; 6] = [33, 64, 65, 100, 128, 256];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorCase {
    pub name: String,
    pub input: Vec<u8>,
    pub seed64: u64,
    pub seed32: u32,
}

impl VectorCase {
    pub fn new(name: &str, input: &[u8], seed64: u64, seed32: u32) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_vec(),
            seed64,
            seed32,
        }
    }

    fn unseeded(name: &str, input: &[u8]) -> Self {
        Self::new(name, input, 0, 0)
    }
}

/// Boundary cases around the algorithm's length thresholds.
pub fn catalog() -> Vec<VectorCase> {
    let counting: Vec<u8> = (1..=32).collect();
    vec![
        VectorCase::unseeded("empty", b""),
        VectorCase::new("empty_seeded", b"", 0x1234_5678_ABCD_EF00, 0x1234_5678),
        VectorCase::unseeded("1byte", &[0x00]),
        VectorCase::unseeded("1byte_val", &[0xAB]),
        VectorCase::unseeded("2bytes", &counting[..2]),
        VectorCase::unseeded("3bytes", &counting[..3]),
        VectorCase::unseeded("4bytes", &counting[..4]),
        VectorCase::unseeded("5bytes", &counting[..5]),
        VectorCase::unseeded("8bytes", &counting[..8]),
        VectorCase::unseeded("9bytes", &counting[..9]),
        VectorCase::unseeded("16bytes", &counting[..16]),
        VectorCase::unseeded("17bytes", &counting[..17]),
        VectorCase::unseeded("32bytes", &counting[..32]),
        VectorCase::new(
            "hello_seeded",
            b"Hello, World!",
            0xDEAD_BEEF_CAFE_BABE,
            0xDEAD_BEEF,
        ),
        VectorCase::unseeded("ascii", b"The quick brown fox jumps over the lazy dog"),
        VectorCase::unseeded("zeros16", &[0x00; 16]),
        VectorCase::unseeded("ones16", &[0xFF; 16]),
    ]
}

/// Prefixes of a sequential 256-byte buffer, for the multi-round paths.
pub fn large_catalog() -> Vec<VectorCase> {
    let buf = corpus::sequential(256);
    LARGE_LENGTHS
        .iter()
        .map(|&len| VectorCase::unseeded(&format!("sequential_{}", len), &buf[..len]))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorResult {
    pub case: VectorCase,
    pub hash64: u64,
    pub hash32: u32,
    pub hash128: (u64, u64),
}

pub fn evaluate<H: HashContract>(hasher: &H, case: &VectorCase) -> VectorResult {
    VectorResult {
        case: case.clone(),
        hash64: hasher.hash64(&case.input, case.seed64),
        hash32: hasher.hash32(&case.input, case.seed32),
        hash128: hasher.hash128(&case.input, case.seed64),
    }
}

/// Evaluates `cases` in order; no reordering or filtering.
pub fn evaluate_all<H: HashContract>(hasher: &H, cases: &[VectorCase]) -> Vec<VectorResult> {
    cases.iter().map(|case| evaluate(hasher, case)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::A5Hash;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_shape() {
        let cases = catalog();
        assert_eq!(cases.len(), 17);
        assert_eq!(cases[0].name, "empty");
        assert_eq!(cases[16].name, "ones16");

        let lens: Vec<usize> = cases.iter().map(|c| c.input.len()).collect();
        assert_eq!(
            lens,
            vec![0, 0, 1, 1, 2, 3, 4, 5, 8, 9, 16, 17, 32, 13, 43, 16, 16]
        );
        assert_eq!(cases[12].input, (1..=32).collect::<Vec<u8>>());
        assert_eq!(cases[13].seed32, 0xDEAD_BEEF);
    }

    #[test]
    fn test_names_are_unique() {
        let all: Vec<VectorCase> = catalog().into_iter().chain(large_catalog()).collect();
        let names: HashSet<&str> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_large_catalog_is_sequential() {
        let cases = large_catalog();
        assert_eq!(cases.len(), LARGE_LENGTHS.len());
        for (case, &len) in cases.iter().zip(LARGE_LENGTHS.iter()) {
            assert_eq!(case.input.len(), len);
            assert!(case.input.iter().enumerate().all(|(i, &b)| b == i as u8));
            assert_eq!((case.seed64, case.seed32), (0, 0));
        }
    }

    #[test]
    fn test_evaluate_is_repeatable() {
        let cases = catalog();
        let first = evaluate_all(&A5Hash, &cases);
        let second = evaluate_all(&A5Hash, &cases);
        assert_eq!(first, second);
        assert_eq!(first.len(), cases.len());
        for (result, case) in first.iter().zip(cases.iter()) {
            assert_eq!(&result.case, case);
        }
    }
}
