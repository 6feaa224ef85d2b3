//! Reference outputs for every catalog case, produced by the native a5hash.

use crate::vectors::VectorResult;
use std::fmt;

#[derive(Debug, Clone, Copy)]
pub struct Expected {
    pub name: &'static str,
    pub hash64: u64,
    pub hash32: u32,
    pub hash128_lo: u64,
    pub hash128_hi: u64,
}

const fn expect(name: &'static str, hash64: u64, hash32: u32, lo: u64, hi: u64) -> Expected {
    Expected {
        name,
        hash64,
        hash32,
        hash128_lo: lo,
        hash128_hi: hi,
    }
}

#[rustfmt::skip]
pub const EXPECTED: [Expected; 23] = [
    expect("empty",          0x0f2d4f1152e2fd91, 0x969d3f21, 0x0f2d4f1152e2fd91, 0xd945ac0d4f73ca5d),
    expect("empty_seeded",   0x509fba71029f8ab4, 0xdecabf9e, 0x509fba71029f8ab4, 0x2628c6679323d20a),
    expect("1byte",          0xe16325b37108afee, 0x4f4aa1e0, 0xe16325b37108afee, 0xf6bf70b1301bc4b6),
    expect("1byte_val",      0x6d290c7cc483cba5, 0xe68bffab, 0x8c6cc077ec738cca, 0xc2f703e0ef338872),
    expect("2bytes",         0xbfe436f6fa18029f, 0xc9896e78, 0x19441a609058c0c5, 0x66298bed3738b52c),
    expect("3bytes",         0xc82129fd511c0c1c, 0xb96ae160, 0x5a320da64b97f25f, 0x8a80f6270330b008),
    expect("4bytes",         0x58f16aeabad3e124, 0x9c3517d8, 0x0f56c160db680bb5, 0x7fe7261ea9236d9f),
    expect("5bytes",         0xdc301264d033a6dd, 0xa6e50b7b, 0x6e54d8c411342567, 0x3137eef72cf5e81e),
    expect("8bytes",         0xe9b2e9af9245d5ae, 0x6c110d63, 0xa0e8f52dc863c4f2, 0x01496a5232238c62),
    expect("9bytes",         0x5029a744a31e35da, 0x9d6d8996, 0x18a4f8e2db0b26d7, 0x2b1fc549b4338e3e),
    expect("16bytes",        0xd7938cd3f5371973, 0xcc64a728, 0x23dbf92d70c3a9e3, 0x5406be07b64ab897),
    expect("17bytes",        0xc8b4616cc61eef88, 0xa88afedc, 0xc6ea7fc549666438, 0xcf64287c14f3e26d),
    expect("32bytes",        0xf765f48bfdbf928a, 0xf346f993, 0x6e1d0b3ef77da7a6, 0x900e03a6808431aa),
    expect("hello_seeded",   0x885137eaa6a7f5e8, 0xa8d1436e, 0x4421f8bc2f763a9d, 0x8a21bffa0eefaa02),
    expect("ascii",          0xddd577a973b0996b, 0xc5d35ba3, 0xa2d7775b627ee6c0, 0x63f183ae6a157678),
    expect("zeros16",        0xf6c885ba9accd3e1, 0x0d90f13b, 0xf6c885ba9accd3e1, 0x6de152461a74b54b),
    expect("ones16",         0xdcf7d4710e21d606, 0xadcf76c9, 0xf2d6fe4ed547cc96, 0xe0c07fda19142717),
    expect("sequential_33",  0x9003c96b9f384a5e, 0xf2365846, 0x22ca1a10c8c876c2, 0xe9465ad40546cec5),
    expect("sequential_64",  0x28c1bfd6895d7468, 0xadab12ca, 0x1a2936014ca9b223, 0xbed13321e2e18fe8),
    expect("sequential_65",  0x0d5e85b646c12acc, 0xe63ca96e, 0x68e796cc003240e2, 0xbf2a5d4d843ff357),
    expect("sequential_100", 0xca53bf1c33c9bb00, 0x2a2c3eed, 0x136c63d94c762753, 0xe8c20e13361679d9),
    expect("sequential_128", 0x2276d989d05bde4d, 0x365d1e40, 0xbd6568458d0aca4f, 0x007f07d1d6973860),
    expect("sequential_256", 0x92a52c8586258560, 0xce642dc8, 0x389d24736fc07578, 0xb528a757bfd3c6f1),
];

pub fn lookup(name: &str) -> Option<&'static Expected> {
    EXPECTED.iter().find(|e| e.name == name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub name: String,
    pub field: &'static str,
    pub expected: u64,
    pub actual: u64,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} expected 0x{:x}, got 0x{:x}",
            self.name, self.field, self.expected, self.actual
        )
    }
}

/// Compares results against the reference table.
///
/// A result whose case has no reference entry is reported as a mismatch on
/// field `missing`.
pub fn verify(results: &[VectorResult]) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();
    for result in results {
        let name = &result.case.name;
        let Some(expected) = lookup(name) else {
            mismatches.push(Mismatch {
                name: name.clone(),
                field: "missing",
                expected: 0,
                actual: 0,
            });
            continue;
        };

        let checks = [
            ("hash64", expected.hash64, result.hash64),
            ("hash32", expected.hash32 as u64, result.hash32 as u64),
            ("hash128_lo", expected.hash128_lo, result.hash128.0),
            ("hash128_hi", expected.hash128_hi, result.hash128.1),
        ];
        for (field, want, got) in checks {
            if want != got {
                mismatches.push(Mismatch {
                    name: name.clone(),
                    field,
                    expected: want,
                    actual: got,
                });
            }
        }
    }
    mismatches
}
