//! Text encodings for evaluated vectors.
//!
//! Numeric fields are always fixed-width lowercase hex with an explicit
//! `_u32`/`_u64` suffix, so a reader never has to guess a field's width.

use crate::vectors::{VectorResult, CATALOG_VERSION};
use anyhow::Result;
use clap::ValueEnum;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VectorFormat {
    /// One literal block per case, input as a byte list
    Table,
    /// One comma-separated line per case, input as hex
    Compact,
}

pub const COMPACT_HEADER: &str = "name,input_hex,seed64,seed32,hash64,hash32,hash128_lo,hash128_hi";

pub fn hex32(value: u32) -> String {
    format!("0x{:08x}_u32", value)
}

pub fn hex64(value: u64) -> String {
    format!("0x{:016x}_u64", value)
}

fn byte_list(bytes: &[u8]) -> String {
    let items: Vec<String> = bytes.iter().map(|b| format!("0x{:02x}", b)).collect();
    format!("[{}]", items.join(", "))
}

pub fn render_table(result: &VectorResult) -> String {
    let case = &result.case;
    let (lo, hi) = result.hash128;
    format!(
        "Vector {{\n    name: \"{}\",\n    input: {},\n    seed64: {},\n    seed32: {},\n    hash64: {},\n    hash32: {},\n    hash128_lo: {},\n    hash128_hi: {},\n}},\n",
        case.name,
        byte_list(&case.input),
        hex64(case.seed64),
        hex32(case.seed32),
        hex64(result.hash64),
        hex32(result.hash32),
        hex64(lo),
        hex64(hi),
    )
}

pub fn render_compact(result: &VectorResult) -> String {
    let case = &result.case;
    let (lo, hi) = result.hash128;
    format!(
        "{},{},{},{},{},{},{},{}",
        case.name,
        hex::encode(&case.input),
        hex64(case.seed64),
        hex32(case.seed32),
        hex64(result.hash64),
        hex32(result.hash32),
        hex64(lo),
        hex64(hi),
    )
}

/// Serializes vector results to a stream in catalog order.
pub struct VectorEmitter<W: Write> {
    out: W,
    format: VectorFormat,
    emitted: usize,
}

impl<W: Write> VectorEmitter<W> {
    pub fn new(out: W, format: VectorFormat) -> Self {
        Self {
            out,
            format,
            emitted: 0,
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        match self.format {
            VectorFormat::Table => {
                writeln!(self.out, "// a5hash test vectors, catalog v{}", CATALOG_VERSION)?;
                writeln!(
                    self.out,
                    "// Fields: name, input, seed64, seed32, hash64, hash32, hash128_lo, hash128_hi"
                )?;
            }
            VectorFormat::Compact => writeln!(self.out, "{}", COMPACT_HEADER)?,
        }
        Ok(())
    }

    /// Writes a titled group of results. Titles only appear in table output.
    pub fn write_section(&mut self, title: &str, results: &[VectorResult]) -> Result<()> {
        if self.format == VectorFormat::Table {
            writeln!(self.out)?;
            writeln!(self.out, "// {}", title)?;
        }
        for result in results {
            match self.format {
                VectorFormat::Table => write!(self.out, "{}", render_table(result))?,
                VectorFormat::Compact => writeln!(self.out, "{}", render_compact(result))?,
            }
            self.emitted += 1;
        }
        Ok(())
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectors::VectorCase;

    fn sample_result() -> VectorResult {
        VectorResult {
            case: VectorCase::new("two", &[0x01, 0xab], 0x1234_5678_ABCD_EF00, 0x1234_5678),
            hash64: 0x0f2d_4f11_52e2_fd91,
            hash32: 0x0000_00ff,
            hash128: (1, 0xd945_ac0d_4f73_ca5d),
        }
    }

    #[test]
    fn test_render_table() {
        let text = render_table(&sample_result());
        let expected = "\
Vector {
    name: \"two\",
    input: [0x01, 0xab],
    seed64: 0x12345678abcdef00_u64,
    seed32: 0x12345678_u32,
    hash64: 0x0f2d4f1152e2fd91_u64,
    hash32: 0x000000ff_u32,
    hash128_lo: 0x0000000000000001_u64,
    hash128_hi: 0xd945ac0d4f73ca5d_u64,
},
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_empty_input() {
        let mut result = sample_result();
        result.case.input.clear();
        assert!(render_table(&result).contains("    input: [],\n"));
        assert!(render_compact(&result).starts_with("two,,0x"));
    }

    #[test]
    fn test_render_compact() {
        assert_eq!(
            render_compact(&sample_result()),
            "two,01ab,0x12345678abcdef00_u64,0x12345678_u32,0x0f2d4f1152e2fd91_u64,\
             0x000000ff_u32,0x0000000000000001_u64,0xd945ac0d4f73ca5d_u64"
        );
    }

    #[test]
    fn test_emitter_counts_and_sections() -> Result<()> {
        let results = vec![sample_result(), sample_result()];

        let mut table = VectorEmitter::new(Vec::new(), VectorFormat::Table);
        table.write_header()?;
        table.write_section("Boundary cases", &results)?;
        assert_eq!(table.emitted(), 2);
        let text = String::from_utf8(table.finish()?)?;
        assert!(text.starts_with("// a5hash test vectors, catalog v1\n"));
        assert!(text.contains("\n// Boundary cases\nVector {"));

        let mut compact = VectorEmitter::new(Vec::new(), VectorFormat::Compact);
        compact.write_header()?;
        compact.write_section("ignored", &results)?;
        let text = String::from_utf8(compact.finish()?)?;
        assert_eq!(text.lines().count(), 3);
        assert!(!text.contains("ignored"));
        Ok(())
    }
}
