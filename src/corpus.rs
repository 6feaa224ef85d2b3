//! Deterministic input corpus shared by every benchmark sample.

use anyhow::{anyhow, Result};

/// Byte value stored at `index` of any corpus.
#[inline]
pub fn byte_at(index: usize) -> u8 {
    (index.wrapping_mul(31).wrapping_add(17) & 0xFF) as u8
}

/// Generates `length` bytes where byte `i` is `(i * 31 + 17) mod 256`.
///
/// The buffer is reserved up front with a fallible allocation so an
/// out-of-memory condition surfaces as an error instead of an abort.
pub fn generate(length: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(length)
        .map_err(|e| anyhow!("Failed to allocate {} byte corpus: {}", length, e))?;
    data.extend((0..length).map(byte_at));
    Ok(data)
}

/// Sequential bytes `0x00, 0x01, ...` wrapping at 256.
pub fn sequential(length: usize) -> Vec<u8> {
    (0..length).map(|i| i as u8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_rule() -> Result<()> {
        let data = generate(4096)?;
        assert_eq!(data.len(), 4096);
        for (i, &b) in data.iter().enumerate() {
            assert_eq!(b as usize, (i * 31 + 17) % 256);
        }
        assert_eq!(&data[..4], &[17, 48, 79, 110]);
        Ok(())
    }

    #[test]
    fn test_generate_is_deterministic() -> Result<()> {
        assert_eq!(generate(1 << 20)?, generate(1 << 20)?);
        assert!(generate(0)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_generate_reports_allocation_failure() {
        let err = generate(usize::MAX).unwrap_err();
        assert!(err.to_string().contains("Failed to allocate"));
    }

    #[test]
    fn test_sequential_wraps() {
        let data = sequential(300);
        assert_eq!(data[0], 0x00);
        assert_eq!(data[255], 0xFF);
        assert_eq!(data[256], 0x00);
    }
}
