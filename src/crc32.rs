//! Table-driven CRC-32 (IEEE, reflected polynomial 0xEDB88320).
//!
//! Used only as a throughput baseline next to the hashes under test.

use std::sync::OnceLock;

pub const POLYNOMIAL: u32 = 0xEDB8_8320;

/// CRC-32 engine owning a lazily built lookup table.
///
/// The table is built on first use; concurrent first calls block on the
/// same initialisation and all observe one table.
#[derive(Debug, Default)]
pub struct Crc32 {
    table: OnceLock<[u32; 256]>,
}

impl Crc32 {
    pub const fn new() -> Self {
        Self {
            table: OnceLock::new(),
        }
    }

    /// Process-wide instance for callers that don't hold their own.
    pub fn shared() -> &'static Crc32 {
        static SHARED: Crc32 = Crc32::new();
        &SHARED
    }

    pub fn table(&self) -> &[u32; 256] {
        self.table.get_or_init(build_table)
    }

    pub fn is_initialized(&self) -> bool {
        self.table.get().is_some()
    }

    pub fn checksum(&self, bytes: &[u8]) -> u32 {
        let table = self.table();
        let mut c = 0xFFFF_FFFFu32;
        for &b in bytes {
            c = table[((c ^ b as u32) & 0xFF) as usize] ^ (c >> 8);
        }
        c ^ 0xFFFF_FFFF
    }
}

fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    for (n, entry) in table.iter_mut().enumerate() {
        let mut c = n as u32;
        for _ in 0..8 {
            c = if c & 1 != 0 {
                POLYNOMIAL ^ (c >> 1)
            } else {
                c >> 1
            };
        }
        *entry = c;
    }
    table
}

/// CRC-32 of `bytes` using the shared table.
pub fn crc32(bytes: &[u8]) -> u32 {
    Crc32::shared().checksum(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_check_values() {
        assert_eq!(crc32(b""), 0x0000_0000);
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
        assert_eq!(
            crc32(b"The quick brown fox jumps over the lazy dog"),
            0x414F_A339
        );
    }

    #[test]
    fn test_table_is_lazy_and_stable() {
        let crc = Crc32::new();
        assert!(!crc.is_initialized());

        let first = crc.checksum(b"hello");
        assert!(crc.is_initialized());
        let snapshot = *crc.table();

        for _ in 0..16 {
            assert_eq!(crc.checksum(b"hello"), first);
        }
        assert_eq!(*crc.table(), snapshot);
        assert_eq!(snapshot[0], 0);
        assert_eq!(snapshot[1], 0x7707_3096);
        assert_eq!(snapshot[255], 0x2D02_EF8D);
    }

    #[test]
    fn test_concurrent_first_use() {
        let crc = Arc::new(Crc32::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let crc = crc.clone();
                thread::spawn(move || (crc.checksum(b"123456789"), *crc.table()))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for (sum, table) in &results {
            assert_eq!(*sum, 0xCBF4_3926);
            assert_eq!(table, &results[0].1);
        }
    }
}
