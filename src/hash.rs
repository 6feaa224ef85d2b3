//! The hash family under test.
//!
//! Everything else in the crate talks to the hashes through [`HashContract`];
//! [`A5Hash`] is the portable scalar implementation that ships with the harness.
//! All loads are little-endian, so outputs are identical on every target.

/// Call contract for the three hash primitives.
///
/// Implementations must be pure: the same `(data, seed)` always maps to the
/// same output, with no hidden state.
pub trait HashContract {
    fn hash64(&self, data: &[u8], seed: u64) -> u64;
    fn hash32(&self, data: &[u8], seed: u32) -> u32;
    /// Returns `(low, high)`.
    fn hash128(&self, data: &[u8], seed: u64) -> (u64, u64);

    // Fixed-width keys hash their little-endian bytes. Implementations may
    // override these with direct paths as long as the outputs stay equal.

    fn hash64_u32(&self, value: u32, seed: u64) -> u64 {
        self.hash64(&value.to_le_bytes(), seed)
    }

    fn hash64_u64(&self, value: u64, seed: u64) -> u64 {
        self.hash64(&value.to_le_bytes(), seed)
    }

    fn hash32_u32(&self, value: u32, seed: u32) -> u32 {
        self.hash32(&value.to_le_bytes(), seed)
    }

    fn hash32_u64(&self, value: u64, seed: u32) -> u32 {
        self.hash32(&value.to_le_bytes(), seed)
    }

    fn hash128_u32(&self, value: u32, seed: u64) -> (u64, u64) {
        self.hash128(&value.to_le_bytes(), seed)
    }

    fn hash128_u64(&self, value: u64, seed: u64) -> (u64, u64) {
        self.hash128(&value.to_le_bytes(), seed)
    }

    /// Four independent 4-byte keys per call.
    fn hash32_x4(&self, values: [u32; 4], seed: u32) -> [u32; 4] {
        values.map(|v| self.hash32_u32(v, seed))
    }
}

const VAL01: u64 = 0x5555_5555_5555_5555; // `01` bit-pairs
const VAL10: u64 = 0xAAAA_AAAA_AAAA_AAAA; // `10` bit-pairs

// Mantissa bits of PI.
const PI1: u64 = 0x243F_6A88_85A3_08D3;
const PI2: u64 = 0x4528_21E6_38D0_1377;
const PI3: u64 = 0xA409_3822_299F_31D0;
const PI4: u64 = 0xC0AC_29B7_C97C_50DD;
const PI5: u64 = 0x082E_FA98_EC4E_6C89;
const PI6: u64 = 0x3F84_D5B5_B547_0917;
const PI7: u64 = 0x1319_8A2E_0370_7344;
const PI8: u64 = 0xBE54_66CF_34E9_0C6C;

/// Stateless implementation of the a5hash family.
#[derive(Debug, Clone, Copy, Default)]
pub struct A5Hash;

impl HashContract for A5Hash {
    fn hash64(&self, data: &[u8], seed: u64) -> u64 {
        a5hash(data, seed)
    }

    fn hash32(&self, data: &[u8], seed: u32) -> u32 {
        a5hash32(data, seed)
    }

    fn hash128(&self, data: &[u8], seed: u64) -> (u64, u64) {
        a5hash128(data, seed)
    }

    fn hash64_u32(&self, value: u32, seed: u64) -> u64 {
        a5hash_u32(value, seed)
    }

    fn hash64_u64(&self, value: u64, seed: u64) -> u64 {
        a5hash_u64(value, seed)
    }

    fn hash32_u32(&self, value: u32, seed: u32) -> u32 {
        a5hash32_u32(value, seed)
    }

    fn hash32_u64(&self, value: u64, seed: u32) -> u32 {
        a5hash32_u64(value, seed)
    }

    fn hash128_u32(&self, value: u32, seed: u64) -> (u64, u64) {
        a5hash128_u32(value, seed)
    }

    fn hash128_u64(&self, value: u64, seed: u64) -> (u64, u64) {
        a5hash128_u64(value, seed)
    }

    fn hash32_x4(&self, values: [u32; 4], seed: u32) -> [u32; 4] {
        a5hash32_x4(values, seed)
    }
}

/// a5hash bound to preconfigured seeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct A5Hasher {
    seed64: u64,
    seed32: u32,
}

impl A5Hasher {
    /// The 32-bit variant uses the low half of `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed64: seed,
            seed32: seed as u32,
        }
    }

    pub fn with_seeds(seed64: u64, seed32: u32) -> Self {
        Self { seed64, seed32 }
    }

    pub fn seed64(&self) -> u64 {
        self.seed64
    }

    pub fn seed32(&self) -> u32 {
        self.seed32
    }

    pub fn hash(&self, data: &[u8]) -> u64 {
        a5hash(data, self.seed64)
    }

    pub fn hash32(&self, data: &[u8]) -> u32 {
        a5hash32(data, self.seed32)
    }

    pub fn hash128(&self, data: &[u8]) -> (u64, u64) {
        a5hash128(data, self.seed64)
    }

    /// Hashes the 4 little-endian bytes of `value`.
    pub fn hash_u32(&self, value: u32) -> u64 {
        a5hash_u32(value, self.seed64)
    }

    /// Hashes the 8 little-endian bytes of `value`.
    pub fn hash_u64(&self, value: u64) -> u64 {
        a5hash_u64(value, self.seed64)
    }

    pub fn hash32_u32(&self, value: u32) -> u32 {
        a5hash32_u32(value, self.seed32)
    }

    pub fn hash32_u64(&self, value: u64) -> u32 {
        a5hash32_u64(value, self.seed32)
    }

    pub fn hash128_u32(&self, value: u32) -> (u64, u64) {
        a5hash128_u32(value, self.seed64)
    }

    pub fn hash128_u64(&self, value: u64) -> (u64, u64) {
        a5hash128_u64(value, self.seed64)
    }

    pub fn hash32_x4(&self, values: [u32; 4]) -> [u32; 4] {
        a5hash32_x4(values, self.seed32)
    }

    /// Hashes UTF-16 code units as their little-endian bytes.
    pub fn hash_utf16(&self, units: &[u16]) -> u64 {
        self.hash(&utf16_le_bytes(units))
    }

    pub fn hash32_utf16(&self, units: &[u16]) -> u32 {
        self.hash32(&utf16_le_bytes(units))
    }

    pub fn hash128_utf16(&self, units: &[u16]) -> (u64, u64) {
        self.hash128(&utf16_le_bytes(units))
    }

    /// Hashes `text` in its UTF-16 form, so surrogate pairs contribute four bytes.
    pub fn hash_str(&self, text: &str) -> u64 {
        self.hash(&str_utf16_le_bytes(text))
    }

    pub fn hash32_str(&self, text: &str) -> u32 {
        self.hash32(&str_utf16_le_bytes(text))
    }

    pub fn hash128_str(&self, text: &str) -> (u64, u64) {
        self.hash128(&str_utf16_le_bytes(text))
    }
}

/// Byte layout string hashing reads: each code unit, little-endian.
pub fn utf16_le_bytes(units: &[u16]) -> Vec<u8> {
    units.iter().flat_map(|u| u.to_le_bytes()).collect()
}

pub fn str_utf16_le_bytes(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

#[inline(always)]
fn umul128(u: u64, v: u64) -> (u64, u64) {
    let r = (u as u128) * (v as u128);
    (r as u64, (r >> 64) as u64)
}

#[inline(always)]
fn umul64(u: u32, v: u32) -> (u32, u32) {
    let r = (u as u64) * (v as u64);
    (r as u32, (r >> 32) as u32)
}

#[inline(always)]
fn load_u32(msg: &[u8], at: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&msg[at..at + 4]);
    u32::from_le_bytes(buf)
}

#[inline(always)]
fn load_u64(msg: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&msg[at..at + 8]);
    u64::from_le_bytes(buf)
}

/// Packs the 1..=3 bytes starting at `at` into the low bits of a word.
#[inline(always)]
fn load_short(msg: &[u8], at: usize, len: usize) -> u64 {
    let mut v = msg[at] as u64;
    if len > 1 {
        v |= (msg[at + 1] as u64) << 8;
        if len > 2 {
            v |= (msg[at + 2] as u64) << 16;
        }
    }
    v
}

/// Offset of the inner word pair for 8..=16 byte inputs: 4, or 8 at exactly 16.
#[inline(always)]
fn middle_offset(len: usize) -> usize {
    (len >> 3) << 2
}

#[inline(always)]
fn init64(len: u64, use_seed: u64) -> (u64, u64) {
    umul128(PI2 ^ len ^ (use_seed & VAL10), PI1 ^ len ^ (use_seed & VAL01))
}

#[inline(always)]
fn finalize64(seed1: u64, seed2: u64, val01: u64) -> u64 {
    let (seed1, seed2) = umul128(seed1, seed2);
    let (seed1, seed2) = umul128(val01 ^ seed1, seed2);
    seed1 ^ seed2
}

/// 64-bit a5hash.
pub fn a5hash(msg: &[u8], use_seed: u64) -> u64 {
    let len = msg.len();
    let mut val01 = VAL01;
    let mut val10 = VAL10;

    let (mut seed1, mut seed2) = init64(len as u64, use_seed);

    let mut pos = 0usize;
    let mut rem = len;

    if rem > 16 {
        val01 ^= seed1;
        val10 ^= seed2;

        loop {
            (seed1, seed2) = umul128(
                load_u64(msg, pos).rotate_left(32) ^ seed1,
                load_u64(msg, pos + 8).rotate_left(32) ^ seed2,
            );
            rem -= 16;
            pos += 16;
            seed1 = seed1.wrapping_add(val01);
            seed2 = seed2.wrapping_add(val10);
            if rem <= 16 {
                break;
            }
        }
    }

    if rem == 16 {
        let u0 = load_u64(msg, pos);
        let u1 = load_u64(msg, pos + 8);
        seed1 ^= ((u0 & 0xFFFF_FFFF) << 32) | (u1 >> 32);
        seed2 ^= ((u1 & 0xFFFF_FFFF) << 32) | (u0 >> 32);
    } else if rem > 3 {
        let tail = pos + rem - 4;
        let t1 = ((load_u32(msg, pos) as u64) << 32) | load_u32(msg, tail) as u64;
        seed1 ^= t1;
        if rem < 8 {
            seed2 ^= t1;
        } else {
            seed2 ^= ((load_u32(msg, pos + 4) as u64) << 32) | load_u32(msg, tail - 4) as u64;
        }
    } else if rem > 0 {
        seed1 ^= load_short(msg, pos, rem);
    }

    finalize64(seed1, seed2, val01)
}

const SEED3_32: u32 = 0xFB0B_D3EA;
const SEED4_32: u32 = 0x0F58_FD47;

#[inline(always)]
fn init32(len: u32, use_seed: u32) -> (u32, u32) {
    umul64(
        0x85A3_08D3 ^ len ^ (use_seed & VAL10 as u32),
        0x243F_6A88 ^ len ^ (use_seed & VAL01 as u32),
    )
}

#[inline(always)]
fn finalize32(
    a: u32,
    b: u32,
    mut seed1: u32,
    mut seed2: u32,
    seed3: u32,
    seed4: u32,
    val01: u32,
) -> u32 {
    seed1 ^= seed3;
    seed2 ^= seed4;
    let (seed1, seed2) = umul64(a.wrapping_add(seed1), b.wrapping_add(seed2));
    let (a, b) = umul64(val01 ^ seed1, seed2);
    a ^ b
}

/// 32-bit a5hash. Uses only 32-bit multiplies.
pub fn a5hash32(msg: &[u8], use_seed: u32) -> u32 {
    let len = msg.len();
    let mut val01 = VAL01 as u32;
    let mut val10 = VAL10 as u32;

    let (mut seed1, mut seed2) = init32(len as u32, use_seed);
    let mut seed3 = SEED3_32;
    let mut seed4 = SEED4_32;

    if len < 17 {
        if len > 3 {
            let a = load_u32(msg, 0);
            let b = load_u32(msg, len - 4);
            if len >= 9 {
                let mo = middle_offset(len);
                let c = load_u32(msg, mo);
                let d = load_u32(msg, len - 4 - mo);
                (seed3, seed4) = umul64(c.wrapping_add(seed3), d.wrapping_add(seed4));
            }
            return finalize32(a, b, seed1, seed2, seed3, seed4, val01);
        }

        let a = if len > 0 {
            load_short(msg, 0, len) as u32
        } else {
            0
        };
        return finalize32(a, 0, seed1, seed2, seed3, seed4, val01);
    }

    val01 ^= seed1;
    val10 ^= seed2;

    let mut pos = 0usize;
    let mut rem = len;
    loop {
        let s1 = seed1;
        let s4 = seed4;

        (seed1, seed2) = umul64(
            load_u32(msg, pos).wrapping_add(seed1),
            load_u32(msg, pos + 4).wrapping_add(seed2),
        );
        (seed3, seed4) = umul64(
            load_u32(msg, pos + 8).wrapping_add(seed3),
            load_u32(msg, pos + 12).wrapping_add(seed4),
        );

        rem -= 16;
        pos += 16;

        seed1 = seed1.wrapping_add(val01);
        seed2 = seed2.wrapping_add(s4);
        seed3 = seed3.wrapping_add(s1);
        seed4 = seed4.wrapping_add(val10);

        if rem <= 16 {
            break;
        }
    }

    // Tail reads may reach back into already consumed bytes.
    let end = pos + rem;
    let a = load_u32(msg, end - 8);
    let b = load_u32(msg, end - 4);
    if rem >= 9 {
        let c = load_u32(msg, end - 16);
        let d = load_u32(msg, end - 12);
        (seed3, seed4) = umul64(c.wrapping_add(seed3), d.wrapping_add(seed4));
    }

    finalize32(a, b, seed1, seed2, seed3, seed4, val01)
}

#[derive(Clone, Copy)]
struct Lanes {
    seed1: u64,
    seed2: u64,
    seed3: u64,
    seed4: u64,
}

impl Lanes {
    #[inline(always)]
    fn new(len: u64, use_seed: u64) -> Self {
        let (seed1, seed2) = init64(len, use_seed);
        Self {
            seed1,
            seed2,
            seed3: PI3,
            seed4: PI4,
        }
    }

    #[inline(always)]
    fn finish(self, a: u64, b: u64, val01: u64) -> (u64, u64) {
        let (seed1, seed2) = umul128(a.wrapping_add(self.seed1), b.wrapping_add(self.seed2));
        let (lo, hi) = umul128(val01 ^ seed1, seed2);
        let (seed3, seed4) = umul128(seed1 ^ self.seed3, seed2 ^ self.seed4);
        (lo ^ hi, seed3 ^ seed4)
    }

    #[inline(always)]
    fn finish_merged(mut self, a: u64, b: u64, val01: u64) -> (u64, u64) {
        self.seed1 ^= self.seed3;
        self.seed2 ^= self.seed4;
        self.finish(a, b, val01)
    }

    #[inline(always)]
    fn finish_with_cd(mut self, a: u64, b: u64, c: u64, d: u64, val01: u64) -> (u64, u64) {
        (self.seed3, self.seed4) =
            umul128(c.wrapping_add(self.seed3), d.wrapping_add(self.seed4));
        self.finish_merged(a, b, val01)
    }

    #[inline(always)]
    fn absorb32(&mut self, msg: &[u8], at: usize, val01: u64, val10: u64) {
        let s1 = self.seed1;

        (self.seed1, self.seed2) = umul128(
            load_u64(msg, at).wrapping_add(self.seed1),
            load_u64(msg, at + 8).wrapping_add(self.seed2),
        );
        self.seed1 = self.seed1.wrapping_add(val01);
        self.seed2 = self.seed2.wrapping_add(self.seed4);

        (self.seed3, self.seed4) = umul128(
            load_u64(msg, at + 16).wrapping_add(self.seed3),
            load_u64(msg, at + 24).wrapping_add(self.seed4),
        );
        self.seed3 = self.seed3.wrapping_add(s1);
        self.seed4 = self.seed4.wrapping_add(val10);
    }
}

/// 128-bit a5hash, returned as `(low, high)`.
pub fn a5hash128(msg: &[u8], use_seed: u64) -> (u64, u64) {
    let len = msg.len();
    let mut val01 = VAL01;
    let mut val10 = VAL10;

    let mut lanes = Lanes::new(len as u64, use_seed);

    if len < 17 {
        if len > 3 {
            let tail = len - 4;
            let a = ((load_u32(msg, 0) as u64) << 32) | load_u32(msg, tail) as u64;
            let b = if len < 8 {
                a
            } else {
                let mo = middle_offset(len);
                ((load_u32(msg, mo) as u64) << 32) | load_u32(msg, tail - mo) as u64
            };
            return lanes.finish(a, b, val01);
        }

        let a = if len > 0 { load_short(msg, 0, len) } else { 0 };
        return lanes.finish(a, 0, val01);
    }

    if len < 33 {
        let a = load_u64(msg, 0).rotate_left(32);
        let b = load_u64(msg, 8).rotate_left(32);
        let c = load_u64(msg, len - 16).rotate_left(32);
        let d = load_u64(msg, len - 8).rotate_left(32);
        return lanes.finish_with_cd(a, b, c, d, val01);
    }

    val01 ^= lanes.seed1;
    val10 ^= lanes.seed2;

    let mut pos = 0usize;
    let mut rem = len;

    if rem > 64 {
        let mut seed5 = PI5;
        let mut seed6 = PI6;
        let mut seed7 = PI7;
        let mut seed8 = PI8;

        loop {
            let s1 = lanes.seed1;
            let s3 = lanes.seed3;
            let s5 = seed5;

            (lanes.seed1, lanes.seed2) = umul128(
                load_u64(msg, pos).wrapping_add(lanes.seed1),
                load_u64(msg, pos + 32).wrapping_add(lanes.seed2),
            );
            lanes.seed1 = lanes.seed1.wrapping_add(val01);
            lanes.seed2 = lanes.seed2.wrapping_add(seed8);

            (lanes.seed3, lanes.seed4) = umul128(
                load_u64(msg, pos + 8).wrapping_add(lanes.seed3),
                load_u64(msg, pos + 40).wrapping_add(lanes.seed4),
            );
            lanes.seed3 = lanes.seed3.wrapping_add(s1);
            lanes.seed4 = lanes.seed4.wrapping_add(val10);

            (seed5, seed6) = umul128(
                load_u64(msg, pos + 16).wrapping_add(seed5),
                load_u64(msg, pos + 48).wrapping_add(seed6),
            );
            (seed7, seed8) = umul128(
                load_u64(msg, pos + 24).wrapping_add(seed7),
                load_u64(msg, pos + 56).wrapping_add(seed8),
            );

            rem -= 64;
            pos += 64;

            seed5 = seed5.wrapping_add(s3);
            seed6 = seed6.wrapping_add(val10);
            seed7 = seed7.wrapping_add(s5);
            seed8 = seed8.wrapping_add(val10);

            if rem <= 64 {
                break;
            }
        }

        lanes.seed1 ^= seed5;
        lanes.seed2 ^= seed6;
        lanes.seed3 ^= seed7;
        lanes.seed4 ^= seed8;

        if rem > 32 {
            lanes.absorb32(msg, pos, val01, val10);
            rem -= 32;
            pos += 32;
        }
    } else {
        lanes.absorb32(msg, pos, val01, val10);
        rem -= 32;
        pos += 32;
    }

    let end = pos + rem;
    let a = load_u64(msg, end - 16);
    let b = load_u64(msg, end - 8);

    if rem < 17 {
        return lanes.finish_merged(a, b, val01);
    }

    let c = load_u64(msg, end - 32);
    let d = load_u64(msg, end - 24);
    lanes.finish_with_cd(a, b, c, d, val01)
}

/// Both halves of a 4-byte key, as the short path packs them.
#[inline(always)]
fn spread(value: u32) -> u64 {
    ((value as u64) << 32) | value as u64
}

/// [`a5hash`] of `value.to_le_bytes()`, without the byte loads.
pub fn a5hash_u32(value: u32, use_seed: u64) -> u64 {
    let (seed1, seed2) = init64(4, use_seed);
    let t = spread(value);
    finalize64(seed1 ^ t, seed2 ^ t, VAL01)
}

/// [`a5hash`] of `value.to_le_bytes()`, without the byte loads.
pub fn a5hash_u64(value: u64, use_seed: u64) -> u64 {
    let (seed1, seed2) = init64(8, use_seed);
    finalize64(seed1 ^ value.rotate_left(32), seed2 ^ value, VAL01)
}

pub fn a5hash32_u32(value: u32, use_seed: u32) -> u32 {
    let (seed1, seed2) = init32(4, use_seed);
    finalize32(value, value, seed1, seed2, SEED3_32, SEED4_32, VAL01 as u32)
}

pub fn a5hash32_u64(value: u64, use_seed: u32) -> u32 {
    let (seed1, seed2) = init32(8, use_seed);
    let (lo, hi) = (value as u32, (value >> 32) as u32);
    finalize32(lo, hi, seed1, seed2, SEED3_32, SEED4_32, VAL01 as u32)
}

pub fn a5hash128_u32(value: u32, use_seed: u64) -> (u64, u64) {
    let t = spread(value);
    Lanes::new(4, use_seed).finish(t, t, VAL01)
}

pub fn a5hash128_u64(value: u64, use_seed: u64) -> (u64, u64) {
    Lanes::new(8, use_seed).finish(value.rotate_left(32), value, VAL01)
}

/// Four 4-byte keys hashed with the same seed. The seed schedule is shared,
/// leaving four independent multiply chains.
pub fn a5hash32_x4(values: [u32; 4], use_seed: u32) -> [u32; 4] {
    let (seed1, seed2) = init32(4, use_seed);
    values.map(|v| finalize32(v, v, seed1, seed2, SEED3_32, SEED4_32, VAL01 as u32))
}
