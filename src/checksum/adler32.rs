//! Adler-32 (RFC 1950 §9).
//!
//! Two 16-bit sums modulo 65521.  The modulo is deferred for [`NMAX`] bytes,
//! the largest run for which `s2` cannot overflow a `u32`.

/// Largest prime smaller than 2^16.
pub const ADLER32_MOD: u32 = 65_521;

/// Adler-32 value of the empty message.
pub const ADLER32_INIT: u32 = 1;

/// Bytes that can be summed before `s2` may overflow 32 bits.
pub const NMAX: usize = 5552;

/// Update an Adler-32 with `data`.
///
/// `adler` is the value returned by a previous call, or [`ADLER32_INIT`] when
/// no data has been processed yet.  An empty `data` returns `adler` unchanged.
pub fn adler32(adler: u32, data: &[u8]) -> u32 {
    let mut s1 = adler & 0xFFFF;
    let mut s2 = adler >> 16;

    for block in data.chunks(NMAX) {
        let mut quads = block.chunks_exact(4);
        for q in &mut quads {
            s1 += q[0] as u32;
            s2 += s1;
            s1 += q[1] as u32;
            s2 += s1;
            s1 += q[2] as u32;
            s2 += s1;
            s1 += q[3] as u32;
            s2 += s1;
        }
        for &b in quads.remainder() {
            s1 += b as u32;
            s2 += s1;
        }
        s1 %= ADLER32_MOD;
        s2 %= ADLER32_MOD;
    }

    (s2 << 16) | s1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wikipedia_vector() {
        assert_eq!(adler32(ADLER32_INIT, b"Wikipedia"), 0x11E6_0398);
    }

    #[test]
    fn long_run_of_0xff_does_not_overflow() {
        let data = vec![0xFFu8; 3 * NMAX + 17];
        let mut s1: u64 = 1;
        let mut s2: u64 = 0;
        for &b in &data {
            s1 = (s1 + b as u64) % ADLER32_MOD as u64;
            s2 = (s2 + s1) % ADLER32_MOD as u64;
        }
        assert_eq!(adler32(ADLER32_INIT, &data), ((s2 << 16) | s1) as u32);
    }
}
