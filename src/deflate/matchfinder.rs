//! Hash-chain match finder over a 32 KiB sliding window.
//!
//! `head[h]` holds the most recent position whose next three bytes hash to
//! `h`; `prev[pos % WINDOW_SIZE]` links each position to the previous one in
//! the same bucket.  Chains are followed only while the candidate is within
//! [`MAX_MATCH_OFFSET`] of the current position, so slots recycled by the
//! window never produce a stale candidate.

use std::collections::TryReserveError;

use super::types::{MAX_MATCH_LEN, MAX_MATCH_OFFSET, MIN_MATCH_LEN, WINDOW_SIZE};

const NO_POS: usize = usize::MAX;
const WINDOW_MASK: usize = WINDOW_SIZE - 1;

/// A match found by the search: `len` bytes at distance `offset`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Match {
    pub len: usize,
    pub offset: usize,
}

pub struct MatchFinder {
    head: Vec<usize>,
    prev: Vec<usize>,
    hash_order: u32,
}

impl MatchFinder {
    /// Allocate the hash and chain tables for a `2^hash_order`-bucket table.
    pub fn new(hash_order: u32) -> Result<Self, TryReserveError> {
        let mut head = Vec::new();
        head.try_reserve_exact(1usize << hash_order)?;
        head.resize(1usize << hash_order, NO_POS);
        let mut prev = Vec::new();
        prev.try_reserve_exact(WINDOW_SIZE)?;
        prev.resize(WINDOW_SIZE, NO_POS);
        Ok(Self { head, prev, hash_order })
    }

    /// Forget every position; required before each new input buffer.
    pub fn reset(&mut self) {
        self.head.fill(NO_POS);
    }

    #[inline(always)]
    fn hash3(&self, data: &[u8], pos: usize) -> usize {
        let v = (data[pos] as u32) | ((data[pos + 1] as u32) << 8) | ((data[pos + 2] as u32) << 16);
        (v.wrapping_mul(0x9E37_79B1) >> (32 - self.hash_order)) as usize
    }

    /// Search for a match at `pos` longer than `min_len`, then insert `pos`.
    ///
    /// At most `max_depth` candidates are compared; the search stops early
    /// once a match of `nice_len` bytes is found.
    pub fn find(
        &mut self,
        data: &[u8],
        pos: usize,
        max_depth: u32,
        nice_len: usize,
        min_len: usize,
    ) -> Option<Match> {
        let max_len = MAX_MATCH_LEN.min(data.len() - pos);
        if max_len < MIN_MATCH_LEN {
            return None;
        }
        let h = self.hash3(data, pos);
        let first = self.head[h];

        let mut best_len = min_len.max(MIN_MATCH_LEN - 1);
        let mut best_offset = 0;
        let mut cand = first;
        let mut depth = max_depth;
        while cand != NO_POS && depth > 0 && best_len < max_len {
            let offset = pos - cand;
            if offset > MAX_MATCH_OFFSET {
                break;
            }
            if data[cand + best_len] == data[pos + best_len] {
                let len = match_len(data, cand, pos, max_len);
                if len > best_len {
                    best_len = len;
                    best_offset = offset;
                    if len >= nice_len {
                        break;
                    }
                }
            }
            let next = self.prev[cand & WINDOW_MASK];
            if next == NO_POS || next >= cand {
                break;
            }
            cand = next;
            depth -= 1;
        }

        self.head[h] = pos;
        self.prev[pos & WINDOW_MASK] = first;

        (best_offset != 0).then_some(Match { len: best_len, offset: best_offset })
    }

    /// Insert `pos` without searching (positions covered by a match).
    #[inline]
    pub fn skip(&mut self, data: &[u8], pos: usize) {
        if pos + MIN_MATCH_LEN > data.len() {
            return;
        }
        let h = self.hash3(data, pos);
        self.prev[pos & WINDOW_MASK] = self.head[h];
        self.head[h] = pos;
    }
}

#[inline(always)]
fn load_u64(data: &[u8], i: usize) -> u64 {
    let mut w = [0u8; 8];
    w.copy_from_slice(&data[i..i + 8]);
    u64::from_le_bytes(w)
}

/// Number of equal bytes at `a` and `b` (`a < b`), capped at `max_len`.
#[inline(always)]
pub fn match_len(data: &[u8], a: usize, b: usize, max_len: usize) -> usize {
    let mut len = 0;
    while len + 8 <= max_len {
        let x = load_u64(data, a + len) ^ load_u64(data, b + len);
        if x != 0 {
            return len + (x.trailing_zeros() / 8) as usize;
        }
        len += 8;
    }
    while len < max_len && data[a + len] == data[b + len] {
        len += 1;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_len_counts_common_prefix() {
        let data = b"abcdefghijabcdefghiXabc";
        assert_eq!(match_len(data, 0, 10, 13), 9);
        assert_eq!(match_len(data, 0, 20, 3), 3);
    }

    #[test]
    fn finds_repeat_at_correct_distance() {
        let data = b"hello world, hello world";
        let mut mf = MatchFinder::new(12).unwrap();
        let mut found = None;
        for pos in 0..data.len() {
            let m = mf.find(data, pos, 16, 258, 0);
            if pos == 13 {
                found = m;
            }
        }
        assert_eq!(found, Some(Match { len: 11, offset: 13 }));
    }

    #[test]
    fn reset_forgets_previous_input() {
        let data = b"abcabcabc";
        let mut mf = MatchFinder::new(10).unwrap();
        for pos in 0..data.len() {
            mf.find(data, pos, 8, 258, 0);
        }
        mf.reset();
        assert_eq!(mf.find(b"abcXYZ", 0, 8, 258, 0), None);
    }
}
