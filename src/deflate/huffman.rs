//! Huffman code construction for the encoder.
//!
//!   - [`HuffmanBuilder`]: length-limited codeword lengths from symbol
//!     frequencies
//!   - [`make_canonical_codewords`]: canonical codewords (RFC 1951 §3.2.2),
//!     bit-reversed so they can be written LSB-first
//!
//! Every code produced here is complete: when fewer than two symbols are
//! used, a second symbol is given a 1-bit codeword so that strict decoders
//! accept the code.

use std::collections::TryReserveError;

use super::types::{MAX_CODEWORD_LEN, NUM_LITLEN_SYMS};

const MAX_NUM_SYMS: usize = NUM_LITLEN_SYMS;

/// Scratch space for [`make_lengths`](Self::make_lengths), sized once for
/// the largest DEFLATE alphabet.
pub struct HuffmanBuilder {
    syms: Vec<(u32, usize)>,
    weight: Vec<u64>,
    parent: Vec<usize>,
    depth: Vec<usize>,
}

impl HuffmanBuilder {
    pub fn new() -> Result<Self, TryReserveError> {
        let nodes = 2 * MAX_NUM_SYMS - 1;
        let mut syms = Vec::new();
        syms.try_reserve_exact(MAX_NUM_SYMS)?;
        let mut weight = Vec::new();
        weight.try_reserve_exact(nodes)?;
        let mut parent = Vec::new();
        parent.try_reserve_exact(nodes)?;
        let mut depth = Vec::new();
        depth.try_reserve_exact(nodes)?;
        Ok(Self { syms, weight, parent, depth })
    }

    /// Assign codeword lengths (at most `max_len` bits) to `freqs`.
    ///
    /// `lens` must have the same length as `freqs`; unused symbols get
    /// length 0.
    pub fn make_lengths(&mut self, freqs: &[u32], max_len: usize, lens: &mut [u8]) {
        debug_assert_eq!(freqs.len(), lens.len());
        debug_assert!(freqs.len() <= MAX_NUM_SYMS);
        debug_assert!(max_len <= MAX_CODEWORD_LEN);
        lens.fill(0);

        let Self { syms, weight, parent, depth } = self;
        syms.clear();
        syms.extend(
            freqs.iter().enumerate().filter(|&(_, &f)| f != 0).map(|(s, &f)| (f, s)),
        );

        match syms.len() {
            0 => {
                lens[0] = 1;
                lens[1] = 1;
                return;
            }
            1 => {
                let s = syms[0].1;
                lens[s] = 1;
                lens[if s == 0 { 1 } else { 0 }] = 1;
                return;
            }
            _ => {}
        }

        syms.sort_unstable();
        let n = syms.len();

        // Two-queue construction: leaves are sorted, and internal nodes are
        // created in non-decreasing weight order, so the two smallest nodes
        // are always at the front of one of the queues.
        weight.clear();
        weight.extend(syms.iter().map(|&(f, _)| f as u64));
        parent.clear();
        parent.resize(2 * n - 1, 0);
        let mut next_leaf = 0;
        let mut next_internal = n;
        for node in n..2 * n - 1 {
            let mut pick = || {
                let take_leaf = next_leaf < n
                    && (next_internal >= node || weight[next_leaf] <= weight[next_internal]);
                if take_leaf {
                    next_leaf += 1;
                    next_leaf - 1
                } else {
                    next_internal += 1;
                    next_internal - 1
                }
            };
            let a = pick();
            let b = pick();
            let w = weight[a] + weight[b];
            weight.push(w);
            parent[a] = node;
            parent[b] = node;
        }

        // Parents always have larger indices than their children.
        let root = 2 * n - 2;
        depth.clear();
        depth.resize(2 * n - 1, 0);
        for i in (0..root).rev() {
            depth[i] = depth[parent[i]] + 1;
        }

        let mut count = [0u32; MAX_CODEWORD_LEN + 1];
        for &d in &depth[..n] {
            count[d.min(max_len)] += 1;
        }

        // Clamping made the code over-subscribed; push leaves down until the
        // Kraft sum is exactly one again.
        let full = 1u32 << max_len;
        let mut total: u32 = (1..=max_len).map(|l| count[l] << (max_len - l)).sum();
        while total > full {
            count[max_len] -= 1;
            for l in (1..max_len).rev() {
                if count[l] != 0 {
                    count[l] -= 1;
                    count[l + 1] += 2;
                    break;
                }
            }
            total -= 1;
        }

        // Longest codewords go to the least frequent symbols.
        let mut it = syms.iter();
        for l in (1..=max_len).rev() {
            for _ in 0..count[l] {
                if let Some(&(_, s)) = it.next() {
                    lens[s] = l as u8;
                }
            }
        }
    }
}

/// Compute canonical codewords for `lens`, bit-reversed for LSB-first output.
pub fn make_canonical_codewords(lens: &[u8], codewords: &mut [u32]) {
    let mut count = [0u32; MAX_CODEWORD_LEN + 1];
    for &l in lens {
        count[l as usize] += 1;
    }
    count[0] = 0;

    let mut next_code = [0u32; MAX_CODEWORD_LEN + 2];
    for l in 1..=MAX_CODEWORD_LEN {
        next_code[l + 1] = (next_code[l] + count[l]) << 1;
    }

    for (sym, &l) in lens.iter().enumerate() {
        if l == 0 {
            codewords[sym] = 0;
            continue;
        }
        let code = next_code[l as usize];
        next_code[l as usize] += 1;
        codewords[sym] = reverse_bits(code, l as u32);
    }
}

#[inline(always)]
pub fn reverse_bits(code: u32, len: u32) -> u32 {
    code.reverse_bits() >> (32 - len)
}
