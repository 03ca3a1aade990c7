//! DEFLATE block encoder (RFC 1951).
//!
//! [`DeflateCompressor::compress`] turns a whole input buffer into a
//! complete, final-flagged DEFLATE stream:
//!
//! 1. Inputs of at most [`MAX_PASSTHROUGH_LEN`] bytes are stored verbatim.
//! 2. Otherwise the input is parsed into literal/match tokens with the
//!    level's [`Strategy`], one block of roughly [`SOFT_MAX_BLOCK_LENGTH`]
//!    input bytes at a time.
//! 3. For every block, the exact cost of a dynamic-Huffman, static-Huffman
//!    and stored encoding is computed and the cheapest one is written.
//!
//! Because a block is never written larger than its stored form, the output
//! never exceeds [`deflate_compress_bound`].  Running out of output space is
//! reported as [`CompressError::InsufficientSpace`] rather than as a zero
//! byte count, so an empty input (which encodes to a 5-byte stored block) is
//! never confused with a failure.

use core::fmt;
use std::collections::TryReserveError;

use super::bitstream::OutputBitstream;
use super::huffman::{make_canonical_codewords, HuffmanBuilder};
use super::matchfinder::MatchFinder;
use super::params::{level_params, LevelParams, Strategy};
use super::types::{
    length_slot, offset_slot, BLOCKTYPE_DYNAMIC_HUFFMAN, BLOCKTYPE_STATIC_HUFFMAN,
    BLOCKTYPE_STORED, END_OF_BLOCK, LENGTH_BASE, LENGTH_EXTRA, MAX_CODEWORD_LEN,
    MAX_MATCH_LEN, MAX_PRE_CODEWORD_LEN, MAX_STORED_BLOCK_LEN, MIN_MATCH_LEN, NUM_LITERALS,
    NUM_LITLEN_SYMS, NUM_OFFSET_SYMS, NUM_PRECODE_SYMS, NUM_USED_LITLEN_SYMS,
    NUM_USED_OFFSET_SYMS, OFFSET_BASE, OFFSET_EXTRA, PRECODE_LENS_PERMUTATION,
    STATIC_LITLEN_LENS, STATIC_OFFSET_LENS,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Inputs up to this size are always emitted as a single stored block.
pub const MAX_PASSTHROUGH_LEN: usize = 55;

/// A block is closed once it covers at least this many input bytes.
pub const SOFT_MAX_BLOCK_LENGTH: usize = 128 * 1024;

/// Block length assumed by [`deflate_compress_bound`]; every non-final block
/// is longer, so the real number of stored-block headers is never larger.
pub const MIN_BLOCK_LENGTH: usize = 10_000;

/// Slack added to the bound for the final partial byte.
pub const OUTPUT_END_PADDING: usize = 8;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by the DEFLATE encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressError {
    /// The output slice cannot hold the compressed stream.
    InsufficientSpace,
}

impl fmt::Display for CompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressError::InsufficientSpace => f.write_str("insufficient output space"),
        }
    }
}

impl std::error::Error for CompressError {}

// ─────────────────────────────────────────────────────────────────────────────
// Bound
// ─────────────────────────────────────────────────────────────────────────────

/// Worst-case size of a raw DEFLATE stream for `in_len` input bytes.
///
/// Every block costs at most its stored encoding: 5 bytes of header per
/// stored block plus the payload.
pub fn deflate_compress_bound(in_len: usize) -> usize {
    let max_blocks = in_len.div_ceil(MIN_BLOCK_LENGTH).max(1);
    5 * max_blocks + in_len + 1 + OUTPUT_END_PADDING
}

// ─────────────────────────────────────────────────────────────────────────────
// Tokens and codes
// ─────────────────────────────────────────────────────────────────────────────

/// A literal (`offset == 0`, `litlen` is the byte) or a match
/// (`litlen` is the length, `offset` the distance).
#[derive(Clone, Copy, Debug)]
struct Token {
    litlen: u16,
    offset: u16,
}

/// Codeword lengths and bit-reversed codewords for one block.
struct Codes {
    litlen_lens: [u8; NUM_LITLEN_SYMS],
    litlen_codewords: [u32; NUM_LITLEN_SYMS],
    offset_lens: [u8; NUM_OFFSET_SYMS],
    offset_codewords: [u32; NUM_OFFSET_SYMS],
}

impl Codes {
    const fn empty() -> Self {
        Self {
            litlen_lens: [0; NUM_LITLEN_SYMS],
            litlen_codewords: [0; NUM_LITLEN_SYMS],
            offset_lens: [0; NUM_OFFSET_SYMS],
            offset_codewords: [0; NUM_OFFSET_SYMS],
        }
    }

    fn fixed() -> Self {
        let mut codes = Self::empty();
        codes.litlen_lens = STATIC_LITLEN_LENS;
        codes.offset_lens = STATIC_OFFSET_LENS;
        codes.assign_codewords();
        codes
    }

    fn assign_codewords(&mut self) {
        make_canonical_codewords(&self.litlen_lens, &mut self.litlen_codewords);
        make_canonical_codewords(&self.offset_lens, &mut self.offset_codewords);
    }
}

/// Run-length encoded code-length sequence of a dynamic block header.
struct Precode {
    num_litlen: usize,
    num_offset: usize,
    num_explicit: usize,
    lens: [u8; NUM_PRECODE_SYMS],
    codewords: [u32; NUM_PRECODE_SYMS],
    /// `(symbol, extra bits value)` pairs.
    items: Vec<(u8, u8)>,
}

const PRECODE_EXTRA: [u32; NUM_PRECODE_SYMS] =
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 3, 7];

// ─────────────────────────────────────────────────────────────────────────────
// DeflateCompressor
// ─────────────────────────────────────────────────────────────────────────────

/// Reusable DEFLATE encoder.  Holds the match-finder tables and per-block
/// scratch buffers sized for its compression level; no state carries over
/// between calls to [`compress`](Self::compress).
pub struct DeflateCompressor {
    level: i32,
    params: LevelParams,
    mf: MatchFinder,
    tokens: Vec<Token>,
    litlen_freqs: [u32; NUM_LITLEN_SYMS],
    offset_freqs: [u32; NUM_OFFSET_SYMS],
    dynamic: Codes,
    fixed: Codes,
    precode: Precode,
    huffman: HuffmanBuilder,
}

impl DeflateCompressor {
    /// Allocate an encoder for `level`.
    ///
    /// Returns `None` if the level is outside `1..=12` or the work tables
    /// cannot be allocated.
    pub fn new(level: i32) -> Option<Self> {
        let params = level_params(level)?;
        Self::with_params(level, params).ok()
    }

    fn with_params(level: i32, params: LevelParams) -> Result<Self, TryReserveError> {
        let mf = MatchFinder::new(params.hash_order)?;
        let huffman = HuffmanBuilder::new()?;
        let mut tokens = Vec::new();
        tokens.try_reserve_exact(SOFT_MAX_BLOCK_LENGTH + MAX_MATCH_LEN)?;
        let mut items = Vec::new();
        items.try_reserve_exact(NUM_LITLEN_SYMS + NUM_OFFSET_SYMS)?;
        Ok(Self {
            level,
            params,
            mf,
            tokens,
            litlen_freqs: [0; NUM_LITLEN_SYMS],
            offset_freqs: [0; NUM_OFFSET_SYMS],
            dynamic: Codes::empty(),
            fixed: Codes::fixed(),
            precode: Precode {
                num_litlen: 0,
                num_offset: 0,
                num_explicit: 0,
                lens: [0; NUM_PRECODE_SYMS],
                codewords: [0; NUM_PRECODE_SYMS],
                items,
            },
            huffman,
        })
    }

    /// The compression level this encoder was built for.
    pub fn level(&self) -> i32 {
        self.level
    }

    /// Compress `input` into `out` as one complete DEFLATE stream.
    ///
    /// Returns the number of bytes written.
    pub fn compress(&mut self, input: &[u8], out: &mut [u8]) -> Result<usize, CompressError> {
        let mut bs = OutputBitstream::new(out);

        if input.len() <= MAX_PASSTHROUGH_LEN {
            write_stored_blocks(&mut bs, input, true);
        } else {
            self.mf.reset();
            let mut pos = 0;
            while pos < input.len() {
                let block_end = (pos + SOFT_MAX_BLOCK_LENGTH).min(input.len());
                let end = self.parse_block(input, pos, block_end);
                let is_final = end >= input.len();
                self.write_block(&mut bs, &input[pos..end], is_final);
                if bs.overflowed() {
                    return Err(CompressError::InsufficientSpace);
                }
                pos = end;
            }
        }

        bs.finish().ok_or(CompressError::InsufficientSpace)
    }

    // ── Parsing ──────────────────────────────────────────────────────────────

    /// Tokenize input starting at `start` until at least `block_end`.
    /// Returns the position just past the last token.
    fn parse_block(&mut self, data: &[u8], start: usize, block_end: usize) -> usize {
        self.tokens.clear();
        self.litlen_freqs.fill(0);
        self.offset_freqs.fill(0);

        let params = self.params;
        let mut pos = start;
        while pos < block_end {
            let Some(mut m) =
                self.mf.find(data, pos, params.max_search_depth, params.nice_match_len, 0)
            else {
                self.push_literal(data[pos]);
                pos += 1;
                continue;
            };

            let mut inserted = pos + 1;
            if params.strategy == Strategy::Lazy {
                while m.len < params.nice_match_len && pos + 1 < data.len() {
                    let next = self.mf.find(
                        data,
                        pos + 1,
                        params.max_search_depth,
                        params.nice_match_len,
                        m.len,
                    );
                    inserted = pos + 2;
                    match next {
                        Some(better) => {
                            self.push_literal(data[pos]);
                            pos += 1;
                            m = better;
                        }
                        None => break,
                    }
                }
            }

            self.push_match(m.len, m.offset);
            for p in inserted..pos + m.len {
                self.mf.skip(data, p);
            }
            pos += m.len;
        }
        self.litlen_freqs[END_OF_BLOCK] += 1;
        pos
    }

    #[inline(always)]
    fn push_literal(&mut self, lit: u8) {
        self.tokens.push(Token { litlen: lit as u16, offset: 0 });
        self.litlen_freqs[lit as usize] += 1;
    }

    #[inline(always)]
    fn push_match(&mut self, len: usize, offset: usize) {
        debug_assert!((MIN_MATCH_LEN..=MAX_MATCH_LEN).contains(&len));
        self.tokens.push(Token { litlen: len as u16, offset: offset as u16 });
        self.litlen_freqs[NUM_LITERALS + 1 + length_slot(len)] += 1;
        self.offset_freqs[offset_slot(offset)] += 1;
    }

    // ── Block output ─────────────────────────────────────────────────────────

    fn write_block(&mut self, bs: &mut OutputBitstream<'_>, block: &[u8], is_final: bool) {
        self.huffman.make_lengths(
            &self.litlen_freqs[..NUM_USED_LITLEN_SYMS],
            MAX_CODEWORD_LEN,
            &mut self.dynamic.litlen_lens[..NUM_USED_LITLEN_SYMS],
        );
        self.huffman.make_lengths(
            &self.offset_freqs[..NUM_USED_OFFSET_SYMS],
            MAX_CODEWORD_LEN,
            &mut self.dynamic.offset_lens[..NUM_USED_OFFSET_SYMS],
        );
        self.dynamic.assign_codewords();
        self.build_precode();

        let dynamic_cost = 3 + self.precode_cost() + self.data_cost(&self.dynamic);
        let static_cost = 3 + self.data_cost(&self.fixed);
        let stored_cost = stored_cost(bs.bit_position(), block.len());

        if stored_cost <= dynamic_cost.min(static_cost) {
            write_stored_blocks(bs, block, is_final);
        } else if static_cost <= dynamic_cost {
            bs.add_bits(is_final as u32, 1);
            bs.add_bits(BLOCKTYPE_STATIC_HUFFMAN, 2);
            self.write_tokens(bs, &self.fixed);
        } else {
            bs.add_bits(is_final as u32, 1);
            bs.add_bits(BLOCKTYPE_DYNAMIC_HUFFMAN, 2);
            self.write_precode(bs);
            self.write_tokens(bs, &self.dynamic);
        }
    }

    /// Bits needed for the block's symbols under `codes`, extra bits included.
    fn data_cost(&self, codes: &Codes) -> u64 {
        let mut bits = 0u64;
        for sym in 0..NUM_USED_LITLEN_SYMS {
            let mut per = codes.litlen_lens[sym] as u64;
            if sym > END_OF_BLOCK {
                per += LENGTH_EXTRA[sym - END_OF_BLOCK - 1] as u64;
            }
            bits += self.litlen_freqs[sym] as u64 * per;
        }
        for sym in 0..NUM_USED_OFFSET_SYMS {
            let per = codes.offset_lens[sym] as u64 + OFFSET_EXTRA[sym] as u64;
            bits += self.offset_freqs[sym] as u64 * per;
        }
        bits
    }

    /// Run-length encode the dynamic code lengths and build the precode.
    fn build_precode(&mut self) {
        let lens = &self.dynamic;
        let num_litlen = (END_OF_BLOCK + 1..NUM_USED_LITLEN_SYMS)
            .rev()
            .find(|&s| lens.litlen_lens[s] != 0)
            .map_or(END_OF_BLOCK + 1, |s| s + 1);
        let num_offset = (0..NUM_USED_OFFSET_SYMS)
            .rev()
            .find(|&s| lens.offset_lens[s] != 0)
            .map_or(1, |s| s + 1);

        let mut all = [0u8; NUM_LITLEN_SYMS + NUM_OFFSET_SYMS];
        all[..num_litlen].copy_from_slice(&lens.litlen_lens[..num_litlen]);
        all[num_litlen..num_litlen + num_offset].copy_from_slice(&lens.offset_lens[..num_offset]);
        let all = &all[..num_litlen + num_offset];

        let pc = &mut self.precode;
        pc.items.clear();
        let mut i = 0;
        while i < all.len() {
            let len = all[i];
            let run = all[i..].iter().take_while(|&&l| l == len).count();
            let mut left = run;
            if len == 0 {
                while left >= 11 {
                    let n = left.min(138);
                    pc.items.push((18, (n - 11) as u8));
                    left -= n;
                }
                if left >= 3 {
                    pc.items.push((17, (left - 3) as u8));
                    left = 0;
                }
            } else {
                pc.items.push((len, 0));
                left -= 1;
                while left >= 3 {
                    let n = left.min(6);
                    pc.items.push((16, (n - 3) as u8));
                    left -= n;
                }
            }
            for _ in 0..left {
                pc.items.push((len, 0));
            }
            i += run;
        }

        let mut freqs = [0u32; NUM_PRECODE_SYMS];
        for &(sym, _) in &pc.items {
            freqs[sym as usize] += 1;
        }
        self.huffman.make_lengths(&freqs, MAX_PRE_CODEWORD_LEN, &mut pc.lens);
        make_canonical_codewords(&pc.lens, &mut pc.codewords);

        let mut num_explicit = NUM_PRECODE_SYMS;
        while num_explicit > 4 && pc.lens[PRECODE_LENS_PERMUTATION[num_explicit - 1]] == 0 {
            num_explicit -= 1;
        }
        pc.num_litlen = num_litlen;
        pc.num_offset = num_offset;
        pc.num_explicit = num_explicit;
    }

    fn precode_cost(&self) -> u64 {
        let pc = &self.precode;
        let items: u64 = pc
            .items
            .iter()
            .map(|&(sym, _)| pc.lens[sym as usize] as u64 + PRECODE_EXTRA[sym as usize] as u64)
            .sum();
        5 + 5 + 4 + 3 * pc.num_explicit as u64 + items
    }

    fn write_precode(&self, bs: &mut OutputBitstream<'_>) {
        let pc = &self.precode;
        bs.add_bits((pc.num_litlen - 257) as u32, 5);
        bs.add_bits((pc.num_offset - 1) as u32, 5);
        bs.add_bits((pc.num_explicit - 4) as u32, 4);
        for &sym in &PRECODE_LENS_PERMUTATION[..pc.num_explicit] {
            bs.add_bits(pc.lens[sym] as u32, 3);
        }
        for &(sym, extra) in &pc.items {
            let s = sym as usize;
            bs.add_bits(pc.codewords[s], pc.lens[s] as u32);
            bs.add_bits(extra as u32, PRECODE_EXTRA[s]);
        }
    }

    fn write_tokens(&self, bs: &mut OutputBitstream<'_>, codes: &Codes) {
        for t in &self.tokens {
            if t.offset == 0 {
                let s = t.litlen as usize;
                bs.add_bits(codes.litlen_codewords[s], codes.litlen_lens[s] as u32);
                continue;
            }
            let len = t.litlen as usize;
            let slot = length_slot(len);
            let sym = NUM_LITERALS + 1 + slot;
            bs.add_bits(codes.litlen_codewords[sym], codes.litlen_lens[sym] as u32);
            bs.add_bits((len - LENGTH_BASE[slot] as usize) as u32, LENGTH_EXTRA[slot] as u32);

            let offset = t.offset as usize;
            let oslot = offset_slot(offset);
            bs.add_bits(codes.offset_codewords[oslot], codes.offset_lens[oslot] as u32);
            bs.add_bits((offset - OFFSET_BASE[oslot] as usize) as u32, OFFSET_EXTRA[oslot] as u32);
        }
        bs.add_bits(codes.litlen_codewords[END_OF_BLOCK], codes.litlen_lens[END_OF_BLOCK] as u32);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stored blocks (RFC 1951 §3.2.4)
// ─────────────────────────────────────────────────────────────────────────────

/// Exact bit cost of storing `len` bytes starting at bit `bitpos`.
fn stored_cost(bitpos: u64, len: usize) -> u64 {
    let pieces = len.div_ceil(MAX_STORED_BLOCK_LEN).max(1) as u64;
    let first_pad = (8 - (bitpos + 3) % 8) % 8;
    3 + first_pad + 32 + (pieces - 1) * 40 + 8 * len as u64
}

fn write_stored_blocks(bs: &mut OutputBitstream<'_>, data: &[u8], is_final: bool) {
    let mut chunks = data.chunks(MAX_STORED_BLOCK_LEN).peekable();
    if chunks.peek().is_none() {
        write_stored_block(bs, &[], is_final);
        return;
    }
    while let Some(chunk) = chunks.next() {
        let last = is_final && chunks.peek().is_none();
        write_stored_block(bs, chunk, last);
    }
}

fn write_stored_block(bs: &mut OutputBitstream<'_>, chunk: &[u8], is_final: bool) {
    bs.add_bits(is_final as u32, 1);
    bs.add_bits(BLOCKTYPE_STORED, 2);
    bs.align_to_byte();
    let len = chunk.len() as u16;
    bs.write_bytes(&len.to_le_bytes());
    bs.write_bytes(&(!len).to_le_bytes());
    bs.write_bytes(chunk);
}
