//! DEFLATE format constants and symbol tables (RFC 1951 §3.2).
//!
//!   - Block types and code sizes
//!   - Length / offset base-value and extra-bit tables (§3.2.5)
//!   - Length → slot and offset → slot lookup tables for the encoder
//!   - Static Huffman code lengths (§3.2.6)
//!   - Precode permutation order (§3.2.7)

// ─────────────────────────────────────────────────────────────────────────────
// Block types (RFC 1951 §3.2.3)
// ─────────────────────────────────────────────────────────────────────────────

pub const BLOCKTYPE_STORED: u32 = 0;
pub const BLOCKTYPE_STATIC_HUFFMAN: u32 = 1;
pub const BLOCKTYPE_DYNAMIC_HUFFMAN: u32 = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Match limits
// ─────────────────────────────────────────────────────────────────────────────

pub const MIN_MATCH_LEN: usize = 3;
pub const MAX_MATCH_LEN: usize = 258;
pub const MAX_MATCH_OFFSET: usize = 32_768;
pub const WINDOW_SIZE: usize = 32_768;

/// Largest payload of one stored block (LEN is a 16-bit field).
pub const MAX_STORED_BLOCK_LEN: usize = 0xFFFF;

// ─────────────────────────────────────────────────────────────────────────────
// Alphabet sizes
// ─────────────────────────────────────────────────────────────────────────────

pub const NUM_LITERALS: usize = 256;
pub const END_OF_BLOCK: usize = 256;
pub const NUM_PRECODE_SYMS: usize = 19;
/// Symbols 286 and 287 take part in the static code but never occur in data.
pub const NUM_LITLEN_SYMS: usize = 288;
/// Symbols 30 and 31 take part in the static code but never occur in data.
pub const NUM_OFFSET_SYMS: usize = 32;
pub const NUM_USED_LITLEN_SYMS: usize = 286;
pub const NUM_USED_OFFSET_SYMS: usize = 30;
pub const NUM_LENGTH_SLOTS: usize = 29;

pub const MAX_CODEWORD_LEN: usize = 15;
pub const MAX_PRE_CODEWORD_LEN: usize = 7;

/// Order in which precode lengths are transmitted (RFC 1951 §3.2.7).
pub const PRECODE_LENS_PERMUTATION: [usize; NUM_PRECODE_SYMS] =
    [16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15];

// ─────────────────────────────────────────────────────────────────────────────
// Length and offset slots (RFC 1951 §3.2.5)
// ─────────────────────────────────────────────────────────────────────────────

/// First match length of each length slot (litlen symbols 257..=285).
pub const LENGTH_BASE: [u16; NUM_LENGTH_SLOTS] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115,
    131, 163, 195, 227, 258,
];

/// Extra bits following each length slot.
pub const LENGTH_EXTRA: [u8; NUM_LENGTH_SLOTS] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/// First match offset of each offset slot.
pub const OFFSET_BASE: [u16; NUM_USED_OFFSET_SYMS] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];

/// Extra bits following each offset slot.
pub const OFFSET_EXTRA: [u8; NUM_USED_OFFSET_SYMS] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13,
];

/// Match length (3..=258) → length slot.  Indices 0..3 are unused.
pub static LENGTH_SLOT: [u8; MAX_MATCH_LEN + 1] = build_length_slot_table();

/// Offset → offset slot, split in two halves: entries `0..256` are indexed by
/// `offset - 1` for offsets up to 256, entries `256..512` by
/// `256 + ((offset - 1) >> 7)` for larger offsets.
pub static OFFSET_SLOT: [u8; 512] = build_offset_slot_table();

const fn build_length_slot_table() -> [u8; MAX_MATCH_LEN + 1] {
    let mut table = [0u8; MAX_MATCH_LEN + 1];
    let mut slot = 0;
    while slot < NUM_LENGTH_SLOTS {
        let base = LENGTH_BASE[slot] as usize;
        let count = 1usize << LENGTH_EXTRA[slot];
        let mut i = 0;
        while i < count && base + i <= MAX_MATCH_LEN {
            table[base + i] = slot as u8;
            i += 1;
        }
        slot += 1;
    }
    // 258 has a dedicated slot even though slot 27 would also cover it.
    table[MAX_MATCH_LEN] = (NUM_LENGTH_SLOTS - 1) as u8;
    table
}

const fn build_offset_slot_table() -> [u8; 512] {
    let mut table = [0u8; 512];
    let mut slot = 0;
    while slot < NUM_USED_OFFSET_SYMS {
        let base = OFFSET_BASE[slot] as usize;
        let count = 1usize << OFFSET_EXTRA[slot];
        let mut i = 0;
        while i < count {
            let offset = base + i;
            if offset <= 256 {
                table[offset - 1] = slot as u8;
            } else {
                table[256 + ((offset - 1) >> 7)] = slot as u8;
            }
            i += 1;
        }
        slot += 1;
    }
    table
}

/// Length slot of a match length in `3..=258`.
#[inline(always)]
pub fn length_slot(len: usize) -> usize {
    LENGTH_SLOT[len] as usize
}

/// Offset slot of a match offset in `1..=32768`.
#[inline(always)]
pub fn offset_slot(offset: usize) -> usize {
    if offset <= 256 {
        OFFSET_SLOT[offset - 1] as usize
    } else {
        OFFSET_SLOT[256 + ((offset - 1) >> 7)] as usize
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Static Huffman codes (RFC 1951 §3.2.6)
// ─────────────────────────────────────────────────────────────────────────────

pub static STATIC_LITLEN_LENS: [u8; NUM_LITLEN_SYMS] = build_static_litlen_lens();
pub static STATIC_OFFSET_LENS: [u8; NUM_OFFSET_SYMS] = [5; NUM_OFFSET_SYMS];

const fn build_static_litlen_lens() -> [u8; NUM_LITLEN_SYMS] {
    let mut lens = [0u8; NUM_LITLEN_SYMS];
    let mut i = 0;
    while i < NUM_LITLEN_SYMS {
        lens[i] = if i < 144 {
            8
        } else if i < 256 {
            9
        } else if i < 280 {
            7
        } else {
            8
        };
        i += 1;
    }
    lens
}
