//! Two-level Huffman decode tables.
//!
//! The main table is indexed by the next `table_bits` input bits.  Codewords
//! no longer than `table_bits` are replicated across every slot that shares
//! their prefix; longer codewords live in subtables of uniform size hanging
//! off a main-table entry.
//!
//! Entry layout (`u32`):
//!
//! | Bits   | Meaning                                              |
//! |--------|------------------------------------------------------|
//! | 0..8   | codeword bits to consume, or subtable index bits     |
//! | 8..30  | decoded symbol, or subtable start offset             |
//! | 30     | [`ENTRY_INVALID`]: no codeword maps to this slot      |
//! | 31     | [`ENTRY_SUBTABLE`]: entry points into a subtable      |

use std::collections::TryReserveError;

use super::huffman::reverse_bits;
use super::types::MAX_CODEWORD_LEN;

pub const ENTRY_SUBTABLE: u32 = 1 << 31;
pub const ENTRY_INVALID: u32 = 1 << 30;
const ENTRY_LEN_MASK: u32 = 0xFF;
const ENTRY_VALUE_SHIFT: u32 = 8;
const ENTRY_VALUE_MASK: u32 = (1 << 22) - 1;

pub const PRECODE_TABLE_BITS: u32 = 7;
pub const LITLEN_TABLE_BITS: u32 = 10;
pub const OFFSET_TABLE_BITS: u32 = 8;

/// The code lengths do not describe a usable prefix code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCode;

/// A decoded table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub symbol: u32,
    pub len: u32,
}

pub struct DecodeTable {
    entries: Vec<u32>,
    table_bits: u32,
}

impl DecodeTable {
    /// Allocate a table with `table_bits` index bits; subtables are added by
    /// [`build`](Self::build) as needed.
    pub fn new(table_bits: u32) -> Result<Self, TryReserveError> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(1 << table_bits)?;
        entries.resize(1 << table_bits, ENTRY_INVALID);
        Ok(Self { entries, table_bits })
    }

    /// Rebuild the table for the canonical code described by `lens`.
    ///
    /// Over-subscribed codes are rejected.  Incomplete codes are accepted
    /// only when empty or made of a single 1-bit codeword; unused slots then
    /// decode as invalid.
    pub fn build(&mut self, lens: &[u8]) -> Result<(), InvalidCode> {
        let mut count = [0u32; MAX_CODEWORD_LEN + 1];
        for &l in lens {
            if l as usize > MAX_CODEWORD_LEN {
                return Err(InvalidCode);
            }
            count[l as usize] += 1;
        }
        count[0] = 0;

        let mut left: i64 = 1;
        for &c in &count[1..] {
            left = (left << 1) - c as i64;
            if left < 0 {
                return Err(InvalidCode);
            }
        }
        if left != 0 {
            let used: u32 = count.iter().sum();
            let single_bit = used == 1 && count[1] == 1;
            if used != 0 && !single_bit {
                return Err(InvalidCode);
            }
        }

        let max_len = (1..=MAX_CODEWORD_LEN).rev().find(|&l| count[l] != 0).unwrap_or(0) as u32;
        let tb = self.table_bits;
        let sub_bits = max_len.saturating_sub(tb);

        self.entries.clear();
        self.entries.resize(1 << tb, ENTRY_INVALID);

        let mut next_code = [0u32; MAX_CODEWORD_LEN + 2];
        for l in 1..=MAX_CODEWORD_LEN {
            next_code[l + 1] = (next_code[l] + count[l]) << 1;
        }

        for (sym, &l) in lens.iter().enumerate() {
            if l == 0 {
                continue;
            }
            let len = l as u32;
            let code = reverse_bits(next_code[l as usize], len);
            next_code[l as usize] += 1;

            if len <= tb {
                let entry = ((sym as u32) << ENTRY_VALUE_SHIFT) | len;
                let mut i = code as usize;
                while i < 1 << tb {
                    self.entries[i] = entry;
                    i += 1 << len;
                }
                continue;
            }

            let prefix = (code & ((1 << tb) - 1)) as usize;
            let start = if self.entries[prefix] & ENTRY_SUBTABLE != 0 {
                ((self.entries[prefix] >> ENTRY_VALUE_SHIFT) & ENTRY_VALUE_MASK) as usize
            } else {
                let start = self.entries.len();
                self.entries.resize(start + (1 << sub_bits), ENTRY_INVALID);
                self.entries[prefix] =
                    ENTRY_SUBTABLE | ((start as u32) << ENTRY_VALUE_SHIFT) | sub_bits;
                start
            };

            let rest = len - tb;
            let entry = ((sym as u32) << ENTRY_VALUE_SHIFT) | rest;
            let mut i = (code >> tb) as usize;
            while i < 1 << sub_bits {
                self.entries[start + i] = entry;
                i += 1 << rest;
            }
        }
        Ok(())
    }

    /// Look up the symbol at the front of `bits` (LSB first).
    ///
    /// The caller must have at least [`MAX_CODEWORD_LEN`] valid bits in
    /// `bits`.  Returns `None` for a slot no codeword maps to.
    #[inline(always)]
    pub fn decode(&self, bits: u64) -> Option<Entry> {
        let tb = self.table_bits;
        let mut entry = self.entries[(bits & ((1 << tb) - 1)) as usize];
        let mut consumed = 0;
        if entry & ENTRY_SUBTABLE != 0 {
            let sub_bits = entry & ENTRY_LEN_MASK;
            let start = ((entry >> ENTRY_VALUE_SHIFT) & ENTRY_VALUE_MASK) as usize;
            let idx = ((bits >> tb) & ((1 << sub_bits) - 1)) as usize;
            entry = self.entries[start + idx];
            consumed = tb;
        }
        if entry & ENTRY_INVALID != 0 {
            return None;
        }
        Some(Entry {
            symbol: (entry >> ENTRY_VALUE_SHIFT) & ENTRY_VALUE_MASK,
            len: consumed + (entry & ENTRY_LEN_MASK),
        })
    }
}
