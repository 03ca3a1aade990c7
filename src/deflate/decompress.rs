//! DEFLATE decoder (RFC 1951).
//!
//! [`DeflateDecompressor::decompress`] decodes one complete DEFLATE stream
//! (up to and including the block with BFINAL set) from the start of the
//! input and reports both the bytes consumed and the bytes produced, so a
//! container format can locate its trailer.
//!
//! The decoder never reads past the end of the input: once the real bytes
//! run out, up to 8 zero bytes are fed to the bit buffer so that table
//! lookups can always peek a full codeword.  Actually consuming any of those
//! padding bits means the stream was truncated and yields
//! [`DecompressError::BadData`].

use core::fmt;
use std::collections::TryReserveError;

use super::decode_table::{
    DecodeTable, LITLEN_TABLE_BITS, OFFSET_TABLE_BITS, PRECODE_TABLE_BITS,
};
use super::types::{
    BLOCKTYPE_DYNAMIC_HUFFMAN, BLOCKTYPE_STATIC_HUFFMAN, BLOCKTYPE_STORED, END_OF_BLOCK,
    LENGTH_BASE, LENGTH_EXTRA, MAX_CODEWORD_LEN, NUM_LENGTH_SLOTS, NUM_LITLEN_SYMS,
    NUM_OFFSET_SYMS, NUM_PRECODE_SYMS, NUM_USED_OFFSET_SYMS, OFFSET_BASE, OFFSET_EXTRA,
    PRECODE_LENS_PERMUTATION, STATIC_LITLEN_LENS, STATIC_OFFSET_LENS,
};

/// Most padding bytes the bit reader may invent past the end of the input.
const MAX_OVERREAD: u32 = 8;

// ─────────────────────────────────────────────────────────────────────────────
// Error and result types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by the DEFLATE decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressError {
    /// The input is not a valid DEFLATE stream (or is truncated).
    BadData,
    /// [`DeflateDecompressor::decompress_exact`] produced fewer bytes than
    /// the output length.
    ShortOutput,
    /// The output slice is too small for the decompressed data.
    InsufficientSpace,
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecompressError::BadData => f.write_str("invalid or corrupt compressed data"),
            DecompressError::ShortOutput => f.write_str("decompressed data is shorter than expected"),
            DecompressError::InsufficientSpace => f.write_str("insufficient output space"),
        }
    }
}

impl std::error::Error for DecompressError {}

/// Byte counts of a successful decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Input bytes occupied by the DEFLATE stream, final partial byte included.
    pub consumed: usize,
    /// Bytes written to the output.
    pub produced: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Bit reader
// ─────────────────────────────────────────────────────────────────────────────

struct InputBitstream<'a> {
    data: &'a [u8],
    pos: usize,
    bitbuf: u64,
    bitsleft: u32,
    overread: u32,
}

impl<'a> InputBitstream<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0, bitbuf: 0, bitsleft: 0, overread: 0 }
    }

    /// Top the bit buffer up to more than 56 bits.
    fn refill(&mut self) -> Result<(), DecompressError> {
        while self.bitsleft <= 56 {
            let byte = match self.data.get(self.pos) {
                Some(&b) => {
                    self.pos += 1;
                    b
                }
                None => {
                    if self.overread == MAX_OVERREAD {
                        return Err(DecompressError::BadData);
                    }
                    self.overread += 1;
                    0
                }
            };
            self.bitbuf |= (byte as u64) << self.bitsleft;
            self.bitsleft += 8;
        }
        Ok(())
    }

    #[inline(always)]
    fn ensure(&mut self, n: u32) -> Result<(), DecompressError> {
        if self.bitsleft < n {
            self.refill()
        } else {
            Ok(())
        }
    }

    #[inline(always)]
    fn peek(&self) -> u64 {
        self.bitbuf
    }

    #[inline(always)]
    fn consume(&mut self, n: u32) {
        self.bitbuf >>= n;
        self.bitsleft -= n;
    }

    /// Read `n <= 32` bits.
    #[inline(always)]
    fn bits(&mut self, n: u32) -> Result<u32, DecompressError> {
        self.ensure(n)?;
        let v = (self.bitbuf & ((1u64 << n) - 1)) as u32;
        self.consume(n);
        Ok(v)
    }

    /// Discard the rest of the current byte and hand the unread whole bytes
    /// back to the byte-oriented reader.
    fn align_to_byte(&mut self) -> Result<(), DecompressError> {
        self.consume(self.bitsleft % 8);
        let whole = self.bitsleft / 8;
        if self.overread > whole {
            return Err(DecompressError::BadData);
        }
        self.pos -= (whole - self.overread) as usize;
        self.bitbuf = 0;
        self.bitsleft = 0;
        self.overread = 0;
        Ok(())
    }

    /// Take `n` raw bytes; only valid right after [`align_to_byte`](Self::align_to_byte).
    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecompressError> {
        let data = self.data;
        let bytes = data.get(self.pos..self.pos + n).ok_or(DecompressError::BadData)?;
        self.pos += n;
        Ok(bytes)
    }

    /// Input bytes used so far.  Fails if any padding bit was consumed.
    fn consumed(&self) -> Result<usize, DecompressError> {
        if self.overread * 8 > self.bitsleft {
            return Err(DecompressError::BadData);
        }
        Ok(self.pos - (self.bitsleft / 8 - self.overread) as usize)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DeflateDecompressor
// ─────────────────────────────────────────────────────────────────────────────

/// Reusable DEFLATE decoder.  Only the decode tables persist between calls.
pub struct DeflateDecompressor {
    precode: DecodeTable,
    litlen: DecodeTable,
    offset: DecodeTable,
    lens: [u8; NUM_LITLEN_SYMS + NUM_OFFSET_SYMS],
    static_loaded: bool,
}

impl DeflateDecompressor {
    /// Allocate the decode tables.  Returns `None` on allocation failure.
    pub fn new() -> Option<Self> {
        Self::try_new().ok()
    }

    fn try_new() -> Result<Self, TryReserveError> {
        Ok(Self {
            precode: DecodeTable::new(PRECODE_TABLE_BITS)?,
            litlen: DecodeTable::new(LITLEN_TABLE_BITS)?,
            offset: DecodeTable::new(OFFSET_TABLE_BITS)?,
            lens: [0; NUM_LITLEN_SYMS + NUM_OFFSET_SYMS],
            static_loaded: false,
        })
    }

    /// Decode one DEFLATE stream from the start of `input` into `out`.
    ///
    /// Bytes after the final block are left alone and not counted in
    /// [`Outcome::consumed`].
    pub fn decompress(&mut self, input: &[u8], out: &mut [u8]) -> Result<Outcome, DecompressError> {
        let mut is = InputBitstream::new(input);
        let mut produced = 0;

        loop {
            let is_final = is.bits(1)? != 0;
            match is.bits(2)? {
                BLOCKTYPE_STORED => {
                    is.align_to_byte()?;
                    let hdr = is.read_bytes(4)?;
                    let len = u16::from_le_bytes([hdr[0], hdr[1]]);
                    let nlen = u16::from_le_bytes([hdr[2], hdr[3]]);
                    if len != !nlen {
                        return Err(DecompressError::BadData);
                    }
                    let src = is.read_bytes(len as usize)?;
                    let dst = out
                        .get_mut(produced..produced + src.len())
                        .ok_or(DecompressError::InsufficientSpace)?;
                    dst.copy_from_slice(src);
                    produced += src.len();
                }
                BLOCKTYPE_STATIC_HUFFMAN => {
                    if !self.static_loaded {
                        self.load_static_codes()?;
                    }
                    self.inflate_block(&mut is, out, &mut produced)?;
                }
                BLOCKTYPE_DYNAMIC_HUFFMAN => {
                    self.static_loaded = false;
                    self.read_dynamic_header(&mut is)?;
                    self.inflate_block(&mut is, out, &mut produced)?;
                }
                _ => return Err(DecompressError::BadData),
            }
            if is_final {
                break;
            }
        }

        Ok(Outcome { consumed: is.consumed()?, produced })
    }

    /// Like [`decompress`](Self::decompress), but the stream must fill `out`
    /// exactly.
    pub fn decompress_exact(
        &mut self,
        input: &[u8],
        out: &mut [u8],
    ) -> Result<Outcome, DecompressError> {
        self.decompress_exact_with(input, out, Self::decompress)
    }

    /// Run `decode` (this decoder, or a container wrapped around it) and
    /// require that it fill `out` exactly.
    pub fn decompress_exact_with<F>(
        &mut self,
        input: &[u8],
        out: &mut [u8],
        decode: F,
    ) -> Result<Outcome, DecompressError>
    where
        F: FnOnce(&mut Self, &[u8], &mut [u8]) -> Result<Outcome, DecompressError>,
    {
        let outcome = decode(self, input, out)?;
        if outcome.produced != out.len() {
            return Err(DecompressError::ShortOutput);
        }
        Ok(outcome)
    }

    fn load_static_codes(&mut self) -> Result<(), DecompressError> {
        self.litlen.build(&STATIC_LITLEN_LENS).map_err(|_| DecompressError::BadData)?;
        self.offset.build(&STATIC_OFFSET_LENS).map_err(|_| DecompressError::BadData)?;
        self.static_loaded = true;
        Ok(())
    }

    /// Read HLIT/HDIST/HCLEN, the precode and the run-length coded litlen
    /// and offset code lengths, then build both decode tables.
    fn read_dynamic_header(&mut self, is: &mut InputBitstream<'_>) -> Result<(), DecompressError> {
        let num_litlen = is.bits(5)? as usize + 257;
        let num_offset = is.bits(5)? as usize + 1;
        let num_explicit = is.bits(4)? as usize + 4;

        let mut precode_lens = [0u8; NUM_PRECODE_SYMS];
        for &sym in &PRECODE_LENS_PERMUTATION[..num_explicit] {
            precode_lens[sym] = is.bits(3)? as u8;
        }
        self.precode.build(&precode_lens).map_err(|_| DecompressError::BadData)?;

        let total = num_litlen + num_offset;
        let mut i = 0;
        while i < total {
            is.ensure(MAX_CODEWORD_LEN as u32)?;
            let e = self.precode.decode(is.peek()).ok_or(DecompressError::BadData)?;
            is.consume(e.len);

            let (value, rep) = match e.symbol {
                sym @ 0..=15 => (sym as u8, 1),
                16 => {
                    if i == 0 {
                        return Err(DecompressError::BadData);
                    }
                    (self.lens[i - 1], 3 + is.bits(2)? as usize)
                }
                17 => (0, 3 + is.bits(3)? as usize),
                _ => (0, 11 + is.bits(7)? as usize),
            };
            if i + rep > total {
                return Err(DecompressError::BadData);
            }
            self.lens[i..i + rep].fill(value);
            i += rep;
        }

        self.litlen.build(&self.lens[..num_litlen]).map_err(|_| DecompressError::BadData)?;
        self.offset.build(&self.lens[num_litlen..total]).map_err(|_| DecompressError::BadData)?;
        Ok(())
    }

    /// Decode literal/length and offset symbols until end-of-block.
    fn inflate_block(
        &self,
        is: &mut InputBitstream<'_>,
        out: &mut [u8],
        produced: &mut usize,
    ) -> Result<(), DecompressError> {
        loop {
            is.ensure(MAX_CODEWORD_LEN as u32)?;
            let e = self.litlen.decode(is.peek()).ok_or(DecompressError::BadData)?;
            is.consume(e.len);
            let sym = e.symbol as usize;

            if sym < END_OF_BLOCK {
                let slot = out.get_mut(*produced).ok_or(DecompressError::InsufficientSpace)?;
                *slot = sym as u8;
                *produced += 1;
                continue;
            }
            if sym == END_OF_BLOCK {
                return Ok(());
            }

            let lslot = sym - END_OF_BLOCK - 1;
            if lslot >= NUM_LENGTH_SLOTS {
                return Err(DecompressError::BadData);
            }
            let len = LENGTH_BASE[lslot] as usize + is.bits(LENGTH_EXTRA[lslot] as u32)? as usize;

            is.ensure(MAX_CODEWORD_LEN as u32)?;
            let e = self.offset.decode(is.peek()).ok_or(DecompressError::BadData)?;
            is.consume(e.len);
            let oslot = e.symbol as usize;
            if oslot >= NUM_USED_OFFSET_SYMS {
                return Err(DecompressError::BadData);
            }
            let offset =
                OFFSET_BASE[oslot] as usize + is.bits(OFFSET_EXTRA[oslot] as u32)? as usize;

            if offset > *produced {
                return Err(DecompressError::BadData);
            }
            if out.len() - *produced < len {
                return Err(DecompressError::InsufficientSpace);
            }

            let start = *produced - offset;
            if offset >= len {
                out.copy_within(start..start + len, *produced);
            } else {
                for k in 0..len {
                    out[*produced + k] = out[start + k];
                }
            }
            *produced += len;
        }
    }
}
