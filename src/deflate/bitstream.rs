//! LSB-first bit writer over a caller-supplied output slice.
//!
//! Bits are accumulated in a 64-bit register and spilled a byte at a time.
//! Running out of room does not panic: further bytes are dropped and the
//! writer records the overflow, which the block encoder turns into
//! [`CompressError::InsufficientSpace`](super::CompressError::InsufficientSpace).

pub struct OutputBitstream<'a> {
    out: &'a mut [u8],
    pos: usize,
    bitbuf: u64,
    bitcount: u32,
    overflow: bool,
}

impl<'a> OutputBitstream<'a> {
    pub fn new(out: &'a mut [u8]) -> Self {
        Self { out, pos: 0, bitbuf: 0, bitcount: 0, overflow: false }
    }

    /// Queue the low `n` bits of `bits`; `n` may be at most 32.
    #[inline(always)]
    pub fn add_bits(&mut self, bits: u32, n: u32) {
        debug_assert!(n <= 32);
        self.bitbuf |= (bits as u64) << self.bitcount;
        self.bitcount += n;
        if self.bitcount >= 32 {
            self.flush_bytes();
        }
    }

    #[inline(always)]
    fn flush_bytes(&mut self) {
        while self.bitcount >= 8 {
            self.put_byte(self.bitbuf as u8);
            self.bitbuf >>= 8;
            self.bitcount -= 8;
        }
    }

    #[inline(always)]
    fn put_byte(&mut self, b: u8) {
        if self.pos < self.out.len() {
            self.out[self.pos] = b;
            self.pos += 1;
        } else {
            self.overflow = true;
        }
    }

    /// Pad with zero bits up to the next byte boundary and write everything out.
    pub fn align_to_byte(&mut self) {
        self.flush_bytes();
        if self.bitcount > 0 {
            self.put_byte(self.bitbuf as u8);
            self.bitbuf = 0;
            self.bitcount = 0;
        }
    }

    /// Copy raw bytes; the stream must be byte-aligned.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        debug_assert_eq!(self.bitcount, 0);
        let end = self.pos + bytes.len();
        if end <= self.out.len() {
            self.out[self.pos..end].copy_from_slice(bytes);
            self.pos = end;
        } else {
            self.overflow = true;
        }
    }

    /// Bits already emitted or queued since byte 0 of the slice.
    pub fn bit_position(&self) -> u64 {
        self.pos as u64 * 8 + self.bitcount as u64
    }

    pub fn overflowed(&self) -> bool {
        self.overflow
    }

    /// Flush the partial byte and return the number of bytes written, or
    /// `None` if the output slice was too small.
    pub fn finish(mut self) -> Option<usize> {
        self.align_to_byte();
        if self.overflow {
            None
        } else {
            Some(self.pos)
        }
    }
}
