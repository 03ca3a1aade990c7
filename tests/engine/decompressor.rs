// Integration tests for `Decompressor`: buffer guessing and doubling,
// exact-size decoding, member decoding and error mapping.

use rdeflate::{BufferPolicy, Compressor, Decompressor, Error, Format};

fn zeros_compressed(n: usize, format: Format) -> Vec<u8> {
    Compressor::new(9).unwrap().compress(&vec![0u8; n], format).unwrap()
}

#[test]
fn default_policy() {
    let d = Decompressor::new().unwrap();
    assert_eq!(d.policy(), BufferPolicy { guess_shift: 4, min_capacity: 64 });
}

#[test]
fn highly_compressed_input_needs_several_doublings() {
    // A megabyte of zeros compresses far beyond the 16x first guess.
    let z = zeros_compressed(1 << 20, Format::RawDeflate);
    assert!(z.len() * 16 < 1 << 20);
    let mut d = Decompressor::new().unwrap();
    let out = d.decompress(&z, Format::RawDeflate).unwrap();
    assert_eq!(out.len(), 1 << 20);
    assert!(out.iter().all(|&b| b == 0));
}

#[test]
fn tiny_policy_still_converges() {
    let z = zeros_compressed(100_000, Format::Zlib);
    let mut d = Decompressor::with_policy(BufferPolicy { guess_shift: 0, min_capacity: 1 }).unwrap();
    assert_eq!(d.decompress(&z, Format::Zlib).unwrap(), vec![0u8; 100_000]);
}

#[test]
fn decompress_into_uses_caller_capacity() {
    let z = zeros_compressed(5_000, Format::Gzip);
    let mut d = Decompressor::new().unwrap();
    let mut out = Vec::with_capacity(5_000);
    let cap = out.capacity();
    let n = d.decompress_into(&z, Format::Gzip, &mut out).unwrap();
    assert_eq!(n, 5_000);
    assert_eq!(out.len(), 5_000);
    assert_eq!(out.capacity(), cap);
}

#[test]
fn exact_size() {
    let z = zeros_compressed(12_345, Format::Gzip);
    let mut d = Decompressor::new().unwrap();
    assert_eq!(d.decompress_exact(&z, Format::Gzip, 12_345).unwrap().len(), 12_345);
    assert_eq!(d.decompress_exact(&z, Format::Gzip, 12_346), Err(Error::DecompressionFailed));
    assert_eq!(d.decompress_exact(&z, Format::Gzip, 12_344), Err(Error::DecompressionFailed));
    assert_eq!(d.decompress_exact(b"junk", Format::Gzip, 10), Err(Error::BadData));
}

#[test]
fn member_decoding_walks_concatenated_streams() {
    let mut c = Compressor::new(6).unwrap();
    let parts: [&[u8]; 3] = [b"one ", b"two two ", b"three three three"];
    let mut input = Vec::new();
    for p in parts {
        input.extend(c.compress(p, Format::Zlib).unwrap());
    }

    let mut d = Decompressor::new().unwrap();
    let mut pos = 0;
    let mut seen = Vec::new();
    while pos < input.len() {
        let (consumed, out) = d.decompress_member(&input[pos..], Format::Zlib).unwrap();
        seen.push(out);
        pos += consumed;
    }
    assert_eq!(seen, parts.map(|p| p.to_vec()));
}

#[test]
fn errors() {
    let mut d = Decompressor::new().unwrap();
    for format in Format::ALL {
        let err = d.decompress(b"\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF", format).unwrap_err();
        assert_eq!(err, Error::BadData, "{format}");
        assert!(err.is_decompression_failure());
        assert_eq!(d.decompress(b"", format), Err(Error::BadData), "{format}");
    }
}

#[test]
fn trailing_data_is_ignored() {
    let mut z = zeros_compressed(1_000, Format::RawDeflate);
    z.extend_from_slice(b"garbage after the stream");
    let mut d = Decompressor::new().unwrap();
    assert_eq!(d.decompress(&z, Format::RawDeflate).unwrap(), vec![0u8; 1_000]);
}
