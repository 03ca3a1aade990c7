// Integration tests for `Compressor`: level handling, the bounded output
// buffer and the single grow-and-retry.

use rdeflate::{Compressor, Decompressor, Error, Format};

fn sample(n: usize) -> Vec<u8> {
    (0..n).map(|i| b"compressor engine sample text "[i % 30]).collect()
}

#[test]
fn levels() {
    for level in 1..=12 {
        assert_eq!(Compressor::new(level).unwrap().level(), level);
    }
    for level in [i32::MIN, -6, 0, 13, 100] {
        assert_eq!(Compressor::new(level).unwrap_err(), Error::AllocationFailed, "level {level}");
    }
}

#[test]
fn output_is_within_bound_for_every_format() {
    let mut c = Compressor::new(12).unwrap();
    for format in Format::ALL {
        for n in [0, 1, 55, 56, 4096, 100_000] {
            let out = c.compress(&sample(n), format).unwrap();
            assert!(out.len() <= format.compress_bound(n), "{format} n={n}");
        }
    }
}

#[test]
fn empty_input_is_never_empty_output() {
    let mut c = Compressor::with_default_level().unwrap();
    assert_eq!(c.compress(b"", Format::RawDeflate).unwrap(), [0x01, 0x00, 0x00, 0xFF, 0xFF]);
    assert_eq!(c.compress(b"", Format::Zlib).unwrap().len(), 2 + 5 + 4);
    assert_eq!(c.compress(b"", Format::Gzip).unwrap().len(), 10 + 5 + 8);
}

#[test]
fn compress_into_small_buffer_grows_once() {
    let data = sample(50_000);
    let mut c = Compressor::new(6).unwrap();
    let expected = c.compress(&data, Format::Zlib).unwrap();

    let mut out = Vec::with_capacity(16);
    let n = c.compress_into(&data, Format::Zlib, &mut out).unwrap();
    assert_eq!(n, out.len());
    assert_eq!(out, expected);
    assert!(out.capacity() >= Format::Zlib.compress_bound(data.len()));
}

#[test]
fn compress_into_keeps_a_sufficient_buffer() {
    let data = sample(10_000);
    let mut c = Compressor::new(6).unwrap();
    let mut out = Vec::with_capacity(Format::Gzip.compress_bound(data.len()));
    let cap = out.capacity();
    c.compress_into(&data, Format::Gzip, &mut out).unwrap();
    assert_eq!(out.capacity(), cap);

    // Previous contents are replaced, not appended to.
    let first = out.clone();
    c.compress_into(&data, Format::Gzip, &mut out).unwrap();
    assert_eq!(out, first);
}

#[test]
fn compressed_output_round_trips() {
    let data = sample(300_000);
    let mut d = Decompressor::new().unwrap();
    for level in [1, 4, 5, 9, 12] {
        let mut c = Compressor::new(level).unwrap();
        for format in Format::ALL {
            let z = c.compress(&data, format).unwrap();
            assert_eq!(d.decompress(&z, format).unwrap(), data, "{format} level {level}");
        }
    }
}

#[test]
fn one_compressor_per_thread() {
    let handles: Vec<_> = (1..=4)
        .map(|t| {
            std::thread::spawn(move || {
                let mut c = Compressor::new(t * 3).unwrap();
                let mut d = Decompressor::new().unwrap();
                let data = sample(20_000 * t as usize);
                let z = c.compress(&data, Format::Gzip).unwrap();
                assert_eq!(d.decompress(&z, Format::Gzip).unwrap(), data);
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}
