// e2e/error_handling.rs: how malformed input and misuse surface as errors.

use rdeflate::{api, Compressor, Decompressor, Error, Format};

fn sample() -> Vec<u8> {
    b"error handling sample; ".iter().cycle().take(40_000).copied().collect()
}

#[test]
fn truncated_streams_are_bad_data() {
    let data = sample();
    let mut c = Compressor::new(6).unwrap();
    let mut d = Decompressor::new().unwrap();
    for format in Format::ALL {
        let z = c.compress(&data, format).unwrap();
        for cut in [0, 1, z.len() / 3, z.len() / 2, z.len() - 1] {
            assert_eq!(d.decompress(&z[..cut], format), Err(Error::BadData), "{format} cut {cut}");
        }
    }
}

#[test]
fn bit_flips_never_yield_wrong_data() {
    // A flip either fails or only touched bits nobody reads (padding,
    // MTIME); the trailer checksum rules out silently wrong output.
    let data = sample();
    let mut c = Compressor::new(9).unwrap();
    let mut d = Decompressor::new().unwrap();
    for format in [Format::Zlib, Format::Gzip] {
        let z = c.compress(&data, format).unwrap();
        let mut rejected = 0;
        for i in (0..z.len()).step_by(13) {
            let mut bad = z.clone();
            bad[i] ^= 0x20;
            match d.decompress(&bad, format) {
                Err(e) => {
                    assert!(e.is_decompression_failure(), "{format} byte {i}: {e}");
                    rejected += 1;
                }
                Ok(out) => assert!(out == data, "{format} byte {i}: wrong output accepted"),
            }
        }
        assert!(rejected > 0, "{format}: no corruption detected");
    }
}

#[test]
fn error_kinds_and_messages() {
    let mut c = api::new_compressor(None).unwrap();
    let mut d = api::new_decompressor().unwrap();

    let e = api::compress(&mut c, b"x", Some(7), None).unwrap_err();
    assert_eq!(e, Error::UnknownFormat(7));
    assert_eq!(e.to_string(), "unknown compressed data format: 7");

    let e = api::decompress(&mut d, b"\x07", None, None).unwrap_err();
    assert_eq!(e, Error::BadData);
    assert!(e.is_bad_data() && e.is_decompression_failure());

    let e = Compressor::new(42).unwrap_err();
    assert_eq!(e, Error::AllocationFailed);

    let z = api::compress(&mut c, b"four", None, None).unwrap();
    let e = d.decompress_exact(&z, Format::RawDeflate, 3).unwrap_err();
    assert_eq!(e, Error::DecompressionFailed);
    assert!(!e.is_bad_data());
}

#[test]
fn errors_do_not_poison_instances() {
    let data = sample();
    let mut c = Compressor::new(6).unwrap();
    let mut d = Decompressor::new().unwrap();
    let z = c.compress(&data, Format::Gzip).unwrap();

    assert!(d.decompress(b"\x1f\x8b garbage garbage garbage", Format::Gzip).is_err());
    assert_eq!(d.decompress(&z, Format::Gzip).unwrap(), data);

    let mut tiny = Vec::with_capacity(1);
    c.compress_into(&data, Format::Gzip, &mut tiny).unwrap();
    assert_eq!(tiny, z);
}

#[test]
fn errors_are_std_errors() {
    fn boxed(e: Error) -> Box<dyn std::error::Error + Send + Sync> {
        Box::new(e)
    }
    assert_eq!(boxed(Error::CompressionFailed).to_string(), "failed to compress data");
    assert_eq!(boxed(Error::DecompressionFailed).to_string(), "failed to decompress data");
}
