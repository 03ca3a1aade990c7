// Integration tests for the format table (`format`).

use rdeflate::format::{Format, FORMATS};
use rdeflate::{Compressor, Decompressor, Error, DEFLATE, GZIP, ZLIB};

#[test]
fn ids_are_stable() {
    assert_eq!((DEFLATE, ZLIB, GZIP), (0, 1, 2));
    assert_eq!(Format::RawDeflate.id(), 0);
    assert_eq!(Format::Zlib.id(), 1);
    assert_eq!(Format::Gzip.id(), 2);
}

#[test]
fn unknown_ids_are_rejected() {
    for id in [-1, 3, 99, i32::MAX, i32::MIN] {
        assert_eq!(Format::try_from(id), Err(Error::UnknownFormat(id)));
    }
}

#[test]
fn bounds_differ_by_container_overhead() {
    for n in [0usize, 1, 9_999, 10_000, 10_001, 1 << 20] {
        let raw = Format::RawDeflate.compress_bound(n);
        assert_eq!(raw, 5 * n.div_ceil(10_000).max(1) + n + 1 + 8);
        assert_eq!(Format::Zlib.compress_bound(n), raw + 6);
        assert_eq!(Format::Gzip.compress_bound(n), raw + 18);
    }
}

#[test]
fn names_and_suffixes() {
    let table: Vec<_> = FORMATS.iter().map(|s| (s.name, s.extension)).collect();
    assert_eq!(table, [("deflate", "deflate"), ("zlib", "zz"), ("gzip", "gz")]);
    assert_eq!(Format::Gzip.to_string(), "gzip");
}

#[test]
fn output_is_only_readable_as_its_own_format() {
    let data = b"format mismatch ".repeat(10);
    let mut c = Compressor::new(6).unwrap();
    let mut d = Decompressor::new().unwrap();
    let gz = c.compress(&data, Format::Gzip).unwrap();
    let zz = c.compress(&data, Format::Zlib).unwrap();
    assert_eq!(d.decompress(&gz, Format::Zlib), Err(Error::BadData));
    assert_eq!(d.decompress(&zz, Format::Gzip), Err(Error::BadData));
    assert_eq!(d.decompress(&gz, Format::Gzip).unwrap(), data);
    assert_eq!(d.decompress(&zz, Format::Zlib).unwrap(), data);
}
