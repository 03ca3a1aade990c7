// e2e/interop.rs: interoperability with an independent implementation.
//
// flate2 reads what rdeflate writes and rdeflate reads what flate2 writes,
// for raw DEFLATE, zlib and gzip.

use std::io::{Read, Write};

use flate2::read::{DeflateDecoder, GzDecoder, MultiGzDecoder, ZlibDecoder};
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use flate2::Compression;
use rdeflate::{Compressor, Decompressor, Format};

fn corpus() -> Vec<Vec<u8>> {
    let text = include_str!("interop.rs").as_bytes().repeat(30);
    let mut x = 0x2545_F491u32;
    let noise: Vec<u8> = (0..150_000)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x as u8
        })
        .collect();
    vec![Vec::new(), b"foo".to_vec(), text, noise, vec![b'z'; 300_000]]
}

fn flate2_decode(format: Format, z: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    match format {
        Format::RawDeflate => DeflateDecoder::new(z).read_to_end(&mut out),
        Format::Zlib => ZlibDecoder::new(z).read_to_end(&mut out),
        Format::Gzip => GzDecoder::new(z).read_to_end(&mut out),
    }
    .unwrap();
    out
}

fn flate2_encode(format: Format, level: u32, data: &[u8]) -> Vec<u8> {
    let level = Compression::new(level);
    match format {
        Format::RawDeflate => {
            let mut e = DeflateEncoder::new(Vec::new(), level);
            e.write_all(data).unwrap();
            e.finish().unwrap()
        }
        Format::Zlib => {
            let mut e = ZlibEncoder::new(Vec::new(), level);
            e.write_all(data).unwrap();
            e.finish().unwrap()
        }
        Format::Gzip => {
            let mut e = GzEncoder::new(Vec::new(), level);
            e.write_all(data).unwrap();
            e.finish().unwrap()
        }
    }
}

#[test]
fn flate2_reads_our_output() {
    for level in [1, 3, 6, 9, 12] {
        let mut c = Compressor::new(level).unwrap();
        for data in corpus() {
            for format in Format::ALL {
                let z = c.compress(&data, format).unwrap();
                assert!(flate2_decode(format, &z) == data, "{format} level {level} len {}", data.len());
            }
        }
    }
}

#[test]
fn we_read_flate2_output() {
    let mut d = Decompressor::new().unwrap();
    for level in [0, 1, 6, 9] {
        for data in corpus() {
            for format in Format::ALL {
                let z = flate2_encode(format, level, &data);
                let out = d.decompress(&z, format).unwrap();
                assert!(out == data, "{format} level {level} len {}", data.len());
                assert_eq!(d.decompress_exact(&z, format, data.len()).unwrap().len(), data.len());
            }
        }
    }
}

#[test]
fn concatenated_members_match_multi_member_reader() {
    let mut c = Compressor::new(6).unwrap();
    let mut members = Vec::new();
    let mut expected = Vec::new();
    for part in [&b"alpha "[..], b"beta ", b"gamma"] {
        members.extend(c.compress(part, Format::Gzip).unwrap());
        expected.extend_from_slice(part);
    }

    let mut via_flate2 = Vec::new();
    MultiGzDecoder::new(&members[..]).read_to_end(&mut via_flate2).unwrap();
    assert_eq!(via_flate2, expected);

    let mut d = Decompressor::new().unwrap();
    let mut pos = 0;
    let mut ours = Vec::new();
    while pos < members.len() {
        let (n, out) = d.decompress_member(&members[pos..], Format::Gzip).unwrap();
        ours.extend(out);
        pos += n;
    }
    assert_eq!(ours, expected);
}

#[test]
fn checksums_match_flate2() {
    for data in corpus() {
        let mut crc = flate2::Crc::new();
        crc.update(&data);
        assert_eq!(rdeflate::crc32(0, &data), crc.sum());
    }
}
