//! Raw DEFLATE codec (RFC 1951).
//!
//! | Module         | Role                                                   |
//! |----------------|--------------------------------------------------------|
//! | `types`        | format constants, length/offset slot tables            |
//! | `bitstream`    | LSB-first bit writer                                   |
//! | `huffman`      | length-limited code construction, canonical codewords  |
//! | `matchfinder`  | hash-chain LZ77 search                                 |
//! | `params`       | compression level → parser parameters                  |
//! | `compress`     | block assembly and block-type selection                |
//! | `decode_table` | two-level Huffman decode tables                        |
//! | `decompress`   | inflate loop                                           |

pub mod bitstream;
pub mod compress;
pub mod decode_table;
pub mod decompress;
pub mod huffman;
pub mod matchfinder;
pub mod params;
pub mod types;

pub use compress::{deflate_compress_bound, CompressError, DeflateCompressor};
pub use decompress::{DecompressError, DeflateDecompressor, Outcome};
pub use params::{CLEVEL_DEFAULT, CLEVEL_MAX, CLEVEL_MIN};
