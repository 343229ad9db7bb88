//! A lossless byte stream compressor built on Huffman coding.
//!
//! The compressed stream is self describing: a 32 bit magic number is followed by the
//! Huffman tree serialized in preorder, the encoded body and the code of the end marker
//! symbol. No symbol table has to be shipped next to the data.
//!
//! # Examples
//! ```
//! let data = b"aabbbcccc";
//! let compressed = huffproc::compress_to_vec(data).unwrap();
//! let decompressed = huffproc::decompress_to_vec(&compressed).unwrap();
//! assert_eq!(decompressed, data);
//! ```
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

pub mod common;
pub mod decoding;
pub mod encoding;
pub mod huffman;
pub mod io;
mod tests;

pub use common::{CodecStats, DebugLevel};
pub use decoding::frame_decoder::{decompress_to_vec, Decompressor};
pub use decoding::errors::{DecompressError, GetBitsError, HeaderError};
pub use encoding::frame_compressor::{compress_to_vec, CompressError, Compressor};
pub use huffman::{Node, SymbolTree};
