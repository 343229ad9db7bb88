use tracing::{debug, trace};

use super::bit_reader::BitReader;
use super::errors::DecompressError;
use crate::common::{CodecStats, DebugLevel, BITS_PER_INT, BITS_PER_WORD, HUFF_TREE, PSEUDO_EOF};
use crate::encoding::bit_writer::BitWriter;
use crate::huffman::{HuffmanDecoder, SymbolTree};
use crate::io::{BitRead, BitWrite};

/// Reverses what [Compressor](crate::encoding::Compressor) does.
///
/// Decoding runs through three states: the magic number is checked, the tree header
/// is read, then the body is decoded bit by bit until the end marker shows up.
/// The whole tree has to be read before the first byte can be decoded.
///
/// # Examples
/// ```
/// let compressed = huffproc::compress_to_vec(b"abracadabra").unwrap();
///
/// let mut input = huffproc::decoding::bit_reader::BitReader::new(compressed.as_slice());
/// let mut output = huffproc::encoding::bit_writer::BitWriter::new(Vec::new());
/// huffproc::Decompressor::default()
///     .decompress(&mut input, &mut output)
///     .unwrap();
/// assert_eq!(output.finish().unwrap(), b"abracadabra");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Decompressor {
    debug: DebugLevel,
}

impl Decompressor {
    pub fn new(debug: DebugLevel) -> Self {
        Decompressor { debug }
    }

    pub fn debug_level(&self) -> DebugLevel {
        self.debug
    }

    /// Decompress one stream from `input` into `output` and close `output`.
    ///
    /// Fails without reading further if the magic number does not match. Bits after
    /// the end marker are never read.
    pub fn decompress(
        &self,
        mut input: impl BitRead,
        mut output: impl BitWrite,
    ) -> Result<CodecStats, DecompressError> {
        let read_before = input.bits_read();
        let written_before = output.bits_written();

        let magic = input
            .read_bits(BITS_PER_INT)?
            .ok_or(DecompressError::MissingMagicNumber)?;
        if magic != HUFF_TREE {
            return Err(DecompressError::BadMagicNumber { got: magic });
        }

        let tree = SymbolTree::read_header(&mut input)?;
        if self.debug.low() {
            debug!(
                symbols = tree.symbols().len(),
                depth = tree.depth(),
                header_bits = input.bits_read() - read_before - u64::from(BITS_PER_INT),
                "read huffman tree"
            );
        }
        if self.debug.high() {
            trace!(symbols = ?tree.symbols(), "leaves in preorder");
        }

        let decoded = if tree.is_degenerate() {
            // The end marker is the only leaf and its code is empty, there is no body
            0
        } else {
            decode_body(&tree, &mut input, &mut output)?
        };

        let stats = CodecStats {
            bits_read: input.bits_read() - read_before,
            bits_written: output.bits_written() - written_before,
        };
        output.close()?;

        if self.debug.low() {
            debug!(
                decoded,
                bits_read = stats.bits_read,
                bits_written = stats.bits_written,
                "decompression finished"
            );
        }
        Ok(stats)
    }
}

/// Decode symbols until the end marker is reached, returns the number of decoded bytes.
fn decode_body(
    tree: &SymbolTree,
    input: &mut impl BitRead,
    output: &mut impl BitWrite,
) -> Result<u64, DecompressError> {
    let mut decoder = HuffmanDecoder::new(tree);
    let mut decoded = 0;
    loop {
        let bit = input
            .read_bits(1)?
            .ok_or(DecompressError::TruncatedStream { decoded })?;
        match decoder.step(bit == 1) {
            Some(PSEUDO_EOF) => return Ok(decoded),
            Some(symbol) => {
                output.write_bits(BITS_PER_WORD, u32::from(symbol))?;
                decoded += 1;
            }
            None => {}
        }
    }
}

/// Decompress a complete stream held in memory.
pub fn decompress_to_vec(data: &[u8]) -> Result<Vec<u8>, DecompressError> {
    let mut input = BitReader::new(data);
    let mut output = BitWriter::new(Vec::with_capacity(data.len() * 2));
    Decompressor::default().decompress(&mut input, &mut output)?;
    Ok(output.finish()?)
}
