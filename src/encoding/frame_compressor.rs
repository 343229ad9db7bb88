//! Compression of a whole input into one self describing stream.

use tracing::{debug, trace};

use super::bit_writer::BitWriter;
use super::frequency::FrequencyTable;
use crate::common::{
    CodecStats, DebugLevel, Symbol, BITS_PER_INT, BITS_PER_WORD, HUFF_TREE, PSEUDO_EOF,
};
use crate::decoding::bit_reader::BitReader;
use crate::decoding::errors::GetBitsError;
use crate::huffman::{CodeTable, SymbolTree};
use crate::io::{BitWrite, Error, Rewind};

#[derive(Debug)]
#[non_exhaustive]
pub enum CompressError {
    GetBitsError(GetBitsError),
    /// The second pass over the input produced a symbol the first pass never saw.
    /// Happens if the input changes between the two passes.
    UncountedSymbol { symbol: Symbol },
    Io(Error),
}

impl std::error::Error for CompressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompressError::GetBitsError(source) => Some(source),
            CompressError::Io(source) => Some(source),
            _ => None,
        }
    }
}

impl core::fmt::Display for CompressError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CompressError::GetBitsError(e) => write!(f, "{}", e),
            CompressError::UncountedSymbol { symbol } => write!(
                f,
                "Symbol {} has no code. Did the input change while it was compressed?",
                symbol,
            ),
            CompressError::Io(e) => write!(f, "Error while writing compressed data: {}", e),
        }
    }
}

impl From<GetBitsError> for CompressError {
    fn from(val: GetBitsError) -> Self {
        Self::GetBitsError(val)
    }
}

impl From<Error> for CompressError {
    fn from(val: Error) -> Self {
        Self::Io(val)
    }
}

/// Compresses an input into the tree header format.
///
/// The input is read twice: once to count symbol frequencies, and after a rewind
/// once more to encode it. The output is laid out as
///
/// | field       | size     | content                                   |
/// |-------------|----------|-------------------------------------------|
/// | magic       | 32 bits  | [HUFF_TREE]                               |
/// | tree header | variable | preorder tree, see [SymbolTree::write_header] |
/// | body        | variable | the code of every input byte, in order    |
/// | terminator  | variable | the code of [PSEUDO_EOF]                  |
/// | padding     | 0-7 bits | zero bits up to the next byte boundary    |
///
/// # Examples
/// ```
/// use huffproc::decoding::bit_reader::BitReader;
/// use huffproc::encoding::bit_writer::BitWriter;
/// use huffproc::{Compressor, DebugLevel};
///
/// let mut input = BitReader::new(std::io::Cursor::new(b"aabbbcccc"));
/// let mut output = BitWriter::new(Vec::new());
/// let stats = Compressor::new(DebugLevel::Off)
///     .compress(&mut input, &mut output)
///     .unwrap();
/// assert_eq!(stats.bits_read, 2 * 9 * 8);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Compressor {
    debug: DebugLevel,
}

impl Compressor {
    pub fn new(debug: DebugLevel) -> Self {
        Compressor { debug }
    }

    pub fn debug_level(&self) -> DebugLevel {
        self.debug
    }

    /// Compress everything `input` holds into `output` and close `output`.
    pub fn compress(
        &self,
        mut input: impl Rewind,
        mut output: impl BitWrite,
    ) -> Result<CodecStats, CompressError> {
        let bits_before = output.bits_written();

        let frequencies = FrequencyTable::count(&mut input)?;
        let first_pass_bits = input.bits_read();

        let tree = SymbolTree::build(&frequencies);
        let codes = CodeTable::from_tree(&tree);
        if self.debug.low() {
            debug!(
                bytes = frequencies.total_bytes(),
                symbols = codes.iter().count(),
                depth = tree.depth(),
                header_bits = tree.header_bits(),
                body_bits = codes.encoded_bits(&frequencies),
                "built huffman tree"
            );
        }
        if self.debug.high() {
            for (symbol, code) in codes.iter() {
                trace!(symbol, count = frequencies.get(symbol), %code, "code");
            }
        }

        output.write_bits(BITS_PER_INT, HUFF_TREE)?;
        tree.write_header(&mut output)?;

        input.rewind()?;
        while let Some(value) = input.read_bits(BITS_PER_WORD)? {
            let symbol = value as Symbol;
            let code = codes
                .get(symbol)
                .ok_or(CompressError::UncountedSymbol { symbol })?;
            code.write_to(&mut output)?;
        }
        codes
            .get(PSEUDO_EOF)
            .ok_or(CompressError::UncountedSymbol { symbol: PSEUDO_EOF })?
            .write_to(&mut output)?;

        let stats = CodecStats {
            bits_read: first_pass_bits + input.bits_read(),
            bits_written: output.bits_written() - bits_before,
        };
        output.close()?;

        if self.debug.low() {
            debug!(
                bits_read = stats.bits_read,
                bits_written = stats.bits_written,
                "compression finished"
            );
        }
        Ok(stats)
    }
}

/// Compress `data` into a freshly allocated buffer.
pub fn compress_to_vec(data: &[u8]) -> Result<Vec<u8>, CompressError> {
    let mut input = BitReader::new(std::io::Cursor::new(data));
    let mut output = BitWriter::new(Vec::with_capacity(data.len() / 2 + 8));
    Compressor::default().compress(&mut input, &mut output)?;
    Ok(output.finish()?)
}
