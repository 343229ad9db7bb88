//! Values and interfaces shared between the encoding side
//! and the decoding side.

// --- SYMBOLS ---
/// A symbol of the Huffman alphabet. Values `0..=255` are literal bytes,
/// [`PSEUDO_EOF`] marks the logical end of the data.
pub type Symbol = u16;

/// Width of one input/output symbol in bits.
pub const BITS_PER_WORD: u8 = 8;
/// Number of literal byte values.
pub const ALPH_SIZE: usize = 1 << BITS_PER_WORD;
/// The end marker. It is encoded once after the last literal so the decoder knows where
/// the data ends, independent of the zero padding of the last byte.
pub const PSEUDO_EOF: Symbol = ALPH_SIZE as Symbol;
/// Number of slots in a frequency table, every byte value plus the end marker.
pub const NUM_SYMBOLS: usize = ALPH_SIZE + 1;
/// Leaf values in the tree header are stored in a fixed field of this many bits,
/// enough to represent `0..=PSEUDO_EOF`.
pub const LEAF_VALUE_BITS: u8 = BITS_PER_WORD + 1;
/// A full binary tree with [`NUM_SYMBOLS`] leaves can never be deeper than this.
pub const MAX_TREE_DEPTH: usize = NUM_SYMBOLS - 1;

// --- FRAMES ---
/// Width of the magic number in bits.
pub const BITS_PER_INT: u8 = 32;
/// Common prefix of all magic numbers of this format family.
pub const HUFF_NUMBER: u32 = 0xface_8200;
/// This magic number is written at the start of every stream that carries
/// its Huffman tree as a preorder header.
pub const HUFF_TREE: u32 = HUFF_NUMBER | 1;

/// How much diagnostic output the codec produces.
///
/// The level never influences the produced bitstream, it only decides which
/// `tracing` events are emitted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    #[default]
    Off,
    /// Per phase summaries: frequencies counted, tree size, bits written.
    Low,
    /// Everything from `Low` plus every code and every header node.
    High,
}

impl DebugLevel {
    /// Map the numeric levels used by older front ends (`0`, `1` and `4`) to a level.
    /// Everything between `Low` and `High` counts as `Low`.
    pub fn from_number(level: u8) -> Self {
        match level {
            0 => DebugLevel::Off,
            1..=3 => DebugLevel::Low,
            _ => DebugLevel::High,
        }
    }

    pub fn low(self) -> bool {
        self >= DebugLevel::Low
    }

    pub fn high(self) -> bool {
        self >= DebugLevel::High
    }
}

/// Bit accounting for one compress or decompress call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CodecStats {
    /// Bits consumed from the input channel, including both passes when compressing.
    pub bits_read: u64,
    /// Bits handed to the output channel, not counting the final zero padding.
    pub bits_written: u64,
}
