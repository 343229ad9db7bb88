//! Contains [FrequencyTable], the occurrence counts a Huffman tree is built from.

use crate::common::{Symbol, BITS_PER_WORD, NUM_SYMBOLS, PSEUDO_EOF};
use crate::decoding::errors::GetBitsError;
use crate::io::BitRead;

/// Occurrence count for every byte value plus the end marker.
///
/// The end marker is always counted exactly once, even for empty inputs, so it
/// survives tree construction and gets a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; NUM_SYMBOLS],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    /// A table with every count at zero except the end marker.
    pub fn new() -> Self {
        let mut counts = [0; NUM_SYMBOLS];
        counts[usize::from(PSEUDO_EOF)] = 1;
        FrequencyTable { counts }
    }

    /// Consume `source` until it signals the end of input, counting every 8 bit symbol.
    pub fn count(source: &mut impl BitRead) -> Result<Self, GetBitsError> {
        let mut table = Self::new();
        while let Some(value) = source.read_bits(BITS_PER_WORD)? {
            table.counts[value as usize] += 1;
        }
        Ok(table)
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for byte in data {
            table.counts[usize::from(*byte)] += 1;
        }
        table
    }

    pub fn get(&self, symbol: Symbol) -> u64 {
        self.counts[usize::from(symbol)]
    }

    /// Symbols with a non zero count and their count, in ascending symbol order.
    pub fn present(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, count)| (symbol as Symbol, *count))
    }

    /// Number of bytes counted, the end marker excluded.
    pub fn total_bytes(&self) -> u64 {
        self.counts[..usize::from(PSEUDO_EOF)].iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::FrequencyTable;
    use crate::common::PSEUDO_EOF;
    use crate::decoding::bit_reader::BitReader;

    #[test]
    fn empty_input_only_has_end_marker() {
        let mut br = BitReader::new(&[0u8; 0][..]);
        let table = FrequencyTable::count(&mut br).unwrap();
        assert_eq!(table.present().collect::<Vec<_>>(), vec![(PSEUDO_EOF, 1)]);
        assert_eq!(table.total_bytes(), 0);
    }

    #[test]
    fn counts_every_byte() {
        let data = b"aabbbcccc";
        let mut br = BitReader::new(&data[..]);
        let table = FrequencyTable::count(&mut br).unwrap();
        assert_eq!(table.get(u16::from(b'a')), 2);
        assert_eq!(table.get(u16::from(b'b')), 3);
        assert_eq!(table.get(u16::from(b'c')), 4);
        assert_eq!(table.get(u16::from(b'd')), 0);
        assert_eq!(table.get(PSEUDO_EOF), 1);
        assert_eq!(table.total_bytes(), 9);
        assert_eq!(table, FrequencyTable::from_bytes(data));
    }

    #[test]
    fn extreme_byte_values() {
        let table = FrequencyTable::from_bytes(&[0, 255, 255]);
        assert_eq!(
            table.present().collect::<Vec<_>>(),
            vec![(0, 1), (255, 2), (PSEUDO_EOF, 1)]
        );
    }
}
