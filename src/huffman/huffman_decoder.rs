use super::{Node, SymbolTree};
use crate::common::{Symbol, LEAF_VALUE_BITS, MAX_TREE_DEPTH, NUM_SYMBOLS, PSEUDO_EOF};
use crate::decoding::errors::HeaderError;
use crate::io::BitRead;

impl SymbolTree {
    /// Read a tree written by [SymbolTree::write_header].
    ///
    /// Besides running out of input, this rejects everything the writer can not
    /// produce: leaf values above the end marker, symbols in more than one leaf,
    /// nesting deeper than any 257 leaf tree and trees without an end marker.
    pub fn read_header(source: &mut impl BitRead) -> Result<SymbolTree, HeaderError> {
        let mut seen = [false; NUM_SYMBOLS];
        let root = read_node(source, 0, &mut seen)?;
        if !seen[usize::from(PSEUDO_EOF)] {
            return Err(HeaderError::MissingEndMarker);
        }
        Ok(SymbolTree::from_root(root))
    }
}

fn read_node(
    source: &mut impl BitRead,
    depth: usize,
    seen: &mut [bool; NUM_SYMBOLS],
) -> Result<Node, HeaderError> {
    let is_leaf = source.read_bits(1)?.ok_or(HeaderError::Truncated)?;
    if is_leaf == 1 {
        let value = source
            .read_bits(LEAF_VALUE_BITS)?
            .ok_or(HeaderError::Truncated)?;
        if value > u32::from(PSEUDO_EOF) {
            return Err(HeaderError::InvalidSymbol { got: value });
        }
        let symbol = value as Symbol;
        if core::mem::replace(&mut seen[usize::from(symbol)], true) {
            return Err(HeaderError::DuplicateSymbol { symbol });
        }
        return Ok(Node::leaf(symbol, 0));
    }

    if depth >= MAX_TREE_DEPTH {
        return Err(HeaderError::TreeTooDeep {
            limit: MAX_TREE_DEPTH,
        });
    }
    let left = read_node(source, depth + 1, seen)?;
    let right = read_node(source, depth + 1, seen)?;
    Ok(Node::merge(left, right))
}

/// Walks a [SymbolTree] one bit at a time and reports every leaf it reaches.
pub struct HuffmanDecoder<'tree> {
    root: &'tree Node,
    current: &'tree Node,
}

impl<'t> HuffmanDecoder<'t> {
    pub fn new(tree: &'t SymbolTree) -> HuffmanDecoder<'t> {
        HuffmanDecoder {
            root: tree.root(),
            current: tree.root(),
        }
    }

    /// Follow the edge for `bit`. Returns the symbol if a leaf was reached, the next
    /// call then starts at the root again.
    ///
    /// A tree that consists of only a leaf has no edges; that leaf is reported for
    /// every bit.
    pub fn step(&mut self, bit: bool) -> Option<Symbol> {
        let next = match self.current.child(bit) {
            Some(next) => next,
            None => return self.current.symbol(),
        };
        match next.symbol() {
            Some(symbol) => {
                self.current = self.root;
                Some(symbol)
            }
            None => {
                self.current = next;
                None
            }
        }
    }

    /// True if no code word is partially consumed.
    pub fn at_root(&self) -> bool {
        core::ptr::eq(self.current, self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::HuffmanDecoder;
    use crate::common::PSEUDO_EOF;
    use crate::decoding::bit_reader::BitReader;
    use crate::decoding::errors::HeaderError;
    use crate::encoding::bit_writer::BitWriter;
    use crate::encoding::frequency::FrequencyTable;
    use crate::huffman::{Node, SymbolTree};
    use crate::io::{BitRead, BitWrite};

    fn header_of(tree: &SymbolTree) -> Vec<u8> {
        let mut bw = BitWriter::new(Vec::new());
        tree.write_header(&mut bw).unwrap();
        bw.finish().unwrap()
    }

    fn bits(fields: &[(u8, u32)]) -> Vec<u8> {
        let mut bw = BitWriter::new(Vec::new());
        for (num_bits, value) in fields {
            bw.write_bits(*num_bits, *value).unwrap();
        }
        bw.finish().unwrap()
    }

    #[test]
    fn header_round_trip() {
        let inputs: [&[u8]; 4] = [
            b"",
            b"A",
            b"aabbbcccc",
            b"the quick brown fox jumps over the lazy dog",
        ];
        for data in inputs {
            let tree = SymbolTree::build(&FrequencyTable::from_bytes(data));
            let header = header_of(&tree);
            let mut br = BitReader::new(header.as_slice());
            let read = SymbolTree::read_header(&mut br).unwrap();
            assert!(read.same_shape(&tree));
            assert_eq!(br.bits_read(), tree.header_bits());
        }
    }

    #[test]
    fn all_symbols_round_trip() {
        let data: Vec<u8> = (0..=255u8).flat_map(|b| vec![b; usize::from(b) + 1]).collect();
        let tree = SymbolTree::build(&FrequencyTable::from_bytes(&data));
        let header = header_of(&tree);
        let read = SymbolTree::read_header(&mut BitReader::new(header.as_slice())).unwrap();
        assert!(read.same_shape(&tree));
        assert_eq!(read.symbols().len(), 257);
    }

    #[test]
    fn truncated_header() {
        let tree = SymbolTree::build(&FrequencyTable::from_bytes(b"aabbbcccc"));
        let header = header_of(&tree);
        let cut = &header[..header.len() - 3];
        assert!(matches!(
            SymbolTree::read_header(&mut BitReader::new(cut)),
            Err(HeaderError::Truncated)
        ));
        assert!(matches!(
            SymbolTree::read_header(&mut BitReader::new(&[0u8; 0][..])),
            Err(HeaderError::Truncated)
        ));
    }

    #[test]
    fn rejects_invalid_symbol() {
        let header = bits(&[(1, 1), (9, 300)]);
        assert!(matches!(
            SymbolTree::read_header(&mut BitReader::new(header.as_slice())),
            Err(HeaderError::InvalidSymbol { got: 300 })
        ));
    }

    #[test]
    fn rejects_duplicate_symbol() {
        let header = bits(&[(1, 0), (1, 1), (9, 7), (1, 1), (9, 7)]);
        assert!(matches!(
            SymbolTree::read_header(&mut BitReader::new(header.as_slice())),
            Err(HeaderError::DuplicateSymbol { symbol: 7 })
        ));
    }

    #[test]
    fn rejects_missing_end_marker() {
        let header = bits(&[(1, 0), (1, 1), (9, 7), (1, 1), (9, 8)]);
        assert!(matches!(
            SymbolTree::read_header(&mut BitReader::new(header.as_slice())),
            Err(HeaderError::MissingEndMarker)
        ));
    }

    #[test]
    fn rejects_endless_nesting() {
        let zeros = vec![0u8; 1024];
        assert!(matches!(
            SymbolTree::read_header(&mut BitReader::new(zeros.as_slice())),
            Err(HeaderError::TreeTooDeep { limit: 256 })
        ));
    }

    #[test]
    fn walks_to_leaves() {
        // c = 0, b = 10, EOF = 110, a = 111
        let tree = SymbolTree::build(&FrequencyTable::from_bytes(b"aabbbcccc"));
        let mut decoder = HuffmanDecoder::new(&tree);
        assert_eq!(decoder.step(false), Some(u16::from(b'c')));
        assert!(decoder.at_root());
        assert_eq!(decoder.step(true), None);
        assert!(!decoder.at_root());
        assert_eq!(decoder.step(false), Some(u16::from(b'b')));
        assert_eq!(decoder.step(true), None);
        assert_eq!(decoder.step(true), None);
        assert_eq!(decoder.step(true), Some(u16::from(b'a')));
        assert_eq!(decoder.step(true), None);
        assert_eq!(decoder.step(true), None);
        assert_eq!(decoder.step(false), Some(PSEUDO_EOF));
    }

    #[test]
    fn single_leaf_walk() {
        let tree = SymbolTree::from_root(Node::leaf(PSEUDO_EOF, 0));
        let mut decoder = HuffmanDecoder::new(&tree);
        assert_eq!(decoder.step(true), Some(PSEUDO_EOF));
        assert!(decoder.at_root());
    }
}
