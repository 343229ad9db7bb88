use super::{Node, SymbolTree};
use crate::common::{Symbol, LEAF_VALUE_BITS, MAX_TREE_DEPTH, NUM_SYMBOLS, PSEUDO_EOF};
use crate::encoding::frequency::FrequencyTable;
use crate::io::{BitWrite, Error};
use core::cmp::Ordering;
use std::collections::BinaryHeap;

/// Entry of the priority queue used while building a tree.
///
/// Ordered by weight, ties are broken by the order in which nodes entered the queue.
/// Leaves enter in ascending symbol order, merged nodes in the order they are created,
/// which makes the resulting tree a pure function of the frequency table.
struct PendingNode {
    weight: u64,
    order: usize,
    node: Node,
}

impl PartialEq for PendingNode {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.order == other.order
    }
}

impl Eq for PendingNode {}

impl PartialOrd for PendingNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingNode {
    // Reversed, so the max-heap hands out the lightest and oldest node first
    fn cmp(&self, other: &Self) -> Ordering {
        match other.weight.cmp(&self.weight) {
            Ordering::Equal => other.order.cmp(&self.order),
            ord => ord,
        }
    }
}

impl SymbolTree {
    /// Build a Huffman tree by repeatedly merging the two lightest nodes.
    ///
    /// The first node taken from the queue becomes the left child. If only one symbol
    /// has a non zero count the tree is a single leaf.
    pub fn build(frequencies: &FrequencyTable) -> SymbolTree {
        let mut queue = BinaryHeap::with_capacity(NUM_SYMBOLS);
        let mut order = 0;
        for (symbol, weight) in frequencies.present() {
            queue.push(PendingNode {
                weight,
                order,
                node: Node::leaf(symbol, weight),
            });
            order += 1;
        }

        let root = loop {
            let left = match queue.pop() {
                Some(left) => left,
                // unreachable with a FrequencyTable, the end marker is always counted
                None => break Node::leaf(PSEUDO_EOF, 1),
            };
            let right = match queue.pop() {
                Some(right) => right,
                None => break left.node,
            };
            let node = Node::merge(left.node, right.node);
            queue.push(PendingNode {
                weight: node.weight(),
                order,
                node,
            });
            order += 1;
        };

        SymbolTree { root }
    }

    /// Write the tree as a preorder bit sequence: `0` for an internal node followed by
    /// its left and right subtree, `1` followed by the 9 bit symbol for a leaf.
    /// Weights are not part of the header.
    pub fn write_header(&self, writer: &mut impl BitWrite) -> Result<(), Error> {
        fn write_node(node: &Node, writer: &mut impl BitWrite) -> Result<(), Error> {
            match node {
                Node::Leaf { symbol, .. } => {
                    writer.write_bits(1, 1)?;
                    writer.write_bits(LEAF_VALUE_BITS, u32::from(*symbol))
                }
                Node::Internal { left, right, .. } => {
                    writer.write_bits(1, 0)?;
                    write_node(left, writer)?;
                    write_node(right, writer)
                }
            }
        }
        write_node(&self.root, writer)
    }

    /// Size of the header [SymbolTree::write_header] produces, in bits.
    pub fn header_bits(&self) -> u64 {
        let leaves = self.symbols().len() as u64;
        // a full binary tree has one internal node less than it has leaves
        let internal = leaves - 1;
        leaves * (1 + u64::from(LEAF_VALUE_BITS)) + internal
    }
}

/// A single code word, stored most significant bit first.
///
/// Long enough for the deepest possible tree over the 257 symbol alphabet.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Code {
    bits: [u8; MAX_TREE_DEPTH / 8],
    len: u16,
}

impl Code {
    pub const fn empty() -> Self {
        Code {
            bits: [0; MAX_TREE_DEPTH / 8],
            len: 0,
        }
    }

    /// Append one bit.
    ///
    /// # Panics
    /// If the code would grow beyond the depth of any valid tree.
    pub fn push(&mut self, bit: bool) {
        let idx = usize::from(self.len);
        assert!(idx < MAX_TREE_DEPTH, "code longer than any valid tree is deep");
        if bit {
            self.bits[idx / 8] |= 0x80 >> (idx % 8);
        }
        self.len += 1;
    }

    fn with(mut self, bit: bool) -> Self {
        self.push(bit);
        self
    }

    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit `idx` counted from the start of the code.
    pub fn bit(&self, idx: usize) -> bool {
        assert!(idx < self.len());
        self.bits[idx / 8] & (0x80 >> (idx % 8)) != 0
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && (0..self.len()).all(|idx| self.bit(idx) == other.bit(idx))
    }

    /// Write the code into `writer` in order, a zero length code writes nothing.
    pub fn write_to(&self, writer: &mut impl BitWrite) -> Result<(), Error> {
        let full_bytes = self.len() / 8;
        for byte in &self.bits[..full_bytes] {
            writer.write_bits(8, u32::from(*byte))?;
        }
        let rest = (self.len() % 8) as u8;
        if rest > 0 {
            writer.write_bits(rest, u32::from(self.bits[full_bytes] >> (8 - rest)))?;
        }
        Ok(())
    }
}

impl core::fmt::Display for Code {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for idx in 0..self.len() {
            f.write_str(if self.bit(idx) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for Code {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Code({})", self)
    }
}

/// Maps every symbol that occurs in a tree to its code.
pub struct CodeTable {
    /// Index is the symbol, absent symbols have no code
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Derive the codes by walking every path from the root to a leaf, appending `0`
    /// for left and `1` for right edges. A tree consisting of only a leaf gives that
    /// symbol the empty code.
    pub fn from_tree(tree: &SymbolTree) -> Self {
        fn assign(node: &Node, path: Code, codes: &mut [Option<Code>]) {
            match node {
                Node::Leaf { symbol, .. } => codes[usize::from(*symbol)] = Some(path),
                Node::Internal { left, right, .. } => {
                    assign(left, path.with(false), codes);
                    assign(right, path.with(true), codes);
                }
            }
        }

        let mut codes = vec![None; NUM_SYMBOLS];
        assign(tree.root(), Code::empty(), &mut codes);
        CodeTable { codes }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(usize::from(symbol))?.as_ref()
    }

    /// All symbols with a code, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as Symbol, code)))
    }

    /// Number of bits the codes for `frequencies` would take, end marker included.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(symbol, code)| frequencies.get(symbol) * code.len() as u64)
            .sum()
    }
}
