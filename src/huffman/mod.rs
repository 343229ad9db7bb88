//! Huffman coding is a method of encoding where symbols are assigned a code,
//! and more commonly used symbols get shorter codes, and less commonly
//! used symbols get longer codes. Codes are prefix free, meaning no two codes
//! will start with the same sequence of bits.
//!
//! The code is represented as a full binary tree. Walking left appends a `0`,
//! walking right appends a `1`, every leaf carries one symbol.

mod huffman_decoder;
mod huffman_encoder;
pub use huffman_decoder::*;
pub use huffman_encoder::*;

use crate::common::Symbol;

/// A node of a [SymbolTree].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        /// Only meaningful while the tree is built, leaves read from a header have weight 0
        weight: u64,
    },
    Internal {
        /// Sum of the weights of both children
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(symbol: Symbol, weight: u64) -> Node {
        Node::Leaf { symbol, weight }
    }

    /// Combine two nodes, `left` ends up behind the `0` edge.
    pub fn merge(left: Node, right: Node) -> Node {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The symbol of a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Follow one edge of the tree. Leaves have no children and return `None`.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    /// Same shape and same symbols at the same positions. Weights are ignored.
    pub fn same_shape(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Leaf { symbol: a, .. }, Node::Leaf { symbol: b, .. }) => a == b,
            (
                Node::Internal {
                    left: l1,
                    right: r1,
                    ..
                },
                Node::Internal {
                    left: l2,
                    right: r2,
                    ..
                },
            ) => l1.same_shape(l2) && r1.same_shape(r2),
            _ => false,
        }
    }
}

/// The Huffman code of one stream as a full binary tree.
///
/// Built once, either from a [FrequencyTable](crate::encoding::frequency::FrequencyTable)
/// or from a serialized header, and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTree {
    root: Node,
}

impl SymbolTree {
    pub fn from_root(root: Node) -> Self {
        SymbolTree { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// True if the root itself is a leaf. This happens for empty inputs where the end
    /// marker is the only symbol, its code is zero bits long.
    pub fn is_degenerate(&self) -> bool {
        self.root.is_leaf()
    }

    /// All leaf symbols, left to right.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => symbols.push(*symbol),
                Node::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        symbols
    }

    /// Number of edges on the longest path from the root to a leaf.
    pub fn depth(&self) -> usize {
        fn depth_of(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Internal { left, right, .. } => 1 + depth_of(left).max(depth_of(right)),
            }
        }
        depth_of(&self.root)
    }

    /// Structural equality, see [Node::same_shape].
    pub fn same_shape(&self, other: &SymbolTree) -> bool {
        self.root.same_shape(&other.root)
    }
}

/// Compress and decompress `data`, panicking if anything goes wrong on the way.
#[cfg(any(test, feature = "fuzz_exports"))]
pub fn round_trip(data: &[u8]) {
    let compressed = crate::compress_to_vec(data).unwrap();
    let decompressed = crate::decompress_to_vec(&compressed).unwrap();
    assert!(
        decompressed == data,
        "round trip changed the data, {} bytes in and {} bytes out",
        data.len(),
        decompressed.len()
    );
}
