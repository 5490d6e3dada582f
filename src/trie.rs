//! Huffman trie construction
//!
//! Nodes live in a flat arena and refer to their children by index. A trie
//! is built once per pass, either greedily from a [`FrequencyTable`] or
//! directly from a decoded header, and is never mutated afterwards.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::frequency::FrequencyTable;
use crate::Symbol;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        /// Sum of the children's values. Only meaningful while building.
        value: u32,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }

    fn value(&self) -> u32 {
        match *self {
            Node::Leaf { symbol, .. } => u32::from(symbol),
            Node::Internal { value, .. } => value,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Trie {
    /// Greedy Huffman construction.
    ///
    /// Leaves enter the queue in ascending symbol order and every merged node
    /// takes the next sequence number, so equal weights leave the queue in
    /// FIFO order. The first node extracted becomes the left child.
    pub fn from_counts(freq: &FrequencyTable) -> Self {
        let mut nodes = Vec::with_capacity(2 * freq.distinct());
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;

        for (symbol, weight) in freq.present() {
            let id = nodes.len();
            nodes.push(Node::Leaf { symbol, weight });
            heap.push(Reverse((weight, seq, id)));
            seq += 1;
        }

        // The pseudo-symbol is always counted, so the queue is never empty.
        let mut root = 0;
        while let Some(Reverse((_, _, left))) = heap.pop() {
            let Some(Reverse((_, _, right))) = heap.pop() else {
                root = left;
                break;
            };
            let (l, r) = (nodes[left], nodes[right]);
            let weight = l.weight() + r.weight();
            let id = nodes.len();
            nodes.push(Node::Internal {
                weight,
                value: l.value() + r.value(),
                left,
                right,
            });
            heap.push(Reverse((weight, seq, id)));
            seq += 1;
        }

        Self { nodes, root }
    }

    /// Assemble a trie from nodes whose child links already point into `nodes`.
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Follow one edge: `false` goes left, `true` goes right.
    /// Returns `None` when `id` is a leaf.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id] {
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
            Node::Leaf { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a built trie holds at least the pseudo-symbol leaf and
    /// a header read fails before producing an empty one.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, d)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { .. } => max = max.max(d),
                Node::Internal { left, right, .. } => {
                    stack.push((left, d + 1));
                    stack.push((right, d + 1));
                }
            }
        }
        max
    }
}
