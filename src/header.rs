//! Tree header: the 32-bit format marker followed by the trie in pre-order.
//!
//! An internal node is a single `0` bit followed by its left then right
//! subtree. A leaf is a `1` bit followed by its symbol in 9 bits. Both
//! directions walk with an explicit stack, so a degenerate chain-shaped trie
//! costs heap rather than call depth.

use crate::bitio::{BitSink, BitSource};
use crate::error::{CodecError, Result};
use crate::trie::{Node, NodeId, Trie};
use crate::{Symbol, BITS_PER_INT, BITS_PER_WORD, HUFF_TREE, PSEUDO_EOF};

const SYMBOL_BITS: u32 = BITS_PER_WORD + 1;

pub fn write_marker<S: BitSink>(out: &mut S) -> Result<()> {
    out.write_bits(BITS_PER_INT, u64::from(HUFF_TREE))
}

/// Consume the marker, failing before anything else is read if it is wrong.
pub fn read_marker<S: BitSource>(input: &mut S) -> Result<()> {
    match input.read_bits(BITS_PER_INT)? {
        Some(HUFF_TREE) => Ok(()),
        Some(found) => Err(CodecError::MalformedHeader { found }),
        None => Err(CodecError::Truncated { context: "marker" }),
    }
}

pub fn write_header<S: BitSink>(trie: &Trie, out: &mut S) -> Result<()> {
    let mut stack = vec![trie.root()];
    while let Some(id) = stack.pop() {
        match *trie.node(id) {
            Node::Internal { left, right, .. } => {
                out.write_bit(false)?;
                stack.push(right);
                stack.push(left);
            }
            Node::Leaf { symbol, .. } => {
                out.write_bit(true)?;
                out.write_bits(SYMBOL_BITS, u64::from(symbol))?;
            }
        }
    }
    Ok(())
}

/// Rebuild a trie from its pre-order encoding. Weights and internal values
/// are not stored and come back as zero.
pub fn read_header<S: BitSource>(input: &mut S) -> Result<Trie> {
    let truncated = || CodecError::Truncated { context: "tree header" };
    let mut nodes = Vec::new();
    // One entry per open internal node: its left child once that is complete.
    let mut open: Vec<Option<NodeId>> = Vec::new();

    loop {
        let mut done = if input.read_bit()?.ok_or_else(truncated)? {
            let raw = input.read_bits(SYMBOL_BITS)?.ok_or_else(truncated)?;
            if raw > u32::from(PSEUDO_EOF) {
                return Err(CodecError::InvalidTree(format!("leaf symbol {raw} out of range")));
            }
            nodes.push(Node::Leaf {
                symbol: raw as Symbol,
                weight: 0,
            });
            nodes.len() - 1
        } else {
            open.push(None);
            continue;
        };

        // Close every internal node whose right subtree just finished.
        loop {
            let Some(slot) = open.last_mut() else {
                return Ok(Trie::from_parts(nodes, done));
            };
            match *slot {
                None => {
                    *slot = Some(done);
                    break;
                }
                Some(left) => {
                    open.pop();
                    nodes.push(Node::Internal {
                        weight: 0,
                        value: 0,
                        left,
                        right: done,
                    });
                    done = nodes.len() - 1;
                }
            }
        }
    }
}
