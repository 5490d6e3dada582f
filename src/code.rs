//! Prefix codes read off the trie.

use std::fmt;

use crate::bitio::BitSink;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::trie::{Node, Trie};
use crate::{Symbol, ALPH_SIZE};

const WORD_BITS: usize = 64;

/// A root-to-leaf path, left = 0 and right = 1, stored MSB-first in 64-bit
/// words. Every word but the last is full; the last holds the remaining
/// `len % 64` bits right-aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Code {
    len: usize,
    words: Vec<u64>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, bit: bool) {
        if self.len % WORD_BITS == 0 {
            self.words.push(0);
        }
        if let Some(last) = self.words.last_mut() {
            *last = (*last << 1) | bit as u64;
        }
        self.len += 1;
    }

    fn extended(&self, bit: bool) -> Self {
        let mut code = self.clone();
        code.push(bit);
        code
    }

    /// Number of meaningful bits in word `k`.
    fn word_len(&self, k: usize) -> usize {
        if (k + 1) * WORD_BITS <= self.len {
            WORD_BITS
        } else {
            self.len % WORD_BITS
        }
    }

    pub fn bit(&self, i: usize) -> Option<bool> {
        if i >= self.len {
            return None;
        }
        let k = i / WORD_BITS;
        let shift = self.word_len(k) - 1 - i % WORD_BITS;
        Some((self.words[k] >> shift) & 1 == 1)
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).filter_map(move |i| self.bit(i))
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && self.bits().zip(other.bits()).all(|(a, b)| a == b)
    }

    /// Emit the code a word at a time. An empty code writes nothing.
    pub fn write_to<S: BitSink>(&self, sink: &mut S) -> Result<()> {
        for (k, &word) in self.words.iter().enumerate() {
            sink.write_bits(self.word_len(k) as u32, word)?;
        }
        Ok(())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping for every leaf in a trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Pre-order walk over the trie, recording each leaf's path.
    pub fn from_trie(trie: &Trie) -> Self {
        let mut codes = vec![None; ALPH_SIZE + 1];
        let mut stack = vec![(trie.root(), Code::new())];
        while let Some((id, path)) = stack.pop() {
            match *trie.node(id) {
                Node::Leaf { symbol, .. } => {
                    if let Some(slot) = codes.get_mut(symbol as usize) {
                        *slot = Some(path);
                    }
                }
                Node::Internal { left, right, .. } => {
                    stack.push((right, path.extended(true)));
                    stack.push((left, path.extended(false)));
                }
            }
        }
        Self { codes }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(symbol as usize)?.as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (i as Symbol, c)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Weighted path length: payload bits for the counted input plus one
    /// pseudo-symbol.
    pub fn encoded_bits(&self, freq: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(sym, code)| freq.count(sym) * code.len() as u64)
            .sum()
    }
}
