//! Payload encoding and decoding.

use tracing::warn;

use crate::bitio::{BitSink, BitSource};
use crate::code::CodeTable;
use crate::error::{CodecError, Result};
use crate::trie::{Node, Trie};
use crate::{Symbol, BITS_PER_WORD, PSEUDO_EOF};

/// Emit the code of every 8-bit chunk of `input`, then the pseudo-symbol's
/// code. Returns the number of bytes consumed.
pub fn write_compressed_bits<S, K>(codes: &CodeTable, input: &mut S, out: &mut K) -> Result<u64>
where
    S: BitSource,
    K: BitSink,
{
    let mut count = 0u64;
    while let Some(val) = input.read_bits(BITS_PER_WORD)? {
        let symbol = val as Symbol;
        let code = codes.get(symbol).ok_or(CodecError::UncodedSymbol(symbol))?;
        code.write_to(out)?;
        count += 1;
    }
    let eof = codes
        .get(PSEUDO_EOF)
        .ok_or(CodecError::UncodedSymbol(PSEUDO_EOF))?;
    eof.write_to(out)?;
    Ok(count)
}

/// Walk the trie one bit at a time, writing a byte at each literal leaf and
/// stopping at the pseudo-symbol. Returns the number of bytes written.
///
/// On a truncated payload the bytes decoded so far have already reached
/// `out` and are not retracted.
pub fn read_compressed_bits<S, K>(trie: &Trie, input: &mut S, out: &mut K) -> Result<u64>
where
    S: BitSource,
    K: BitSink,
{
    let root = trie.root();
    if let Node::Leaf { symbol, .. } = *trie.node(root) {
        // Zero-length codes: nothing to read.
        return if symbol == PSEUDO_EOF {
            Ok(0)
        } else {
            Err(CodecError::InvalidTree(format!(
                "single leaf {symbol} has no end-of-stream"
            )))
        };
    }

    let mut emitted = 0u64;
    let mut current = root;
    loop {
        let Some(bit) = input.read_bit()? else {
            warn!(emitted, "payload ended before end-of-stream symbol");
            return Err(CodecError::Truncated { context: "payload" });
        };
        current = trie
            .child(current, bit)
            .ok_or_else(|| CodecError::InvalidTree("walked past a leaf".into()))?;

        if let Node::Leaf { symbol, .. } = *trie.node(current) {
            if symbol == PSEUDO_EOF {
                return Ok(emitted);
            }
            out.write_bits(BITS_PER_WORD, u64::from(symbol))?;
            emitted += 1;
            current = root;
        }
    }
}
