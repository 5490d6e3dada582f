//! huffpack: lossless Huffman file codec.
//!
//! A compressed stream is laid out as:
//! - the 32-bit marker [`HUFF_TREE`]
//! - the Huffman trie in pre-order (see [`header`])
//! - the payload: one prefix code per input byte, closed by the code of
//!   [`PSEUDO_EOF`]
//!
//! Compression scans the input twice (count, then encode) and needs a
//! seekable source. Decompression is a single forward pass.

pub mod bitio;
pub mod code;
pub mod config;
pub mod error;
pub mod frequency;
pub mod header;
pub mod transcode;
pub mod trie;

use std::io::{Cursor, Read, Seek, Write};

use serde::Serialize;
use tracing::{debug, trace};

use crate::bitio::{BitInput, BitOutput, BitSink, BitSource, Rewind};
use crate::code::CodeTable;
use crate::config::CodecConfig;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::trie::Trie;

/// A byte value (0..=255) or the end-of-stream pseudo-symbol (256).
pub type Symbol = u16;

pub const BITS_PER_WORD: u32 = 8;
pub const BITS_PER_INT: u32 = 32;
pub const ALPH_SIZE: usize = 1 << BITS_PER_WORD;
pub const PSEUDO_EOF: Symbol = ALPH_SIZE as Symbol;
pub const HUFF_NUMBER: u32 = 0xface_8200;
pub const HUFF_TREE: u32 = HUFF_NUMBER | 1;

/// Bit accounting for one compress or decompress call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionStats {
    pub original_bytes: u64,
    /// Marker, header and payload bits, rounded up to whole bytes.
    pub compressed_bytes: u64,
    pub header_bits: u64,
    pub payload_bits: u64,
    /// Leaves in the trie, including the pseudo-symbol.
    pub distinct_symbols: usize,
    /// Entropy of the input in bits per byte. Only known when compressing.
    pub entropy_bits: Option<f64>,
}

impl CompressionStats {
    fn new(original_bytes: u64, header_bits: u64, payload_bits: u64, trie: &Trie) -> Self {
        let total_bits = u64::from(BITS_PER_INT) + header_bits + payload_bits;
        Self {
            original_bytes,
            compressed_bytes: total_bits.div_ceil(8),
            header_bits,
            payload_bits,
            distinct_symbols: trie.leaf_count(),
            entropy_bits: None,
        }
    }

    /// Compressed size over original size; 1.0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            1.0
        } else {
            self.compressed_bytes as f64 / self.original_bytes as f64
        }
    }
}

/// The main codec engine
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: CodecConfig,
}

impl Compressor {
    /// Create a new compressor with the given configuration
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Configuration this compressor was built with
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress `input` into `output`.
    ///
    /// `input` is read from its current position to the end, sought back to
    /// that position, and read again; it must yield the same bytes both
    /// times. Bytes are pulled and pushed one at a time, so wrap files in
    /// `BufReader`/`BufWriter`.
    pub fn compress<R, W>(&self, input: R, output: W) -> Result<CompressionStats>
    where
        R: Read + Seek,
        W: Write,
    {
        let mut input = BitInput::seekable(input)?;
        let mut out = BitOutput::new(output);

        let counts = FrequencyTable::read_for_counts(&mut input, self.config.max_input_size)?;
        let trie = Trie::from_counts(&counts);
        let codes = CodeTable::from_trie(&trie);
        if self.config.logs_detail() {
            for (symbol, code) in codes.iter() {
                trace!(symbol, bits = code.len(), code = %code, "code table entry");
            }
        }

        header::write_marker(&mut out)?;
        header::write_header(&trie, &mut out)?;
        let header_bits = out.bits_written() - u64::from(BITS_PER_INT);

        input.rewind()?;
        let consumed = transcode::write_compressed_bits(&codes, &mut input, &mut out)?;
        let payload_bits = out.bits_written() - header_bits - u64::from(BITS_PER_INT);
        out.flush()?;

        let mut stats = CompressionStats::new(consumed, header_bits, payload_bits, &trie);
        stats.entropy_bits = Some(counts.entropy_bits());
        if self.config.logs_summary() {
            debug!(
                bytes = consumed,
                symbols = stats.distinct_symbols,
                depth = trie.depth(),
                header_bits,
                payload_bits,
                entropy = counts.entropy_bits(),
                "compressed"
            );
        }
        Ok(stats)
    }

    /// Decompress `input` into `output`.
    ///
    /// A wrong marker fails before any output is produced. A payload that
    /// ends before the end-of-stream code fails with
    /// [`CodecError::Truncated`](crate::error::CodecError::Truncated), and
    /// whatever was decoded up to that point has already been written.
    /// As with `compress`, unbuffered files cost one call per byte.
    pub fn decompress<R, W>(&self, input: R, output: W) -> Result<CompressionStats>
    where
        R: Read,
        W: Write,
    {
        let mut input = BitInput::new(input);
        let mut out = BitOutput::new(output);

        header::read_marker(&mut input)?;
        let trie = header::read_header(&mut input)?;
        let header_bits = input.bits_read() - u64::from(BITS_PER_INT);
        if self.config.logs_detail() {
            trace!(header_bits, nodes = trie.len(), "read tree header");
        }

        let emitted = transcode::read_compressed_bits(&trie, &mut input, &mut out)?;
        let payload_bits = input.bits_read() - header_bits - u64::from(BITS_PER_INT);
        out.flush()?;

        let stats = CompressionStats::new(emitted, header_bits, payload_bits, &trie);
        if self.config.logs_summary() {
            debug!(bytes = emitted, header_bits, payload_bits, "decompressed");
        }
        Ok(stats)
    }

    /// Compress an in-memory buffer
    pub fn compress_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.compress(Cursor::new(data), &mut output)?;
        Ok(output)
    }

    /// Decompress an in-memory buffer
    pub fn decompress_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.decompress(data, &mut output)?;
        Ok(output)
    }
}
