//! Symbol frequency counting.

use crate::bitio::BitSource;
use crate::error::{CodecError, Result};
use crate::{Symbol, ALPH_SIZE, BITS_PER_WORD, PSEUDO_EOF};

/// Occurrence counts for all 257 symbols. `PSEUDO_EOF` is always exactly 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPH_SIZE + 1],
}

impl FrequencyTable {
    /// Scan `input` once in 8-bit chunks until it is exhausted.
    pub fn read_for_counts<S: BitSource>(input: &mut S, limit: Option<u64>) -> Result<Self> {
        let mut counts = [0u64; ALPH_SIZE + 1];
        let mut total = 0u64;
        while let Some(val) = input.read_bits(BITS_PER_WORD)? {
            total += 1;
            if let Some(limit) = limit {
                if total > limit {
                    return Err(CodecError::InputTooLarge { limit });
                }
            }
            counts[val as usize] += 1;
        }
        counts[PSEUDO_EOF as usize] = 1;
        Ok(Self { counts })
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; ALPH_SIZE + 1];
        for &b in data {
            counts[b as usize] += 1;
        }
        counts[PSEUDO_EOF as usize] = 1;
        Self { counts }
    }

    pub fn count(&self, symbol: Symbol) -> u64 {
        self.counts.get(symbol as usize).copied().unwrap_or(0)
    }

    /// Symbols with a non-zero count, in ascending order, with their counts.
    pub fn present(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f > 0)
            .map(|(i, &f)| (i as Symbol, f))
    }

    /// Number of literal bytes counted, excluding the pseudo-symbol.
    pub fn total(&self) -> u64 {
        self.counts[..ALPH_SIZE].iter().sum()
    }

    /// Number of distinct symbols present, including the pseudo-symbol.
    pub fn distinct(&self) -> usize {
        self.present().count()
    }

    /// Shannon entropy of the literal bytes in bits per byte.
    pub fn entropy_bits(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let len = total as f64;
        let mut entropy = 0.0;
        for &f in &self.counts[..ALPH_SIZE] {
            if f > 0 {
                let p = f as f64 / len;
                entropy -= p * p.log2();
            }
        }
        entropy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitio::BitInput;
    use std::io::Cursor;

    #[test]
    fn test_empty_input_has_only_eof() {
        let mut input = BitInput::new(Cursor::new(Vec::new()));
        let freq = FrequencyTable::read_for_counts(&mut input, None).unwrap();
        assert_eq!(freq.total(), 0);
        assert_eq!(freq.distinct(), 1);
        assert_eq!(freq.count(PSEUDO_EOF), 1);
        assert_eq!(freq.entropy_bits(), 0.0);
    }

    #[test]
    fn test_stream_matches_slice() {
        let data = b"abracadabra";
        let mut input = BitInput::new(Cursor::new(data.to_vec()));
        let streamed = FrequencyTable::read_for_counts(&mut input, None).unwrap();
        assert_eq!(streamed, FrequencyTable::from_bytes(data));
        assert_eq!(streamed.count(b'a' as Symbol), 5);
        assert_eq!(streamed.count(b'z' as Symbol), 0);
        assert_eq!(streamed.distinct(), 6);
        assert_eq!(streamed.total(), 11);
    }

    #[test]
    fn test_eof_pinned_to_one() {
        let data = vec![0xFFu8; 300];
        let freq = FrequencyTable::from_bytes(&data);
        assert_eq!(freq.count(PSEUDO_EOF), 1);
        assert_eq!(freq.count(0xFF), 300);
        assert_eq!(
            freq.present().collect::<Vec<_>>(),
            vec![(0xFF, 300), (PSEUDO_EOF, 1)]
        );
    }

    #[test]
    fn test_limit_enforced() {
        let mut input = BitInput::new(Cursor::new(vec![1u8; 10]));
        let err = FrequencyTable::read_for_counts(&mut input, Some(4)).unwrap_err();
        assert!(matches!(err, CodecError::InputTooLarge { limit: 4 }));
    }

    #[test]
    fn test_entropy_two_symbols() {
        let freq = FrequencyTable::from_bytes(b"abababab");
        assert!((freq.entropy_bits() - 1.0).abs() < 1e-9);
    }
}
