//! Canonical Huffman codec over the byte alphabet.
//!
//! A `Codebook` maps each symbol (byte value 0-255) to a prefix-free
//! codeword. Construction is the classic minimum-redundancy algorithm:
//! repeatedly merge the two lightest nodes, then read codewords off the
//! root-to-leaf paths (left = 0, right = 1).
//!
//! # Determinism
//!
//! Heap ties are broken by node creation order (leaves in ascending symbol
//! order, merged nodes in merge order), so the same model always produces
//! the same codebook and therefore byte-identical encoded output.
//!
//! # Termination
//!
//! There is no end-of-stream symbol. The decoder stops after a caller-given
//! symbol count, which is what lets the encoder pad the payload to a byte
//! boundary without the pad bits ever being mistaken for data.

use crate::bitio::{BitPacker, BitReader};
use crate::error::{HuffmanError, Result};
use std::collections::BinaryHeap;

/// Longest supported codeword, bounded by the u64 codeword representation.
///
/// The header format could describe up to 255 bits, but depths past 64 only
/// arise from weight ratios below ~1e-13; construction and parsing both
/// reject them instead of carrying multi-word codewords.
pub const MAX_CODE_BITS: usize = 64;

/// One codebook entry: a codeword and its length in bits.
///
/// Only the low `bit_length` bits of `word` are significant; they are
/// emitted MSB-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    /// Codeword length in bits (1..=64)
    pub bit_length: u8,
    /// Codeword bit pattern, right-aligned
    pub word: u64,
}

/// Count how often each byte value occurs in `data`.
///
/// The result can be fed straight to [`Codebook::from_frequencies`] to
/// self-model a buffer.
pub fn count_frequencies(data: &[u8]) -> [u64; 256] {
    let mut freqs = [0u64; 256];
    for &byte in data {
        freqs[byte as usize] += 1;
    }
    freqs
}

/// A prefix-free code for the byte alphabet.
///
/// Stored as a fixed array indexed by symbol value: the alphabet is closed
/// and bounded, so there is exactly one optional slot per symbol and no
/// hashing involved. Symbols with zero weight in the model have no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebook {
    codes: [Option<Code>; 256],
}

/// Arena node used during tree construction.
enum TreeNode {
    Leaf(u8),
    Internal { left: usize, right: usize },
}

/// Heap entry ordered as a min-heap on (weight, creation order).
struct HeapEntry {
    weight: f64,
    order: usize,
    node: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed for BinaryHeap: lightest (then oldest) node pops first
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl Codebook {
    /// Build a codebook from integer symbol frequencies.
    ///
    /// Symbols with frequency zero are absent from the alphabet.
    ///
    /// # Errors
    /// - `HuffmanError::EmptyAlphabet` if no symbol has a positive count
    /// - `HuffmanError::UnsupportedCodeLength` if the tree depth exceeds
    ///   [`MAX_CODE_BITS`]
    pub fn from_frequencies(freqs: &[u64; 256]) -> Result<Self> {
        let mut weights = [0.0f64; 256];
        for (slot, &count) in weights.iter_mut().zip(freqs.iter()) {
            *slot = count as f64;
        }
        Self::from_weights(&weights)
    }

    /// Build a codebook from a probability mass function.
    ///
    /// Weights only steer the tree shape, so the probabilities need not sum
    /// to one. Non-positive entries are treated as absent symbols.
    pub fn from_probabilities(pmf: &[f64; 256]) -> Result<Self> {
        Self::from_weights(pmf)
    }

    fn from_weights(weights: &[f64; 256]) -> Result<Self> {
        let mut arena: Vec<TreeNode> = Vec::new();
        let mut heap = BinaryHeap::new();

        for (symbol, &weight) in weights.iter().enumerate() {
            if weight > 0.0 {
                heap.push(HeapEntry {
                    weight,
                    order: arena.len(),
                    node: arena.len(),
                });
                arena.push(TreeNode::Leaf(symbol as u8));
            }
        }

        if heap.is_empty() {
            return Err(HuffmanError::EmptyAlphabet.into());
        }

        // Merge the two lightest nodes until one root remains. Merged nodes
        // get fresh (higher) order numbers, keeping ties reproducible.
        let mut order = arena.len();
        while heap.len() > 1 {
            let first = heap.pop().expect("heap has >1 entries");
            let second = heap.pop().expect("heap has >1 entries");
            heap.push(HeapEntry {
                weight: first.weight + second.weight,
                order,
                node: arena.len(),
            });
            arena.push(TreeNode::Internal {
                left: first.node,
                right: second.node,
            });
            order += 1;
        }
        let root = heap.pop().expect("heap has exactly one entry").node;

        // Codewords are the root-to-leaf paths: left 0, right 1.
        let mut codes = [None; 256];
        let mut stack = vec![(root, 0u64, 0usize)];
        while let Some((node, word, depth)) = stack.pop() {
            match arena[node] {
                TreeNode::Leaf(symbol) => {
                    // A lone symbol still needs one bit per occurrence;
                    // a zero-length code would make the payload unskippable.
                    let bit_length = depth.max(1);
                    codes[symbol as usize] = Some(Code {
                        bit_length: bit_length as u8,
                        word,
                    });
                }
                TreeNode::Internal { left, right } => {
                    if depth >= MAX_CODE_BITS {
                        return Err(HuffmanError::UnsupportedCodeLength {
                            length: depth + 1,
                        }
                        .into());
                    }
                    stack.push((left, word << 1, depth + 1));
                    stack.push((right, (word << 1) | 1, depth + 1));
                }
            }
        }

        Ok(Self { codes })
    }

    pub(crate) fn new_empty() -> Self {
        Self { codes: [None; 256] }
    }

    pub(crate) fn set(&mut self, symbol: u8, code: Code) {
        self.codes[symbol as usize] = Some(code);
    }

    /// Look up the codeword for a symbol, if the alphabet contains it.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols in the alphabet (1..=256 for built codebooks).
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|slot| slot.is_some()).count()
    }

    /// True if no symbol has an entry.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|slot| slot.is_none())
    }

    /// Iterate over `(symbol, code)` entries in ascending symbol order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, slot)| slot.map(|code| (symbol as u8, code)))
    }

    /// Encode `source` into a bit-packed payload.
    ///
    /// # Errors
    /// `HuffmanError::UnknownSymbol` if a source byte has no codebook entry.
    /// The model must cover the actual source alphabet; a mismatch is a
    /// usage error, not data corruption.
    pub fn encode(&self, source: &[u8]) -> Result<Vec<u8>> {
        let mut packer = BitPacker::new();
        for &symbol in source {
            let code = self.codes[symbol as usize]
                .ok_or(HuffmanError::UnknownSymbol { symbol })?;
            packer.append(code.word, code.bit_length as usize)?;
        }
        Ok(packer.to_bytes())
    }

    /// Decode exactly `source_len` symbols from a bit-packed payload.
    ///
    /// Trailing bits beyond the last symbol (byte-alignment padding, or pad
    /// bits that happen to form valid codewords) are ignored.
    ///
    /// # Errors
    /// - `HuffmanError::MalformedPayload` if the payload runs out of bits
    ///   before `source_len` symbols have been produced
    /// - `HuffmanError::InvalidCode` if a bit sequence leaves the tree
    pub fn decode(&self, payload: &[u8], source_len: usize) -> Result<Vec<u8>> {
        DecodeTree::from_codebook(self).decode(payload, source_len)
    }
}

/// Decoding tree stored as an arena of index-addressed nodes.
///
/// Node 0 is the root. Indices avoid ownership cycles and keep the whole
/// structure cheap to clone or share across independent decode calls.
#[derive(Debug, Clone)]
pub struct DecodeTree {
    nodes: Vec<DecodeNode>,
}

#[derive(Debug, Clone, Default)]
struct DecodeNode {
    /// Child indices for branch bits 0 and 1
    children: [Option<usize>; 2],
    /// Symbol emitted when the walk reaches this node
    symbol: Option<u8>,
}

impl DecodeTree {
    /// Build the tree by inserting every codeword path of `codebook`.
    pub fn from_codebook(codebook: &Codebook) -> Self {
        let mut nodes = vec![DecodeNode::default()];
        for (symbol, code) in codebook.entries() {
            let mut at = 0usize;
            for shift in (0..code.bit_length as usize).rev() {
                let branch = ((code.word >> shift) & 1) as usize;
                at = match nodes[at].children[branch] {
                    Some(next) => next,
                    None => {
                        let next = nodes.len();
                        nodes.push(DecodeNode::default());
                        nodes[at].children[branch] = Some(next);
                        next
                    }
                };
            }
            nodes[at].symbol = Some(symbol);
        }
        Self { nodes }
    }

    /// Walk the payload bit by bit, emitting a symbol at each leaf and
    /// resetting to the root, until `source_len` symbols are out.
    pub fn decode(&self, payload: &[u8], source_len: usize) -> Result<Vec<u8>> {
        let mut reader = BitReader::new(payload);
        let mut decoded = Vec::with_capacity(source_len);

        while decoded.len() < source_len {
            let mut at = 0usize;
            loop {
                if let Some(symbol) = self.nodes[at].symbol {
                    decoded.push(symbol);
                    break;
                }
                let position = reader.position();
                let bit = reader.read_bit().map_err(|_| HuffmanError::MalformedPayload {
                    expected: source_len,
                    decoded: decoded.len(),
                })?;
                at = match self.nodes[at].children[bit as usize] {
                    Some(next) => next,
                    None => {
                        return Err(HuffmanError::InvalidCode { position }.into());
                    }
                };
            }
        }

        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn freqs_of(data: &[u8]) -> [u64; 256] {
        count_frequencies(data)
    }

    #[test]
    fn test_round_trip_text() {
        let source = b"the quick brown fox jumps over the lazy dog";
        let codebook = Codebook::from_frequencies(&freqs_of(source)).unwrap();

        let payload = codebook.encode(source).unwrap();
        let decoded = codebook.decode(&payload, source.len()).unwrap();
        assert_eq!(decoded, source);
    }

    #[test]
    fn test_round_trip_all_symbols() {
        let source: Vec<u8> = (0..=255).collect();
        let codebook = Codebook::from_frequencies(&freqs_of(&source)).unwrap();
        assert_eq!(codebook.len(), 256);

        let payload = codebook.encode(&source).unwrap();
        let decoded = codebook.decode(&payload, source.len()).unwrap();
        assert_eq!(decoded, source);
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let mut freqs = [0u64; 256];
        freqs[b'A' as usize] = 1000;
        let codebook = Codebook::from_frequencies(&freqs).unwrap();

        let code = codebook.get(b'A').unwrap();
        assert_eq!(code.bit_length, 1);

        // 12 one-bit codewords pack into 2 bytes
        let source = vec![b'A'; 12];
        let payload = codebook.encode(&source).unwrap();
        assert_eq!(payload.len(), 2);
        assert_eq!(codebook.decode(&payload, 12).unwrap(), source);
    }

    #[test]
    fn test_empty_alphabet() {
        let freqs = [0u64; 256];
        assert!(matches!(
            Codebook::from_frequencies(&freqs),
            Err(Error::Huffman(HuffmanError::EmptyAlphabet))
        ));
    }

    #[test]
    fn test_skewed_frequencies_give_short_code() {
        let mut freqs = [1u64; 256];
        freqs[0] = 100_000;
        let codebook = Codebook::from_frequencies(&freqs).unwrap();

        let dominant = codebook.get(0).unwrap();
        assert_eq!(dominant.bit_length, 1);
        for symbol in 1..=255u8 {
            assert!(codebook.get(symbol).unwrap().bit_length > dominant.bit_length);
        }
    }

    #[test]
    fn test_prefix_free() {
        let source = b"abracadabra abracadabra, mississippi!";
        let codebook = Codebook::from_frequencies(&freqs_of(source)).unwrap();

        let entries: Vec<(u8, Code)> = codebook.entries().collect();
        for (sym_a, a) in &entries {
            for (sym_b, b) in &entries {
                if sym_a == sym_b {
                    continue;
                }
                let shorter = a.bit_length.min(b.bit_length) as u32;
                let prefix_a = a.word >> (a.bit_length as u32 - shorter);
                let prefix_b = b.word >> (b.bit_length as u32 - shorter);
                assert_ne!(
                    prefix_a, prefix_b,
                    "codes for {sym_a} and {sym_b} share a prefix"
                );
            }
        }
    }

    #[test]
    fn test_deterministic_construction() {
        // Heavy ties: every symbol equally likely
        let freqs = [7u64; 256];
        let first = Codebook::from_frequencies(&freqs).unwrap();
        let second = Codebook::from_frequencies(&freqs).unwrap();
        assert_eq!(first, second);

        let source: Vec<u8> = (0..=255).cycle().take(2048).collect();
        assert_eq!(
            first.encode(&source).unwrap(),
            second.encode(&source).unwrap()
        );
    }

    #[test]
    fn test_probability_model() {
        let mut pmf = [0.0f64; 256];
        pmf[0] = 0.8;
        for slot in pmf.iter_mut().skip(1) {
            *slot = 0.2 / 255.0;
        }
        let codebook = Codebook::from_probabilities(&pmf).unwrap();
        assert_eq!(codebook.len(), 256);
        assert_eq!(codebook.get(0).unwrap().bit_length, 1);
    }

    #[test]
    fn test_unknown_symbol() {
        let codebook = Codebook::from_frequencies(&freqs_of(b"aaabbc")).unwrap();
        let result = codebook.encode(b"aabbz");
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::UnknownSymbol { symbol: b'z' }))
        ));
    }

    #[test]
    fn test_unused_model_symbols_are_harmless() {
        // Model covers more symbols than the source uses
        let mut freqs = [0u64; 256];
        freqs[b'x' as usize] = 10;
        freqs[b'y' as usize] = 5;
        freqs[b'z' as usize] = 1;
        let codebook = Codebook::from_frequencies(&freqs).unwrap();

        let source = b"xxyx";
        let payload = codebook.encode(source).unwrap();
        assert_eq!(codebook.decode(&payload, source.len()).unwrap(), source);
    }

    #[test]
    fn test_truncated_payload() {
        let source = b"hello hello hello hello";
        let codebook = Codebook::from_frequencies(&freqs_of(source)).unwrap();
        let payload = codebook.encode(source).unwrap();

        let cut = &payload[..payload.len() / 2];
        let result = codebook.decode(cut, source.len());
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::MalformedPayload { .. }))
        ));
    }

    #[test]
    fn test_pad_bits_do_not_decode() {
        let source = b"aaaaaabbbc";
        let codebook = Codebook::from_frequencies(&freqs_of(source)).unwrap();
        let mut payload = codebook.encode(source).unwrap();

        // Extra trailing bytes simulate alignment padding gone long
        payload.push(0xFF);
        let decoded = codebook.decode(&payload, source.len()).unwrap();
        assert_eq!(decoded, source);
    }

    #[test]
    fn test_code_length_limit() {
        // Exponential weights force a degenerate chain deeper than 64 bits
        let mut pmf = [0.0f64; 256];
        pmf[0] = 1.0;
        pmf[1] = 1.0;
        for i in 2..=65usize {
            pmf[i] = (2.0f64).powi(i as i32 - 1);
        }
        let result = Codebook::from_probabilities(&pmf);
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::UnsupportedCodeLength { .. }))
        ));
    }

    #[test]
    fn test_count_frequencies() {
        let freqs = count_frequencies(b"aab");
        assert_eq!(freqs[b'a' as usize], 2);
        assert_eq!(freqs[b'b' as usize], 1);
        assert_eq!(freqs.iter().sum::<u64>(), 3);
    }
}
