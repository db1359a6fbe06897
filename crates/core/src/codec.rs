//! Full encode/decode pipeline: header plus payload in one byte block.
//!
//! `encode` produces a self-contained block (codebook header followed by
//! the bit-packed payload) and `decode` inverts it with no external state.
//! Both are pure functions of their inputs: no shared state, no I/O, safe
//! to call concurrently on independent buffers.

use crate::error::{HeaderError, Result};
use crate::header::{parse_header, serialize_header};
use crate::huffman::Codebook;

/// Encode `source` with `codebook` into a self-describing block.
///
/// Layout: `[header][payload]`, where the header carries the codebook and
/// the source length, and the payload is the packed codewords padded with
/// zero bits to the next byte boundary.
///
/// # Errors
/// - `HuffmanError::UnknownSymbol` if the model does not cover a source byte
/// - `HeaderError::SourceTooLong` if the source exceeds the u32 length field
pub fn encode(codebook: &Codebook, source: &[u8]) -> Result<Vec<u8>> {
    let source_length = u32::try_from(source.len()).map_err(|_| HeaderError::SourceTooLong {
        length: source.len(),
    })?;

    let payload = codebook.encode(source)?;
    let mut encoded = serialize_header(codebook, source_length);
    encoded.extend_from_slice(&payload);
    Ok(encoded)
}

/// Decode a self-describing block produced by [`encode`].
///
/// The header is parsed and integrity-checked first; only then is the
/// payload walked, for exactly the stored number of symbols. Trailing pad
/// bits are never inspected.
pub fn decode(encoded: &[u8]) -> Result<Vec<u8>> {
    let (codebook, source_length, header_len) = parse_header(encoded)?;
    codebook.decode(&encoded[header_len..], source_length as usize)
}
