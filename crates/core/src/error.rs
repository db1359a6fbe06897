//! Error types for the source coding system.
//!
//! All operations return structured errors rather than panicking. Corrupted
//! or truncated inputs fail before any partial output is produced.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Huffman: codebook construction or encode/decode failures
/// - Header: codebook header serialization/parsing
/// - Repetition: repetition-code framing or vote failures
/// - I/O: file system operations at the boundary
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman codec error (e.g., empty model, unencodable symbol)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Codebook header error (e.g., truncated or inconsistent header)
    #[error("header error: {0}")]
    Header(#[from] HeaderError),

    /// Repetition code error (e.g., bad repeat count, short payload)
    #[error("repetition code error: {0}")]
    Repetition(#[from] RepetitionError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Requested bit count outside the supported 1..=64 range
    #[error("invalid bit length: {0} (must be 1..=64)")]
    InvalidBitLength(usize),

    /// Attempted to read more bits than remain in the buffer
    #[error("out of bits: requested {requested}, available {available}")]
    OutOfBits { requested: usize, available: usize },
}

/// Huffman codec errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols with positive weight (cannot build a codebook)
    #[error("empty alphabet: no symbol has positive weight")]
    EmptyAlphabet,

    /// Code length outside the supported range
    #[error("unsupported code length {length} (must be 1..=64)")]
    UnsupportedCodeLength { length: usize },

    /// Source symbol has no entry in the codebook
    #[error("unknown symbol {symbol:#04x}: not covered by the model")]
    UnknownSymbol { symbol: u8 },

    /// Payload exhausted before the declared number of symbols was decoded
    #[error("malformed payload: decoded {decoded} of {expected} symbols")]
    MalformedPayload { expected: usize, decoded: usize },

    /// Bit sequence led outside the decoding tree
    #[error("invalid code at bit position {position}")]
    InvalidCode { position: usize },
}

/// Codebook header errors.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// Fewer bytes available than the declared sizes require
    #[error("truncated header: need {required} bytes, have {available}")]
    Truncated { required: usize, available: usize },

    /// Declared total does not match the bytes actually consumed
    #[error("header size mismatch: declared {declared}, consumed {consumed}")]
    SizeMismatch { declared: usize, consumed: usize },

    /// Source length does not fit the 4-byte header field
    #[error("source too long: {length} symbols exceeds u32 range")]
    SourceTooLong { length: usize },
}

/// Repetition code errors.
#[derive(Debug, Error)]
pub enum RepetitionError {
    /// Repeat count must be an odd number in 3..=9
    #[error("invalid repeat count {count} (must be odd, 3..=9)")]
    InvalidRepeatCount { count: usize },

    /// Frame shorter than its declared contents
    #[error("truncated frame: need {required} bytes, have {available}")]
    Truncated { required: usize, available: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
