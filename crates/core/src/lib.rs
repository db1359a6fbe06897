//! bytecoder-core: Lossless source coding with channel simulation tools
//!
//! This library provides the core components for a source/channel coding
//! lab built around a self-describing Huffman coder:
//! - Builds a minimum-redundancy prefix code from a symbol model
//! - Packs codewords into a payload and serializes the codebook into a
//!   binary header, so a decoder needs no prior knowledge of the model
//! - Simulates a binary symmetric channel and protects data against it
//!   with a repetition code
//! - Measures entropy, channel capacity, and error rates
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bitio`: Low-level bit packing/reading
//! - `huffman`: Codebook construction, payload encode/decode
//! - `header`: Self-describing codebook header format
//! - `codec`: Full header-plus-payload pipeline
//! - `channel`: Binary symmetric channel simulation
//! - `repetition`: Majority-vote repetition code
//! - `metrics`: Entropy, capacity, and error-rate measures
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Pure core**: No I/O inside the algorithms; callers own the buffers
//! - **Deterministic**: Same model, same output; all randomness is seeded
//! - **Fail fast**: Corrupted input is rejected before partial output

pub mod bitio;
pub mod channel;
pub mod codec;
pub mod error;
pub mod header;
pub mod huffman;
pub mod metrics;
pub mod repetition;

// Re-export commonly used types
pub use error::{Error, Result};
