//! Repetition channel code with majority-vote decoding.
//!
//! Each source bit is expanded into `repeat` wire bytes, every one carrying
//! that bit's value (0 or 1). A byte-wise XOR channel therefore acts
//! directly on code bits, and the decoder recovers each source bit by
//! majority vote over its group.
//!
//! # Frame Format
//!
//! ```text
//! +-------------------+
//! | repeat (1)        |  u8, odd, 3..=9
//! +-------------------+
//! | source_length (4) |  u32 little-endian, bytes of original data
//! +-------------------+
//! | body (variable)   |  8 * repeat bytes per source byte, MSB-first
//! +-------------------+
//! ```

use crate::error::{HeaderError, RepetitionError, Result};

/// Bytes before the body: repeat count and source length.
pub const FRAME_FIXED_BYTES: usize = 5;

fn check_repeat(repeat: usize) -> Result<()> {
    if repeat % 2 == 0 || !(3..=9).contains(&repeat) {
        return Err(RepetitionError::InvalidRepeatCount { count: repeat }.into());
    }
    Ok(())
}

/// Encode `source` with an n-fold repetition code.
///
/// # Errors
/// - `RepetitionError::InvalidRepeatCount` unless `repeat` is odd and 3..=9
/// - `HeaderError::SourceTooLong` if the source exceeds the u32 length field
pub fn encode(source: &[u8], repeat: usize) -> Result<Vec<u8>> {
    check_repeat(repeat)?;
    let source_length = u32::try_from(source.len()).map_err(|_| HeaderError::SourceTooLong {
        length: source.len(),
    })?;

    let mut frame = Vec::with_capacity(FRAME_FIXED_BYTES + source.len() * 8 * repeat);
    frame.push(repeat as u8);
    frame.extend_from_slice(&source_length.to_le_bytes());

    for &byte in source {
        for bit_pos in 0..8 {
            let bit = (byte >> (7 - bit_pos)) & 1;
            frame.extend(std::iter::repeat(bit).take(repeat));
        }
    }

    Ok(frame)
}

/// Decode a repetition-coded frame by majority vote.
///
/// Each group of `repeat` body bytes votes for one source bit; a nonzero
/// byte counts as 1, so arbitrary channel noise still resolves to a vote.
/// Body bytes beyond the declared source length are ignored.
///
/// # Errors
/// - `RepetitionError::InvalidRepeatCount` if the frame declares a bad count
/// - `RepetitionError::Truncated` if the body is shorter than
///   `8 * repeat * source_length` bytes
pub fn decode(frame: &[u8]) -> Result<Vec<u8>> {
    if frame.len() < FRAME_FIXED_BYTES {
        return Err(RepetitionError::Truncated {
            required: FRAME_FIXED_BYTES,
            available: frame.len(),
        }
        .into());
    }

    let repeat = frame[0] as usize;
    check_repeat(repeat)?;
    let source_length = u32::from_le_bytes(frame[1..5].try_into().unwrap()) as usize;

    let body = &frame[FRAME_FIXED_BYTES..];
    let required = source_length * 8 * repeat;
    if body.len() < required {
        return Err(RepetitionError::Truncated {
            required: FRAME_FIXED_BYTES + required,
            available: frame.len(),
        }
        .into());
    }

    let mut decoded = Vec::with_capacity(source_length);
    for byte_idx in 0..source_length {
        let mut byte = 0u8;
        for bit_pos in 0..8 {
            let group_start = (byte_idx * 8 + bit_pos) * repeat;
            let group = &body[group_start..group_start + repeat];
            let ones = group.iter().filter(|&&vote| vote != 0).count();
            let bit = u8::from(ones > repeat / 2);
            byte = (byte << 1) | bit;
        }
        decoded.push(byte);
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::apply_noise;
    use crate::error::Error;

    #[test]
    fn test_round_trip() {
        for repeat in [3, 5, 7, 9] {
            let source = b"repetition coded message";
            let frame = encode(source, repeat).unwrap();

            assert_eq!(frame.len(), FRAME_FIXED_BYTES + source.len() * 8 * repeat);
            assert_eq!(decode(&frame).unwrap(), source);
        }
    }

    #[test]
    fn test_invalid_repeat_counts() {
        for repeat in [0, 1, 2, 4, 6, 10, 11] {
            assert!(
                matches!(
                    encode(b"x", repeat),
                    Err(Error::Repetition(RepetitionError::InvalidRepeatCount { .. }))
                ),
                "repeat {repeat} must be rejected"
            );
        }
    }

    #[test]
    fn test_corrects_minority_flips() {
        let source = b"noise resilience";
        let frame = encode(source, 3).unwrap();

        // Flip one vote byte in every group: still a 2-of-3 majority
        let mut noise = vec![0u8; frame.len()];
        for group in 0..source.len() * 8 {
            noise[FRAME_FIXED_BYTES + group * 3] = 1;
        }

        let disturbed = apply_noise(&frame, &noise);
        assert_eq!(decode(&disturbed).unwrap(), source);
    }

    #[test]
    fn test_majority_flips_corrupt() {
        let source = [0x00u8];
        let frame = encode(&source, 3).unwrap();

        // Overwhelm the first bit group: all three votes say 1
        let mut corrupted = frame.clone();
        for vote in &mut corrupted[FRAME_FIXED_BYTES..FRAME_FIXED_BYTES + 3] {
            *vote = 1;
        }
        assert_eq!(decode(&corrupted).unwrap(), vec![0x80]);
    }

    #[test]
    fn test_nonbinary_noise_still_votes() {
        let source = [0xF0u8];
        let frame = encode(&source, 5).unwrap();

        // Arbitrary garbage on a minority of votes per group
        let mut disturbed = frame.clone();
        for group in 0..8 {
            disturbed[FRAME_FIXED_BYTES + group * 5] ^= 0xC7;
            disturbed[FRAME_FIXED_BYTES + group * 5 + 2] ^= 0x39;
        }
        assert_eq!(decode(&disturbed).unwrap(), source.to_vec());
    }

    #[test]
    fn test_truncated_frame() {
        let frame = encode(b"abc", 3).unwrap();

        assert!(matches!(
            decode(&frame[..frame.len() - 1]),
            Err(Error::Repetition(RepetitionError::Truncated { .. }))
        ));
        assert!(matches!(
            decode(&frame[..3]),
            Err(Error::Repetition(RepetitionError::Truncated { .. }))
        ));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let source = b"tail";
        let mut frame = encode(source, 3).unwrap();
        frame.extend_from_slice(&[1, 0, 1, 1]);

        assert_eq!(decode(&frame).unwrap(), source);
    }

    #[test]
    fn test_empty_source() {
        let frame = encode(b"", 5).unwrap();
        assert_eq!(frame.len(), FRAME_FIXED_BYTES);
        assert_eq!(decode(&frame).unwrap(), Vec::<u8>::new());
    }
}
