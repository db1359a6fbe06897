//! Probability mass function files.
//!
//! A PMF file is plain text, one `symbol,probability` pair per line, with
//! symbols being byte values 0-255. Missing symbols get probability zero.
//! A total that drifts from 1.0 by more than 1e-6 is normalized with a
//! warning rather than rejected, since hand-written tables rarely sum
//! exactly.

use bytecoder_core::{Error, Result};
use std::path::Path;

/// Tolerated deviation of the probability total from 1.0.
const SUM_TOLERANCE: f64 = 1e-6;

/// Parse PMF text into a 256-entry probability array.
///
/// Blank lines are skipped. Later lines for the same symbol overwrite
/// earlier ones.
pub fn parse_pmf(text: &str) -> std::result::Result<[f64; 256], String> {
    let mut pmf = [0.0f64; 256];

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let lineno = index + 1;

        let (symbol_field, prob_field) = line
            .split_once(',')
            .ok_or_else(|| format!("line {lineno}: expected `symbol,probability`"))?;

        let symbol: u16 = symbol_field
            .trim()
            .parse()
            .map_err(|_| format!("line {lineno}: invalid symbol `{}`", symbol_field.trim()))?;
        if symbol > 255 {
            return Err(format!("line {lineno}: symbol {symbol} out of range 0-255"));
        }

        let probability: f64 = prob_field
            .trim()
            .parse()
            .map_err(|_| format!("line {lineno}: invalid probability `{}`", prob_field.trim()))?;
        if !probability.is_finite() || probability < 0.0 {
            return Err(format!(
                "line {lineno}: probability {probability} must be finite and non-negative"
            ));
        }

        pmf[symbol as usize] = probability;
    }

    let total: f64 = pmf.iter().sum();
    if total <= 0.0 {
        return Err("probability mass sums to zero".to_string());
    }
    if (total - 1.0).abs() > SUM_TOLERANCE {
        eprintln!("warning: probabilities sum to {total:.6}, normalizing");
        for p in pmf.iter_mut() {
            *p /= total;
        }
    }

    Ok(pmf)
}

/// Read and parse a PMF file.
pub fn read_pmf(path: &Path) -> Result<[f64; 256]> {
    let text = std::fs::read_to_string(path)?;
    parse_pmf(&text).map_err(|message| Error::Config(format!("{}: {message}", path.display())))
}
