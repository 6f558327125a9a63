//! Conversion between raw amounts and decimal token strings.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("empty amount")]
    Empty,

    #[error("invalid amount: {0}")]
    Invalid(String),

    #[error("too many fractional digits: {digits} > {decimals}")]
    TooPrecise { digits: usize, decimals: u8 },

    #[error("amount overflows u128")]
    Overflow,
}

/// Format `raw` as a decimal string with `decimals` fractional digits,
/// trimming trailing zeros (`1500000000000000000` → `"1.5"` at 18 decimals).
pub fn format_units(raw: u128, decimals: u8) -> String {
    let scale = 10u128.pow(decimals as u32);
    let whole = raw / scale;
    let frac = raw % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Parse a decimal token string into raw units.
pub fn parse_units(s: &str, decimals: u8) -> Result<u128, UnitsError> {
    let s = s.trim().replace('_', "");
    if s.is_empty() {
        return Err(UnitsError::Empty);
    }
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s.as_str(), ""),
    };
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(UnitsError::Invalid(s.clone()));
    }
    if frac.len() > decimals as usize {
        return Err(UnitsError::TooPrecise {
            digits: frac.len(),
            decimals,
        });
    }

    let scale = 10u128.pow(decimals as u32);
    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| UnitsError::Overflow)?
    };
    let frac_raw: u128 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = decimals as usize);
        padded.parse().map_err(|_| UnitsError::Overflow)?
    };
    whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac_raw))
        .ok_or(UnitsError::Overflow)
}
