//! Token amount constants.
//!
//! Amounts are fixed-point integers (u128) in raw units to avoid floating-point errors.
//! One whole token is `10^DECIMALS` raw units.

/// Number of decimal places of the token.
pub const DECIMALS: u8 = 18;

/// Raw units per whole token.
pub const UNIT: u128 = 1_000_000_000_000_000_000;

/// Hard ceiling on total supply: 100 billion whole tokens.
pub const MAX_SUPPLY: u128 = 100_000_000_000 * UNIT;

/// Convert a whole-token count into raw units.
///
/// Saturates at `u128::MAX`, which is far above `MAX_SUPPLY`.
pub const fn tokens(whole: u128) -> u128 {
    whole.saturating_mul(UNIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_matches_decimals() {
        assert_eq!(UNIT, 10u128.pow(DECIMALS as u32));
    }

    #[test]
    fn max_supply_is_one_hundred_billion_tokens() {
        assert_eq!(MAX_SUPPLY, tokens(100_000_000_000));
        assert_eq!(MAX_SUPPLY, 100_000_000_000u128 * 10u128.pow(18));
    }
}
