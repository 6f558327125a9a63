use proptest::prelude::*;

use gavel_types::{tokens, AccountId, AssetId, BlockHeight, Timestamp, MAX_SUPPLY};

proptest! {
    /// Display output of an AccountId always parses back to the same id.
    #[test]
    fn account_id_display_parses(bytes in prop::array::uniform32(0u8..)) {
        let id = AccountId::new(bytes);
        prop_assert_eq!(id.to_string().parse::<AccountId>().unwrap(), id);
    }

    /// AccountId::is_zero is true only for all-zero bytes.
    #[test]
    fn account_id_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        prop_assert_eq!(AccountId::new(bytes).is_zero(), bytes == [0u8; 32]);
    }

    /// Token assets survive a bincode round trip (used by state export).
    #[test]
    fn asset_id_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let asset = AssetId::Token(AccountId::new(bytes));
        let encoded = bincode::serialize(&asset).unwrap();
        let decoded: AssetId = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, asset);
    }

    /// BlockHeight ordering agrees with the underlying integers.
    #[test]
    fn block_height_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        prop_assert_eq!(BlockHeight::new(a) <= BlockHeight::new(b), a <= b);
    }

    /// A deadline has passed exactly when now is strictly later.
    #[test]
    fn deadline_passed_iff_later(deadline in 0u64..1_000_000, now in 0u64..1_000_000) {
        prop_assert_eq!(Timestamp::new(deadline).has_passed(Timestamp::new(now)), now > deadline);
    }

    /// Whole-token conversion stays under the cap for any in-cap token count.
    #[test]
    fn tokens_within_cap(whole in 0u128..=100_000_000_000u128) {
        prop_assert!(tokens(whole) <= MAX_SUPPLY);
    }
}
