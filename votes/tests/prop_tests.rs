use proptest::prelude::*;

use gavel_types::{AccountId, BlockHeight};
use gavel_votes::{Trace, VoteLedger};

proptest! {
    /// A historical lookup agrees with a linear scan of the pushes.
    #[test]
    fn upper_lookup_matches_scan(
        steps in prop::collection::vec((0u64..3, 0u128..1_000_000), 1..50),
        probe in 0u64..200,
    ) {
        let mut trace = Trace::new();
        let mut history: Vec<(u64, u128)> = Vec::new();
        let mut height = 0u64;
        for (gap, value) in steps {
            height += gap;
            trace.push(BlockHeight::new(height), value);
            history.push((height, value));
        }
        let expected = history
            .iter()
            .rev()
            .find(|(h, _)| *h <= probe)
            .map_or(0, |(_, v)| *v);
        prop_assert_eq!(trace.upper_lookup(BlockHeight::new(probe)), expected);
        prop_assert!(trace.len() <= history.len());
    }

    /// Moving units between delegated holders conserves total votes.
    #[test]
    fn transfers_conserve_votes(
        amounts in prop::collection::vec((0usize..4, 0usize..4, 0u128..100), 1..40),
    ) {
        let holders: Vec<AccountId> = (1..=4u8).map(|i| AccountId::new([i; 32])).collect();
        let mut ledger = VoteLedger::new();
        let mut balances = [1_000u128; 4];
        for (i, holder) in holders.iter().enumerate() {
            ledger.transfer_voting_units(None, Some(holder), balances[i], BlockHeight::new(1));
            ledger.delegate(holder, Some(*holder), balances[i], BlockHeight::new(1));
        }

        for (n, (from, to, amount)) in amounts.into_iter().enumerate() {
            let amount = amount.min(balances[from]);
            balances[from] -= amount;
            balances[to] += amount;
            ledger.transfer_voting_units(
                Some(&holders[from]),
                Some(&holders[to]),
                amount,
                BlockHeight::new(2 + n as u64),
            );
        }

        let total: u128 = holders.iter().map(|h| ledger.votes(h)).sum();
        prop_assert_eq!(total, 4_000);
        for (i, holder) in holders.iter().enumerate() {
            prop_assert_eq!(ledger.votes(holder), balances[i]);
        }
    }
}
