//! Read-only view of vote weights for governance consumers.

use gavel_types::{AccountId, BlockHeight};

use crate::error::VotesError;

/// What a governor needs to count votes. Implementations never mutate.
pub trait VoteSource {
    /// Current height of the clock checkpoints are keyed by.
    fn clock(&self) -> BlockHeight;

    /// The account `account` delegates to, if any.
    fn delegates(&self, account: &AccountId) -> Option<AccountId>;

    /// Current voting power of `account`.
    fn get_votes(&self, account: &AccountId) -> u128;

    /// Voting power of `account` at a past `height`.
    fn get_past_votes(&self, account: &AccountId, height: BlockHeight) -> Result<u128, VotesError>;

    /// Total supply at a past `height`.
    fn get_past_total_supply(&self, height: BlockHeight) -> Result<u128, VotesError>;
}
