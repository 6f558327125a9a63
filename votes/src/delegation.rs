//! Vote delegation and per-delegate checkpoints.
//!
//! The token ledger reports every balance movement through
//! [`VoteLedger::transfer_voting_units`]; the vote ledger moves the matching
//! votes between the delegates of the two accounts and checkpoints both sides.

use crate::checkpoints::Trace;
use crate::error::VotesError;
use gavel_types::{AccountId, BlockHeight};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Vote-side effects of a delegation or balance movement, in emission order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoteEvent {
    DelegateChanged {
        delegator: AccountId,
        from_delegate: Option<AccountId>,
        to_delegate: Option<AccountId>,
    },
    DelegateVotesChanged {
        delegate: AccountId,
        previous: u128,
        new: u128,
    },
}

/// Delegations plus vote and total-supply history.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VoteLedger {
    /// delegator → delegatee.
    delegations: HashMap<AccountId, AccountId>,
    /// Reverse index: delegatee → direct delegators.
    delegators: HashMap<AccountId, HashSet<AccountId>>,
    /// Voting power history per delegatee.
    votes: HashMap<AccountId, Trace>,
    /// History of the total number of voting units (the token supply).
    total: Trace,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delegates(&self, account: &AccountId) -> Option<AccountId> {
        self.delegations.get(account).copied()
    }

    /// Accounts currently delegating directly to `delegatee`, sorted.
    pub fn delegators(&self, delegatee: &AccountId) -> Vec<AccountId> {
        let mut list: Vec<AccountId> = self
            .delegators
            .get(delegatee)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        list.sort();
        list
    }

    /// Point `delegator`'s voting units at `delegatee` (`None` clears the delegation).
    ///
    /// `delegator_units` is the delegator's current balance; it is moved from
    /// the old delegate's votes to the new one's.
    pub fn delegate(
        &mut self,
        delegator: &AccountId,
        delegatee: Option<AccountId>,
        delegator_units: u128,
        now: BlockHeight,
    ) -> Vec<VoteEvent> {
        let old = self.delegates(delegator);
        if let Some(old_to) = old {
            if let Some(set) = self.delegators.get_mut(&old_to) {
                set.remove(delegator);
                if set.is_empty() {
                    self.delegators.remove(&old_to);
                }
            }
        }
        match delegatee {
            Some(to) => {
                self.delegations.insert(*delegator, to);
                self.delegators.entry(to).or_default().insert(*delegator);
            }
            None => {
                self.delegations.remove(delegator);
            }
        }
        tracing::debug!(%delegator, ?old, new = ?delegatee, units = delegator_units, "delegation changed");

        let mut events = vec![VoteEvent::DelegateChanged {
            delegator: *delegator,
            from_delegate: old,
            to_delegate: delegatee,
        }];
        self.move_delegate_votes(old, delegatee, delegator_units, now, &mut events);
        events
    }

    /// Mirror a balance movement. `from = None` is a mint, `to = None` a burn.
    pub fn transfer_voting_units(
        &mut self,
        from: Option<&AccountId>,
        to: Option<&AccountId>,
        amount: u128,
        now: BlockHeight,
    ) -> Vec<VoteEvent> {
        let mut events = Vec::new();
        if from.is_none() {
            let total = self.total.latest().saturating_add(amount);
            self.total.push(now, total);
        }
        if to.is_none() {
            let total = self.total.latest().saturating_sub(amount);
            self.total.push(now, total);
        }
        let from_delegate = from.and_then(|a| self.delegates(a));
        let to_delegate = to.and_then(|a| self.delegates(a));
        self.move_delegate_votes(from_delegate, to_delegate, amount, now, &mut events);
        events
    }

    fn move_delegate_votes(
        &mut self,
        from: Option<AccountId>,
        to: Option<AccountId>,
        amount: u128,
        now: BlockHeight,
        events: &mut Vec<VoteEvent>,
    ) {
        if from == to || amount == 0 {
            return;
        }
        if let Some(delegate) = from {
            let trace = self.votes.entry(delegate).or_default();
            let (previous, new) = trace.push(now, trace.latest().saturating_sub(amount));
            events.push(VoteEvent::DelegateVotesChanged {
                delegate,
                previous,
                new,
            });
        }
        if let Some(delegate) = to {
            let trace = self.votes.entry(delegate).or_default();
            let (previous, new) = trace.push(now, trace.latest().saturating_add(amount));
            events.push(VoteEvent::DelegateVotesChanged {
                delegate,
                previous,
                new,
            });
        }
    }

    /// Current voting power of `account`.
    pub fn votes(&self, account: &AccountId) -> u128 {
        self.votes.get(account).map_or(0, Trace::latest)
    }

    /// Voting power of `account` at `height`, which must be strictly before `now`.
    pub fn past_votes(
        &self,
        account: &AccountId,
        height: BlockHeight,
        now: BlockHeight,
    ) -> Result<u128, VotesError> {
        Self::check_past(height, now)?;
        Ok(self.votes.get(account).map_or(0, |t| t.upper_lookup(height)))
    }

    /// Total voting units at `height`, which must be strictly before `now`.
    pub fn past_total_supply(&self, height: BlockHeight, now: BlockHeight) -> Result<u128, VotesError> {
        Self::check_past(height, now)?;
        Ok(self.total.upper_lookup(height))
    }

    /// Latest recorded total voting units.
    pub fn total_supply(&self) -> u128 {
        self.total.latest()
    }

    /// Vote history of `account`.
    pub fn checkpoints(&self, account: &AccountId) -> Option<&Trace> {
        self.votes.get(account)
    }

    fn check_past(height: BlockHeight, now: BlockHeight) -> Result<(), VotesError> {
        if height >= now {
            return Err(VotesError::FutureLookup {
                requested: height,
                current: now,
            });
        }
        Ok(())
    }

    /// Serialize the vote ledger with bincode.
    pub fn save_state(&self) -> Result<Vec<u8>, VotesError> {
        bincode::serialize(self).map_err(|e| VotesError::Corrupt(e.to_string()))
    }

    /// Restore a vote ledger written by [`VoteLedger::save_state`].
    pub fn load_state(data: &[u8]) -> Result<Self, VotesError> {
        bincode::deserialize(data).map_err(|e| VotesError::Corrupt(e.to_string()))
    }
}
