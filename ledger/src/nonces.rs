//! Per-account signature nonces.

use gavel_types::AccountId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::LedgerError;

/// One counter per account, shared by permits and signed delegations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nonces {
    counters: HashMap<AccountId, u64>,
}

impl Nonces {
    pub fn current(&self, account: &AccountId) -> u64 {
        self.counters.get(account).copied().unwrap_or(0)
    }

    /// Return the current nonce and advance it.
    pub fn use_nonce(&mut self, account: &AccountId) -> u64 {
        let counter = self.counters.entry(*account).or_insert(0);
        let used = *counter;
        *counter += 1;
        used
    }

    /// Advance the nonce only if `nonce` is the current one.
    pub fn use_checked(&mut self, account: &AccountId, nonce: u64) -> Result<(), LedgerError> {
        let expected = self.current(account);
        if nonce != expected {
            return Err(LedgerError::InvalidNonce {
                account: *account,
                expected,
                got: nonce,
            });
        }
        self.use_nonce(account);
        Ok(())
    }
}
