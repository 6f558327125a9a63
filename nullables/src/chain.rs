//! Nullable chain context: a contract registry and a manual block clock.

use gavel_ledger::ChainContext;
use gavel_types::{AccountId, BlockHeight, Timestamp};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// A deterministic chain for testing.
///
/// Blocks and time only advance when you tell them to.
pub struct NullChain {
    contracts: Mutex<HashSet<AccountId>>,
    height: AtomicU64,
    timestamp: AtomicU64,
}

impl NullChain {
    pub fn new(height: u64, timestamp: u64) -> Self {
        Self {
            contracts: Mutex::new(HashSet::new()),
            height: AtomicU64::new(height),
            timestamp: AtomicU64::new(timestamp),
        }
    }

    /// Register `account` as a deployed contract.
    pub fn deploy(&self, account: AccountId) {
        self.contracts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(account);
    }

    /// Move `n` blocks forward, advancing the timestamp 12 seconds per block.
    pub fn advance_blocks(&self, n: u64) {
        self.height.fetch_add(n, Ordering::SeqCst);
        self.timestamp.fetch_add(n * 12, Ordering::SeqCst);
    }

    pub fn set_timestamp(&self, secs: u64) {
        self.timestamp.store(secs, Ordering::SeqCst);
    }

    pub fn set_height(&self, height: u64) {
        self.height.store(height, Ordering::SeqCst);
    }
}

impl Default for NullChain {
    fn default() -> Self {
        Self::new(1, 1_700_000_000)
    }
}

impl ChainContext for NullChain {
    fn has_code(&self, account: &AccountId) -> bool {
        self.contracts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(account)
    }

    fn block_height(&self) -> BlockHeight {
        BlockHeight::new(self.height.load(Ordering::SeqCst))
    }

    fn timestamp(&self) -> Timestamp {
        Timestamp::new(self.timestamp.load(Ordering::SeqCst))
    }
}
