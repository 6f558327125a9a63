//! The ledger's view of the chain it runs on.

use gavel_types::{AccountId, BlockHeight, Timestamp};

/// Chain facts the ledger cannot know by itself.
pub trait ChainContext: Send + Sync {
    /// Whether `account` is a deployed contract rather than a key-controlled account.
    fn has_code(&self, account: &AccountId) -> bool;

    /// Height of the block currently being executed.
    fn block_height(&self) -> BlockHeight;

    /// Timestamp of the block currently being executed.
    fn timestamp(&self) -> Timestamp;
}
