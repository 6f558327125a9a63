//! Nullable infrastructure for deterministic testing.
//!
//! Everything the ledger consults outside itself (the chain, the host that
//! moves rescued assets, signing keys) has a test-friendly implementation
//! here that:
//! - Returns deterministic values
//! - Can be controlled programmatically
//! - Records what the ledger asked of it
//!
//! Usage: hand these to the ledger in place of the real host environment.

pub mod asset_host;
pub mod chain;
pub mod keys;

pub use asset_host::{NullAssetHost, RecordedTransfer};
pub use chain::NullChain;
pub use keys::NullKeys;
