//! Deterministic signing keys for tests.

use gavel_crypto::{derive_account, keypair_from_seed};
use gavel_types::{AccountId, KeyPair};

/// Keys derived from a single seed byte, so tests can name signers by number.
pub struct NullKeys;

impl NullKeys {
    pub fn keypair(seed: u8) -> KeyPair {
        keypair_from_seed(&[seed; 32])
    }

    pub fn account(seed: u8) -> AccountId {
        derive_account(&Self::keypair(seed).public)
    }
}
