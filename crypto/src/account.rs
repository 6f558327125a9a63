//! Account derivation from public keys.
//!
//! A key-controlled account is identified by the Blake2b-256 hash of its
//! Ed25519 public key. Contract accounts are assigned by the host chain and
//! have no corresponding key.

use gavel_types::{AccountId, PublicKey};

use crate::hash::blake2b_256;

/// Derive the account controlled by `public_key`.
pub fn derive_account(public_key: &PublicKey) -> AccountId {
    AccountId::new(blake2b_256(public_key.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    #[test]
    fn same_key_same_account() {
        let kp = keypair_from_seed(&[3u8; 32]);
        assert_eq!(derive_account(&kp.public), derive_account(&kp.public));
    }

    #[test]
    fn different_keys_different_accounts() {
        let a = keypair_from_seed(&[1u8; 32]);
        let b = keypair_from_seed(&[2u8; 32]);
        assert_ne!(derive_account(&a.public), derive_account(&b.public));
    }

    #[test]
    fn derived_account_is_never_zero() {
        let kp = keypair_from_seed(&[0u8; 32]);
        assert!(!derive_account(&kp.public).is_zero());
    }
}
