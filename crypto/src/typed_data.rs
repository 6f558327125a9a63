//! Typed structured-data digests for off-chain signed messages.
//!
//! A signed message is bound to one ledger deployment through a domain
//! separator, and to one message type through a type tag hashed into its
//! struct hash. The final digest is
//! `blake2b(0x19 0x01 || domain_separator || struct_hash)`.

use gavel_types::{AccountId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::hash::{blake2b_256, blake2b_256_multi};

const DOMAIN_TYPE: &[u8] = b"GavelDomain(string name,string version,uint64 chainId,bytes32 verifyingLedger)";
const PERMIT_TYPE: &[u8] =
    b"Permit(bytes32 owner,bytes32 spender,uint128 value,uint64 nonce,uint64 deadline)";
const DELEGATION_TYPE: &[u8] = b"Delegation(bytes32 delegatee,uint64 nonce,uint64 expiry)";
const DIGEST_PREFIX: &[u8] = &[0x19, 0x01];

/// Identifies the ledger deployment a signature is valid for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_ledger: AccountId,
}

impl Domain {
    pub fn separator(&self) -> [u8; 32] {
        blake2b_256_multi(&[
            &blake2b_256(DOMAIN_TYPE),
            &blake2b_256(self.name.as_bytes()),
            &blake2b_256(self.version.as_bytes()),
            &self.chain_id.to_be_bytes(),
            self.verifying_ledger.as_bytes(),
        ])
    }
}

/// An allowance grant signed by `owner`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitMessage {
    pub owner: AccountId,
    pub spender: AccountId,
    pub value: u128,
    pub nonce: u64,
    pub deadline: Timestamp,
}

impl PermitMessage {
    pub fn struct_hash(&self) -> [u8; 32] {
        blake2b_256_multi(&[
            &blake2b_256(PERMIT_TYPE),
            self.owner.as_bytes(),
            self.spender.as_bytes(),
            &self.value.to_be_bytes(),
            &self.nonce.to_be_bytes(),
            &self.deadline.as_secs().to_be_bytes(),
        ])
    }
}

/// A vote delegation signed by the delegator. A zero `delegatee` clears the delegation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationMessage {
    pub delegatee: AccountId,
    pub nonce: u64,
    pub expiry: Timestamp,
}

impl DelegationMessage {
    pub fn struct_hash(&self) -> [u8; 32] {
        blake2b_256_multi(&[
            &blake2b_256(DELEGATION_TYPE),
            self.delegatee.as_bytes(),
            &self.nonce.to_be_bytes(),
            &self.expiry.as_secs().to_be_bytes(),
        ])
    }
}

/// The digest a signer signs for `struct_hash` under `domain`.
pub fn typed_digest(domain: &Domain, struct_hash: &[u8; 32]) -> [u8; 32] {
    blake2b_256_multi(&[DIGEST_PREFIX, &domain.separator(), struct_hash])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;
    use crate::sign::{sign_digest, verify_digest};

    fn domain(chain_id: u64) -> Domain {
        Domain {
            name: "Gavel".into(),
            version: "1".into(),
            chain_id,
            verifying_ledger: AccountId::new([0x11; 32]),
        }
    }

    fn permit(nonce: u64) -> PermitMessage {
        PermitMessage {
            owner: AccountId::new([1; 32]),
            spender: AccountId::new([2; 32]),
            value: 500,
            nonce,
            deadline: Timestamp::new(1_000),
        }
    }

    #[test]
    fn separator_depends_on_every_field() {
        let base = domain(1);
        let mut renamed = base.clone();
        renamed.name = "Other".into();
        let mut other_ledger = base.clone();
        other_ledger.verifying_ledger = AccountId::new([0x22; 32]);

        assert_ne!(base.separator(), domain(2).separator());
        assert_ne!(base.separator(), renamed.separator());
        assert_ne!(base.separator(), other_ledger.separator());
    }

    #[test]
    fn nonce_changes_permit_digest() {
        let d = domain(1);
        assert_ne!(
            typed_digest(&d, &permit(0).struct_hash()),
            typed_digest(&d, &permit(1).struct_hash())
        );
    }

    #[test]
    fn permit_and_delegation_hashes_are_distinct_types() {
        let delegation = DelegationMessage {
            delegatee: AccountId::new([1; 32]),
            nonce: 0,
            expiry: Timestamp::new(1_000),
        };
        assert_ne!(delegation.struct_hash(), permit(0).struct_hash());
    }

    #[test]
    fn signature_over_one_domain_fails_on_another() {
        let kp = keypair_from_seed(&[8u8; 32]);
        let hash = permit(0).struct_hash();
        let sig = sign_digest(&typed_digest(&domain(1), &hash), &kp.private);

        assert!(verify_digest(&typed_digest(&domain(1), &hash), &sig, &kp.public));
        assert!(!verify_digest(&typed_digest(&domain(2), &hash), &sig, &kp.public));
    }
}
