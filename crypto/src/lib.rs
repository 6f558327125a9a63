//! Cryptographic primitives for the Gavel token ledger.
//!
//! - **Ed25519** for signing and verifying permits and delegations
//! - **Blake2b** for hashing (account derivation, typed-data digests)
//! - Typed structured-data digests with a per-ledger domain separator

pub mod account;
pub mod hash;
pub mod keys;
pub mod sign;
pub mod typed_data;

pub use account::derive_account;
pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_digest, verify_digest};
pub use typed_data::{typed_digest, DelegationMessage, Domain, PermitMessage};
