//! Fundamental types for the Gavel token ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account and asset identifiers, roles, supply constants, block heights, and key types.

pub mod address;
pub mod amount;
pub mod asset;
pub mod error;
pub mod keys;
pub mod role;
pub mod time;

pub use address::AccountId;
pub use amount::{tokens, DECIMALS, MAX_SUPPLY, UNIT};
pub use asset::AssetId;
pub use error::TypesError;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use role::Role;
pub use time::{BlockHeight, Timestamp};
