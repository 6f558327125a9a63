//! Capped governance token ledger.
//!
//! A fixed-cap, role-gated, pausable token with vote delegation, signed
//! approvals and a listed asset-rescue utility. The whole supply cap is minted
//! to a contract administrator at deployment; burning frees room under the cap
//! for later mints.

pub mod admin;
pub mod config;
pub mod env;
pub mod error;
pub mod event;
pub mod guard;
pub mod nonces;
pub mod pause;
pub mod rescue;
pub mod roles;
pub mod signed;
pub mod token;

pub use config::TokenConfig;
pub use env::ChainContext;
pub use error::LedgerError;
pub use event::{EventBus, TokenEvent};
pub use guard::ReentrancyGuard;
pub use nonces::Nonces;
pub use pause::PauseState;
pub use rescue::{AssetHost, RescuePolicy, RescueRegistry, TransferOutcome};
pub use roles::RoleRegistry;
pub use token::{GovernanceToken, TokenState};
