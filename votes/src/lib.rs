//! Vote-weight accounting for the Gavel token.
//!
//! Every account may delegate its voting units (its token balance) to one
//! delegatee, itself included. Votes only count once delegated: an account
//! that never delegates has zero voting power, even with a balance.
//!
//! History is kept as checkpoints keyed by block height, so governance can ask
//! "how many votes did X have at height H" for any past height.

pub mod checkpoints;
pub mod delegation;
pub mod error;
pub mod source;

pub use checkpoints::{Checkpoint, Trace};
pub use delegation::{VoteEvent, VoteLedger};
pub use error::VotesError;
pub use source::VoteSource;
