use gavel_types::BlockHeight;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VotesError {
    #[error("lookup at {requested} is not in the past (current height {current})")]
    FutureLookup {
        requested: BlockHeight,
        current: BlockHeight,
    },

    #[error("corrupt vote state: {0}")]
    Corrupt(String),
}
