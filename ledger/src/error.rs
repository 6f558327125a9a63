use gavel_types::{AccountId, AssetId, Role};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("invalid administrator {0}: must be a non-zero contract account")]
    InvalidAdmin(AccountId),

    #[error("account {account} is missing {role}")]
    Unauthorized { account: AccountId, role: Role },

    #[error("ledger is paused")]
    Paused,

    #[error("ledger is already {0}")]
    InvalidStateTransition(&'static str),

    #[error("supply cap exceeded: {total_supply} + {amount} > {cap}")]
    SupplyCapExceeded {
        total_supply: u128,
        amount: u128,
        cap: u128,
    },

    #[error("insufficient balance for {account}: have {available}, need {required}")]
    InsufficientBalance {
        account: AccountId,
        available: u128,
        required: u128,
    },

    #[error("insufficient allowance for {spender}: have {available}, need {required}")]
    InsufficientAllowance {
        spender: AccountId,
        available: u128,
        required: u128,
    },

    #[error("the ledger's own token cannot be rescued or whitelisted")]
    SelfRescueForbidden,

    #[error("asset {0} is not whitelisted for rescue")]
    NotWhitelisted(AssetId),

    #[error("asset {0} is blacklisted")]
    Blacklisted(AssetId),

    #[error("transfer of {asset} failed: {reason}")]
    TransferFailed { asset: AssetId, reason: String },

    #[error("reentrant call")]
    ReentrantCall,

    #[error("zero account is not a valid {0}")]
    ZeroAccount(&'static str),

    #[error("signature expired at {deadline}, now {now}")]
    ExpiredSignature { deadline: u64, now: u64 },

    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid nonce for {account}: expected {expected}, got {got}")]
    InvalidNonce {
        account: AccountId,
        expected: u64,
        got: u64,
    },

    #[error("renounce confirmation does not match caller")]
    BadConfirmation,

    #[error("votes error: {0}")]
    Votes(#[from] gavel_votes::VotesError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("config error: {0}")]
    Config(String),
}
