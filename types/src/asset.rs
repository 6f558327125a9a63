//! Asset identifiers used by the rescue lists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::address::AccountId;
use crate::error::TypesError;

/// An asset the ledger account may be holding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetId {
    /// The host chain's native currency.
    Native,
    /// A token ledger living at the given account.
    Token(AccountId),
}

impl AssetId {
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// The ledger account backing this asset, if any.
    pub fn ledger(&self) -> Option<&AccountId> {
        match self {
            Self::Native => None,
            Self::Token(id) => Some(id),
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Token(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for AssetId {
    type Err = TypesError;

    /// Accepts `native` or a hex account id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("native") {
            Ok(Self::Native)
        } else {
            AccountId::from_hex(s).map(Self::Token)
        }
    }
}

impl From<AccountId> for AssetId {
    fn from(id: AccountId) -> Self {
        Self::Token(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_native_sentinel() {
        assert_eq!("native".parse::<AssetId>().unwrap(), AssetId::Native);
        assert_eq!("NATIVE".parse::<AssetId>().unwrap(), AssetId::Native);
    }

    #[test]
    fn parses_token_ledger() {
        let id = AccountId::new([7; 32]);
        let asset: AssetId = id.to_string().parse().unwrap();
        assert_eq!(asset, AssetId::Token(id));
        assert_eq!(asset.ledger(), Some(&id));
        assert!(!asset.is_native());
    }
}
