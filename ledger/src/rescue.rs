//! Rescue allow/deny lists and the host interface that moves rescued assets.

use gavel_types::{AccountId, AssetId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::{GovernanceToken, LedgerError};

/// What the host reported for an outgoing asset transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferOutcome {
    /// The call succeeded and returned `true`.
    Success,
    /// The call succeeded but returned `false`.
    ReturnedFalse,
    /// The call succeeded without returning anything (non-conforming tokens).
    NoReturnData,
    /// The call reverted.
    Reverted,
}

impl TransferOutcome {
    /// Safe-transfer mode tolerates tokens that return nothing.
    pub fn is_accepted(&self, safe_transfer: bool) -> bool {
        match self {
            Self::Success => true,
            Self::NoReturnData => safe_transfer,
            Self::ReturnedFalse | Self::Reverted => false,
        }
    }
}

impl fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::ReturnedFalse => "returned false",
            Self::NoReturnData => "no return data",
            Self::Reverted => "reverted",
        };
        f.write_str(s)
    }
}

/// Moves assets out of the ledger's custody.
///
/// The host is handed the ledger itself, so it can call back into it; guarded
/// operations reject such calls with `ReentrantCall`.
pub trait AssetHost {
    fn send_native(
        &mut self,
        ledger: &mut GovernanceToken,
        to: &AccountId,
        amount: u128,
    ) -> TransferOutcome;

    fn transfer_token(
        &mut self,
        ledger: &mut GovernanceToken,
        token: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> TransferOutcome;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescuePolicy {
    pub whitelisted: bool,
    pub require_safe_transfer: bool,
}

/// Which assets may be rescued and how.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescueRegistry {
    whitelist: BTreeMap<AssetId, RescuePolicy>,
    blacklist: BTreeSet<AssetId>,
}

impl RescueRegistry {
    pub fn set_whitelisted(&mut self, asset: AssetId, require_safe_transfer: bool) -> RescuePolicy {
        let policy = RescuePolicy {
            whitelisted: true,
            require_safe_transfer,
        };
        self.whitelist.insert(asset, policy);
        policy
    }

    pub fn clear_whitelisted(&mut self, asset: &AssetId) {
        self.whitelist.remove(asset);
    }

    pub fn set_blacklisted(&mut self, asset: AssetId, blacklisted: bool) {
        if blacklisted {
            self.blacklist.insert(asset);
        } else {
            self.blacklist.remove(&asset);
        }
    }

    pub fn policy(&self, asset: &AssetId) -> RescuePolicy {
        self.whitelist.get(asset).copied().unwrap_or_default()
    }

    pub fn is_whitelisted(&self, asset: &AssetId) -> bool {
        self.policy(asset).whitelisted
    }

    pub fn is_blacklisted(&self, asset: &AssetId) -> bool {
        self.blacklist.contains(asset)
    }

    pub fn requires_safe_transfer(&self, asset: &AssetId) -> bool {
        self.policy(asset).require_safe_transfer
    }

    /// Resolve the policy for rescuing `asset` out of the ledger `own`.
    ///
    /// The own token is refused first, then the blacklist, then the whitelist.
    pub fn check(&self, asset: &AssetId, own: &AccountId) -> Result<RescuePolicy, LedgerError> {
        if asset.ledger() == Some(own) {
            return Err(LedgerError::SelfRescueForbidden);
        }
        if self.is_blacklisted(asset) {
            return Err(LedgerError::Blacklisted(*asset));
        }
        let policy = self.policy(asset);
        if !policy.whitelisted {
            return Err(LedgerError::NotWhitelisted(*asset));
        }
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWN: AccountId = AccountId::new([0xAA; 32]);

    fn token(n: u8) -> AssetId {
        AssetId::Token(AccountId::new([n; 32]))
    }

    #[test]
    fn outcome_acceptance_depends_on_mode() {
        assert!(TransferOutcome::Success.is_accepted(false));
        assert!(TransferOutcome::NoReturnData.is_accepted(true));
        assert!(!TransferOutcome::NoReturnData.is_accepted(false));
        assert!(!TransferOutcome::ReturnedFalse.is_accepted(true));
        assert!(!TransferOutcome::Reverted.is_accepted(true));
    }

    #[test]
    fn check_order_is_self_then_blacklist_then_whitelist() {
        let mut reg = RescueRegistry::default();
        let own = AssetId::Token(OWN);
        reg.set_blacklisted(own, true);
        assert_eq!(reg.check(&own, &OWN), Err(LedgerError::SelfRescueForbidden));

        let x = token(1);
        assert_eq!(reg.check(&x, &OWN), Err(LedgerError::NotWhitelisted(x)));
        reg.set_blacklisted(x, true);
        assert_eq!(reg.check(&x, &OWN), Err(LedgerError::Blacklisted(x)));
        reg.set_whitelisted(x, true);
        assert_eq!(reg.check(&x, &OWN), Err(LedgerError::Blacklisted(x)));
        reg.set_blacklisted(x, false);
        assert_eq!(
            reg.check(&x, &OWN),
            Ok(RescuePolicy {
                whitelisted: true,
                require_safe_transfer: true
            })
        );
    }

    #[test]
    fn removing_from_whitelist_clears_safe_flag() {
        let mut reg = RescueRegistry::default();
        reg.set_whitelisted(AssetId::Native, true);
        reg.clear_whitelisted(&AssetId::Native);
        assert!(!reg.is_whitelisted(&AssetId::Native));
        assert!(!reg.requires_safe_transfer(&AssetId::Native));
    }
}
