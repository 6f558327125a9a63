//! Role membership.

use gavel_types::{AccountId, Role};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::LedgerError;

/// Role → member set. Every role in [`Role::ALL`] is always present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistry {
    members: BTreeMap<Role, BTreeSet<AccountId>>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self {
            members: Role::ALL.iter().map(|r| (*r, BTreeSet::new())).collect(),
        }
    }

    pub fn has(&self, role: Role, account: &AccountId) -> bool {
        self.members
            .get(&role)
            .is_some_and(|set| set.contains(account))
    }

    /// Fails with `Unauthorized` unless `account` holds `role`.
    pub fn require(&self, role: Role, account: &AccountId) -> Result<(), LedgerError> {
        if self.has(role, account) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized {
                account: *account,
                role,
            })
        }
    }

    /// Returns `true` if membership changed.
    pub fn grant(&mut self, role: Role, account: AccountId) -> bool {
        self.members.entry(role).or_default().insert(account)
    }

    /// Returns `true` if membership changed.
    pub fn revoke(&mut self, role: Role, account: &AccountId) -> bool {
        self.members
            .get_mut(&role)
            .is_some_and(|set| set.remove(account))
    }

    pub fn members(&self, role: Role) -> Vec<AccountId> {
        self.members
            .get(&role)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn count(&self, role: Role) -> usize {
        self.members.get(&role).map_or(0, BTreeSet::len)
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_and_revoke_report_changes() {
        let mut roles = RoleRegistry::new();
        let a = AccountId::new([1; 32]);

        assert!(roles.grant(Role::Minter, a));
        assert!(!roles.grant(Role::Minter, a));
        assert!(roles.has(Role::Minter, &a));
        assert!(!roles.has(Role::Pauser, &a));

        assert!(roles.revoke(Role::Minter, &a));
        assert!(!roles.revoke(Role::Minter, &a));
        assert_eq!(roles.count(Role::Minter), 0);
    }

    #[test]
    fn require_names_missing_role() {
        let roles = RoleRegistry::new();
        let a = AccountId::new([2; 32]);
        assert_eq!(
            roles.require(Role::Operator, &a),
            Err(LedgerError::Unauthorized {
                account: a,
                role: Role::Operator
            })
        );
    }

    #[test]
    fn members_are_sorted() {
        let mut roles = RoleRegistry::new();
        roles.grant(Role::Admin, AccountId::new([9; 32]));
        roles.grant(Role::Admin, AccountId::new([1; 32]));
        assert_eq!(
            roles.members(Role::Admin),
            vec![AccountId::new([1; 32]), AccountId::new([9; 32])]
        );
    }
}
