//! Role-gated operations: minting, pausing, role administration and asset rescue.

use gavel_types::{AccountId, AssetId, Role};

use crate::event::TokenEvent;
use crate::pause::PauseState;
use crate::rescue::{AssetHost, RescuePolicy};
use crate::token::{require_nonzero, GovernanceToken};
use crate::LedgerError;

impl GovernanceToken {
    // ── Supply ─────────────────────────────────────────────────────────

    /// Create `amount` new tokens for `to`, up to the supply cap.
    pub fn mint(&mut self, caller: &AccountId, to: &AccountId, amount: u128) -> Result<(), LedgerError> {
        let (minter, to) = (*caller, *to);
        self.non_reentrant(|token| {
            token.state.roles.require(Role::Minter, &minter)?;
            token.state.pause.ensure_active()?;
            require_nonzero(&to, "receiver")?;
            token.update(AccountId::ZERO, to, amount)?;
            token.record(TokenEvent::Minted { minter, to, amount });
            tracing::info!(%minter, %to, amount, supply = token.state.total_supply, "mint");
            Ok(())
        })
    }

    // ── Pause ──────────────────────────────────────────────────────────

    pub fn pause(&mut self, caller: &AccountId) -> Result<(), LedgerError> {
        let account = *caller;
        self.non_reentrant(|token| {
            token.state.roles.require(Role::Pauser, &account)?;
            token.state.pause.transition(PauseState::Paused)?;
            token.record(TokenEvent::Paused { account });
            tracing::info!(%account, "ledger paused");
            Ok(())
        })
    }

    pub fn unpause(&mut self, caller: &AccountId) -> Result<(), LedgerError> {
        let account = *caller;
        self.non_reentrant(|token| {
            token.state.roles.require(Role::Pauser, &account)?;
            token.state.pause.transition(PauseState::Active)?;
            token.record(TokenEvent::Unpaused { account });
            tracing::info!(%account, "ledger unpaused");
            Ok(())
        })
    }

    pub fn is_paused(&self) -> bool {
        self.state.pause.is_paused()
    }

    // ── Roles ──────────────────────────────────────────────────────────

    /// Grant `role` to `account`. Granting a held role is a silent no-op.
    pub fn grant_role(&mut self, caller: &AccountId, role: Role, account: &AccountId) -> Result<(), LedgerError> {
        let (sender, account) = (*caller, *account);
        self.commit(|token| {
            token.state.roles.require(Role::Admin, &sender)?;
            if token.state.roles.grant(role, account) {
                token.record(TokenEvent::RoleGranted {
                    role,
                    account,
                    sender,
                });
                tracing::info!(%role, %account, %sender, "role granted");
            }
            Ok(())
        })
    }

    /// Revoke `role` from `account`. Revoking an unheld role is a silent no-op.
    pub fn revoke_role(&mut self, caller: &AccountId, role: Role, account: &AccountId) -> Result<(), LedgerError> {
        let (sender, account) = (*caller, *account);
        self.commit(|token| {
            token.state.roles.require(Role::Admin, &sender)?;
            token.drop_role(role, account, sender);
            Ok(())
        })
    }

    /// Drop one of the caller's own roles. `confirmation` must repeat the caller.
    pub fn renounce_role(
        &mut self,
        caller: &AccountId,
        role: Role,
        confirmation: &AccountId,
    ) -> Result<(), LedgerError> {
        let (account, confirmation) = (*caller, *confirmation);
        self.commit(|token| {
            if confirmation != account {
                return Err(LedgerError::BadConfirmation);
            }
            token.drop_role(role, account, account);
            Ok(())
        })
    }

    fn drop_role(&mut self, role: Role, account: AccountId, sender: AccountId) {
        if !self.state.roles.revoke(role, &account) {
            return;
        }
        self.record(TokenEvent::RoleRevoked {
            role,
            account,
            sender,
        });
        tracing::info!(%role, %account, %sender, "role revoked");
        if role == Role::Admin && self.state.roles.count(Role::Admin) == 0 {
            tracing::warn!(%account, "last admin removed; role administration is now frozen");
        }
    }

    pub fn has_role(&self, role: Role, account: &AccountId) -> bool {
        self.state.roles.has(role, account)
    }

    pub fn role_members(&self, role: Role) -> Vec<AccountId> {
        self.state.roles.members(role)
    }

    // ── Rescue lists ───────────────────────────────────────────────────

    pub fn add_to_whitelist(
        &mut self,
        caller: &AccountId,
        asset: AssetId,
        require_safe_transfer: bool,
    ) -> Result<(), LedgerError> {
        let editor = *caller;
        self.commit(|token| {
            token.state.roles.require(Role::Params, &editor)?;
            if asset.ledger() == Some(&token.state.self_id) {
                return Err(LedgerError::SelfRescueForbidden);
            }
            let RescuePolicy {
                whitelisted,
                require_safe_transfer,
            } = token.state.rescue.set_whitelisted(asset, require_safe_transfer);
            token.record(TokenEvent::TokenWhitelisted {
                asset,
                whitelisted,
                require_safe_transfer,
            });
            tracing::info!(%asset, require_safe_transfer, %editor, "asset whitelisted");
            Ok(())
        })
    }

    pub fn remove_from_whitelist(&mut self, caller: &AccountId, asset: AssetId) -> Result<(), LedgerError> {
        let editor = *caller;
        self.commit(|token| {
            token.state.roles.require(Role::Params, &editor)?;
            token.state.rescue.clear_whitelisted(&asset);
            token.record(TokenEvent::TokenWhitelisted {
                asset,
                whitelisted: false,
                require_safe_transfer: false,
            });
            tracing::info!(%asset, %editor, "asset removed from whitelist");
            Ok(())
        })
    }

    pub fn add_to_blacklist(&mut self, caller: &AccountId, asset: AssetId) -> Result<(), LedgerError> {
        self.set_blacklisted(caller, asset, true)
    }

    pub fn remove_from_blacklist(&mut self, caller: &AccountId, asset: AssetId) -> Result<(), LedgerError> {
        self.set_blacklisted(caller, asset, false)
    }

    fn set_blacklisted(&mut self, caller: &AccountId, asset: AssetId, blacklisted: bool) -> Result<(), LedgerError> {
        let editor = *caller;
        self.commit(|token| {
            token.state.roles.require(Role::Params, &editor)?;
            token.state.rescue.set_blacklisted(asset, blacklisted);
            token.record(TokenEvent::TokenBlacklisted { asset, blacklisted });
            tracing::info!(%asset, blacklisted, %editor, "blacklist updated");
            Ok(())
        })
    }

    pub fn is_whitelisted(&self, asset: &AssetId) -> bool {
        self.state.rescue.is_whitelisted(asset)
    }

    pub fn is_blacklisted(&self, asset: &AssetId) -> bool {
        self.state.rescue.is_blacklisted(asset)
    }

    pub fn requires_safe_transfer(&self, asset: &AssetId) -> bool {
        self.state.rescue.requires_safe_transfer(asset)
    }

    // ── Rescue ─────────────────────────────────────────────────────────

    /// Send `amount` of a misdirected `asset` held by the ledger account to `to`.
    ///
    /// The host runs with access to the ledger. If anything fails, the state
    /// captured before the host was called is restored, undoing whatever the
    /// host did through re-entrant calls as well.
    pub fn rescue_asset(
        &mut self,
        caller: &AccountId,
        asset: AssetId,
        to: &AccountId,
        amount: u128,
        host: &mut dyn AssetHost,
    ) -> Result<(), LedgerError> {
        let (operator, to) = (*caller, *to);
        self.non_reentrant(|token| {
            token.state.roles.require(Role::Operator, &operator)?;
            let policy = token.state.rescue.check(&asset, &token.state.self_id)?;
            require_nonzero(&to, "receiver")?;

            let snapshot = token.state.clone();
            match token.execute_rescue(asset, to, amount, policy, host) {
                Ok(()) => {
                    token.record(TokenEvent::TokenRescued { asset, to, amount });
                    tracing::info!(%asset, %to, amount, %operator, "asset rescued");
                    Ok(())
                }
                Err(e) => {
                    token.state = snapshot;
                    tracing::warn!(%asset, %to, amount, error = %e, "rescue rejected, state restored");
                    Err(e)
                }
            }
        })
    }

    fn execute_rescue(
        &mut self,
        asset: AssetId,
        to: AccountId,
        amount: u128,
        policy: RescuePolicy,
        host: &mut dyn AssetHost,
    ) -> Result<(), LedgerError> {
        let outcome = match asset {
            AssetId::Native => {
                let holdings = self.state.native_holdings;
                if holdings < amount {
                    return Err(LedgerError::TransferFailed {
                        asset,
                        reason: format!("native holdings {holdings} < {amount}"),
                    });
                }
                self.state.native_holdings = holdings - amount;
                // A value transfer carries no return data of its own.
                let outcome = host.send_native(self, &to, amount);
                (outcome, outcome.is_accepted(true))
            }
            AssetId::Token(token_id) => {
                let outcome = host.transfer_token(self, &token_id, &to, amount);
                (outcome, outcome.is_accepted(policy.require_safe_transfer))
            }
        };
        match outcome {
            (_, true) => Ok(()),
            (outcome, false) => Err(LedgerError::TransferFailed {
                asset,
                reason: outcome.to_string(),
            }),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.guard.is_entered()
    }
}
