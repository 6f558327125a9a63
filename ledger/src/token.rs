//! The token ledger: balances, allowances, supply and the transfer hook.

use std::collections::HashMap;
use std::sync::Arc;

use gavel_crypto::Domain;
use gavel_types::{AccountId, AssetId, BlockHeight, Role, DECIMALS, MAX_SUPPLY};
use gavel_votes::VoteLedger;
use serde::{Deserialize, Serialize};

use crate::config::TokenConfig;
use crate::env::ChainContext;
use crate::event::{EventBus, TokenEvent};
use crate::guard::ReentrancyGuard;
use crate::nonces::Nonces;
use crate::pause::PauseState;
use crate::rescue::RescueRegistry;
use crate::roles::RoleRegistry;
use crate::LedgerError;

/// Everything that persists across calls. Cloned wholesale to roll back
/// operations that hand control to external code.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenState {
    pub(crate) self_id: AccountId,
    pub(crate) balances: HashMap<AccountId, u128>,
    pub(crate) allowances: HashMap<(AccountId, AccountId), u128>,
    pub(crate) total_supply: u128,
    pub(crate) roles: RoleRegistry,
    pub(crate) pause: PauseState,
    pub(crate) rescue: RescueRegistry,
    pub(crate) nonces: Nonces,
    pub(crate) votes: VoteLedger,
    pub(crate) native_holdings: u128,
    pub(crate) events: Vec<TokenEvent>,
}

impl TokenState {
    fn empty(self_id: AccountId) -> Self {
        Self {
            self_id,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_supply: 0,
            roles: RoleRegistry::new(),
            pause: PauseState::Active,
            rescue: RescueRegistry::default(),
            nonces: Nonces::default(),
            votes: VoteLedger::new(),
            native_holdings: 0,
            events: Vec::new(),
        }
    }

    /// Check the supply invariants of state that did not come from this
    /// process, so later arithmetic on it cannot overflow.
    fn validate(&self) -> Result<(), LedgerError> {
        let corrupt = |what: &str| Err(LedgerError::Serialization(format!("inconsistent state: {what}")));
        if self.self_id.is_zero() {
            return corrupt("zero ledger account");
        }
        let Some(sum) = self
            .balances
            .values()
            .try_fold(0u128, |acc, balance| acc.checked_add(*balance))
        else {
            return corrupt("balances overflow");
        };
        if sum != self.total_supply {
            return corrupt("balances do not sum to total supply");
        }
        if self.total_supply > MAX_SUPPLY {
            return corrupt("total supply above cap");
        }
        if self.votes.total_supply() != self.total_supply {
            return corrupt("vote supply differs from total supply");
        }
        Ok(())
    }
}

/// A capped, role-gated, pausable token ledger with vote delegation.
///
/// Every operation either commits completely or leaves the ledger untouched.
/// Subscribers see an operation's events once it has committed; events
/// produced while a guarded operation is running are held back until the
/// outermost guarded operation finishes.
pub struct GovernanceToken {
    pub(crate) config: TokenConfig,
    pub(crate) domain: Domain,
    pub(crate) chain: Arc<dyn ChainContext>,
    pub(crate) state: TokenState,
    pub(crate) guard: ReentrancyGuard,
    bus: EventBus,
    /// Events before this index have been delivered to subscribers.
    published: usize,
}

impl GovernanceToken {
    /// Deploy a ledger at `self_id`, granting every role to `admin` and
    /// minting the entire supply cap to it.
    pub fn new(
        config: TokenConfig,
        self_id: AccountId,
        admin: AccountId,
        chain: Arc<dyn ChainContext>,
    ) -> Result<Self, LedgerError> {
        if self_id.is_zero() {
            return Err(LedgerError::ZeroAccount("ledger"));
        }
        if admin.is_zero() || !chain.has_code(&admin) {
            return Err(LedgerError::InvalidAdmin(admin));
        }

        let mut token = Self::from_parts(config, TokenState::empty(self_id), chain);
        for role in Role::ALL {
            token.state.roles.grant(role, admin);
            token.record(TokenEvent::RoleGranted {
                role,
                account: admin,
                sender: admin,
            });
        }
        token.update(AccountId::ZERO, admin, MAX_SUPPLY)?;
        token.published = token.state.events.len();

        tracing::info!(
            ledger = %self_id,
            %admin,
            name = %token.config.name,
            symbol = %token.config.symbol,
            supply = MAX_SUPPLY,
            "token ledger deployed"
        );
        Ok(token)
    }

    /// Rebuild a ledger from bytes produced by [`GovernanceToken::export_state`].
    pub fn restore(
        config: TokenConfig,
        chain: Arc<dyn ChainContext>,
        bytes: &[u8],
    ) -> Result<Self, LedgerError> {
        let state: TokenState =
            bincode::deserialize(bytes).map_err(|e| LedgerError::Serialization(e.to_string()))?;
        state.validate()?;
        let mut token = Self::from_parts(config, state, chain);
        token.published = token.state.events.len();
        tracing::info!(ledger = %token.state.self_id, events = token.published, "token ledger restored");
        Ok(token)
    }

    /// Serialize the full ledger state with bincode.
    pub fn export_state(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(&self.state).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    fn from_parts(config: TokenConfig, state: TokenState, chain: Arc<dyn ChainContext>) -> Self {
        let domain = Domain {
            name: config.name.clone(),
            version: config.permit_version.clone(),
            chain_id: config.chain_id,
            verifying_ledger: state.self_id,
        };
        Self {
            config,
            domain,
            chain,
            state,
            guard: ReentrancyGuard::new(),
            bus: EventBus::new(),
            published: 0,
        }
    }

    // ── Events ─────────────────────────────────────────────────────────

    /// Register a listener for committed events.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&TokenEvent) + Send + Sync>) {
        self.bus.subscribe(listener);
    }

    pub(crate) fn record(&mut self, event: TokenEvent) {
        self.state.events.push(event);
    }

    /// Deliver pending events, unless a guarded operation is still running.
    pub(crate) fn publish(&mut self) {
        if self.guard.is_entered() {
            return;
        }
        let pending = self.published.min(self.state.events.len());
        for event in &self.state.events[pending..] {
            self.bus.emit(event);
        }
        self.published = self.state.events.len();
    }

    /// Run `op` as a plain operation: publish its events if it succeeds.
    ///
    /// `op` must validate everything before mutating anything.
    pub(crate) fn commit<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let result = op(self);
        if result.is_ok() {
            self.publish();
        }
        result
    }

    /// Run `op` under the reentrancy guard. The guard is released on every
    /// exit path; events are published once the outermost guard is released.
    pub(crate) fn non_reentrant<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        self.guard.enter()?;
        let result = op(self);
        self.guard.leave();
        if result.is_ok() {
            self.publish();
        }
        result
    }

    // ── Transfer hook ──────────────────────────────────────────────────

    /// Move `amount` from `from` to `to`; the zero account on either side
    /// means mint or burn. The single place balances and supply change.
    pub(crate) fn update(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if !from.is_zero() && !to.is_zero() {
            self.state.pause.ensure_active()?;
        }

        if from.is_zero() {
            let supply = self.state.total_supply;
            if supply.checked_add(amount).map_or(true, |s| s > MAX_SUPPLY) {
                return Err(LedgerError::SupplyCapExceeded {
                    total_supply: supply,
                    amount,
                    cap: MAX_SUPPLY,
                });
            }
        } else {
            let available = self.balance_of(&from);
            if available < amount {
                return Err(LedgerError::InsufficientBalance {
                    account: from,
                    available,
                    required: amount,
                });
            }
        }

        // Validated: sum(balances) == total_supply <= MAX_SUPPLY, so nothing below overflows.
        if from.is_zero() {
            self.state.total_supply += amount;
        } else if let Some(balance) = self.state.balances.get_mut(&from) {
            *balance -= amount;
        }
        if to.is_zero() {
            self.state.total_supply -= amount;
        } else {
            *self.state.balances.entry(to).or_insert(0) += amount;
        }

        self.record(TokenEvent::Transfer { from, to, amount });

        let now = self.chain.block_height();
        let from_units = (!from.is_zero()).then_some(&from);
        let to_units = (!to.is_zero()).then_some(&to);
        let vote_events = self
            .state
            .votes
            .transfer_voting_units(from_units, to_units, amount, now);
        self.state
            .events
            .extend(vote_events.into_iter().map(TokenEvent::from));
        Ok(())
    }

    // ── Transfers and allowances ───────────────────────────────────────

    pub fn transfer(&mut self, caller: &AccountId, to: &AccountId, amount: u128) -> Result<(), LedgerError> {
        let (from, to) = (*caller, *to);
        self.commit(|token| {
            token.state.pause.ensure_active()?;
            require_nonzero(&from, "sender")?;
            require_nonzero(&to, "receiver")?;
            token.update(from, to, amount)?;
            tracing::debug!(%from, %to, amount, "transfer");
            Ok(())
        })
    }

    /// Move `amount` from `owner` to `to` using the caller's allowance.
    pub fn transfer_from(
        &mut self,
        caller: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let (spender, owner, to) = (*caller, *owner, *to);
        self.commit(|token| {
            token.state.pause.ensure_active()?;
            require_nonzero(&owner, "sender")?;
            require_nonzero(&to, "receiver")?;
            token.check_allowance(&owner, &spender, amount)?;
            token.update(owner, to, amount)?;
            token.spend_allowance(&owner, &spender, amount);
            tracing::debug!(%owner, %spender, %to, amount, "transfer from");
            Ok(())
        })
    }

    pub fn approve(&mut self, caller: &AccountId, spender: &AccountId, amount: u128) -> Result<(), LedgerError> {
        let (owner, spender) = (*caller, *spender);
        self.commit(|token| token.approve_inner(owner, spender, amount))
    }

    pub(crate) fn approve_inner(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        require_nonzero(&owner, "owner")?;
        require_nonzero(&spender, "spender")?;
        self.state.allowances.insert((owner, spender), amount);
        self.record(TokenEvent::Approval {
            owner,
            spender,
            amount,
        });
        tracing::debug!(%owner, %spender, amount, "approval");
        Ok(())
    }

    /// Destroy `amount` of the caller's balance, freeing room under the cap.
    pub fn burn(&mut self, caller: &AccountId, amount: u128) -> Result<(), LedgerError> {
        let from = *caller;
        self.commit(|token| {
            token.state.pause.ensure_active()?;
            require_nonzero(&from, "sender")?;
            token.update(from, AccountId::ZERO, amount)?;
            tracing::info!(%from, amount, supply = token.state.total_supply, "burn");
            Ok(())
        })
    }

    /// Destroy `amount` of `account`'s balance using the caller's allowance.
    pub fn burn_from(&mut self, caller: &AccountId, account: &AccountId, amount: u128) -> Result<(), LedgerError> {
        let (spender, owner) = (*caller, *account);
        self.commit(|token| {
            token.state.pause.ensure_active()?;
            require_nonzero(&owner, "sender")?;
            token.check_allowance(&owner, &spender, amount)?;
            token.update(owner, AccountId::ZERO, amount)?;
            token.spend_allowance(&owner, &spender, amount);
            tracing::info!(%owner, %spender, amount, supply = token.state.total_supply, "burn from");
            Ok(())
        })
    }

    fn check_allowance(&self, owner: &AccountId, spender: &AccountId, amount: u128) -> Result<(), LedgerError> {
        let available = self.allowance(owner, spender);
        if available < amount {
            return Err(LedgerError::InsufficientAllowance {
                spender: *spender,
                available,
                required: amount,
            });
        }
        Ok(())
    }

    /// Deduct a checked allowance; an infinite allowance is left as is.
    fn spend_allowance(&mut self, owner: &AccountId, spender: &AccountId, amount: u128) {
        if let Some(allowance) = self.state.allowances.get_mut(&(*owner, *spender)) {
            if *allowance != u128::MAX {
                *allowance = allowance.saturating_sub(amount);
            }
        }
    }

    /// Accept native value sent to the ledger account.
    pub fn deposit(&mut self, from: &AccountId, amount: u128) -> Result<(), LedgerError> {
        let holdings = self
            .state
            .native_holdings
            .checked_add(amount)
            .ok_or_else(|| LedgerError::TransferFailed {
                asset: AssetId::Native,
                reason: "native holdings overflow".to_string(),
            })?;
        self.state.native_holdings = holdings;
        tracing::debug!(%from, amount, holdings, "native deposit");
        Ok(())
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    pub fn max_supply(&self) -> u128 {
        MAX_SUPPLY
    }

    pub fn total_supply(&self) -> u128 {
        self.state.total_supply
    }

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.state.balances.get(account).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.state
            .allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    /// The ledger's own account id.
    pub fn id(&self) -> AccountId {
        self.state.self_id
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    pub fn native_holdings(&self) -> u128 {
        self.state.native_holdings
    }

    /// Every event recorded since deployment, oldest first.
    pub fn events(&self) -> &[TokenEvent] {
        &self.state.events
    }

    /// Sum of all balances. Equal to `total_supply` after every operation.
    pub fn balance_sum(&self) -> u128 {
        self.state.balances.values().sum()
    }

    pub(crate) fn now_height(&self) -> BlockHeight {
        self.chain.block_height()
    }
}

impl std::fmt::Debug for GovernanceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovernanceToken")
            .field("id", &self.state.self_id)
            .field("symbol", &self.config.symbol)
            .field("total_supply", &self.state.total_supply)
            .field("paused", &self.state.pause.is_paused())
            .finish()
    }
}

pub(crate) fn require_nonzero(account: &AccountId, what: &'static str) -> Result<(), LedgerError> {
    if account.is_zero() {
        Err(LedgerError::ZeroAccount(what))
    } else {
        Ok(())
    }
}
