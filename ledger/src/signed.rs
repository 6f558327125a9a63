//! Vote delegation and signature-authorized operations.

use gavel_crypto::{derive_account, typed_digest, verify_digest, DelegationMessage, Domain, PermitMessage};
use gavel_types::{AccountId, BlockHeight, PublicKey, Signature, Timestamp};
use gavel_votes::{VoteSource, VotesError};

use crate::event::TokenEvent;
use crate::token::{require_nonzero, GovernanceToken};
use crate::LedgerError;

impl GovernanceToken {
    // ── Nonces and domain ──────────────────────────────────────────────

    /// The next nonce a signature from `account` must use.
    pub fn nonces(&self, account: &AccountId) -> u64 {
        self.state.nonces.current(account)
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn domain_separator(&self) -> [u8; 32] {
        self.domain.separator()
    }

    fn ensure_not_expired(&self, deadline: Timestamp) -> Result<(), LedgerError> {
        let now = self.chain.timestamp();
        if deadline.has_passed(now) {
            return Err(LedgerError::ExpiredSignature {
                deadline: deadline.as_secs(),
                now: now.as_secs(),
            });
        }
        Ok(())
    }

    fn verify(&self, struct_hash: [u8; 32], signature: &Signature, key: &PublicKey) -> Result<(), LedgerError> {
        let digest = typed_digest(&self.domain, &struct_hash);
        if verify_digest(&digest, signature, key) {
            Ok(())
        } else {
            Err(LedgerError::InvalidSignature)
        }
    }

    // ── Permit ─────────────────────────────────────────────────────────

    /// Set `spender`'s allowance over the key holder's balance from a signed
    /// permit. The signature covers the owner's current nonce, so it is
    /// single-use.
    pub fn permit(
        &mut self,
        owner_key: &PublicKey,
        spender: &AccountId,
        value: u128,
        deadline: Timestamp,
        signature: &Signature,
    ) -> Result<(), LedgerError> {
        let spender = *spender;
        self.commit(|token| {
            token.ensure_not_expired(deadline)?;
            let owner = derive_account(owner_key);
            let message = PermitMessage {
                owner,
                spender,
                value,
                nonce: token.state.nonces.current(&owner),
                deadline,
            };
            token.verify(message.struct_hash(), signature, owner_key)?;
            require_nonzero(&spender, "spender")?;
            token.state.nonces.use_nonce(&owner);
            token.approve_inner(owner, spender, value)?;
            tracing::debug!(%owner, %spender, value, nonce = message.nonce, "permit accepted");
            Ok(())
        })
    }

    // ── Delegation ─────────────────────────────────────────────────────

    /// Delegate the caller's votes to `delegatee`; `None` clears the delegation.
    pub fn delegate(&mut self, caller: &AccountId, delegatee: Option<AccountId>) -> Result<(), LedgerError> {
        let delegator = *caller;
        self.commit(|token| {
            require_nonzero(&delegator, "delegator")?;
            token.delegate_inner(delegator, delegatee);
            Ok(())
        })
    }

    /// Delegate on behalf of the key holder. A zero `delegatee` clears the delegation.
    pub fn delegate_by_sig(
        &mut self,
        signer_key: &PublicKey,
        delegatee: &AccountId,
        nonce: u64,
        expiry: Timestamp,
        signature: &Signature,
    ) -> Result<(), LedgerError> {
        let delegatee = *delegatee;
        self.commit(|token| {
            token.ensure_not_expired(expiry)?;
            let message = DelegationMessage {
                delegatee,
                nonce,
                expiry,
            };
            token.verify(message.struct_hash(), signature, signer_key)?;
            let delegator = derive_account(signer_key);
            token.state.nonces.use_checked(&delegator, nonce)?;
            token.delegate_inner(delegator, Some(delegatee));
            Ok(())
        })
    }

    fn delegate_inner(&mut self, delegator: AccountId, delegatee: Option<AccountId>) {
        let delegatee = delegatee.filter(|d| !d.is_zero());
        let units = self.balance_of(&delegator);
        let now = self.now_height();
        let events = self.state.votes.delegate(&delegator, delegatee, units, now);
        self.state
            .events
            .extend(events.into_iter().map(TokenEvent::from));
        tracing::debug!(%delegator, delegatee = ?delegatee, units, "delegated");
    }

    // ── Vote queries ───────────────────────────────────────────────────

    /// Read-only vote capability for governance consumers.
    pub fn vote_source(&self) -> &dyn VoteSource {
        self
    }

    pub fn clock(&self) -> BlockHeight {
        self.now_height()
    }

    pub fn delegates(&self, account: &AccountId) -> Option<AccountId> {
        self.state.votes.delegates(account)
    }

    pub fn get_votes(&self, account: &AccountId) -> u128 {
        self.state.votes.votes(account)
    }

    pub fn get_past_votes(&self, account: &AccountId, height: BlockHeight) -> Result<u128, LedgerError> {
        Ok(self.state.votes.past_votes(account, height, self.now_height())?)
    }

    pub fn get_past_total_supply(&self, height: BlockHeight) -> Result<u128, LedgerError> {
        Ok(self.state.votes.past_total_supply(height, self.now_height())?)
    }
}

impl VoteSource for GovernanceToken {
    fn clock(&self) -> BlockHeight {
        self.now_height()
    }

    fn delegates(&self, account: &AccountId) -> Option<AccountId> {
        self.state.votes.delegates(account)
    }

    fn get_votes(&self, account: &AccountId) -> u128 {
        self.state.votes.votes(account)
    }

    fn get_past_votes(&self, account: &AccountId, height: BlockHeight) -> Result<u128, VotesError> {
        self.state.votes.past_votes(account, height, self.now_height())
    }

    fn get_past_total_supply(&self, height: BlockHeight) -> Result<u128, VotesError> {
        self.state.votes.past_total_supply(height, self.now_height())
    }
}
