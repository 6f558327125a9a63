//! Nullable asset host: records outgoing transfers instead of performing them.

use gavel_ledger::{AssetHost, GovernanceToken, LedgerError, TransferOutcome};
use gavel_types::{AccountId, AssetId};
use std::collections::HashMap;

/// One transfer the ledger asked the host to make.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedTransfer {
    pub asset: AssetId,
    pub to: AccountId,
    pub amount: u128,
}

type ReentryHook = Box<dyn FnMut(&mut GovernanceToken) -> Result<(), LedgerError>>;

/// A test host with per-asset outcomes and an optional re-entry hook.
///
/// Every asset transfers with [`TransferOutcome::Success`] unless configured
/// otherwise. The re-entry hook runs inside each transfer with the ledger in
/// hand, and its results are kept for assertions.
#[derive(Default)]
pub struct NullAssetHost {
    outcomes: HashMap<AssetId, TransferOutcome>,
    transfers: Vec<RecordedTransfer>,
    reentry: Option<ReentryHook>,
    reentry_results: Vec<Result<(), LedgerError>>,
}

impl NullAssetHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make transfers of `asset` report `outcome`.
    pub fn with_outcome(mut self, asset: AssetId, outcome: TransferOutcome) -> Self {
        self.outcomes.insert(asset, outcome);
        self
    }

    /// Call back into the ledger from inside every transfer.
    pub fn with_reentry(
        mut self,
        hook: impl FnMut(&mut GovernanceToken) -> Result<(), LedgerError> + 'static,
    ) -> Self {
        self.reentry = Some(Box::new(hook));
        self
    }

    /// Transfers that were attempted, in order.
    pub fn transfers(&self) -> &[RecordedTransfer] {
        &self.transfers
    }

    /// What the re-entry hook got back from the ledger, in order.
    pub fn reentry_results(&self) -> &[Result<(), LedgerError>] {
        &self.reentry_results
    }

    fn handle(
        &mut self,
        ledger: &mut GovernanceToken,
        asset: AssetId,
        to: &AccountId,
        amount: u128,
    ) -> TransferOutcome {
        if let Some(hook) = self.reentry.as_mut() {
            let result = hook(ledger);
            self.reentry_results.push(result);
        }
        self.transfers.push(RecordedTransfer {
            asset,
            to: *to,
            amount,
        });
        self.outcomes
            .get(&asset)
            .copied()
            .unwrap_or(TransferOutcome::Success)
    }
}

impl AssetHost for NullAssetHost {
    fn send_native(&mut self, ledger: &mut GovernanceToken, to: &AccountId, amount: u128) -> TransferOutcome {
        self.handle(ledger, AssetId::Native, to, amount)
    }

    fn transfer_token(
        &mut self,
        ledger: &mut GovernanceToken,
        token: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> TransferOutcome {
        self.handle(ledger, AssetId::Token(*token), to, amount)
    }
}
