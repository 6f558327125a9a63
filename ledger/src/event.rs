//! Events recorded by the ledger and delivered to subscribers.

use gavel_types::{AccountId, AssetId, Role};
use gavel_votes::VoteEvent;
use serde::{Deserialize, Serialize};

/// Everything observable that a successful operation did.
///
/// `AccountId::ZERO` in `Transfer` stands for a mint (`from`) or a burn (`to`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: u128,
    },
    Approval {
        owner: AccountId,
        spender: AccountId,
        amount: u128,
    },
    Minted {
        minter: AccountId,
        to: AccountId,
        amount: u128,
    },
    Paused {
        account: AccountId,
    },
    Unpaused {
        account: AccountId,
    },
    RoleGranted {
        role: Role,
        account: AccountId,
        sender: AccountId,
    },
    RoleRevoked {
        role: Role,
        account: AccountId,
        sender: AccountId,
    },
    TokenWhitelisted {
        asset: AssetId,
        whitelisted: bool,
        require_safe_transfer: bool,
    },
    TokenBlacklisted {
        asset: AssetId,
        blacklisted: bool,
    },
    TokenRescued {
        asset: AssetId,
        to: AccountId,
        amount: u128,
    },
    DelegateChanged {
        delegator: AccountId,
        from_delegate: Option<AccountId>,
        to_delegate: Option<AccountId>,
    },
    DelegateVotesChanged {
        delegate: AccountId,
        previous: u128,
        new: u128,
    },
}

impl From<VoteEvent> for TokenEvent {
    fn from(event: VoteEvent) -> Self {
        match event {
            VoteEvent::DelegateChanged {
                delegator,
                from_delegate,
                to_delegate,
            } => Self::DelegateChanged {
                delegator,
                from_delegate,
                to_delegate,
            },
            VoteEvent::DelegateVotesChanged {
                delegate,
                previous,
                new,
            } => Self::DelegateVotesChanged {
                delegate,
                previous,
                new,
            },
        }
    }
}

/// Synchronous fan-out of committed events.
///
/// Listeners run inline on the caller's thread after the operation commits;
/// keep handlers fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&TokenEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&TokenEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &TokenEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));
        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&TokenEvent::Paused {
            account: AccountId::new([1; 32]),
        });
        assert_eq!(counter.load(Ordering::SeqCst), 11);
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        EventBus::new().emit(&TokenEvent::Unpaused {
            account: AccountId::ZERO,
        });
    }

    #[test]
    fn vote_events_convert() {
        let delegate = AccountId::new([3; 32]);
        let event: TokenEvent = VoteEvent::DelegateVotesChanged {
            delegate,
            previous: 1,
            new: 2,
        }
        .into();
        assert_eq!(
            event,
            TokenEvent::DelegateVotesChanged {
                delegate,
                previous: 1,
                new: 2
            }
        );
    }
}
