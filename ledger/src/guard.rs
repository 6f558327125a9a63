//! Reentrancy lock for operations that may hand control to external code.

use crate::LedgerError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum GuardState {
    #[default]
    NotEntered,
    Entered,
}

/// Held for the duration of a guarded operation. Not persisted: a restored
/// ledger always starts unlocked.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    state: GuardState,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self) -> Result<(), LedgerError> {
        if self.state == GuardState::Entered {
            return Err(LedgerError::ReentrantCall);
        }
        self.state = GuardState::Entered;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.state = GuardState::NotEntered;
    }

    pub fn is_entered(&self) -> bool {
        self.state == GuardState::Entered
    }
}
