//! Two-state pause switch.

use serde::{Deserialize, Serialize};

use crate::LedgerError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseState {
    #[default]
    Active,
    Paused,
}

impl PauseState {
    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Fails with `Paused` while paused.
    pub fn ensure_active(&self) -> Result<(), LedgerError> {
        if self.is_paused() {
            Err(LedgerError::Paused)
        } else {
            Ok(())
        }
    }

    /// Move to `target`; moving to the current state is rejected.
    pub fn transition(&mut self, target: PauseState) -> Result<(), LedgerError> {
        if *self == target {
            return Err(LedgerError::InvalidStateTransition(target.label()));
        }
        *self = target;
        Ok(())
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
        }
    }
}
