//! Block heights and timestamps read from the host chain.
//!
//! Vote checkpoints are keyed by block height; signature deadlines are
//! compared against the block timestamp.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Height of a block on the host chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHeight(u64);

impl BlockHeight {
    pub const GENESIS: Self = Self(0);

    pub const fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The height `n` blocks later (saturating).
    pub fn advance(&self, n: u64) -> Self {
        Self(self.0.saturating_add(n))
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);

    pub const fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Whether a deadline at `self` has passed at `now`. The deadline second itself is still valid.
    pub fn has_passed(&self, now: Timestamp) -> bool {
        now.0 > self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_is_inclusive() {
        let deadline = Timestamp::new(100);
        assert!(!deadline.has_passed(Timestamp::new(99)));
        assert!(!deadline.has_passed(Timestamp::new(100)));
        assert!(deadline.has_passed(Timestamp::new(101)));
    }

    #[test]
    fn advance_saturates() {
        assert_eq!(BlockHeight::new(u64::MAX).advance(5), BlockHeight::new(u64::MAX));
        assert_eq!(BlockHeight::GENESIS.advance(3).as_u64(), 3);
    }
}
