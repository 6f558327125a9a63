//! Ordered value history keyed by block height.

use gavel_types::BlockHeight;
use serde::{Deserialize, Serialize};

/// The value of a trace from `height` until the next checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub height: BlockHeight,
    pub value: u128,
}

/// A history of values, at most one checkpoint per block height.
///
/// Checkpoints are sorted by height (invariant maintained by `push`), so
/// historical lookups are a binary search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    checkpoints: Vec<Checkpoint>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` at `height`, returning `(previous, new)`.
    ///
    /// A second push in the same block overwrites that block's checkpoint.
    /// Heights must not go backwards; a regressed height is folded into the
    /// latest checkpoint so the sorted invariant always holds.
    pub fn push(&mut self, height: BlockHeight, value: u128) -> (u128, u128) {
        let previous = self.latest();
        match self.checkpoints.last_mut() {
            Some(last) if last.height >= height => {
                if last.height > height {
                    tracing::warn!(
                        latest = %last.height,
                        %height,
                        "checkpoint height went backwards; folding into latest"
                    );
                }
                last.value = value;
            }
            _ => self.checkpoints.push(Checkpoint { height, value }),
        }
        (previous, value)
    }

    /// The most recent value, or 0 for an empty trace.
    pub fn latest(&self) -> u128 {
        self.checkpoints.last().map_or(0, |c| c.value)
    }

    /// The value in effect at `height`: the last checkpoint at or before it.
    pub fn upper_lookup(&self, height: BlockHeight) -> u128 {
        let pos = self.checkpoints.partition_point(|c| c.height <= height);
        if pos == 0 {
            0
        } else {
            self.checkpoints[pos - 1].value
        }
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<&Checkpoint> {
        self.checkpoints.get(index)
    }
}
