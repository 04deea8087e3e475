//! Prize ladder and payout rules.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a prize table violates its invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrizeError {
    #[error("prize ladder must contain at least one tier")]
    Empty,
    #[error("prize ladder must increase monotonically (tier {index}: {amount} <= {previous})")]
    NotIncreasing {
        index: usize,
        amount: u64,
        previous: u64,
    },
}

/// Monotonically increasing prize amounts, one tier per question index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrizeLadder {
    amounts: Vec<u64>,
}

impl PrizeLadder {
    /// Build a ladder from raw amounts, validating monotonicity.
    ///
    /// # Errors
    ///
    /// Returns `PrizeError` when the table is empty or not strictly
    /// increasing.
    pub fn from_amounts(amounts: Vec<u64>) -> Result<Self, PrizeError> {
        if amounts.is_empty() {
            return Err(PrizeError::Empty);
        }
        for (index, window) in amounts.windows(2).enumerate() {
            if window[1] <= window[0] {
                return Err(PrizeError::NotIncreasing {
                    index: index + 1,
                    amount: window[1],
                    previous: window[0],
                });
            }
        }
        Ok(Self { amounts })
    }

    /// Number of tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Prize at a given question index, if the ladder covers it.
    #[must_use]
    pub fn amount_at(&self, index: usize) -> Option<u64> {
        self.amounts.get(index).copied()
    }

    /// Payout for having fully completed `completed` questions.
    ///
    /// Zero completed questions pay nothing; otherwise the tier of the
    /// last completed index. Completion counts beyond the ladder clamp
    /// to the top tier.
    #[must_use]
    pub fn amount_for_completed(&self, completed: usize) -> u64 {
        if completed == 0 {
            return 0;
        }
        let tier = completed.min(self.amounts.len()) - 1;
        self.amounts[tier]
    }

    /// The top tier of the ladder.
    #[must_use]
    pub fn grand_prize(&self) -> u64 {
        self.amounts.last().copied().unwrap_or(0)
    }
}
