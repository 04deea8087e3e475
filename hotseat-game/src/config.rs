//! Session tuning knobs.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prize::{PrizeError, PrizeLadder};
use crate::question::Difficulty;

const DEFAULT_QUESTION_COUNT: usize = 5;
const DEFAULT_RESERVE_COUNT: usize = 2;
const DEFAULT_TIMER_BUDGET: u32 = 30;
const DEFAULT_PRIZES: [u64; 5] = [100, 1_000, 10_000, 100_000, 1_000_000];

/// Errors raised when game configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: u64,
        value: u64,
    },
    #[error("{field} must lie within {min}..={max} (got {value})")]
    RangeViolation {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },
    #[error("prize ladder needs one tier per question ({tiers} tiers for {questions} questions)")]
    LadderLengthMismatch { tiers: usize, questions: usize },
    #[error(transparent)]
    Ladder(#[from] PrizeError),
}

/// Probability that the friend lifeline points at the correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FriendAccuracy {
    pub easy: f32,
    pub medium: f32,
    pub hard: f32,
}

impl FriendAccuracy {
    #[must_use]
    pub const fn for_difficulty(&self, difficulty: Difficulty) -> f32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for FriendAccuracy {
    fn default() -> Self {
        Self {
            easy: 0.9,
            medium: 0.75,
            hard: 0.6,
        }
    }
}

/// Configuration for one trivia session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Questions the player must clear to win the grand prize.
    pub question_count: usize,
    /// Extra questions fetched for the replace-question lifeline.
    #[serde(default)]
    pub reserve_count: usize,
    /// Difficulty requested from the question source.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Ticks the player gets per question.
    pub timer_budget: u32,
    /// Prize amounts, one tier per question index.
    pub prize_amounts: Vec<u64>,
    #[serde(default)]
    pub friend_accuracy: FriendAccuracy,
}

impl GameConfig {
    /// The stock five-question ladder.
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            reserve_count: DEFAULT_RESERVE_COUNT,
            difficulty: Difficulty::Easy,
            timer_budget: DEFAULT_TIMER_BUDGET,
            prize_amounts: DEFAULT_PRIZES.to_vec(),
            friend_accuracy: FriendAccuracy::default(),
        }
    }

    /// Check every documented bound.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.question_count == 0 {
            return Err(ConfigError::MinViolation {
                field: "question_count",
                min: 1,
                value: 0,
            });
        }
        if self.timer_budget == 0 {
            return Err(ConfigError::MinViolation {
                field: "timer_budget",
                min: 1,
                value: 0,
            });
        }
        if self.prize_amounts.len() != self.question_count {
            return Err(ConfigError::LadderLengthMismatch {
                tiers: self.prize_amounts.len(),
                questions: self.question_count,
            });
        }
        PrizeLadder::from_amounts(self.prize_amounts.clone())?;
        for (field, value) in [
            ("friend_accuracy.easy", self.friend_accuracy.easy),
            ("friend_accuracy.medium", self.friend_accuracy.medium),
            ("friend_accuracy.hard", self.friend_accuracy.hard),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RangeViolation {
                    field,
                    min: 0.0,
                    max: 1.0,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Build the validated prize ladder.
    ///
    /// # Errors
    ///
    /// Returns `PrizeError` when the amounts are not a valid ladder.
    pub fn ladder(&self) -> Result<PrizeLadder, PrizeError> {
        PrizeLadder::from_amounts(self.prize_amounts.clone())
    }

    /// Total questions requested from the source per session.
    #[must_use]
    pub const fn fetch_count(&self) -> usize {
        self.question_count + self.reserve_count
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
