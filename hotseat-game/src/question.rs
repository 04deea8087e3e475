use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::data::RawQuestion;
use crate::text::decode_html;

/// Choices are stored inline; the standard round has four options.
pub type ChoiceList = SmallVec<[Choice; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(()),
        }
    }
}

/// Presentation state of a single answer option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceState {
    #[default]
    NotSelected,
    Selected,
    /// Revealed as the correct answer after submission.
    Correct,
    /// Revealed as the player's wrong pick after submission.
    Wrong,
    /// Removed by the fifty-fifty lifeline; no longer selectable.
    Disabled,
}

/// A single answer option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    #[serde(default)]
    pub state: ChoiceState,
}

impl Choice {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            state: ChoiceState::NotSelected,
        }
    }

    /// Whether the player may still pick this option.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.state != ChoiceState::Disabled
    }
}

/// One trivia question with its shuffled answer options.
///
/// Built once from raw feed data; the choice order is randomized at
/// construction and never re-shuffled afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameQuestion {
    prompt: String,
    difficulty: Difficulty,
    choices: ChoiceList,
    correct_text: String,
    selected: Option<usize>,
}

impl GameQuestion {
    /// Map a raw question into a playable one, decoding HTML escapes and
    /// shuffling the combined incorrect + correct options.
    ///
    /// Returns `None` when the decoded correct answer is blank; such a
    /// question could never satisfy the one-correct-choice invariant.
    #[must_use]
    pub fn from_raw<R: Rng>(raw: &RawQuestion, rng: &mut R) -> Option<Self> {
        let correct_text = decode_html(&raw.correct_answer);
        if correct_text.trim().is_empty() {
            return None;
        }
        let mut choices: ChoiceList = raw
            .incorrect_answers
            .iter()
            .map(|answer| Choice::new(decode_html(answer)))
            .collect();
        choices.push(Choice::new(correct_text.clone()));
        choices.shuffle(rng);
        Some(Self {
            prompt: decode_html(&raw.question),
            difficulty: raw.difficulty.parse().unwrap_or_default(),
            choices,
            correct_text,
            selected: None,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_text
    }

    /// Index of the choice holding the correct answer text.
    #[must_use]
    pub fn correct_index(&self) -> Option<usize> {
        self.choices
            .iter()
            .position(|choice| choice.text == self.correct_text)
    }

    #[must_use]
    pub const fn selected_answer(&self) -> Option<usize> {
        self.selected
    }

    /// Record the player's pick. Fails on an out-of-range index or a
    /// disabled choice; at most one choice is marked selected.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(choice) = self.choices.get(index) else {
            return false;
        };
        if !choice.is_selectable() {
            return false;
        }
        if let Some(previous) = self.selected
            && let Some(prev_choice) = self.choices.get_mut(previous)
            && prev_choice.state == ChoiceState::Selected
        {
            prev_choice.state = ChoiceState::NotSelected;
        }
        self.choices[index].state = ChoiceState::Selected;
        self.selected = Some(index);
        true
    }

    /// Drop any recorded selection, restoring the choice to neutral.
    pub fn clear_selection(&mut self) {
        if let Some(index) = self.selected.take()
            && let Some(choice) = self.choices.get_mut(index)
            && choice.state == ChoiceState::Selected
        {
            choice.state = ChoiceState::NotSelected;
        }
    }

    /// Disable the choice at `index` for the fifty-fifty lifeline.
    ///
    /// Succeeds only when the index is in range, the choice is not the
    /// correct answer, and the choice is not already disabled; repeated
    /// calls on the same index fail rather than crash. A disabled
    /// choice loses its text.
    pub fn remove_wrong_answer(&mut self, index: usize) -> bool {
        let Some(choice) = self.choices.get_mut(index) else {
            return false;
        };
        if choice.text == self.correct_text || choice.state == ChoiceState::Disabled {
            return false;
        }
        choice.text = String::new();
        choice.state = ChoiceState::Disabled;
        if self.selected == Some(index) {
            self.selected = None;
        }
        true
    }

    /// Indices of enabled choices that are not the correct answer.
    #[must_use]
    pub fn removable_wrong_indices(&self) -> Vec<usize> {
        self.choices
            .iter()
            .enumerate()
            .filter(|(_, choice)| choice.is_selectable() && choice.text != self.correct_text)
            .map(|(index, _)| index)
            .collect()
    }

    /// Indices a friend could plausibly suggest besides the correct one.
    #[must_use]
    pub fn enabled_wrong_indices(&self) -> Vec<usize> {
        self.removable_wrong_indices()
    }

    /// One-time reveal after submission: mark the correct choice, and the
    /// player's pick as wrong when it missed.
    pub fn reveal(&mut self) {
        let correct = self.correct_index();
        if let Some(index) = correct
            && let Some(choice) = self.choices.get_mut(index)
        {
            choice.state = ChoiceState::Correct;
        }
        if let Some(index) = self.selected
            && correct != Some(index)
            && let Some(choice) = self.choices.get_mut(index)
        {
            choice.state = ChoiceState::Wrong;
        }
    }

    /// Whether the recorded selection matches the correct answer text.
    /// No selection is never correct.
    #[must_use]
    pub fn is_selected_correct(&self) -> bool {
        self.selected
            .and_then(|index| self.choices.get(index))
            .is_some_and(|choice| choice.text == self.correct_text)
    }
}
