use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::data::TriviaResponse;
use crate::question::GameQuestion;

/// The ordered questions for one session plus the replacement reserve.
///
/// The cursor only ever moves forward, one position per completed
/// question; `current == len` marks the set exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuestionSet {
    questions: Vec<GameQuestion>,
    reserve: VecDeque<GameQuestion>,
    current: usize,
}

impl QuestionSet {
    /// Map a fetched batch into playable questions.
    ///
    /// The first `question_count` usable questions form the session;
    /// the remainder feeds the replace-question reserve. Raw entries
    /// with a blank correct answer are dropped.
    #[must_use]
    pub fn from_response<R: Rng>(
        response: &TriviaResponse,
        question_count: usize,
        rng: &mut R,
    ) -> Self {
        let mut questions = Vec::with_capacity(question_count);
        let mut reserve = VecDeque::new();
        for raw in &response.results {
            let Some(question) = GameQuestion::from_raw(raw, rng) else {
                continue;
            };
            if questions.len() < question_count {
                questions.push(question);
            } else {
                reserve.push_back(question);
            }
        }
        Self {
            questions,
            reserve,
            current: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn reserve_len(&self) -> usize {
        self.reserve.len()
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Whether every question has been moved past.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current >= self.questions.len()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&GameQuestion> {
        self.questions.get(self.current)
    }

    pub fn current_question_mut(&mut self) -> Option<&mut GameQuestion> {
        self.questions.get_mut(self.current)
    }

    /// Move the cursor forward by exactly one position, saturating at
    /// the set length. Returns the new cursor value.
    pub fn advance(&mut self) -> usize {
        if self.current < self.questions.len() {
            self.current += 1;
        }
        self.current
    }

    /// Swap the current question for the next reserve question without
    /// moving the cursor. Fails when the reserve is empty or the set is
    /// exhausted; the replaced question is discarded.
    pub fn replace_current(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        let Some(replacement) = self.reserve.pop_front() else {
            return false;
        };
        self.questions[self.current] = replacement;
        true
    }
}
