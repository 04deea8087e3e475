//! The per-session game-progression state machine.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::data::TriviaResponse;
use crate::event::{EventKind, EventSeverity, GameEvent};
use crate::lifelines::{FriendAdvice, LifelineFlags, LifelineKind};
use crate::prize::PrizeLadder;
use crate::question::GameQuestion;
use crate::question_set::QuestionSet;
use crate::rng::SessionRng;
use crate::timer::{QuestionTimer, TimerTick};

/// Top-level lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Waiting for the question batch.
    Loading,
    /// Questions loaded; play commands are accepted.
    Ready,
    /// The fetch failed; terminal until the host loads again.
    Failed,
}

impl SessionPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-question sub-state within a ready session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleState {
    /// A question is live: selection, lifelines, and the timer apply.
    QuestionStart,
    /// The answer was revealed and was correct; next command advances.
    QuestionSubmitted,
    /// The answer was revealed and was wrong; next command ends the game.
    WrongAnswerSubmitted,
    /// Terminal; only a fresh session restarts play.
    GameOver,
}

impl CycleState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QuestionStart => "question_start",
            Self::QuestionSubmitted => "question_submitted",
            Self::WrongAnswerSubmitted => "wrong_answer_submitted",
            Self::GameOver => "game_over",
        }
    }
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned for rejected host commands. Every rejection leaves
/// the session state untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("session is not accepting play commands (phase {phase})")]
    SessionNotReady { phase: SessionPhase },
    #[error("the session has ended")]
    SessionOver,
    #[error("answers are locked once the question is submitted")]
    AnswersLocked,
    #[error("choice index {index} is out of range for {len} choices")]
    ChoiceOutOfRange { index: usize, len: usize },
    #[error("choice {index} has been removed")]
    ChoiceDisabled { index: usize },
    #[error("lifelines are unavailable in cycle state {cycle}")]
    LifelineLocked { cycle: CycleState },
    #[error("lifeline {kind} was already used this session")]
    LifelineSpent { kind: LifelineKind },
    #[error("no incorrect choices remain to remove")]
    NoRemovableAnswers,
    #[error("no replacement question remains in the reserve")]
    ReserveExhausted,
    #[error("no question is currently live")]
    NoActiveQuestion,
}

/// Host-facing snapshot of everything observable about a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: SessionPhase,
    pub cycle: CycleState,
    pub question_index: usize,
    pub question_count: usize,
    pub current_question: Option<GameQuestion>,
    pub remaining_time: Option<u32>,
    pub final_prize: Option<u64>,
    pub lifelines: LifelineFlags,
}

/// One trivia session: owns the question set, the single live timer,
/// the lifeline state, and the event ledger.
///
/// All mutation happens through discrete host commands or timer ticks;
/// the session is single-threaded by design.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    ladder: PrizeLadder,
    rng: SessionRng,
    set: QuestionSet,
    phase: SessionPhase,
    cycle: CycleState,
    timer: Option<QuestionTimer>,
    lifelines: LifelineFlags,
    events: Vec<GameEvent>,
    event_seq: u64,
    final_prize: Option<u64>,
}

impl GameSession {
    /// Construct a session in the `Loading` phase.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the configuration violates its bounds.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let ladder = config.ladder()?;
        Ok(Self::from_validated(config, ladder, seed))
    }

    pub(crate) fn from_validated(config: GameConfig, ladder: PrizeLadder, seed: u64) -> Self {
        Self {
            rng: SessionRng::from_user_seed(seed),
            ladder,
            set: QuestionSet::default(),
            phase: SessionPhase::Loading,
            cycle: CycleState::QuestionStart,
            timer: None,
            lifelines: LifelineFlags::default(),
            events: Vec::new(),
            event_seq: 0,
            final_prize: None,
            config,
        }
    }

    /// Feed the fetched question batch into the session.
    ///
    /// Accepted from `Loading` or `Failed` (a host retry re-enters the
    /// load); a non-empty usable batch moves the session to `Ready` and
    /// serves the first question, anything else moves it to `Failed`.
    /// Calling on an already-ready session changes nothing.
    pub fn begin(&mut self, response: &TriviaResponse) -> SessionPhase {
        if self.phase == SessionPhase::Ready {
            return self.phase;
        }
        let set = QuestionSet::from_response(response, self.config.question_count, self.rng.shuffle());
        if set.is_empty() {
            self.fail("question batch contained no usable questions");
            return self.phase;
        }
        self.set = set;
        self.phase = SessionPhase::Ready;
        self.push_event(
            EventKind::SessionLoaded,
            EventSeverity::Info,
            serde_json::json!({
                "questions": self.set.len(),
                "reserve": self.set.reserve_len(),
            }),
        );
        self.serve_current();
        self.phase
    }

    /// Record a failed fetch; the session becomes `Failed`.
    pub fn fail(&mut self, reason: &str) {
        self.release_timer();
        self.phase = SessionPhase::Failed;
        self.push_event(
            EventKind::LoadFailed,
            EventSeverity::Warn,
            serde_json::json!({ "reason": reason }),
        );
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub const fn cycle(&self) -> CycleState {
        self.cycle
    }

    #[must_use]
    pub const fn final_prize(&self) -> Option<u64> {
        self.final_prize
    }

    #[must_use]
    pub const fn lifelines(&self) -> LifelineFlags {
        self.lifelines
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&GameQuestion> {
        self.set.current_question()
    }

    #[must_use]
    pub const fn question_index(&self) -> usize {
        self.set.current_index()
    }

    /// Remaining budget of the live timer, if one is running.
    #[must_use]
    pub fn remaining_time(&self) -> Option<u32> {
        self.timer
            .as_ref()
            .filter(|timer| !timer.is_cancelled())
            .map(QuestionTimer::remaining)
    }

    /// Record the player's pick for the live question.
    ///
    /// # Errors
    ///
    /// Rejected outside `QuestionStart`, for out-of-range indices, and
    /// for removed choices.
    pub fn select_choice(&mut self, index: usize) -> Result<(), GameError> {
        self.ensure_active()?;
        if self.cycle != CycleState::QuestionStart {
            return Err(GameError::AnswersLocked);
        }
        let question = self
            .set
            .current_question_mut()
            .ok_or(GameError::NoActiveQuestion)?;
        let len = question.choices().len();
        if index >= len {
            return Err(GameError::ChoiceOutOfRange { index, len });
        }
        if !question.select(index) {
            return Err(GameError::ChoiceDisabled { index });
        }
        let question_index = self.set.current_index();
        self.push_event(
            EventKind::ChoiceSelected,
            EventSeverity::Info,
            serde_json::json!({ "question": question_index, "choice": index }),
        );
        Ok(())
    }

    /// The host's single submit/advance command.
    ///
    /// In `QuestionStart` it locks and reveals the answer; in
    /// `QuestionSubmitted` it moves to the next question or finishes a
    /// cleared set; in `WrongAnswerSubmitted` it finalizes the prize.
    ///
    /// # Errors
    ///
    /// Rejected while loading, after a failed load, and after game over.
    pub fn submit_or_advance(&mut self) -> Result<CycleState, GameError> {
        self.ensure_active()?;
        match self.cycle {
            CycleState::QuestionStart => Ok(self.submit_current()),
            CycleState::QuestionSubmitted => Ok(self.advance_or_finish()),
            CycleState::WrongAnswerSubmitted => {
                let completed = self.set.current_index();
                Ok(self.finish(completed))
            }
            CycleState::GameOver => Err(GameError::SessionOver),
        }
    }

    /// Advance the live timer by one tick.
    ///
    /// Returns the remaining budget after the tick, or `None` when no
    /// timer is running. Expiry submits the question with no selection.
    pub fn tick_timer(&mut self) -> Option<u32> {
        if self.phase != SessionPhase::Ready || self.cycle != CycleState::QuestionStart {
            return None;
        }
        match self.timer.as_mut()?.tick() {
            TimerTick::Running(remaining) => Some(remaining),
            TimerTick::Expired => {
                self.push_event(
                    EventKind::TimerExpired,
                    EventSeverity::Warn,
                    serde_json::json!({ "question": self.set.current_index() }),
                );
                if let Some(question) = self.set.current_question_mut() {
                    question.clear_selection();
                }
                self.submit_current();
                Some(0)
            }
            TimerTick::Idle => None,
        }
    }

    /// Fifty-fifty: disable up to two enabled incorrect choices, chosen
    /// uniformly at random. Returns the removed indices.
    ///
    /// # Errors
    ///
    /// Rejected outside `QuestionStart` and when nothing removable
    /// remains.
    pub fn remove_two_wrong_answers(&mut self) -> Result<Vec<usize>, GameError> {
        self.ensure_lifeline_window()?;
        let question = self
            .set
            .current_question()
            .ok_or(GameError::NoActiveQuestion)?;
        let removable = question.removable_wrong_indices();
        if removable.is_empty() {
            return Err(GameError::NoRemovableAnswers);
        }
        let picked: Vec<usize> = removable
            .choose_multiple(self.rng.lifeline(), 2)
            .copied()
            .collect();
        let mut removed = Vec::with_capacity(picked.len());
        if let Some(question) = self.set.current_question_mut() {
            for index in picked {
                if question.remove_wrong_answer(index) {
                    removed.push(index);
                }
            }
        }
        removed.sort_unstable();
        self.lifelines.mark_used(LifelineKind::RemoveTwoWrong);
        self.push_event(
            EventKind::WrongAnswersRemoved,
            EventSeverity::Info,
            serde_json::json!({
                "question": self.set.current_index(),
                "removed": removed,
            }),
        );
        Ok(removed)
    }

    /// Swap the live question for a reserve one; the cursor and prize
    /// table do not move, and the timer restarts.
    ///
    /// # Errors
    ///
    /// Rejected outside `QuestionStart` and when the reserve is empty.
    pub fn replace_question(&mut self) -> Result<(), GameError> {
        self.ensure_lifeline_window()?;
        if !self.set.replace_current() {
            return Err(GameError::ReserveExhausted);
        }
        self.lifelines.mark_used(LifelineKind::ReplaceQuestion);
        self.push_event(
            EventKind::QuestionReplaced,
            EventSeverity::Info,
            serde_json::json!({
                "question": self.set.current_index(),
                "reserve_left": self.set.reserve_len(),
            }),
        );
        self.arm_timer();
        Ok(())
    }

    /// Ask a friend for advice on the live question. The suggestion is
    /// correct with the configured per-difficulty probability.
    ///
    /// # Errors
    ///
    /// Rejected outside `QuestionStart` and after its single use.
    pub fn ask_friend(&mut self) -> Result<FriendAdvice, GameError> {
        self.ensure_lifeline_window()?;
        if self.lifelines.is_used(LifelineKind::AskFriend) {
            return Err(GameError::LifelineSpent {
                kind: LifelineKind::AskFriend,
            });
        }
        let question = self
            .set
            .current_question()
            .ok_or(GameError::NoActiveQuestion)?;
        let Some(correct) = question.correct_index() else {
            return Err(GameError::NoActiveQuestion);
        };
        let accuracy = self
            .config
            .friend_accuracy
            .for_difficulty(question.difficulty());
        let wrong = question.enabled_wrong_indices();
        let roll: f32 = self.rng.friend().r#gen();
        let suggested = if roll < accuracy || wrong.is_empty() {
            correct
        } else {
            wrong
                .choose(self.rng.friend())
                .copied()
                .unwrap_or(correct)
        };
        self.lifelines.mark_used(LifelineKind::AskFriend);
        self.push_event(
            EventKind::FriendAdviceOffered,
            EventSeverity::Info,
            serde_json::json!({
                "question": self.set.current_index(),
                "suggested": suggested,
            }),
        );
        Ok(FriendAdvice {
            suggested_index: suggested,
        })
    }

    /// Clone out everything a host needs to render the session.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            cycle: self.cycle,
            question_index: self.set.current_index(),
            question_count: self.set.len(),
            current_question: self.set.current_question().cloned(),
            remaining_time: self.remaining_time(),
            final_prize: self.final_prize,
            lifelines: self.lifelines,
        }
    }

    /// Take all ledger entries accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn ensure_active(&self) -> Result<(), GameError> {
        match self.phase {
            SessionPhase::Ready => {
                if self.cycle == CycleState::GameOver {
                    Err(GameError::SessionOver)
                } else {
                    Ok(())
                }
            }
            phase => Err(GameError::SessionNotReady { phase }),
        }
    }

    fn ensure_lifeline_window(&self) -> Result<(), GameError> {
        self.ensure_active()?;
        if self.cycle != CycleState::QuestionStart {
            return Err(GameError::LifelineLocked { cycle: self.cycle });
        }
        Ok(())
    }

    fn submit_current(&mut self) -> CycleState {
        self.release_timer();
        let Some(question) = self.set.current_question_mut() else {
            return self.cycle;
        };
        question.reveal();
        let selected = question.selected_answer();
        let correct = question.is_selected_correct();
        let question_index = self.set.current_index();
        self.push_event(
            EventKind::AnswerRevealed,
            EventSeverity::Info,
            serde_json::json!({
                "question": question_index,
                "selected": selected,
                "correct": correct,
            }),
        );
        self.cycle = if correct {
            CycleState::QuestionSubmitted
        } else {
            CycleState::WrongAnswerSubmitted
        };
        self.cycle
    }

    fn advance_or_finish(&mut self) -> CycleState {
        self.set.advance();
        if self.set.is_exhausted() {
            self.finish(self.set.len())
        } else {
            self.serve_current()
        }
    }

    fn serve_current(&mut self) -> CycleState {
        let difficulty = self
            .set
            .current_question()
            .map(|question| question.difficulty());
        self.push_event(
            EventKind::QuestionServed,
            EventSeverity::Info,
            serde_json::json!({
                "question": self.set.current_index(),
                "difficulty": difficulty.map(crate::question::Difficulty::as_str),
            }),
        );
        self.arm_timer();
        self.cycle = CycleState::QuestionStart;
        self.cycle
    }

    fn finish(&mut self, completed: usize) -> CycleState {
        self.release_timer();
        let prize = self.ladder.amount_for_completed(completed);
        self.final_prize = Some(prize);
        self.push_event(
            EventKind::PrizeFinalized,
            EventSeverity::Info,
            serde_json::json!({ "completed": completed, "prize": prize }),
        );
        self.cycle = CycleState::GameOver;
        self.cycle
    }

    /// Start the countdown for the live question, releasing any
    /// previous timer first so only one can ever run.
    fn arm_timer(&mut self) {
        self.release_timer();
        self.timer = Some(QuestionTimer::new(self.config.timer_budget));
    }

    fn release_timer(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.cancel();
        }
        self.timer = None;
    }

    fn push_event(&mut self, kind: EventKind, severity: EventSeverity, payload: serde_json::Value) {
        self.events.push(GameEvent {
            seq: self.event_seq,
            kind,
            severity,
            payload,
        });
        self.event_seq += 1;
    }
}
