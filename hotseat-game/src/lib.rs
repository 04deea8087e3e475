//! Hotseat Game Engine
//!
//! Platform-agnostic core game logic for the Hotseat trivia ladder game.
//! This crate provides the full game-progression state machine without UI
//! or platform-specific dependencies: question sequencing, answer
//! selection and locking, the per-question countdown, lifelines, and
//! prize calculation.

pub mod config;
pub mod data;
pub mod event;
pub mod lifelines;
pub mod prize;
pub mod question;
pub mod question_set;
pub mod rng;
pub mod session;
pub mod text;
pub mod timer;

// Re-export commonly used types
pub use config::{ConfigError, FriendAccuracy, GameConfig};
pub use data::{RawQuestion, TriviaResponse};
pub use event::{EventKind, EventSeverity, GameEvent};
pub use lifelines::{FriendAdvice, LifelineFlags, LifelineKind};
pub use prize::{PrizeError, PrizeLadder};
pub use question::{Choice, ChoiceList, ChoiceState, Difficulty, GameQuestion};
pub use question_set::QuestionSet;
pub use rng::SessionRng;
pub use session::{CycleState, GameError, GameSession, GameSnapshot, SessionPhase};
pub use text::decode_html;
pub use timer::{QuestionTimer, TimerTick};

/// Trait for abstracting question fetching
/// Platform-specific implementations should provide this
pub trait QuestionSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch a batch of raw questions for one session
    ///
    /// # Errors
    ///
    /// Returns an error if the questions cannot be fetched.
    fn fetch_questions(
        &self,
        count: usize,
        difficulty: Difficulty,
    ) -> Result<TriviaResponse, Self::Error>;
}

/// Main game engine for starting trivia sessions
pub struct GameEngine<S>
where
    S: QuestionSource,
{
    source: S,
    config: GameConfig,
    ladder: PrizeLadder,
}

impl<S> GameEngine<S>
where
    S: QuestionSource,
{
    /// Create a new game engine with the provided question source
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration violates its bounds.
    pub fn new(source: S, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let ladder = config.ladder()?;
        Ok(Self {
            source,
            config,
            ladder,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a session with the specified seed.
    ///
    /// Fetches one question batch and drives the session out of
    /// `Loading`: a usable batch yields a `Ready` session with the
    /// first question served, any fetch error a `Failed` one. The
    /// returned session is always usable for inspection; failure is
    /// session state, not a returned error.
    #[must_use]
    pub fn start_session(&self, seed: u64) -> GameSession {
        let mut session =
            GameSession::from_validated(self.config.clone(), self.ladder.clone(), seed);
        match self
            .source
            .fetch_questions(self.config.fetch_count(), self.config.difficulty)
        {
            Ok(response) => {
                session.begin(&response);
            }
            Err(error) => session.fail(&error.to_string()),
        }
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::fmt;

    #[derive(Clone, Copy, Default)]
    struct FixtureSource;

    impl QuestionSource for FixtureSource {
        type Error = Infallible;

        fn fetch_questions(
            &self,
            count: usize,
            _difficulty: Difficulty,
        ) -> Result<TriviaResponse, Self::Error> {
            let results = (0..count)
                .map(|i| RawQuestion {
                    question: format!("Fixture question {i}?"),
                    difficulty: "easy".to_string(),
                    correct_answer: format!("correct-{i}"),
                    incorrect_answers: vec![
                        format!("wrong-{i}-a"),
                        format!("wrong-{i}-b"),
                        format!("wrong-{i}-c"),
                    ],
                })
                .collect();
            Ok(TriviaResponse::from_questions(results))
        }
    }

    #[derive(Debug)]
    struct FeedDown;

    impl fmt::Display for FeedDown {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("feed unreachable")
        }
    }

    impl std::error::Error for FeedDown {}

    #[derive(Clone, Copy, Default)]
    struct BrokenSource;

    impl QuestionSource for BrokenSource {
        type Error = FeedDown;

        fn fetch_questions(
            &self,
            _count: usize,
            _difficulty: Difficulty,
        ) -> Result<TriviaResponse, Self::Error> {
            Err(FeedDown)
        }
    }

    fn default_engine<S: QuestionSource>(source: S) -> GameEngine<S> {
        GameEngine::new(source, GameConfig::default_config()).unwrap()
    }

    #[test]
    fn engine_starts_a_ready_session() {
        let engine = default_engine(FixtureSource);
        let session = engine.start_session(0xABCD);
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.cycle(), CycleState::QuestionStart);
        assert_eq!(session.snapshot().question_count, 5);
    }

    #[test]
    fn fetch_error_surfaces_as_failed_phase() {
        let engine = default_engine(BrokenSource);
        let mut session = engine.start_session(7);
        assert_eq!(session.phase(), SessionPhase::Failed);
        let events = session.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::LoadFailed);
        assert_eq!(events[0].payload["reason"], "feed unreachable");
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = GameConfig {
            question_count: 0,
            prize_amounts: vec![],
            ..GameConfig::default_config()
        };
        assert!(GameEngine::new(FixtureSource, config).is_err());
    }

    #[test]
    fn same_seed_reproduces_the_same_board() {
        let engine = default_engine(FixtureSource);
        let first = engine.start_session(99);
        let second = engine.start_session(99);
        assert_eq!(
            first.current_question().unwrap().choices(),
            second.current_question().unwrap().choices()
        );
    }
}
