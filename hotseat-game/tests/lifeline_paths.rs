use hotseat_game::{
    ChoiceState, CycleState, Difficulty, FriendAccuracy, GameConfig, GameEngine, GameError,
    GameSession, LifelineKind, QuestionSource, RawQuestion, SessionPhase, TriviaResponse,
};
use std::convert::Infallible;

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
                question: format!("Trivia item {i}?"),
                difficulty: "hard".to_string(),
                correct_answer: format!("truth-{i}"),
                incorrect_answers: vec![
                    format!("decoy-{i}-a"),
                    format!("decoy-{i}-b"),
                    format!("decoy-{i}-c"),
                ],
            })
            .collect();
        Ok(TriviaResponse::from_questions(results))
    }
}

fn config_with(reserve: usize, friend_accuracy: FriendAccuracy) -> GameConfig {
    GameConfig {
        question_count: 3,
        reserve_count: reserve,
        timer_budget: 8,
        prize_amounts: vec![100, 200, 300],
        friend_accuracy,
        ..GameConfig::default_config()
    }
}

fn start(seed: u64, reserve: usize, friend_accuracy: FriendAccuracy) -> GameSession {
    let engine = GameEngine::new(FixtureSource, config_with(reserve, friend_accuracy)).unwrap();
    let session = engine.start_session(seed);
    assert_eq!(session.phase(), SessionPhase::Ready);
    session
}

fn plain_start(seed: u64) -> GameSession {
    start(seed, 0, FriendAccuracy::default())
}

#[test]
fn repeated_fifty_fifty_drains_only_wrong_choices() {
    let mut session = plain_start(31);
    let correct = session.current_question().unwrap().correct_index().unwrap();

    let first = session.remove_two_wrong_answers().unwrap();
    assert_eq!(first.len(), 2);
    assert!(!first.contains(&correct));
    assert_eq!(first.iter().collect::<std::collections::HashSet<_>>().len(), 2);

    let second = session.remove_two_wrong_answers().unwrap();
    assert_eq!(second.len(), 1);
    assert!(!second.contains(&correct));

    assert_eq!(
        session.remove_two_wrong_answers(),
        Err(GameError::NoRemovableAnswers)
    );

    let question = session.current_question().unwrap();
    let disabled = question
        .choices()
        .iter()
        .filter(|choice| choice.state == ChoiceState::Disabled)
        .count();
    assert_eq!(disabled, 3);
    assert!(question.choices()[correct].is_selectable());
    assert_eq!(question.choices()[correct].text, question.correct_answer());
}

#[test]
fn fifty_fifty_removal_clears_a_removed_selection() {
    let mut session = plain_start(32);
    let question = session.current_question().unwrap();
    let correct = question.correct_index().unwrap();
    let wrong = (0..question.choices().len())
        .find(|&i| i != correct)
        .unwrap();
    session.select_choice(wrong).unwrap();

    // Draining every wrong choice is guaranteed to remove the pick.
    session.remove_two_wrong_answers().unwrap();
    session.remove_two_wrong_answers().unwrap();

    assert_eq!(session.current_question().unwrap().selected_answer(), None);
}

#[test]
fn replace_question_swaps_in_reserve_and_restarts_timer() {
    let mut session = start(33, 2, FriendAccuracy::default());
    let before = session.current_question().unwrap().prompt().to_string();
    session.tick_timer();
    session.tick_timer();
    assert_eq!(session.remaining_time(), Some(6));

    session.replace_question().unwrap();

    assert_eq!(session.question_index(), 0);
    assert_eq!(session.remaining_time(), Some(8));
    assert_ne!(session.current_question().unwrap().prompt(), before);
    assert!(session.lifelines().replace_question_used);
    assert_eq!(session.cycle(), CycleState::QuestionStart);
}

#[test]
fn replace_question_rejects_an_empty_reserve() {
    let mut session = start(34, 1, FriendAccuracy::default());
    session.replace_question().unwrap();
    assert_eq!(session.replace_question(), Err(GameError::ReserveExhausted));
}

#[test]
fn replaced_question_still_pays_the_same_tier() {
    let mut session = start(35, 1, FriendAccuracy::default());
    session.replace_question().unwrap();
    assert_eq!(session.question_index(), 0);

    for _ in 0..3 {
        let index = session.current_question().unwrap().correct_index().unwrap();
        session.select_choice(index).unwrap();
        assert_eq!(session.submit_or_advance(), Ok(CycleState::QuestionSubmitted));
        session.submit_or_advance().unwrap();
    }
    assert_eq!(session.cycle(), CycleState::GameOver);
    assert_eq!(session.final_prize(), Some(300));
}

#[test]
fn sure_friend_always_points_at_the_correct_choice() {
    let accuracy = FriendAccuracy {
        easy: 1.0,
        medium: 1.0,
        hard: 1.0,
    };
    for seed in 0..8 {
        let mut session = start(seed, 0, accuracy);
        let correct = session.current_question().unwrap().correct_index().unwrap();
        let advice = session.ask_friend().unwrap();
        assert_eq!(advice.suggested_index, correct);
    }
}

#[test]
fn clueless_friend_points_at_an_enabled_wrong_choice() {
    let accuracy = FriendAccuracy {
        easy: 0.0,
        medium: 0.0,
        hard: 0.0,
    };
    for seed in 0..8 {
        let mut session = start(seed, 0, accuracy);
        let correct = session.current_question().unwrap().correct_index().unwrap();
        let advice = session.ask_friend().unwrap();
        assert_ne!(advice.suggested_index, correct);
        let choice = &session.current_question().unwrap().choices()[advice.suggested_index];
        assert!(choice.is_selectable());
    }
}

#[test]
fn clueless_friend_with_no_wrong_choices_left_concedes_the_answer() {
    let accuracy = FriendAccuracy {
        easy: 0.0,
        medium: 0.0,
        hard: 0.0,
    };
    let mut session = start(36, 0, accuracy);
    session.remove_two_wrong_answers().unwrap();
    session.remove_two_wrong_answers().unwrap();
    let correct = session.current_question().unwrap().correct_index().unwrap();
    let advice = session.ask_friend().unwrap();
    assert_eq!(advice.suggested_index, correct);
}

#[test]
fn ask_friend_is_single_use() {
    let mut session = plain_start(37);
    session.ask_friend().unwrap();
    assert_eq!(
        session.ask_friend(),
        Err(GameError::LifelineSpent {
            kind: LifelineKind::AskFriend,
        })
    );
    assert!(session.lifelines().ask_friend_used);
}

#[test]
fn lifelines_are_rejected_once_the_answer_is_in() {
    let mut session = start(38, 1, FriendAccuracy::default());
    session.submit_or_advance().unwrap();
    assert_eq!(session.cycle(), CycleState::WrongAnswerSubmitted);

    assert!(matches!(
        session.remove_two_wrong_answers(),
        Err(GameError::LifelineLocked { .. })
    ));
    assert!(matches!(
        session.replace_question(),
        Err(GameError::LifelineLocked { .. })
    ));
    assert!(matches!(
        session.ask_friend(),
        Err(GameError::LifelineLocked { .. })
    ));
}

#[test]
fn snapshot_reports_lifeline_usage() {
    let mut session = start(39, 1, FriendAccuracy::default());
    assert!(!session.snapshot().lifelines.remove_two_wrong_used);
    session.remove_two_wrong_answers().unwrap();
    session.ask_friend().unwrap();
    let flags = session.snapshot().lifelines;
    assert!(flags.remove_two_wrong_used);
    assert!(flags.ask_friend_used);
    assert!(!flags.replace_question_used);
}
