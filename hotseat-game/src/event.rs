//! Structured event ledger the host drains for observability.
use serde::{Deserialize, Serialize};

/// What a ledger entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SessionLoaded,
    LoadFailed,
    QuestionServed,
    ChoiceSelected,
    AnswerRevealed,
    TimerExpired,
    WrongAnswersRemoved,
    QuestionReplaced,
    FriendAdviceOffered,
    PrizeFinalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSeverity {
    Info,
    Warn,
}

/// One ledger entry with a structured JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub seq: u64,
    pub kind: EventKind,
    pub severity: EventSeverity,
    pub payload: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_with_snake_case_kind() {
        let event = GameEvent {
            seq: 3,
            kind: EventKind::AnswerRevealed,
            severity: EventSeverity::Info,
            payload: serde_json::json!({ "correct": true }),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "answer_revealed");
        assert_eq!(json["severity"], "info");
        assert_eq!(json["payload"]["correct"], true);
    }
}
