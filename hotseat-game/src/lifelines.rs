use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Player-triggered assist actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifelineKind {
    /// Disable two incorrect choices on the current question.
    RemoveTwoWrong,
    /// Swap the current question for one from the reserve pool.
    ReplaceQuestion,
    /// Ask a friend for a suggested answer.
    AskFriend,
}

impl LifelineKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RemoveTwoWrong => "remove_two_wrong",
            Self::ReplaceQuestion => "replace_question",
            Self::AskFriend => "ask_friend",
        }
    }
}

impl fmt::Display for LifelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifelineKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remove_two_wrong" => Ok(Self::RemoveTwoWrong),
            "replace_question" => Ok(Self::ReplaceQuestion),
            "ask_friend" => Ok(Self::AskFriend),
            _ => Err(()),
        }
    }
}

/// First-use markers for each lifeline, surfaced to hosts so they can
/// gate their controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LifelineFlags {
    #[serde(default)]
    pub remove_two_wrong_used: bool,
    #[serde(default)]
    pub replace_question_used: bool,
    #[serde(default)]
    pub ask_friend_used: bool,
}

impl LifelineFlags {
    pub fn mark_used(&mut self, kind: LifelineKind) {
        match kind {
            LifelineKind::RemoveTwoWrong => self.remove_two_wrong_used = true,
            LifelineKind::ReplaceQuestion => self.replace_question_used = true,
            LifelineKind::AskFriend => self.ask_friend_used = true,
        }
    }

    #[must_use]
    pub const fn is_used(&self, kind: LifelineKind) -> bool {
        match kind {
            LifelineKind::RemoveTwoWrong => self.remove_two_wrong_used,
            LifelineKind::ReplaceQuestion => self.replace_question_used,
            LifelineKind::AskFriend => self.ask_friend_used,
        }
    }
}

/// A friend's suggested answer for the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendAdvice {
    /// Index of the choice the friend points at.
    pub suggested_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_strings() {
        for kind in [
            LifelineKind::RemoveTwoWrong,
            LifelineKind::ReplaceQuestion,
            LifelineKind::AskFriend,
        ] {
            assert_eq!(kind.as_str().parse::<LifelineKind>(), Ok(kind));
        }
        assert!("phone_booth".parse::<LifelineKind>().is_err());
    }

    #[test]
    fn flags_track_each_kind() {
        let mut flags = LifelineFlags::default();
        assert!(!flags.is_used(LifelineKind::AskFriend));
        flags.mark_used(LifelineKind::AskFriend);
        assert!(flags.is_used(LifelineKind::AskFriend));
        assert!(!flags.is_used(LifelineKind::RemoveTwoWrong));
    }
}
