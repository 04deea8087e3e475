use serde::{Deserialize, Serialize};

/// A single raw question as delivered by the trivia feed.
///
/// Every field is defaulted so partial payloads map to empty values
/// instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RawQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub incorrect_answers: Vec<String>,
}

/// Container for a fetched batch of raw questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TriviaResponse {
    #[serde(default)]
    pub response_code: u32,
    #[serde(default)]
    pub results: Vec<RawQuestion>,
}

impl TriviaResponse {
    /// Create an empty response (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            response_code: 0,
            results: Vec::new(),
        }
    }

    /// Load a response from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a valid response.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create a response from pre-parsed questions
    #[must_use]
    pub fn from_questions(results: Vec<RawQuestion>) -> Self {
        Self {
            response_code: 0,
            results,
        }
    }

    /// Number of raw questions in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the batch carries no questions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_from_json() {
        let json = r#"{
            "response_code": 0,
            "results": [
                {
                    "question": "What is 2 + 2?",
                    "difficulty": "easy",
                    "correct_answer": "4",
                    "incorrect_answers": ["3", "5", "22"]
                }
            ]
        }"#;

        let response = TriviaResponse::from_json(json).unwrap();
        assert_eq!(response.len(), 1);
        assert_eq!(response.results[0].correct_answer, "4");
        assert_eq!(response.results[0].incorrect_answers.len(), 3);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let response = TriviaResponse::from_json(r#"{"results": [{}]}"#).unwrap();
        let raw = &response.results[0];
        assert_eq!(raw.question, "");
        assert_eq!(raw.difficulty, "");
        assert_eq!(raw.correct_answer, "");
        assert!(raw.incorrect_answers.is_empty());
    }

    #[test]
    fn empty_response_is_empty() {
        assert!(TriviaResponse::empty().is_empty());
    }
}
