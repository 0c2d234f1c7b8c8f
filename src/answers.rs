//! Questionnaire answers as submitted by a user or read from a dataset row.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{CareerError, Result};

/// A single answer value.
///
/// Ratings arrive as integers from the questionnaire and as text from CSV
/// rows; both are accepted by the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Rating(i64),
    Text(String),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::Text(value.into())
    }

    /// Integer view of the value, if it is one.
    pub fn as_rating(&self) -> Option<i64> {
        match self {
            AnswerValue::Rating(v) => Some(*v),
            AnswerValue::Text(t) => t.trim().parse().ok(),
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Rating(v) => write!(f, "{}", v),
            AnswerValue::Text(t) => f.write_str(t),
        }
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        AnswerValue::Rating(value)
    }
}

impl From<i32> for AnswerValue {
    fn from(value: i32) -> Self {
        AnswerValue::Rating(value.into())
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

/// Question key to answer mapping for one questionnaire submission.
///
/// Ordered so that serialization and iteration are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionnaireAnswer {
    values: BTreeMap<String, AnswerValue>,
}

impl QuestionnaireAnswer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, question: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.values.insert(question.into(), value.into());
        self
    }

    pub fn set(&mut self, question: impl Into<String>, value: impl Into<AnswerValue>) {
        self.values.insert(question.into(), value.into());
    }

    pub fn get(&self, question: &str) -> Option<&AnswerValue> {
        self.values.get(question)
    }

    /// Answer for `question`, or [`CareerError::MissingAnswer`].
    pub fn require(&self, question: &str) -> Result<&AnswerValue> {
        self.values
            .get(question)
            .ok_or_else(|| CareerError::MissingAnswer {
                question: question.to_string(),
            })
    }

    pub fn rating(&self, question: &str) -> Option<i64> {
        self.get(question).and_then(AnswerValue::as_rating)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Load an answer set from a JSON object file.
    pub fn load(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for QuestionnaireAnswer {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        QuestionnaireAnswer {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mixed_values() {
        let answer: QuestionnaireAnswer =
            serde_json::from_str(r#"{"hackathons": 3, "workshops": "Testing"}"#).unwrap();
        assert_eq!(answer.get("hackathons"), Some(&AnswerValue::Rating(3)));
        assert_eq!(answer.get("workshops"), Some(&AnswerValue::text("Testing")));
    }

    #[test]
    fn test_rating_from_text() {
        let answer = QuestionnaireAnswer::new().with("coding skills rating", "7");
        assert_eq!(answer.rating("coding skills rating"), Some(7));
    }

    #[test]
    fn test_require_missing() {
        let answer = QuestionnaireAnswer::new();
        let err = answer.require("Introvert").unwrap_err();
        assert!(matches!(err, CareerError::MissingAnswer { .. }));
    }
}
