//! Question catalog for the career questionnaire.
//!
//! Every question the classifier can see is declared here together with its
//! [`QuestionKind`]. The kind decides how an answer is encoded and, for
//! ratings, which bounds synthetic data is clipped to.

use serde::{Deserialize, Serialize};

/// Column holding the job-role label in training data.
pub const LABEL_COLUMN: &str = "Suggested Job Role";

/// Skill tiers in ordinal order.
pub const ORDINAL_TIERS: [&str; 3] = ["poor", "medium", "excellent"];

/// How a single question is answered and encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Integer rating within inclusive bounds.
    Rating { min: i64, max: i64 },
    /// "yes" / "no".
    Binary,
    /// poor / medium / excellent.
    Ordinal,
    /// Open vocabulary fitted from data.
    Categorical,
    /// Two-valued attribute expanded into one indicator column per value.
    DualIndicator { prefix: String, values: [String; 2] },
}

impl QuestionKind {
    /// Number of feature columns this kind contributes.
    pub fn width(&self) -> usize {
        match self {
            QuestionKind::DualIndicator { .. } => 2,
            _ => 1,
        }
    }

    pub fn bounds(&self) -> Option<(i64, i64)> {
        match self {
            QuestionKind::Rating { min, max } => Some((*min, *max)),
            _ => None,
        }
    }

    /// Check that a configured literal is an answer this kind can encode.
    /// Categorical vocabularies are open, so any text passes.
    pub fn check_literal(&self, value: &str) -> Result<(), String> {
        let folded = value.trim().to_lowercase();
        match self {
            QuestionKind::Rating { min, max } => match value.trim().parse::<i64>() {
                Ok(n) if (*min..=*max).contains(&n) => Ok(()),
                Ok(n) => Err(format!("rating {} outside [{}, {}]", n, min, max)),
                Err(_) => Err(format!("'{}' is not an integer rating", value)),
            },
            QuestionKind::Binary if folded == "yes" || folded == "no" => Ok(()),
            QuestionKind::Binary => Err(format!("'{}' is not yes/no", value)),
            QuestionKind::Ordinal if ORDINAL_TIERS.contains(&folded.as_str()) => Ok(()),
            QuestionKind::Ordinal => Err(format!("'{}' is not one of {:?}", value, ORDINAL_TIERS)),
            QuestionKind::DualIndicator { values, .. } => {
                if values.iter().any(|v| v.trim().to_lowercase() == folded) {
                    Ok(())
                } else {
                    Err(format!("'{}' is not one of {:?}", value, values))
                }
            }
            QuestionKind::Categorical => Ok(()),
        }
    }
}

/// A question key and its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub key: String,
    pub kind: QuestionKind,
}

impl Question {
    fn new(key: &str, kind: QuestionKind) -> Self {
        Question {
            key: key.to_string(),
            kind,
        }
    }
}

pub const LOGICAL_QUOTIENT: &str = "Logical quotient rating";
pub const HACKATHONS: &str = "hackathons";
pub const CODING_SKILLS: &str = "coding skills rating";
pub const PUBLIC_SPEAKING: &str = "public speaking points";
pub const SELF_LEARNING: &str = "self-learning capability?";
pub const EXTRA_COURSES: &str = "Extra-courses did";
pub const SENIOR_INPUTS: &str = "Taken inputs from seniors or elders";
pub const WORKED_IN_TEAMS: &str = "worked in teams ever?";
pub const INTROVERT: &str = "Introvert";
pub const READING_WRITING: &str = "reading and writing skills";
pub const MEMORY_SCORE: &str = "memory capability score";
pub const CERTIFICATIONS: &str = "certifications";
pub const WORKSHOPS: &str = "workshops";
pub const INTERESTED_SUBJECTS: &str = "Interested subjects";
// Trailing space is part of the column name in the collected survey.
pub const CAREER_AREA: &str = "interested career area ";
pub const COMPANY_TYPE: &str = "Type of company want to settle in?";
pub const BOOK_TYPE: &str = "Interested Type of Books";
pub const MANAGEMENT_OR_TECHNICAL: &str = "Management or Technical";
pub const HARD_OR_SMART: &str = "hard/smart worker";

/// The full questionnaire in classifier column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub questions: Vec<Question>,
}

impl Questionnaire {
    /// The standard career survey: four ratings, five yes/no questions, two
    /// skill tiers, six open vocabularies and two dual-indicator attributes.
    pub fn standard() -> Self {
        let rating = |max| QuestionKind::Rating { min: 0, max };
        let dual = |prefix: &str, a: &str, b: &str| QuestionKind::DualIndicator {
            prefix: prefix.to_string(),
            values: [a.to_string(), b.to_string()],
        };

        Questionnaire {
            questions: vec![
                Question::new(LOGICAL_QUOTIENT, rating(10)),
                Question::new(CODING_SKILLS, rating(10)),
                Question::new(HACKATHONS, rating(20)),
                Question::new(PUBLIC_SPEAKING, rating(10)),
                Question::new(SELF_LEARNING, QuestionKind::Binary),
                Question::new(EXTRA_COURSES, QuestionKind::Binary),
                Question::new(SENIOR_INPUTS, QuestionKind::Binary),
                Question::new(WORKED_IN_TEAMS, QuestionKind::Binary),
                Question::new(INTROVERT, QuestionKind::Binary),
                Question::new(READING_WRITING, QuestionKind::Ordinal),
                Question::new(MEMORY_SCORE, QuestionKind::Ordinal),
                Question::new(CERTIFICATIONS, QuestionKind::Categorical),
                Question::new(WORKSHOPS, QuestionKind::Categorical),
                Question::new(INTERESTED_SUBJECTS, QuestionKind::Categorical),
                Question::new(CAREER_AREA, QuestionKind::Categorical),
                Question::new(COMPANY_TYPE, QuestionKind::Categorical),
                Question::new(BOOK_TYPE, QuestionKind::Categorical),
                Question::new(MANAGEMENT_OR_TECHNICAL, dual("A", "Management", "Technical")),
                Question::new(HARD_OR_SMART, dual("B", "hard worker", "smart worker")),
            ],
        }
    }

    pub fn get(&self, key: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(|q| q.key.as_str())
    }

    /// Rating bounds for `key`, if it is a rating question.
    pub fn bounds(&self, key: &str) -> Option<(i64, i64)> {
        self.get(key).and_then(|q| q.kind.bounds())
    }
}

/// Kind a free-standing token resolves to when no declared kind is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Binary,
    DualIndicator,
    Ordinal,
    Categorical,
}

/// Tokens that expand into indicator pairs rather than single codes.
const DUAL_TOKENS: [&str; 4] = ["management", "technical", "smart worker", "hard worker"];

/// Classify a raw token. Resolution order is fixed: binary, dual-indicator
/// tokens, ordinal tiers, then categorical. First match wins.
pub fn classify_token(token: &str) -> TokenClass {
    let folded = token.trim().to_lowercase();
    if folded == "yes" || folded == "no" {
        TokenClass::Binary
    } else if DUAL_TOKENS.contains(&folded.as_str()) {
        TokenClass::DualIndicator
    } else if ORDINAL_TIERS.contains(&folded.as_str()) {
        TokenClass::Ordinal
    } else {
        TokenClass::Categorical
    }
}

/// Infer the kind of an undeclared column from its observed values.
///
/// Integer-only columns become ratings bounded by the observed range. Other
/// columns are binary, dual-indicator or ordinal only when every value
/// resolves to that class; anything mixed is categorical.
pub fn infer_kind<'a>(key: &str, values: impl IntoIterator<Item = &'a str>) -> QuestionKind {
    let values: Vec<&str> = values.into_iter().collect();
    let parsed: Option<Vec<i64>> = values.iter().map(|v| v.trim().parse().ok()).collect();
    if let Some(numbers) = parsed.filter(|n| !n.is_empty()) {
        let min = numbers.iter().copied().min().unwrap_or(0).min(0);
        let max = numbers.iter().copied().max().unwrap_or(0);
        return QuestionKind::Rating { min, max };
    }

    let classes: Vec<TokenClass> = values.iter().map(|v| classify_token(v)).collect();
    let all = |class: TokenClass| !classes.is_empty() && classes.iter().all(|c| *c == class);

    if all(TokenClass::Binary) {
        return QuestionKind::Binary;
    }
    if all(TokenClass::DualIndicator) {
        let mut distinct: Vec<String> = values.iter().map(|v| v.trim().to_string()).collect();
        distinct.sort_by_key(|v| v.to_lowercase());
        distinct.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
        if let [a, b] = distinct.as_slice() {
            return QuestionKind::DualIndicator {
                prefix: key.to_string(),
                values: [a.clone(), b.clone()],
            };
        }
    }
    if all(TokenClass::Ordinal) {
        QuestionKind::Ordinal
    } else {
        QuestionKind::Categorical
    }
}
