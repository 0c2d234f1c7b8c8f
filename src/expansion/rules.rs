//! Label-specific perturbations applied to rows derived from a survey row.
//!
//! A derived row starts as a copy of its source row. Rules then nudge it in a
//! fixed direction with a random magnitude so each related role ends up with
//! a feature distribution a classifier can separate from its source role.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::answers::{AnswerValue, QuestionnaireAnswer};
use crate::errors::{CareerError, Result};
use crate::expansion::catalog::{owned, CREATIVE_ROLES};
use crate::questionnaire::{
    Questionnaire, QuestionKind, BOOK_TYPE, CODING_SKILLS, LOGICAL_QUOTIENT,
    MANAGEMENT_OR_TECHNICAL, PUBLIC_SPEAKING, READING_WRITING, WORKED_IN_TEAMS,
};

/// Which labels a rule applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum LabelMatcher {
    /// Label contains any of the tokens (case-sensitive, as role titles are).
    Contains { tokens: Vec<String> },
    /// Label is one of the listed roles.
    OneOf { labels: Vec<String> },
}

impl LabelMatcher {
    pub fn matches(&self, label: &str) -> bool {
        match self {
            LabelMatcher::Contains { tokens } => tokens.iter().any(|t| label.contains(t.as_str())),
            LabelMatcher::OneOf { labels } => labels.iter().any(|l| l == label),
        }
    }
}

/// A single change to a derived row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Adjustment {
    /// Add a random offset in `[min, max)` to a rating, clipped to its bounds.
    Raise { question: String, min: i64, max: i64 },
    Set { question: String, value: String },
    SetWithProbability {
        question: String,
        value: String,
        probability: f64,
    },
    ChooseFrom { question: String, values: Vec<String> },
}

impl Adjustment {
    fn question(&self) -> &str {
        match self {
            Adjustment::Raise { question, .. }
            | Adjustment::Set { question, .. }
            | Adjustment::SetWithProbability { question, .. }
            | Adjustment::ChooseFrom { question, .. } => question,
        }
    }

    /// Values this adjustment writes as given.
    fn literals(&self) -> &[String] {
        match self {
            Adjustment::Raise { .. } => &[],
            Adjustment::Set { value, .. } | Adjustment::SetWithProbability { value, .. } => {
                std::slice::from_ref(value)
            }
            Adjustment::ChooseFrom { values, .. } => values,
        }
    }

    fn apply<R: Rng>(
        &self,
        answer: &mut QuestionnaireAnswer,
        questionnaire: &Questionnaire,
        rng: &mut R,
    ) {
        match self {
            Adjustment::Raise { question, min, max } => {
                let Some(current) = answer.rating(question) else {
                    return;
                };
                if min >= max {
                    return;
                }
                let (lo, hi) = questionnaire.bounds(question).unwrap_or((i64::MIN, i64::MAX));
                let offset = rng.gen_range(*min..*max);
                answer.set(question.clone(), (current + offset).clamp(lo, hi));
            }
            Adjustment::Set { question, value } => {
                answer.set(question.clone(), literal(questionnaire, question, value));
            }
            Adjustment::SetWithProbability {
                question,
                value,
                probability,
            } => {
                if rng.gen::<f64>() < *probability {
                    answer.set(question.clone(), literal(questionnaire, question, value));
                }
            }
            Adjustment::ChooseFrom { question, values } => {
                if let Some(choice) = values.choose(rng) {
                    answer.set(question.clone(), literal(questionnaire, question, choice));
                }
            }
        }
    }
}

/// Rating literals become ratings clipped to the question's bounds; anything
/// else is written as text.
fn literal(questionnaire: &Questionnaire, question: &str, value: &str) -> AnswerValue {
    match (questionnaire.bounds(question), value.trim().parse::<i64>()) {
        (Some((lo, hi)), Ok(n)) => AnswerValue::Rating(n.clamp(lo, hi)),
        _ => AnswerValue::text(value),
    }
}

/// Named matcher plus the adjustments it triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerturbationRule {
    pub name: String,
    #[serde(flatten)]
    pub matcher: LabelMatcher,
    pub adjustments: Vec<Adjustment>,
}

impl PerturbationRule {
    pub fn matches(&self, label: &str) -> bool {
        self.matcher.matches(label)
    }
}

fn tokens(list: &[&str]) -> LabelMatcher {
    LabelMatcher::Contains {
        tokens: owned(list),
    }
}

/// Rules for analytics, leadership, creative and engineering roles.
pub fn default_rules() -> Vec<PerturbationRule> {
    vec![
        PerturbationRule {
            name: "analytical".to_string(),
            matcher: tokens(&["Data", "Analytics"]),
            adjustments: vec![
                Adjustment::Raise {
                    question: LOGICAL_QUOTIENT.to_string(),
                    min: 1,
                    max: 3,
                },
                Adjustment::SetWithProbability {
                    question: READING_WRITING.to_string(),
                    value: "excellent".to_string(),
                    probability: 0.7,
                },
            ],
        },
        PerturbationRule {
            name: "leadership".to_string(),
            matcher: tokens(&["Manager", "Lead", "Director"]),
            adjustments: vec![
                Adjustment::Raise {
                    question: PUBLIC_SPEAKING.to_string(),
                    min: 1,
                    max: 4,
                },
                Adjustment::Set {
                    question: MANAGEMENT_OR_TECHNICAL.to_string(),
                    value: "Management".to_string(),
                },
                Adjustment::Set {
                    question: WORKED_IN_TEAMS.to_string(),
                    value: "yes".to_string(),
                },
            ],
        },
        PerturbationRule {
            name: "creative".to_string(),
            matcher: LabelMatcher::OneOf {
                labels: owned(CREATIVE_ROLES),
            },
            adjustments: vec![
                Adjustment::ChooseFrom {
                    question: BOOK_TYPE.to_string(),
                    values: owned(&["Art", "Design", "Creative", "Visual"]),
                },
                Adjustment::ChooseFrom {
                    question: MANAGEMENT_OR_TECHNICAL.to_string(),
                    values: owned(&["Management", "Technical"]),
                },
            ],
        },
        PerturbationRule {
            name: "engineering".to_string(),
            matcher: tokens(&["Engineer", "Developer"]),
            adjustments: vec![
                Adjustment::Raise {
                    question: CODING_SKILLS.to_string(),
                    min: 1,
                    max: 3,
                },
                Adjustment::Set {
                    question: MANAGEMENT_OR_TECHNICAL.to_string(),
                    value: "Technical".to_string(),
                },
            ],
        },
    ]
}

/// Reject rules that could not be applied consistently: raises on
/// non-rating questions, empty or negative offset ranges, probabilities
/// outside `[0, 1]`, empty choice lists, and literal values the target
/// question could not encode.
pub fn validate_rules(rules: &[PerturbationRule], questionnaire: &Questionnaire) -> Result<()> {
    for rule in rules {
        for adjustment in &rule.adjustments {
            let question = adjustment.question();
            let kind = questionnaire
                .get(question)
                .map(|q| &q.kind)
                .ok_or_else(|| {
                    CareerError::Configuration(format!(
                        "rule '{}' adjusts unknown question '{}'",
                        rule.name, question
                    ))
                })?;

            let problem = match adjustment {
                Adjustment::Raise { min, max, .. } => {
                    if !matches!(kind, QuestionKind::Rating { .. }) {
                        Some("raise applies to ratings only".to_string())
                    } else if *min < 1 || min >= max {
                        Some(format!("offset range [{}, {}) must be positive and non-empty", min, max))
                    } else {
                        None
                    }
                }
                Adjustment::SetWithProbability { probability, .. }
                    if !(0.0..=1.0).contains(probability) =>
                {
                    Some(format!("probability {} outside [0, 1]", probability))
                }
                Adjustment::ChooseFrom { values, .. } if values.is_empty() => {
                    Some("no values to choose from".to_string())
                }
                _ => adjustment
                    .literals()
                    .iter()
                    .find_map(|value| kind.check_literal(value).err()),
            };

            if let Some(problem) = problem {
                return Err(CareerError::Configuration(format!(
                    "rule '{}' on '{}': {}",
                    rule.name, question, problem
                )));
            }
        }
    }
    Ok(())
}

/// Apply every matching rule, in declared order, to a derived row.
pub(crate) fn apply_rules<R: Rng>(
    rules: &[PerturbationRule],
    answer: &mut QuestionnaireAnswer,
    label: &str,
    questionnaire: &Questionnaire,
    rng: &mut R,
) {
    for rule in rules.iter().filter(|r| r.matches(label)) {
        for adjustment in &rule.adjustments {
            adjustment.apply(answer, questionnaire, rng);
        }
    }
}
