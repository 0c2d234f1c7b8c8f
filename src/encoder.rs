//! Questionnaire answer to feature vector encoding.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::answers::{AnswerValue, QuestionnaireAnswer};
use crate::errors::{CareerError, Result};
use crate::questionnaire::ORDINAL_TIERS;
use crate::schema::{fold, EncodingSchema, FeatureEncoding};

/// Numeric classifier input, laid out by an [`EncodingSchema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for FeatureVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

/// Encode one answer set against `schema`.
///
/// Pure function of its inputs. Every unrecognized value is an error; nothing
/// is silently defaulted.
pub fn encode(answer: &QuestionnaireAnswer, schema: &EncodingSchema) -> Result<FeatureVector> {
    let mut values = Vec::with_capacity(schema.len());

    for feature in &schema.features {
        let question = feature.question.as_str();
        let value = answer.require(question)?;

        match &feature.encoding {
            FeatureEncoding::Rating { min, max } => {
                values.push(encode_rating(question, value, *min, *max)? as f64);
            }
            FeatureEncoding::Binary => values.push(encode_binary(question, value)?),
            FeatureEncoding::Ordinal => values.push(encode_ordinal(question, value)?),
            FeatureEncoding::Categorical { categories } => {
                let text = value.to_string();
                let code = categories
                    .code(&text)
                    .ok_or_else(|| CareerError::UnknownCategory {
                        question: question.to_string(),
                        value: text.clone(),
                    })?;
                values.push(code as f64);
            }
            FeatureEncoding::DualIndicator { values: domain, .. } => {
                let text = fold(&value.to_string());
                let hot = domain
                    .iter()
                    .position(|v| fold(v) == text)
                    .ok_or_else(|| CareerError::UnknownCategory {
                        question: question.to_string(),
                        value: value.to_string(),
                    })?;
                values.extend((0..2).map(|i| if i == hot { 1.0 } else { 0.0 }));
            }
        }
    }

    if values.len() != schema.len() {
        return Err(CareerError::SchemaMismatch {
            details: format!(
                "encoded {} values for {} schema columns",
                values.len(),
                schema.len()
            ),
        });
    }

    Ok(FeatureVector(values))
}

fn encode_rating(question: &str, value: &AnswerValue, min: i64, max: i64) -> Result<i64> {
    let rating = value
        .as_rating()
        .ok_or_else(|| CareerError::NonNumericRating {
            question: question.to_string(),
            value: value.to_string(),
        })?;
    if rating < min || rating > max {
        return Err(CareerError::OutOfRangeValue {
            question: question.to_string(),
            value: rating,
            min,
            max,
        });
    }
    Ok(rating)
}

fn encode_binary(question: &str, value: &AnswerValue) -> Result<f64> {
    match value {
        AnswerValue::Text(t) if t.eq_ignore_ascii_case("yes") => Ok(1.0),
        AnswerValue::Text(t) if t.eq_ignore_ascii_case("no") => Ok(0.0),
        _ => Err(CareerError::UnrecognizedBinaryValue {
            question: question.to_string(),
            value: value.to_string(),
        }),
    }
}

fn encode_ordinal(question: &str, value: &AnswerValue) -> Result<f64> {
    let text = fold(&value.to_string());
    ORDINAL_TIERS
        .iter()
        .position(|tier| *tier == text)
        .map(|rank| rank as f64)
        .ok_or_else(|| CareerError::UnrecognizedOrdinalValue {
            question: question.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::*;

    fn training_answers() -> Vec<QuestionnaireAnswer> {
        vec![
            full_answer("Testing", "python"),
            full_answer("testing", "shell programming"),
            full_answer("data science", "information security"),
        ]
    }

    fn full_answer(workshop: &str, certification: &str) -> QuestionnaireAnswer {
        QuestionnaireAnswer::new()
            .with(LOGICAL_QUOTIENT, 7)
            .with(CODING_SKILLS, 8)
            .with(HACKATHONS, 2)
            .with(PUBLIC_SPEAKING, 5)
            .with(SELF_LEARNING, "yes")
            .with(EXTRA_COURSES, "no")
            .with(SENIOR_INPUTS, "yes")
            .with(WORKED_IN_TEAMS, "no")
            .with(INTROVERT, "yes")
            .with(READING_WRITING, "excellent")
            .with(MEMORY_SCORE, "medium")
            .with(CERTIFICATIONS, certification)
            .with(WORKSHOPS, workshop)
            .with(INTERESTED_SUBJECTS, "programming")
            .with(CAREER_AREA, "system developer")
            .with(COMPANY_TYPE, "Product based")
            .with(BOOK_TYPE, "Technical")
            .with(MANAGEMENT_OR_TECHNICAL, "Technical")
            .with(HARD_OR_SMART, "smart worker")
    }

    fn schema() -> EncodingSchema {
        EncodingSchema::fit(&Questionnaire::standard(), training_answers().iter())
    }

    fn column(schema: &EncodingSchema, name: &str) -> usize {
        schema
            .feature_names()
            .iter()
            .position(|n| n == name)
            .unwrap()
    }

    #[test]
    fn test_length_matches_schema() {
        let schema = schema();
        let vector = encode(&full_answer("Testing", "python"), &schema).unwrap();
        assert_eq!(vector.len(), schema.feature_names().len());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let schema = schema();
        let answer = full_answer("data science", "information security");
        assert_eq!(encode(&answer, &schema).unwrap(), encode(&answer, &schema).unwrap());
    }

    #[test]
    fn test_scenario_yes_excellent_testing() {
        let schema = schema();
        let upper = encode(&full_answer("Testing", "python"), &schema).unwrap();
        let lower = encode(&full_answer("testing", "python"), &schema).unwrap();

        assert_eq!(upper[column(&schema, SELF_LEARNING)], 1.0);
        assert_eq!(upper[column(&schema, READING_WRITING)], 2.0);
        let workshops = column(&schema, "workshops_code");
        assert_eq!(upper[workshops], lower[workshops]);
    }

    #[test]
    fn test_binary_case_insensitive_exact_only() {
        let schema = schema();
        let answer = full_answer("Testing", "python").with(SELF_LEARNING, "YES");
        assert_eq!(encode(&answer, &schema).unwrap()[column(&schema, SELF_LEARNING)], 1.0);

        let answer = full_answer("Testing", "python").with(SELF_LEARNING, "yep");
        assert!(matches!(
            encode(&answer, &schema),
            Err(CareerError::UnrecognizedBinaryValue { .. })
        ));
    }

    #[test]
    fn test_unknown_certification_is_rejected() {
        let schema = schema();
        let answer = full_answer("Testing", "quantum basket weaving");
        match encode(&answer, &schema) {
            Err(CareerError::UnknownCategory { question, value }) => {
                assert_eq!(question, CERTIFICATIONS);
                assert_eq!(value, "quantum basket weaving");
            }
            other => panic!("expected UnknownCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_rating_is_not_clipped() {
        let schema = schema();
        let answer = full_answer("Testing", "python").with(CODING_SKILLS, 11);
        assert!(matches!(
            encode(&answer, &schema),
            Err(CareerError::OutOfRangeValue { value: 11, max: 10, .. })
        ));

        let answer = full_answer("Testing", "python").with(HACKATHONS, 20);
        assert!(encode(&answer, &schema).is_ok());
    }

    #[test]
    fn test_ratings_stay_within_bounds() {
        let schema = schema();
        for rating in 0..=10 {
            let answer = full_answer("Testing", "python").with(LOGICAL_QUOTIENT, rating);
            let vector = encode(&answer, &schema).unwrap();
            let value = vector[column(&schema, LOGICAL_QUOTIENT)];
            assert!((0.0..=10.0).contains(&value));
        }
    }

    #[test]
    fn test_unrecognized_tier() {
        let schema = schema();
        let answer = full_answer("Testing", "python").with(MEMORY_SCORE, "superb");
        assert!(matches!(
            encode(&answer, &schema),
            Err(CareerError::UnrecognizedOrdinalValue { .. })
        ));
    }

    #[test]
    fn test_dual_indicator_exactly_one_hot() {
        let schema = schema();
        for (value, expected) in [("Management", [1.0, 0.0]), ("technical", [0.0, 1.0])] {
            let answer = full_answer("Testing", "python").with(MANAGEMENT_OR_TECHNICAL, value);
            let vector = encode(&answer, &schema).unwrap();
            let a = column(&schema, "A_Management");
            assert_eq!([vector[a], vector[a + 1]], expected);
        }

        let answer = full_answer("Testing", "python").with(HARD_OR_SMART, "lazy worker");
        assert!(matches!(
            encode(&answer, &schema),
            Err(CareerError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_missing_answer() {
        let schema = schema();
        let mut answer = QuestionnaireAnswer::new();
        for (k, v) in full_answer("Testing", "python").iter() {
            if k != INTROVERT {
                answer.set(k.clone(), v.clone());
            }
        }
        assert!(matches!(
            encode(&answer, &schema),
            Err(CareerError::MissingAnswer { .. })
        ));
    }

    #[test]
    fn test_category_code_round_trip() {
        let schema = schema();
        let map = schema.category_map(WORKSHOPS).unwrap();
        let col = column(&schema, "workshops_code");
        for category in map.categories() {
            let vector = encode(&full_answer(category, "python"), &schema).unwrap();
            assert_eq!(map.category(vector[col] as usize), Some(category.as_str()));
        }
    }
}
