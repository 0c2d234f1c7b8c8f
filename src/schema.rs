//! Encoding schema shared by training and serving.
//!
//! The schema fixes the classifier's column order and, for every categorical
//! question, the category-to-code mapping fitted on training data. Serving
//! must encode with exactly the schema the classifier was fitted with.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::answers::QuestionnaireAnswer;
use crate::errors::{CareerError, Result};
use crate::questionnaire::{QuestionKind, Questionnaire};

/// Case-folded lookup key for a category value.
pub fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Pick one spelling per case-folded value.
///
/// The most frequent spelling wins; ties go to the spelling that sorts first,
/// so "Testing" beats "testing" when both occur equally often.
pub fn canonical_spellings<'a>(values: impl IntoIterator<Item = &'a str>) -> HashMap<String, String> {
    let mut counts: HashMap<String, BTreeMap<String, usize>> = HashMap::new();
    for value in values {
        let spelling = value.trim().to_string();
        *counts
            .entry(fold(&spelling))
            .or_default()
            .entry(spelling)
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(folded, spellings)| {
            let canonical = spellings
                .into_iter()
                .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
                .map(|(s, _)| s)
                .unwrap_or_else(|| folded.clone());
            (folded, canonical)
        })
        .collect()
}

/// Category-to-code mapping for one categorical feature.
///
/// Codes are indices into the sorted list of canonical spellings. Lookups are
/// case-insensitive so casing variants share a code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategoryMap {
    categories: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl From<Vec<String>> for CategoryMap {
    fn from(categories: Vec<String>) -> Self {
        let lookup = categories
            .iter()
            .enumerate()
            .map(|(code, c)| (fold(c), code))
            .collect();
        CategoryMap { categories, lookup }
    }
}

impl From<CategoryMap> for Vec<String> {
    fn from(map: CategoryMap) -> Self {
        map.categories
    }
}

impl CategoryMap {
    /// Fit a mapping from observed values.
    pub fn fit<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut categories: Vec<String> = canonical_spellings(values).into_values().collect();
        categories.sort();
        CategoryMap::from(categories)
    }

    pub fn code(&self, value: &str) -> Option<usize> {
        self.lookup.get(&fold(value)).copied()
    }

    /// Canonical spelling for `code`.
    pub fn category(&self, code: usize) -> Option<&str> {
        self.categories.get(code).map(String::as_str)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// How one feature is encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatureEncoding {
    Rating { min: i64, max: i64 },
    Binary,
    Ordinal,
    Categorical { categories: CategoryMap },
    DualIndicator { prefix: String, values: [String; 2] },
}

/// One question's slot in the feature vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub question: String,
    pub encoding: FeatureEncoding,
}

impl FeatureSpec {
    /// Column names this feature occupies, in order.
    pub fn columns(&self) -> Vec<String> {
        match &self.encoding {
            FeatureEncoding::Rating { .. } | FeatureEncoding::Binary | FeatureEncoding::Ordinal => {
                vec![self.question.clone()]
            }
            FeatureEncoding::Categorical { .. } => vec![format!("{}_code", self.question)],
            FeatureEncoding::DualIndicator { prefix, values } => values
                .iter()
                .map(|v| format!("{}_{}", prefix, v))
                .collect(),
        }
    }
}

/// Ordered feature layout plus per-feature category maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingSchema {
    pub features: Vec<FeatureSpec>,
    feature_names: Vec<String>,
}

impl EncodingSchema {
    pub fn new(features: Vec<FeatureSpec>) -> Self {
        let feature_names = features.iter().flat_map(FeatureSpec::columns).collect();
        EncodingSchema {
            features,
            feature_names,
        }
    }

    /// Fit a schema for `questionnaire` on the given answers. Each
    /// categorical question gets its own code namespace.
    pub fn fit<'a>(
        questionnaire: &Questionnaire,
        answers: impl IntoIterator<Item = &'a QuestionnaireAnswer>,
    ) -> Self {
        let answers: Vec<&QuestionnaireAnswer> = answers.into_iter().collect();

        let features = questionnaire
            .questions
            .iter()
            .map(|q| {
                let encoding = match &q.kind {
                    QuestionKind::Rating { min, max } => FeatureEncoding::Rating {
                        min: *min,
                        max: *max,
                    },
                    QuestionKind::Binary => FeatureEncoding::Binary,
                    QuestionKind::Ordinal => FeatureEncoding::Ordinal,
                    QuestionKind::Categorical => {
                        let observed: Vec<String> = answers
                            .iter()
                            .filter_map(|a| a.get(&q.key))
                            .map(|v| v.to_string())
                            .collect();
                        FeatureEncoding::Categorical {
                            categories: CategoryMap::fit(observed.iter().map(String::as_str)),
                        }
                    }
                    QuestionKind::DualIndicator { prefix, values } => {
                        FeatureEncoding::DualIndicator {
                            prefix: prefix.clone(),
                            values: values.clone(),
                        }
                    }
                };
                FeatureSpec {
                    question: q.key.clone(),
                    encoding,
                }
            })
            .collect();

        EncodingSchema::new(features)
    }

    /// Exact column order the classifier expects.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn len(&self) -> usize {
        self.feature_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feature_names.is_empty()
    }

    pub fn category_map(&self, question: &str) -> Option<&CategoryMap> {
        self.features.iter().find_map(|f| match &f.encoding {
            FeatureEncoding::Categorical { categories } if f.question == question => {
                Some(categories)
            }
            _ => None,
        })
    }

    /// Check that the stored column list matches the feature specs. A schema
    /// read from disk that fails this cannot be trusted for encoding.
    pub fn validate(&self) -> Result<()> {
        let expected: Vec<String> = self.features.iter().flat_map(FeatureSpec::columns).collect();
        if expected != self.feature_names {
            return Err(CareerError::SchemaMismatch {
                details: format!(
                    "schema lists {} feature names but its specs produce {}",
                    self.feature_names.len(),
                    expected.len()
                ),
            });
        }
        Ok(())
    }

    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::{CERTIFICATIONS, WORKSHOPS};

    fn answers() -> Vec<QuestionnaireAnswer> {
        vec![
            QuestionnaireAnswer::new()
                .with(WORKSHOPS, "Testing")
                .with(CERTIFICATIONS, "python"),
            QuestionnaireAnswer::new()
                .with(WORKSHOPS, "testing")
                .with(CERTIFICATIONS, "shell programming"),
            QuestionnaireAnswer::new()
                .with(WORKSHOPS, "cloud computing")
                .with(CERTIFICATIONS, "python"),
        ]
    }

    #[test]
    fn test_canonical_spelling_prefers_frequency_then_order() {
        let spellings = canonical_spellings(["testing", "Testing", "testing"]);
        assert_eq!(spellings["testing"], "testing");

        let spellings = canonical_spellings(["testing", "Testing"]);
        assert_eq!(spellings["testing"], "Testing");
    }

    #[test]
    fn test_category_codes_are_sorted_and_case_insensitive() {
        let map = CategoryMap::fit(["Testing", "testing", "cloud computing", "app development"]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.categories(), &["Testing", "app development", "cloud computing"]);
        assert_eq!(map.code("testing"), map.code("Testing"));
        assert_eq!(map.code("TESTING"), Some(0));
        assert_eq!(map.code("quantum basket weaving"), None);
    }

    #[test]
    fn test_inverse_lookup_round_trip() {
        let map = CategoryMap::fit(["python", "r programming", "hadoop"]);
        for category in map.categories() {
            let code = map.code(category).unwrap();
            assert_eq!(map.category(code), Some(category.as_str()));
        }
    }

    #[test]
    fn test_fit_standard_schema_columns() {
        let schema = EncodingSchema::fit(&Questionnaire::standard(), answers().iter());
        assert_eq!(schema.len(), 21);
        assert_eq!(schema.feature_names()[0], "Logical quotient rating");
        assert!(schema.feature_names().contains(&"workshops_code".to_string()));
        assert_eq!(schema.feature_names()[17], "A_Management");
        assert_eq!(schema.feature_names()[20], "B_smart worker");
        assert_eq!(schema.category_map(WORKSHOPS).unwrap().len(), 2);
        schema.validate().unwrap();
    }

    #[test]
    fn test_namespaces_are_independent() {
        let schema = EncodingSchema::fit(&Questionnaire::standard(), answers().iter());
        let certs = schema.category_map(CERTIFICATIONS).unwrap();
        let workshops = schema.category_map(WORKSHOPS).unwrap();
        assert_eq!(certs.code("Testing"), None);
        assert_eq!(workshops.code("python"), None);
    }

    #[test]
    fn test_json_round_trip_keeps_lookup() {
        let schema = EncodingSchema::fit(&Questionnaire::standard(), answers().iter());
        let json = serde_json::to_string(&schema).unwrap();
        let loaded: EncodingSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, schema);
        assert_eq!(
            loaded.category_map(WORKSHOPS).unwrap().code("TESTING"),
            schema.category_map(WORKSHOPS).unwrap().code("Testing")
        );
    }

    #[test]
    fn test_validate_detects_tampered_names() {
        let mut schema = EncodingSchema::fit(&Questionnaire::standard(), answers().iter());
        schema.feature_names.pop();
        assert!(matches!(
            schema.validate(),
            Err(CareerError::SchemaMismatch { .. })
        ));
    }
}
