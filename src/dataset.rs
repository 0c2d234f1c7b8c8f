//! Labeled survey rows: CSV loading, casing normalization and label spaces.

use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::answers::{AnswerValue, QuestionnaireAnswer};
use crate::errors::{CareerError, Result};
use crate::questionnaire::{infer_kind, Question, QuestionKind, Questionnaire, LABEL_COLUMN};
use crate::schema::{canonical_spellings, fold};

/// One survey response with its job-role label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledRow {
    pub answer: QuestionnaireAnswer,
    pub label: String,
}

impl LabeledRow {
    pub fn new(answer: QuestionnaireAnswer, label: impl Into<String>) -> Self {
        LabeledRow {
            answer,
            label: label.into(),
        }
    }
}

/// Ordered collection of labeled rows plus the column names they came with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<LabeledRow>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<LabeledRow>) -> Self {
        Dataset { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.label.as_str())
    }

    /// Rows per label, sorted by label.
    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for label in self.labels() {
            *counts.entry(label.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Rewrite every categorical value to one canonical spelling per
    /// case-folded value, so "testing" and "Testing" become the same category
    /// before any encoding happens.
    pub fn normalize_casing(&mut self, questionnaire: &Questionnaire) {
        for question in &questionnaire.questions {
            if question.kind != QuestionKind::Categorical {
                continue;
            }

            let observed: Vec<String> = self
                .rows
                .iter()
                .filter_map(|r| r.answer.get(&question.key))
                .map(|v| v.to_string())
                .collect();
            let canonical = canonical_spellings(observed.iter().map(String::as_str));

            let mut rewritten = 0usize;
            for row in &mut self.rows {
                let Some(value) = row.answer.get(&question.key) else {
                    continue;
                };
                let text = value.to_string();
                if let Some(spelling) = canonical.get(&fold(&text)) {
                    if *spelling != text {
                        row.answer.set(question.key.clone(), spelling.clone());
                        rewritten += 1;
                    }
                }
            }
            if rewritten > 0 {
                debug!(question = %question.key, rewritten, "normalized category casing");
            }
        }
    }

    /// Write the rows as CSV with the questionnaire's columns followed by the
    /// label column. Output is byte-identical for identical datasets.
    pub fn write_csv(&self, questionnaire: &Questionnaire, path: &Path) -> Result<()> {
        let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;

        let mut header: Vec<&str> = questionnaire.keys().collect();
        header.push(LABEL_COLUMN);
        writer.write_record(&header)?;

        for row in &self.rows {
            let mut record: Vec<String> = questionnaire
                .keys()
                .map(|k| row.answer.get(k).map(AnswerValue::to_string).unwrap_or_default())
                .collect();
            record.push(row.label.clone());
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Load a labeled survey CSV.
///
/// Every column other than the label becomes an answer. Category casing is
/// normalized for the questionnaire's categorical questions.
pub fn load_dataset(path: &Path, questionnaire: &Questionnaire) -> Result<Dataset> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let label_idx = columns
        .iter()
        .position(|c| c == LABEL_COLUMN)
        .ok_or_else(|| {
            CareerError::Configuration(format!(
                "{} has no '{}' column",
                path.display(),
                LABEL_COLUMN
            ))
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut answer = QuestionnaireAnswer::new();
        let mut label = String::new();
        for (idx, (column, value)) in columns.iter().zip(record.iter()).enumerate() {
            if idx == label_idx {
                label = value.trim().to_string();
            } else {
                answer.set(column.clone(), value.trim());
            }
        }
        rows.push(LabeledRow { answer, label });
    }

    if rows.is_empty() {
        return Err(CareerError::EmptyDataset(path.display().to_string()));
    }

    let mut dataset = Dataset::new(columns, rows);
    dataset.normalize_casing(questionnaire);

    info!(
        path = %path.display(),
        rows = dataset.len(),
        labels = dataset.label_counts().len(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Extend `base` with inferred questions for dataset columns it does not
/// declare.
pub fn infer_questionnaire(base: &Questionnaire, dataset: &Dataset) -> Questionnaire {
    let mut questionnaire = base.clone();
    for column in &dataset.columns {
        if column == LABEL_COLUMN || base.get(column).is_some() {
            continue;
        }
        let observed: Vec<String> = dataset
            .rows
            .iter()
            .filter_map(|r| r.answer.get(column))
            .map(|v| v.to_string())
            .collect();
        let kind = infer_kind(column, observed.iter().map(String::as_str));
        debug!(column = %column, ?kind, "inferred question kind");
        questionnaire.questions.push(Question {
            key: column.clone(),
            kind,
        });
    }
    questionnaire
}

/// Which tier of labels a classifier was trained over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelTier {
    /// Roles present in the collected survey only.
    Narrow,
    /// Survey roles plus mapped and synthetic roles.
    Expanded,
}

/// Sorted, de-duplicated set of labels a classifier can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSpace {
    pub tier: LabelTier,
    labels: Vec<String>,
}

impl LabelSpace {
    pub fn new<S: Into<String>>(tier: LabelTier, labels: impl IntoIterator<Item = S>) -> Self {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        labels.sort();
        labels.dedup();
        LabelSpace { tier, labels }
    }

    pub fn from_dataset(tier: LabelTier, dataset: &Dataset) -> Self {
        Self::new(tier, dataset.labels())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.binary_search_by(|l| l.as_str().cmp(label)).ok()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index_of(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
