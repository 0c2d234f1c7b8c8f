//! Label-space expansion.
//!
//! Grows a narrow survey dataset into a wider label space in three passes
//! over a single seeded RNG:
//!
//! 1. every original row is kept unchanged,
//! 2. rows whose label appears in the [`ExpansionMap`] are copied once per
//!    related role, relabelled, and nudged by the [`PerturbationRule`]s,
//! 3. every role in the [`SyntheticCatalog`] that the survey never covered
//!    gets freshly sampled rows.
//!
//! The same seed and inputs always produce the same rows in the same order.

pub mod catalog;
pub mod rules;
pub mod synthetic;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use crate::dataset::{Dataset, LabelSpace, LabelTier, LabeledRow};
use crate::errors::Result;
use crate::questionnaire::Questionnaire;

pub use rules::{default_rules, Adjustment, LabelMatcher, PerturbationRule};
pub use synthetic::{
    FeatureProfile, Industry, RoleFamily, SyntheticCatalog, SyntheticProfile, SyntheticRole, INDUSTRY_ROWS_PER_LABEL,
};

use rules::{apply_rules, validate_rules};
use synthetic::EmpiricalAnswers;

/// Survey label to the ordered list of related labels derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl ExpansionMap {
    /// The built-in related-role families.
    pub fn builtin() -> Self {
        catalog::CAREER_EXPANSION
            .iter()
            .map(|(label, related)| (label.to_string(), catalog::owned(related)))
            .collect()
    }

    pub fn insert(&mut self, label: impl Into<String>, related: Vec<String>) {
        self.entries.insert(label.into(), related);
    }

    pub fn related(&self, label: &str) -> &[String] {
        self.entries.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for ExpansionMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        ExpansionMap {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Row counts produced by one expansion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionSummary {
    pub original_rows: usize,
    pub derived_rows: usize,
    pub synthetic_rows: usize,
    pub original_labels: usize,
    pub expanded_labels: usize,
}

/// Expanded dataset and its label space.
#[derive(Debug, Clone)]
pub struct Expansion {
    pub dataset: Dataset,
    pub labels: LabelSpace,
    pub summary: ExpansionSummary,
}

/// Configured expansion run.
#[derive(Debug, Clone)]
pub struct Expander {
    questionnaire: Questionnaire,
    rules: Vec<PerturbationRule>,
    catalog: SyntheticCatalog,
}

impl Expander {
    /// Validate rules and catalog against the questionnaire up front so a bad
    /// configuration fails before any row is generated.
    pub fn new(
        questionnaire: Questionnaire,
        rules: Vec<PerturbationRule>,
        catalog: SyntheticCatalog,
    ) -> Result<Self> {
        validate_rules(&rules, &questionnaire)?;
        catalog.validate(&questionnaire)?;
        Ok(Expander {
            questionnaire,
            rules,
            catalog,
        })
    }

    /// Default rules and the built-in synthetic catalog.
    pub fn standard(questionnaire: Questionnaire) -> Result<Self> {
        Self::new(questionnaire, default_rules(), SyntheticCatalog::builtin())
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn expand(&self, dataset: &Dataset, map: &ExpansionMap, seed: u64) -> Result<Expansion> {
        let mut rng = StdRng::seed_from_u64(seed);
        let original_labels: BTreeSet<&str> = dataset.labels().collect();

        let mut rows = Vec::with_capacity(dataset.len() * 2);
        let mut derived_rows = 0usize;

        for row in &dataset.rows {
            rows.push(row.clone());
            for related in map.related(&row.label) {
                let mut answer = row.answer.clone();
                apply_rules(&self.rules, &mut answer, related, &self.questionnaire, &mut rng);
                rows.push(LabeledRow::new(answer, related.clone()));
                derived_rows += 1;
            }
        }

        let empirical = EmpiricalAnswers::from_dataset(dataset);
        let mut synthetic_rows = 0usize;
        for (index, role) in self.catalog.roles.iter().enumerate() {
            if original_labels.contains(role.label.as_str()) {
                debug!(label = %role.label, "role already surveyed, not synthesizing");
                continue;
            }
            let answers = self
                .catalog
                .generate(index, &self.questionnaire, &empirical, &mut rng)?;
            synthetic_rows += answers.len();
            rows.extend(answers.into_iter().map(|a| LabeledRow::new(a, role.label.clone())));
        }

        let mut expanded = Dataset::new(dataset.columns.clone(), rows);
        expanded.normalize_casing(&self.questionnaire);
        let labels = LabelSpace::from_dataset(LabelTier::Expanded, &expanded);

        let summary = ExpansionSummary {
            original_rows: dataset.len(),
            derived_rows,
            synthetic_rows,
            original_labels: original_labels.len(),
            expanded_labels: labels.len(),
        };
        info!(
            seed,
            rows = expanded.len(),
            derived = derived_rows,
            synthetic = synthetic_rows,
            labels = labels.len(),
            "expanded dataset"
        );

        Ok(Expansion {
            dataset: expanded,
            labels,
            summary,
        })
    }
}
