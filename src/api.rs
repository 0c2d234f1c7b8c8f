//! High-level API for career prediction
//!
//! This module provides a simple interface for loading a trained artifact set
//! once and predicting career roles from questionnaire answers.
//!
//! # Quick Start
//!
//! ```no_run
//! use career_predictor::api::Predictor;
//! use career_predictor::QuestionnaireAnswer;
//!
//! let predictor = Predictor::new()?;
//! let answer = QuestionnaireAnswer::load("answers.json")?;
//! let role = predictor.predict(&answer)?;
//! println!("{}", role); // e.g., "Software Developer"
//! # Ok::<(), career_predictor::CareerError>(())
//! ```
//!
//! # Examples
//!
//! ## Ranked Predictions
//!
//! ```no_run
//! # use career_predictor::api::Predictor;
//! # use career_predictor::QuestionnaireAnswer;
//! # fn main() -> Result<(), career_predictor::CareerError> {
//! let predictor = Predictor::new()?;
//! let answer = QuestionnaireAnswer::load("answers.json")?;
//!
//! for ranked in predictor.predict_ranked(&answer, 5)? {
//!     println!("{:<40} {:.1}%", ranked.label, ranked.probability * 100.0);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Model Directory
//!
//! ```no_run
//! use career_predictor::api::{Predictor, PredictorConfig};
//!
//! let config = PredictorConfig::new()
//!     .with_model_dir("/custom/path")
//!     .with_fallback(false);
//!
//! let predictor = Predictor::with_config(config)?;
//! # Ok::<(), career_predictor::CareerError>(())
//! ```
//!
//! ## Degraded Mode
//!
//! ```no_run
//! use career_predictor::api::Predictor;
//! use career_predictor::model_loader::ServingMode;
//!
//! let predictor = Predictor::new()?;
//! if let ServingMode::Degraded { reason } = predictor.mode() {
//!     eprintln!("serving survey roles only: {}", reason);
//! }
//! # Ok::<(), career_predictor::CareerError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::answers::QuestionnaireAnswer;
use crate::encoder::{encode, FeatureVector};
use crate::errors::{CareerError, Result};
use crate::forest::argmax;
use crate::model_loader::{load_with_fallback, LoadedModel, ServingMode};
use crate::refine::{refine, Preferences};
use crate::trainer::save::ModelVariant;

pub use crate::model_loader::ModelLoaderConfig as PredictorConfig;

/// Main predictor interface. Immutable after load and safe to share across
/// threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Predictor {
    model: LoadedModel,
    mode: ServingMode,
}

/// One label with its predicted probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLabel {
    pub label: String,
    pub probability: f64,
}

impl Predictor {
    /// Create a predictor from `models/`, falling back to the basic set
    /// when the enhanced set cannot be read.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Neither artifact set can be read
    /// - An artifact set is internally inconsistent
    pub fn new() -> Result<Self> {
        Self::with_config(PredictorConfig::default())
    }

    /// Create a new predictor with custom configuration
    pub fn with_config(config: PredictorConfig) -> Result<Self> {
        let (model, mode) = load_with_fallback(&config)?;
        Ok(Self::from_loaded(model, mode))
    }

    pub fn from_loaded(model: LoadedModel, mode: ServingMode) -> Self {
        Predictor { model, mode }
    }

    pub fn mode(&self) -> &ServingMode {
        &self.mode
    }

    pub fn variant(&self) -> ModelVariant {
        self.model.variant
    }

    pub fn model(&self) -> &LoadedModel {
        &self.model
    }

    /// Encode `answer` against the loaded schema.
    pub fn encode(&self, answer: &QuestionnaireAnswer) -> Result<FeatureVector> {
        encode(answer, &self.model.schema)
    }

    /// Class probabilities in label-space order.
    pub fn predict_proba(&self, answer: &QuestionnaireAnswer) -> Result<Vec<f64>> {
        let features = self.encode(answer)?;
        self.model.classifier.forest.predict_proba(&features)
    }

    /// Most likely career role.
    ///
    /// Bad answers fail with a request error (see
    /// [`CareerError::is_request_error`]); the predictor stays usable.
    pub fn predict(&self, answer: &QuestionnaireAnswer) -> Result<String> {
        let proba = self.predict_proba(answer)?;
        self.label(argmax(&proba))
    }

    /// The `k` most likely roles, highest probability first.
    pub fn predict_ranked(&self, answer: &QuestionnaireAnswer, k: usize) -> Result<Vec<RankedLabel>> {
        let proba = self.predict_proba(answer)?;
        let mut order: Vec<usize> = (0..proba.len()).collect();
        // stable sort keeps label order among equal probabilities
        order.sort_by(|&a, &b| proba[b].total_cmp(&proba[a]));
        order
            .into_iter()
            .take(k)
            .map(|idx| {
                Ok(RankedLabel {
                    label: self.label(idx)?,
                    probability: proba[idx],
                })
            })
            .collect()
    }

    /// Predicted role followed by suggestions from work preferences.
    pub fn predict_refined(&self, answer: &QuestionnaireAnswer, preferences: &Preferences) -> Result<Vec<String>> {
        let base = self.predict(answer)?;
        Ok(refine(&base, answer, preferences))
    }

    /// Predict for several answer sets; one bad set fails the batch.
    pub fn predict_batch(&self, answers: &[QuestionnaireAnswer]) -> Result<Vec<String>> {
        answers.iter().map(|a| self.predict(a)).collect()
    }

    /// Get information about the loaded model
    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            variant: self.model.variant,
            degraded: self.mode.is_degraded(),
            feature_count: self.model.schema.len(),
            label_count: self.model.labels.len(),
            trees: self.model.classifier.forest.n_trees(),
            test_accuracy: self.model.manifest.test_accuracy,
        }
    }

    fn label(&self, idx: usize) -> Result<String> {
        self.model
            .labels
            .labels()
            .get(idx)
            .cloned()
            .ok_or_else(|| CareerError::SchemaMismatch {
                details: format!("class index {} outside label space of {}", idx, self.model.labels.len()),
            })
    }
}

/// Information about the loaded model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub variant: ModelVariant,
    pub degraded: bool,
    pub feature_count: usize,
    pub label_count: usize,
    pub trees: usize,
    pub test_accuracy: f64,
}

impl std::fmt::Display for ModelInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Model: {:?}{}", self.variant, if self.degraded { " (degraded)" } else { "" })?;
        writeln!(f, "  Features:      {}", self.feature_count)?;
        writeln!(f, "  Labels:        {}", self.label_count)?;
        writeln!(f, "  Trees:         {}", self.trees)?;
        writeln!(f, "  Test accuracy: {:.2}%", self.test_accuracy * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_predictor_is_shareable() {
        assert_send_sync::<Predictor>();
    }
}
