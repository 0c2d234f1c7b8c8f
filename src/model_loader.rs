//! Artifact set loading with a degraded fallback.
//!
//! Serving prefers the enhanced set in `<model_dir>/enhanced`. When that set
//! cannot be read the loader falls back to `<model_dir>/basic` and reports
//! [`ServingMode::Degraded`]. A set that reads fine but disagrees with
//! itself (schema vs classifier vs labels) is a [`CareerError::SchemaMismatch`]
//! and never falls back.
//!
//! # Examples
//!
//! ## Check if models exist
//!
//! ```no_run
//! use career_predictor::model_loader::ModelFiles;
//!
//! let files = ModelFiles::enhanced(None);
//! if files.exists() {
//!     println!("Models are ready!");
//! }
//! ```
//!
//! ## Custom model directory
//!
//! ```no_run
//! use career_predictor::model_loader::{load_with_fallback, ModelLoaderConfig};
//!
//! let config = ModelLoaderConfig::new()
//!     .with_model_dir("/custom/models")
//!     .with_fallback(false);
//!
//! let (model, mode) = load_with_fallback(&config)?;
//! # Ok::<(), career_predictor::CareerError>(())
//! ```

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::dataset::LabelSpace;
use crate::errors::{CareerError, Result};
use crate::schema::EncodingSchema;
use crate::trainer::save::{ClassifierArtifact, Manifest, ModelVariant, CLASSIFIER_FILE, LABELS_FILE, MANIFEST_FILE, SCHEMA_FILE};

const DEFAULT_MODEL_DIR: &str = "models";

/// Files making up one artifact set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub variant: ModelVariant,
    pub dir: PathBuf,
    pub classifier: PathBuf,
    pub schema: PathBuf,
    pub labels: PathBuf,
    pub manifest: PathBuf,
}

impl ModelFiles {
    pub fn for_variant(variant: ModelVariant, model_dir: Option<&str>) -> Self {
        let dir = variant.dir(Path::new(model_dir.unwrap_or(DEFAULT_MODEL_DIR)));
        Self {
            variant,
            classifier: dir.join(CLASSIFIER_FILE),
            schema: dir.join(SCHEMA_FILE),
            labels: dir.join(LABELS_FILE),
            manifest: dir.join(MANIFEST_FILE),
            dir,
        }
    }

    /// Paths for the expanded-label-space set
    pub fn enhanced(model_dir: Option<&str>) -> Self {
        Self::for_variant(ModelVariant::Enhanced, model_dir)
    }

    /// Paths for the survey-labels-only set
    pub fn basic(model_dir: Option<&str>) -> Self {
        Self::for_variant(ModelVariant::Basic, model_dir)
    }

    /// Check if all required files exist
    pub fn exists(&self) -> bool {
        [&self.classifier, &self.schema, &self.labels, &self.manifest]
            .iter()
            .all(|p| p.exists())
    }
}

/// How the loaded model is being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServingMode {
    Full,
    /// Serving the basic set because the enhanced set failed to load.
    Degraded { reason: String },
}

impl ServingMode {
    pub fn is_degraded(&self) -> bool {
        matches!(self, ServingMode::Degraded { .. })
    }
}

/// A validated artifact set.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub variant: ModelVariant,
    pub schema: EncodingSchema,
    pub labels: LabelSpace,
    pub classifier: ClassifierArtifact,
    pub manifest: Manifest,
}

/// Configuration for model loading
#[derive(Debug, Clone)]
pub struct ModelLoaderConfig {
    pub model_dir: Option<String>,
    pub allow_fallback: bool,
}

impl Default for ModelLoaderConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            allow_fallback: true,
        }
    }
}

impl ModelLoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model_dir(mut self, dir: impl Into<String>) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    pub fn with_fallback(mut self, enable: bool) -> Self {
        self.allow_fallback = enable;
        self
    }

    pub fn model_files(&self, variant: ModelVariant) -> ModelFiles {
        ModelFiles::for_variant(variant, self.model_dir.as_deref())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let failure = |reason: String| CareerError::ArtifactLoadFailure {
        path: path.to_path_buf(),
        reason,
    };
    let json = std::fs::read_to_string(path).map_err(|e| failure(e.to_string()))?;
    serde_json::from_str(&json).map_err(|e| failure(format!("invalid JSON: {}", e)))
}

fn mismatch(details: String) -> CareerError {
    CareerError::SchemaMismatch { details }
}

/// Load one artifact set and check that its parts agree.
///
/// Missing or unparseable files are [`CareerError::ArtifactLoadFailure`].
/// Parts that parse but disagree are [`CareerError::SchemaMismatch`].
pub fn load_artifacts(files: &ModelFiles) -> Result<LoadedModel> {
    let schema: EncodingSchema = read_json(&files.schema)?;
    let labels: LabelSpace = read_json(&files.labels)?;
    let classifier: ClassifierArtifact = read_json(&files.classifier)?;
    let manifest: Manifest = read_json(&files.manifest)?;

    if manifest.variant != files.variant || labels.tier != files.variant.tier() {
        return Err(CareerError::ArtifactLoadFailure {
            path: files.dir.clone(),
            reason: format!(
                "directory holds a {:?} set ({:?} labels), expected {:?}",
                manifest.variant, labels.tier, files.variant
            ),
        });
    }
    if !classifier.forest.is_consistent() {
        return Err(CareerError::ArtifactLoadFailure {
            path: files.classifier.clone(),
            reason: "forest structure is corrupt".to_string(),
        });
    }

    schema.validate()?;
    if classifier.feature_names != schema.feature_names() {
        return Err(mismatch(format!(
            "classifier was fitted on {} columns, schema defines {}",
            classifier.feature_names.len(),
            schema.len()
        )));
    }
    if classifier.forest.n_features() != schema.len() {
        return Err(mismatch(format!(
            "forest expects {} features, schema defines {}",
            classifier.forest.n_features(),
            schema.len()
        )));
    }
    if classifier.classes != labels.labels() || classifier.forest.n_classes() != labels.len() {
        return Err(mismatch(format!(
            "classifier knows {} classes, label space has {}",
            classifier.classes.len(),
            labels.len()
        )));
    }

    info!(
        dir = %files.dir.display(),
        features = schema.len(),
        labels = labels.len(),
        "loaded artifact set"
    );
    Ok(LoadedModel {
        variant: files.variant,
        schema,
        labels,
        classifier,
        manifest,
    })
}

/// Load the enhanced set, falling back to the basic set if it cannot be
/// read. Fails if neither loads, or if a set is internally inconsistent.
pub fn load_with_fallback(config: &ModelLoaderConfig) -> Result<(LoadedModel, ServingMode)> {
    let enhanced = config.model_files(ModelVariant::Enhanced);
    let primary_err = match load_artifacts(&enhanced) {
        Ok(model) => return Ok((model, ServingMode::Full)),
        Err(e @ CareerError::ArtifactLoadFailure { .. }) if config.allow_fallback => e,
        Err(e) => return Err(e),
    };

    let reason = primary_err.to_string();
    warn!(reason = %reason, "enhanced model unavailable, serving basic model");

    let basic = config.model_files(ModelVariant::Basic);
    match load_artifacts(&basic) {
        Ok(model) => Ok((model, ServingMode::Degraded { reason })),
        Err(CareerError::ArtifactLoadFailure { reason: basic_reason, .. }) => Err(CareerError::ArtifactLoadFailure {
            path: basic.dir,
            reason: format!("{}; basic fallback also failed: {}", reason, basic_reason),
        }),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_files_paths() {
        let files = ModelFiles::enhanced(None);
        assert_eq!(files.classifier, PathBuf::from("models/enhanced/classifier.json"));
        assert_eq!(files.manifest, PathBuf::from("models/enhanced/manifest.json"));
    }

    #[test]
    fn test_custom_model_dir() {
        let files = ModelFiles::basic(Some("/tmp/models"));
        assert_eq!(files.schema, PathBuf::from("/tmp/models/basic/schema.json"));
    }

    #[test]
    fn test_config_builder() {
        let config = ModelLoaderConfig::new()
            .with_model_dir("custom_models")
            .with_fallback(false);

        assert_eq!(config.model_dir, Some("custom_models".to_string()));
        assert!(!config.allow_fallback);
    }

    #[test]
    fn test_nothing_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = ModelLoaderConfig::new().with_model_dir(dir.path().to_str().unwrap());
        let err = load_with_fallback(&config).unwrap_err();
        match err {
            CareerError::ArtifactLoadFailure { reason, .. } => assert!(reason.contains("basic fallback also failed")),
            other => panic!("expected ArtifactLoadFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_json_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let files = ModelFiles::enhanced(dir.path().to_str());
        std::fs::create_dir_all(&files.dir).unwrap();
        for path in [&files.classifier, &files.schema, &files.labels, &files.manifest] {
            std::fs::write(path, "{not json").unwrap();
        }
        assert!(files.exists());
        assert!(matches!(
            load_artifacts(&files),
            Err(CareerError::ArtifactLoadFailure { .. })
        ));
    }
}
