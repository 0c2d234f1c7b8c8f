//! Artifact set persistence.
//!
//! A set is four JSON files in one directory. Sets are written to a sibling
//! staging directory and swapped in with renames, so readers see either the
//! previous complete set or the new complete set.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::dataset::{LabelSpace, LabelTier};
use crate::errors::Result;
use crate::forest::RandomForest;
use crate::schema::EncodingSchema;

pub const CLASSIFIER_FILE: &str = "classifier.json";
pub const SCHEMA_FILE: &str = "schema.json";
pub const LABELS_FILE: &str = "labels.json";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Which artifact set a training run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    /// Trained on the expanded label space; served by default.
    Enhanced,
    /// Trained on the survey labels only; served when enhanced fails to load.
    Basic,
}

impl ModelVariant {
    pub fn dir_name(self) -> &'static str {
        match self {
            ModelVariant::Enhanced => "enhanced",
            ModelVariant::Basic => "basic",
        }
    }

    pub fn tier(self) -> LabelTier {
        match self {
            ModelVariant::Enhanced => LabelTier::Expanded,
            ModelVariant::Basic => LabelTier::Narrow,
        }
    }

    pub fn dir(self, model_dir: &Path) -> PathBuf {
        model_dir.join(self.dir_name())
    }
}

/// Trained forest plus the column order and classes it was fitted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub feature_names: Vec<String>,
    pub classes: Vec<String>,
    pub forest: RandomForest,
}

/// Summary written next to the artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub variant: ModelVariant,
    pub seed: u64,
    pub feature_count: usize,
    pub label_count: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    pub crate_version: String,
}

/// Paths of one artifact set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactHandles {
    pub dir: PathBuf,
    pub classifier: PathBuf,
    pub schema: PathBuf,
    pub labels: PathBuf,
    pub manifest: PathBuf,
}

impl ArtifactHandles {
    pub fn in_dir(dir: &Path) -> Self {
        ArtifactHandles {
            dir: dir.to_path_buf(),
            classifier: dir.join(CLASSIFIER_FILE),
            schema: dir.join(SCHEMA_FILE),
            labels: dir.join(LABELS_FILE),
            manifest: dir.join(MANIFEST_FILE),
        }
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), "wrote artifact");
    Ok(())
}

fn sibling(dir: &Path, suffix: &str) -> PathBuf {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifacts".to_string());
    dir.with_file_name(format!(".{}.{}", name, suffix))
}

/// Write a complete artifact set to `dir`, replacing any previous set.
///
/// On failure the staging directory is removed and the previous set, if
/// any, is left in place.
pub fn save_artifacts(
    dir: &Path,
    artifact: &ClassifierArtifact,
    schema: &EncodingSchema,
    labels: &LabelSpace,
    manifest: &Manifest,
) -> Result<ArtifactHandles> {
    if let Some(parent) = dir.parent() {
        fs::create_dir_all(parent)?;
    }

    let staging = sibling(dir, "staging");
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }
    fs::create_dir_all(&staging)?;

    let staged = ArtifactHandles::in_dir(&staging);
    let written = write_json(&staged.classifier, artifact)
        .and_then(|_| write_json(&staged.schema, schema))
        .and_then(|_| write_json(&staged.labels, labels))
        .and_then(|_| write_json(&staged.manifest, manifest));
    if let Err(e) = written {
        let _ = fs::remove_dir_all(&staging);
        return Err(e);
    }

    swap_in(&staging, dir)?;

    let handles = ArtifactHandles::in_dir(dir);
    info!(dir = %dir.display(), variant = ?manifest.variant, "saved artifact set");
    Ok(handles)
}

fn swap_in(staging: &Path, dir: &Path) -> Result<()> {
    let previous = sibling(dir, "previous");
    if previous.exists() {
        fs::remove_dir_all(&previous)?;
    }

    let had_previous = dir.exists();
    if had_previous {
        fs::rename(dir, &previous)?;
    }

    if let Err(e) = fs::rename(staging, dir) {
        if had_previous {
            if let Err(restore) = fs::rename(&previous, dir) {
                warn!(error = %restore, "could not restore previous artifact set");
            }
        }
        let _ = fs::remove_dir_all(staging);
        return Err(e.into());
    }

    if had_previous {
        discard_previous(&previous);
    }
    Ok(())
}

/// The new set is already installed here, so a leftover copy of the old one
/// is only logged. The next save removes it before swapping.
fn discard_previous(previous: &Path) {
    if let Err(e) = fs::remove_dir_all(previous) {
        warn!(dir = %previous.display(), error = %e, "could not remove previous artifact set");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_layout() {
        let handles = ArtifactHandles::in_dir(Path::new("models/enhanced"));
        assert_eq!(handles.schema, Path::new("models/enhanced/schema.json"));
        assert_eq!(ModelVariant::Basic.dir(Path::new("models")), Path::new("models/basic"));
    }

    #[test]
    fn test_swap_replaces_and_cleans_up() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("enhanced");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("old.txt"), "old").unwrap();

        let staging = sibling(&dir, "staging");
        fs::create_dir_all(&staging).unwrap();
        fs::write(staging.join("new.txt"), "new").unwrap();

        swap_in(&staging, &dir).unwrap();
        assert!(dir.join("new.txt").exists());
        assert!(!dir.join("old.txt").exists());
        assert!(!staging.exists());
        assert!(!sibling(&dir, "previous").exists());
    }

    #[test]
    fn test_leftover_previous_does_not_fail_swap() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("basic");
        // nothing to remove: logged, not returned
        discard_previous(&sibling(&dir, "previous"));

        // a stale copy from an earlier interrupted swap is cleared first
        let stale = sibling(&dir, "previous");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("old.txt"), "old").unwrap();
        let staging = sibling(&dir, "staging");
        fs::create_dir_all(&staging).unwrap();
        fs::write(staging.join("new.txt"), "new").unwrap();

        swap_in(&staging, &dir).unwrap();
        assert!(dir.join("new.txt").exists());
        assert!(!stale.exists());
    }
}
