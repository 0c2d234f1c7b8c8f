//! Staged training run.
//!
//! A run moves through fixed stages and records each one it enters. The
//! first error stops the run, is wrapped in [`CareerError::TrainingFailed`]
//! with the failing stage, and leaves the artifact directory untouched:
//! nothing is written before the `Persisting` stage. That stage swaps in a
//! complete set or nothing, and only then writes the expanded dataset when
//! `output.expanded_csv` asks for it.

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use super::config::Config;
use super::evaluate::{accuracy, top_importances, FeatureImportance};
use super::save::{save_artifacts, ArtifactHandles, ClassifierArtifact, Manifest, ModelVariant};
use super::split::stratified_split;
use crate::dataset::{infer_questionnaire, load_dataset, Dataset, LabelSpace};
use crate::encoder::encode;
use crate::errors::{CareerError, Result};
use crate::expansion::{Expander, ExpansionSummary};
use crate::forest::RandomForest;
use crate::questionnaire::Questionnaire;
use crate::schema::EncodingSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingStage {
    Loading,
    Expanding,
    Encoding,
    Splitting,
    Fitting,
    Evaluating,
    Persisting,
    Done,
    Failed { stage: Box<TrainingStage> },
}

impl fmt::Display for TrainingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingStage::Failed { stage } => write!(f, "failed during {}", stage),
            other => write!(f, "{}", format!("{:?}", other).to_lowercase()),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub variant: ModelVariant,
    pub seed: u64,
    pub stages: Vec<TrainingStage>,
    pub rows: usize,
    pub labels: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    pub top_importances: Vec<FeatureImportance>,
    pub expansion: Option<ExpansionSummary>,
    pub artifacts: ArtifactHandles,
}

#[derive(Default)]
struct Run {
    stages: Vec<TrainingStage>,
}

impl Run {
    /// Enter `stage` and run `f`; an error marks the run failed at that stage.
    fn stage<T>(&mut self, stage: TrainingStage, f: impl FnOnce() -> Result<T>) -> Result<T> {
        info!(stage = %stage, "training stage");
        self.stages.push(stage.clone());
        f().map_err(|e| {
            warn!(stage = %stage, error = %e, "training failed");
            let name = stage.to_string();
            self.stages.push(TrainingStage::Failed {
                stage: Box::new(stage),
            });
            CareerError::TrainingFailed {
                stage: name,
                source: Box::new(e),
            }
        })
    }
}

/// Encoded dataset ready for fitting.
struct Encoded {
    schema: EncodingSchema,
    x: Array2<f64>,
    y: Vec<usize>,
}

fn encode_dataset(questionnaire: &Questionnaire, dataset: &Dataset, labels: &LabelSpace) -> Result<Encoded> {
    let schema = EncodingSchema::fit(questionnaire, dataset.rows.iter().map(|r| &r.answer));
    let mut x = Array2::<f64>::zeros((dataset.len(), schema.len()));
    let mut y = Vec::with_capacity(dataset.len());

    for (i, row) in dataset.rows.iter().enumerate() {
        let vector = encode(&row.answer, &schema)?;
        for (j, value) in vector.iter().enumerate() {
            x[[i, j]] = *value;
        }
        let class = labels.index_of(&row.label).ok_or_else(|| CareerError::SchemaMismatch {
            details: format!("label '{}' missing from label space", row.label),
        })?;
        y.push(class);
    }
    Ok(Encoded { schema, x, y })
}

/// Train one artifact set from the CSV at `dataset_path` and write it under
/// `config.output.model_dir`.
pub fn train(seed: u64, dataset_path: &Path, config: &Config, variant: ModelVariant) -> Result<TrainingReport> {
    config.validate()?;
    train_stages(&mut Run::default(), seed, dataset_path, config, variant)
}

fn train_stages(
    run: &mut Run,
    seed: u64,
    dataset_path: &Path,
    config: &Config,
    variant: ModelVariant,
) -> Result<TrainingReport> {
    let started = Instant::now();

    let (questionnaire, dataset) = run.stage(TrainingStage::Loading, || {
        let standard = Questionnaire::standard();
        let dataset = load_dataset(dataset_path, &standard)?;
        Ok((infer_questionnaire(&standard, &dataset), dataset))
    })?;

    let (dataset, labels, expansion) = run.stage(TrainingStage::Expanding, || match variant {
        ModelVariant::Basic => {
            let labels = LabelSpace::from_dataset(variant.tier(), &dataset);
            Ok((dataset, labels, None))
        }
        ModelVariant::Enhanced => {
            let expander = Expander::new(
                questionnaire.clone(),
                config.expansion.perturbation_rules(),
                config.expansion.synthetic_catalog(),
            )?;
            let expansion = expander.expand(&dataset, &config.expansion.expansion_map(), seed)?;
            Ok((expansion.dataset, expansion.labels, Some(expansion.summary)))
        }
    })?;

    let encoded = run.stage(TrainingStage::Encoding, || encode_dataset(&questionnaire, &dataset, &labels))?;

    let split = run.stage(TrainingStage::Splitting, || {
        let names: Vec<&str> = dataset.labels().collect();
        stratified_split(&names, config.data.test_fraction, seed)
    })?;

    let x_train = encoded.x.select(Axis(0), &split.train);
    let y_train: Vec<usize> = split.train.iter().map(|&i| encoded.y[i]).collect();
    let x_test = encoded.x.select(Axis(0), &split.test);
    let y_test: Vec<usize> = split.test.iter().map(|&i| encoded.y[i]).collect();

    let forest = run.stage(TrainingStage::Fitting, || {
        info!(
            rows = split.train.len(),
            features = encoded.schema.len(),
            classes = labels.len(),
            trees = config.forest.n_trees,
            "fitting random forest"
        );
        RandomForest::fit(&x_train, &y_train, labels.len(), config.forest.clone(), seed)
    })?;

    let (train_accuracy, test_accuracy, importances) = run.stage(TrainingStage::Evaluating, || {
        let train_accuracy = accuracy(&forest.predict_batch(&x_train)?, &y_train);
        let test_accuracy = accuracy(&forest.predict_batch(&x_test)?, &y_test);
        info!(train_accuracy, test_accuracy, "evaluated classifier");
        let importances = top_importances(
            encoded.schema.feature_names(),
            forest.feature_importances(),
            config.output.top_importances,
        );
        Ok((train_accuracy, test_accuracy, importances))
    })?;

    let artifacts = run.stage(TrainingStage::Persisting, || {
        let manifest = Manifest {
            variant,
            seed,
            feature_count: encoded.schema.len(),
            label_count: labels.len(),
            train_rows: split.train.len(),
            test_rows: split.test.len(),
            train_accuracy,
            test_accuracy,
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
        };
        let artifact = ClassifierArtifact {
            feature_names: encoded.schema.feature_names().to_vec(),
            classes: labels.labels().to_vec(),
            forest,
        };
        let dir = variant.dir(Path::new(&config.output.model_dir));
        let handles = save_artifacts(&dir, &artifact, &encoded.schema, &labels, &manifest)?;

        if let (Some(path), Some(_)) = (&config.output.expanded_csv, &expansion) {
            dataset.write_csv(&questionnaire, Path::new(path))?;
            info!(path = %path, rows = dataset.len(), "wrote expanded dataset");
        }
        Ok(handles)
    })?;

    run.stages.push(TrainingStage::Done);
    info!(
        variant = ?variant,
        elapsed_secs = started.elapsed().as_secs_f64(),
        "training complete"
    );

    Ok(TrainingReport {
        variant,
        seed,
        stages: run.stages.clone(),
        rows: dataset.len(),
        labels: labels.len(),
        train_rows: split.train.len(),
        test_rows: split.test.len(),
        train_accuracy,
        test_accuracy,
        top_importances: importances,
        expansion,
        artifacts,
    })
}

/// Expand the CSV at `dataset_path` and write the result to `out` without
/// training.
pub fn expand_to_csv(seed: u64, dataset_path: &Path, out: &Path, config: &Config) -> Result<ExpansionSummary> {
    let standard = Questionnaire::standard();
    let dataset = load_dataset(dataset_path, &standard)?;
    let questionnaire = infer_questionnaire(&standard, &dataset);
    let expander = Expander::new(
        questionnaire,
        config.expansion.perturbation_rules(),
        config.expansion.synthetic_catalog(),
    )?;
    let expansion = expander.expand(&dataset, &config.expansion.expansion_map(), seed)?;
    expansion.dataset.write_csv(expander.questionnaire(), out)?;
    info!(path = %out.display(), rows = expansion.dataset.len(), "wrote expanded dataset");
    Ok(expansion.summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(TrainingStage::Splitting.to_string(), "splitting");
        let failed = TrainingStage::Failed {
            stage: Box::new(TrainingStage::Encoding),
        };
        assert_eq!(failed.to_string(), "failed during encoding");
    }

    fn write_lopsided_survey(dir: &Path) -> std::path::PathBuf {
        use crate::answers::QuestionnaireAnswer;
        use crate::dataset::LabeledRow;
        use crate::questionnaire::*;

        let questionnaire = Questionnaire::standard();
        let answer = |coding: i64| {
            questionnaire.questions.iter().fold(QuestionnaireAnswer::new(), |a, q| match &q.kind {
                QuestionKind::Rating { .. } => a.with(q.key.clone(), coding),
                QuestionKind::Binary => a.with(q.key.clone(), "yes"),
                QuestionKind::Ordinal => a.with(q.key.clone(), "medium"),
                QuestionKind::Categorical => a.with(q.key.clone(), "general"),
                QuestionKind::DualIndicator { values, .. } => a.with(q.key.clone(), values[0].as_str()),
            })
        };
        let mut rows: Vec<LabeledRow> = (0..4).map(|i| LabeledRow::new(answer(i), "Software Developer")).collect();
        rows.push(LabeledRow::new(answer(9), "Astronaut"));

        let columns = questionnaire.keys().map(str::to_string).chain([LABEL_COLUMN.to_string()]).collect();
        let path = dir.join("survey.csv");
        Dataset::new(columns, rows).write_csv(&questionnaire, &path).unwrap();
        path
    }

    #[test]
    fn test_failing_run_stops_at_splitting() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_lopsided_survey(dir.path());
        let mut config = Config::default();
        config.output.model_dir = dir.path().join("models").to_string_lossy().into_owned();

        let mut run = Run::default();
        let err = train_stages(&mut run, 7, &data, &config, ModelVariant::Basic).unwrap_err();
        assert!(matches!(err, CareerError::TrainingFailed { ref stage, .. } if stage == "splitting"));
        assert_eq!(
            run.stages,
            vec![
                TrainingStage::Loading,
                TrainingStage::Expanding,
                TrainingStage::Encoding,
                TrainingStage::Splitting,
                TrainingStage::Failed {
                    stage: Box::new(TrainingStage::Splitting)
                },
            ]
        );
        assert!(!dir.path().join("models").exists());
    }

    #[test]
    fn test_failed_stage_is_recorded() {
        let mut run = Run { stages: Vec::new() };
        let err = run
            .stage(TrainingStage::Splitting, || -> Result<()> {
                Err(CareerError::InsufficientSamplesForLabel {
                    label: "Astronaut".to_string(),
                    count: 1,
                    required: 2,
                })
            })
            .unwrap_err();

        assert!(matches!(err, CareerError::TrainingFailed { ref stage, .. } if stage == "splitting"));
        assert_eq!(
            run.stages.last(),
            Some(&TrainingStage::Failed {
                stage: Box::new(TrainingStage::Splitting)
            })
        );
    }
}
