//! End-to-end: train on a small survey, reload, predict, degrade.

use std::path::{Path, PathBuf};

use career_predictor::api::{Predictor, PredictorConfig};
use career_predictor::expansion::{RoleFamily, SyntheticRole};
use career_predictor::model_loader::{load_with_fallback, ServingMode};
use career_predictor::questionnaire::*;
use career_predictor::trainer::{self, Config, ModelVariant, TrainingStage};
use career_predictor::{CareerError, Dataset, ExpansionMap, LabelTier, LabeledRow, QuestionnaireAnswer};

const LABELS: [&str; 3] = ["Software Developer", "Web Developer", "Database Developer"];

fn survey_answer(label: usize, j: usize) -> QuestionnaireAnswer {
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    let certifications = [["python", "shell programming"], ["full stack", "app development"], ["hadoop", "r programming"]];
    let workshops = [["Testing", "testing"], ["web technologies", "game development"], ["database security", "data science"]];

    QuestionnaireAnswer::new()
        .with(LOGICAL_QUOTIENT, (3 + 2 * label + j % 3) as i64)
        .with(CODING_SKILLS, (2 + 3 * label + j % 2) as i64)
        .with(HACKATHONS, (3 * label + j % 2) as i64)
        .with(PUBLIC_SPEAKING, (4 + j % 3) as i64)
        .with(SELF_LEARNING, yes_no(j % 2 == 0))
        .with(EXTRA_COURSES, yes_no(label != 1))
        .with(SENIOR_INPUTS, yes_no(j % 3 == 0))
        .with(WORKED_IN_TEAMS, yes_no(label == 2))
        .with(INTROVERT, yes_no(label == 0))
        .with(READING_WRITING, ORDINAL_TIERS[label])
        .with(MEMORY_SCORE, ORDINAL_TIERS[j % 3])
        .with(CERTIFICATIONS, certifications[label][j % 2])
        .with(WORKSHOPS, workshops[label][j % 2])
        .with(INTERESTED_SUBJECTS, ["programming", "networks", "data engineering"][label])
        .with(CAREER_AREA, ["system developer", "web developer", "Business process analyst"][label])
        .with(COMPANY_TYPE, ["Product based", "Web Services", "BPA"][label])
        .with(BOOK_TYPE, ["Technical", "Guide", "Science"][label])
        .with(MANAGEMENT_OR_TECHNICAL, if label == 2 { "Management" } else { "Technical" })
        .with(HARD_OR_SMART, if j % 2 == 0 { "smart worker" } else { "hard worker" })
}

fn write_survey(dir: &Path, extra: &[LabeledRow]) -> PathBuf {
    let questionnaire = Questionnaire::standard();
    let mut rows: Vec<LabeledRow> = (0..LABELS.len())
        .flat_map(|label| (0..6).map(move |j| LabeledRow::new(survey_answer(label, j), LABELS[label])))
        .collect();
    rows.extend_from_slice(extra);

    let columns = questionnaire.keys().map(str::to_string).chain([LABEL_COLUMN.to_string()]).collect();
    let path = dir.join("survey.csv");
    Dataset::new(columns, rows).write_csv(&questionnaire, &path).unwrap();
    path
}

fn test_config(model_dir: &Path) -> Config {
    let mut config = Config::default();
    config.data.test_fraction = 0.25;
    config.forest.n_trees = 15;
    config.expansion.builtin_roles = false;
    config.expansion.rows_per_label = (5, 6);
    config.expansion.new_roles = vec![SyntheticRole::new("Quantum Engineer", RoleFamily::Emerging)];
    let mut map = ExpansionMap::default();
    map.insert("Software Developer", vec!["DevOps Engineer".to_string()]);
    config.expansion.map = Some(map);
    config.output.model_dir = model_dir.to_string_lossy().into_owned();
    config
}

fn train_both(data: &Path, config: &Config) {
    trainer::train(7, data, config, ModelVariant::Enhanced).unwrap();
    trainer::train(7, data, config, ModelVariant::Basic).unwrap();
}

fn loader(model_dir: &Path) -> PredictorConfig {
    PredictorConfig::new().with_model_dir(model_dir.to_string_lossy().into_owned())
}

#[test]
fn test_train_reload_predict() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_survey(dir.path(), &[]);
    let model_dir = dir.path().join("models");
    let mut config = test_config(&model_dir);
    let expanded_csv = dir.path().join("expanded.csv");
    config.output.expanded_csv = Some(expanded_csv.to_string_lossy().into_owned());

    let report = trainer::train(7, &data, &config, ModelVariant::Enhanced).unwrap();
    assert_eq!(
        report.stages,
        vec![
            TrainingStage::Loading,
            TrainingStage::Expanding,
            TrainingStage::Encoding,
            TrainingStage::Splitting,
            TrainingStage::Fitting,
            TrainingStage::Evaluating,
            TrainingStage::Persisting,
            TrainingStage::Done,
        ]
    );
    assert!(expanded_csv.exists());
    assert_eq!(report.labels, 5);
    assert!(report.rows >= 18 + 6 + 5);
    assert!(report.top_importances.len() <= 10);
    assert!(report.artifacts.classifier.exists());
    assert!(report.artifacts.manifest.exists());
    // staging directory swapped away
    assert!(!model_dir.join(".enhanced.staging").exists());

    let predictor = Predictor::with_config(loader(&model_dir)).unwrap();
    assert_eq!(predictor.mode(), &ServingMode::Full);
    assert_eq!(predictor.variant(), ModelVariant::Enhanced);

    let answer = survey_answer(0, 1);
    let role = predictor.predict(&answer).unwrap();
    assert!(predictor.model().labels.contains(&role));

    let ranked = predictor.predict_ranked(&answer, 3).unwrap();
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].label, role);
    assert!(ranked.windows(2).all(|w| w[0].probability >= w[1].probability));

    let proba = predictor.predict_proba(&answer).unwrap();
    assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
}

#[test]
fn test_bad_answers_are_request_errors() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_survey(dir.path(), &[]);
    let model_dir = dir.path().join("models");
    trainer::train(7, &data, &test_config(&model_dir), ModelVariant::Enhanced).unwrap();
    let predictor = Predictor::with_config(loader(&model_dir)).unwrap();

    let answer = survey_answer(1, 0).with(CERTIFICATIONS, "quantum basket weaving");
    let err = predictor.predict(&answer).unwrap_err();
    assert!(matches!(err, CareerError::UnknownCategory { .. }));
    assert!(err.is_request_error());

    let answer = survey_answer(1, 0).with(CODING_SKILLS, 11);
    assert!(matches!(
        predictor.predict(&answer),
        Err(CareerError::OutOfRangeValue { .. })
    ));

    // casing variants share one code
    let upper = predictor.encode(&survey_answer(0, 0)).unwrap();
    let lower = predictor.encode(&survey_answer(0, 0).with(WORKSHOPS, "testing")).unwrap();
    assert_eq!(upper, lower);
}

#[test]
fn test_same_seed_same_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_survey(dir.path(), &[]);
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    let first = trainer::train(7, &data, &test_config(&a), ModelVariant::Enhanced).unwrap();
    let second = trainer::train(7, &data, &test_config(&b), ModelVariant::Enhanced).unwrap();

    assert_eq!(
        std::fs::read(&first.artifacts.classifier).unwrap(),
        std::fs::read(&second.artifacts.classifier).unwrap()
    );
    assert_eq!(
        std::fs::read(&first.artifacts.schema).unwrap(),
        std::fs::read(&second.artifacts.schema).unwrap()
    );
}

#[test]
fn test_degraded_fallback_to_basic() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_survey(dir.path(), &[]);
    let model_dir = dir.path().join("models");
    train_both(&data, &test_config(&model_dir));

    std::fs::remove_file(model_dir.join("enhanced").join("classifier.json")).unwrap();

    let predictor = Predictor::with_config(loader(&model_dir)).unwrap();
    assert!(predictor.mode().is_degraded());
    assert_eq!(predictor.variant(), ModelVariant::Basic);
    assert_eq!(predictor.model().labels.tier, LabelTier::Narrow);
    assert_eq!(predictor.model().labels.len(), 3);

    let role = predictor.predict(&survey_answer(2, 3)).unwrap();
    assert!(LABELS.contains(&role.as_str()));

    let strict = loader(&model_dir).with_fallback(false);
    assert!(matches!(
        Predictor::with_config(strict),
        Err(CareerError::ArtifactLoadFailure { .. })
    ));
}

#[test]
fn test_inconsistent_schema_does_not_fall_back() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_survey(dir.path(), &[]);
    let model_dir = dir.path().join("models");
    train_both(&data, &test_config(&model_dir));

    // self-consistent schema that no longer matches the classifier
    let path = model_dir.join("enhanced").join("schema.json");
    let mut schema: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    schema["features"] = serde_json::json!([]);
    schema["feature_names"] = serde_json::json!([]);
    std::fs::write(&path, serde_json::to_string(&schema).unwrap()).unwrap();

    assert!(matches!(
        load_with_fallback(&loader(&model_dir)),
        Err(CareerError::SchemaMismatch { .. })
    ));
}

#[test]
fn test_failed_training_keeps_previous_set() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_survey(dir.path(), &[]);
    let model_dir = dir.path().join("models");
    let config = test_config(&model_dir);
    trainer::train(7, &data, &config, ModelVariant::Basic).unwrap();
    let before = std::fs::read(model_dir.join("basic").join("classifier.json")).unwrap();

    let lonely = LabeledRow::new(survey_answer(0, 0), "Astronaut");
    let bad_dir = tempfile::tempdir().unwrap();
    let bad_data = write_survey(bad_dir.path(), &[lonely]);

    match trainer::train(7, &bad_data, &config, ModelVariant::Basic) {
        Err(CareerError::TrainingFailed { stage, source }) => {
            assert_eq!(stage, "splitting");
            assert!(matches!(*source, CareerError::InsufficientSamplesForLabel { count: 1, .. }));
        }
        other => panic!("expected TrainingFailed, got {:?}", other.map(|r| r.stages)),
    }

    let after = std::fs::read(model_dir.join("basic").join("classifier.json")).unwrap();
    assert_eq!(before, after);
    assert!(!model_dir.join(".basic.staging").exists());
}

#[test]
fn test_failed_enhanced_run_writes_no_expanded_csv() {
    let dir = tempfile::tempdir().unwrap();
    let lonely = LabeledRow::new(survey_answer(1, 2), "Astronaut");
    let data = write_survey(dir.path(), &[lonely]);
    let model_dir = dir.path().join("models");
    let expanded_csv = dir.path().join("expanded.csv");
    let mut config = test_config(&model_dir);
    config.output.expanded_csv = Some(expanded_csv.to_string_lossy().into_owned());

    match trainer::train(7, &data, &config, ModelVariant::Enhanced) {
        Err(CareerError::TrainingFailed { stage, .. }) => assert_eq!(stage, "splitting"),
        other => panic!("expected TrainingFailed, got {:?}", other.map(|r| r.stages)),
    }
    assert!(!expanded_csv.exists());
    assert!(!model_dir.exists());
}

#[test]
fn test_expand_command_writes_reproducible_csv() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_survey(dir.path(), &[]);
    let config = test_config(&dir.path().join("models"));
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");

    let summary = trainer::expand_to_csv(7, &data, &a, &config).unwrap();
    trainer::expand_to_csv(7, &data, &b, &config).unwrap();

    assert_eq!(summary.original_rows, 18);
    assert_eq!(summary.derived_rows, 6);
    assert_eq!(summary.expanded_labels, 5);
    assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
}
