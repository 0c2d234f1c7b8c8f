//! Offline training for the career classifier.
//!
//! Loads the labeled survey, optionally grows it into the expanded label
//! space, fits a random forest and writes one artifact set per variant:
//!
//! - `models/enhanced/`: expanded label space, served by default
//! - `models/basic/`: survey labels only, served in degraded mode
//!
//! # Module Structure
//!
//! - `config`: TOML configuration
//! - `split`: stratified train/test split
//! - `train`: staged training run and report
//! - `evaluate`: accuracy, feature importances and the results banner
//! - `save`: artifact set layout and staged persistence

pub mod config;
pub mod evaluate;
pub mod save;
pub mod split;
pub mod train;

pub use config::Config;
pub use evaluate::{print_report, FeatureImportance};
pub use save::{ArtifactHandles, ClassifierArtifact, Manifest, ModelVariant};
pub use split::stratified_split;
pub use train::{expand_to_csv, train, TrainingReport, TrainingStage};
