//! # Career Predictor
//!
//! Career-role prediction from a questionnaire: answers are encoded into a
//! fixed numeric feature vector and classified by a random forest trained on
//! an expanded label space.
//!
//! ## Features
//!
//! - **Strict encoding**: every answer is checked against the schema the
//!   classifier was trained with; unknown categories and out-of-range ratings
//!   are errors, never silently defaulted
//! - **Label-space expansion**: survey roles are widened with related roles
//!   and synthetic profiles for roles the survey never covered
//! - **Reproducible training**: one seed drives expansion, split and forest
//! - **Degraded serving**: falls back to the survey-only model when the
//!   expanded model cannot be loaded, and says so
//!
//! ## Quick Start
//!
//! ### Training
//!
//! ```bash
//! career-predictor train --data data/mldata.csv --seed 42
//! ```
//!
//! ### Basic Usage
//!
//! ```no_run
//! use career_predictor::api::Predictor;
//! use career_predictor::QuestionnaireAnswer;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let predictor = Predictor::new()?;
//!
//!     let answer = QuestionnaireAnswer::load("answers.json")?;
//!     println!("Career: {}", predictor.predict(&answer)?);
//!
//!     for ranked in predictor.predict_ranked(&answer, 3)? {
//!         println!("  {} ({:.1}%)", ranked.label, ranked.probability * 100.0);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Error Handling
//!
//! ```no_run
//! use career_predictor::api::Predictor;
//! use career_predictor::QuestionnaireAnswer;
//!
//! let predictor = Predictor::new().expect("model artifacts");
//! let answer = QuestionnaireAnswer::new().with("certifications", "quantum basket weaving");
//!
//! match predictor.predict(&answer) {
//!     Ok(role) => println!("Career: {}", role),
//!     Err(e) if e.is_request_error() => eprintln!("Please check your answers: {}", e),
//!     Err(e) => panic!("model is unusable: {}", e),
//! }
//! ```
//!
//! ## Available Cargo Features
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `cli` | Include CLI binary | ✓ |
//!
//! ## Artifact Layout
//!
//! ```text
//! models/
//!   enhanced/  classifier.json schema.json labels.json manifest.json
//!   basic/     classifier.json schema.json labels.json manifest.json
//! ```
//!
//! ## Examples
//!
//! ```bash
//! cargo run --example simple
//! cargo run --example batch
//! ```

// Public API modules
pub mod api;
pub mod model_loader;

// Core modules
pub mod answers;
pub mod dataset;
pub mod encoder;
pub mod errors;
pub mod expansion;
pub mod forest;
pub mod questionnaire;
pub mod refine;
pub mod schema;
pub mod trainer;

#[cfg(feature = "cli")]
pub mod cli;

pub use answers::{AnswerValue, QuestionnaireAnswer};
pub use dataset::{load_dataset, Dataset, LabelSpace, LabelTier, LabeledRow};
pub use encoder::{encode, FeatureVector};
pub use errors::{CareerError, Result};
pub use expansion::{Expander, Expansion, ExpansionMap};
pub use questionnaire::{Questionnaire, QuestionKind};
pub use schema::EncodingSchema;
