use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for encoding, expansion, training and artifact loading.
#[derive(Debug, Error)]
pub enum CareerError {
    #[error("question '{question}' has no answer")]
    MissingAnswer { question: String },
    #[error("'{value}' is not a known category for '{question}'")]
    UnknownCategory { question: String, value: String },
    #[error("'{value}' is not a yes/no answer for '{question}'")]
    UnrecognizedBinaryValue { question: String, value: String },
    #[error("'{value}' is not a skill tier (poor/medium/excellent) for '{question}'")]
    UnrecognizedOrdinalValue { question: String, value: String },
    #[error("rating {value} for '{question}' is outside [{min}, {max}]")]
    OutOfRangeValue {
        question: String,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("rating for '{question}' is not an integer: '{value}'")]
    NonNumericRating { question: String, value: String },
    #[error("classifier and encoding schema disagree: {details}")]
    SchemaMismatch { details: String },
    #[error("label '{label}' has {count} rows, at least {required} are needed to stratify")]
    InsufficientSamplesForLabel {
        label: String,
        count: usize,
        required: usize,
    },
    #[error("failed to load artifact set at {}: {reason}", path.display())]
    ArtifactLoadFailure { path: PathBuf, reason: String },
    #[error("dataset '{0}' contains no rows")]
    EmptyDataset(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("training failed during {stage}: {source}")]
    TrainingFailed {
        stage: String,
        #[source]
        source: Box<CareerError>,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl CareerError {
    /// True for errors caused by a single bad answer set. These reject one
    /// request; everything else is a process-level failure.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            CareerError::MissingAnswer { .. }
                | CareerError::UnknownCategory { .. }
                | CareerError::UnrecognizedBinaryValue { .. }
                | CareerError::UnrecognizedOrdinalValue { .. }
                | CareerError::OutOfRangeValue { .. }
                | CareerError::NonNumericRating { .. }
        )
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CareerError>;
