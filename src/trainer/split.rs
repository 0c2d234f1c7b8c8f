//! Stratified train/test split.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

use crate::errors::{CareerError, Result};

/// Rows a label needs to appear on both sides of the split.
pub const MIN_ROWS_PER_LABEL: usize = 2;

/// Row indices on each side of a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split row indices so every label lands in both halves, holding out
/// roughly `test_fraction` of each label.
pub fn stratified_split<S: AsRef<str>>(labels: &[S], test_fraction: f64, seed: u64) -> Result<Split> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        groups.entry(label.as_ref()).or_default().push(idx);
    }

    if let Some((label, rows)) = groups.iter().find(|(_, rows)| rows.len() < MIN_ROWS_PER_LABEL) {
        return Err(CareerError::InsufficientSamplesForLabel {
            label: label.to_string(),
            count: rows.len(),
            required: MIN_ROWS_PER_LABEL,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for rows in groups.values_mut() {
        rows.shuffle(&mut rng);
        let n_test = ((rows.len() as f64 * test_fraction).round() as usize).clamp(1, rows.len() - 1);
        test.extend_from_slice(&rows[..n_test]);
        train.extend_from_slice(&rows[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok(Split { train, test })
}
