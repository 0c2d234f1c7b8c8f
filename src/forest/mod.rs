//! Random forest classifier
//! Bagged CART trees with per-split feature sub-sampling.
//!
//! Classes are indices into a label space owned by the caller; the forest
//! itself never sees label strings.

pub mod tree;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CareerError, Result};
use tree::{DecisionTree, TreeLimits};

/// Number of features considered at each split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    Sqrt,
    All,
    Count(usize),
}

impl MaxFeatures {
    fn resolve(self, n_features: usize) -> usize {
        let n = match self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt().floor() as usize,
            MaxFeatures::All => n_features,
            MaxFeatures::Count(n) => n,
        };
        n.clamp(1, n_features.max(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassWeight {
    Uniform,
    /// `n_samples / (n_classes * count(class))`.
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: MaxFeatures,
    pub bootstrap: bool,
    pub class_weight: ClassWeight,
}

impl Default for ForestParams {
    fn default() -> Self {
        ForestParams {
            n_trees: 200,
            max_depth: Some(15),
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: MaxFeatures::Sqrt,
            bootstrap: true,
            class_weight: ClassWeight::Balanced,
        }
    }
}

impl ForestParams {
    pub fn validate(&self) -> Result<()> {
        if self.n_trees == 0 {
            return Err(CareerError::Configuration("forest needs at least one tree".to_string()));
        }
        if self.min_samples_split < 2 {
            return Err(CareerError::Configuration(format!(
                "min_samples_split must be at least 2, got {}",
                self.min_samples_split
            )));
        }
        if self.min_samples_leaf == 0 {
            return Err(CareerError::Configuration("min_samples_leaf must be at least 1".to_string()));
        }
        if self.max_features == MaxFeatures::Count(0) {
            return Err(CareerError::Configuration("max_features must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    params: ForestParams,
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree>,
    importances: Vec<f64>,
}

impl RandomForest {
    /// Fit on rows of `x` with class indices `y` in `0..n_classes`.
    /// Same seed and inputs grow the same trees.
    pub fn fit(x: &Array2<f64>, y: &[usize], n_classes: usize, params: ForestParams, seed: u64) -> Result<Self> {
        params.validate()?;
        let (n_samples, n_features) = x.dim();
        if n_samples == 0 {
            return Err(CareerError::EmptyDataset("training matrix".to_string()));
        }
        if y.len() != n_samples {
            return Err(CareerError::Configuration(format!(
                "{} rows but {} labels",
                n_samples,
                y.len()
            )));
        }
        if let Some(bad) = y.iter().find(|&&c| c >= n_classes) {
            return Err(CareerError::Configuration(format!(
                "class index {} outside 0..{}",
                bad, n_classes
            )));
        }

        let weight = sample_weights(y, n_classes, params.class_weight);
        let limits = TreeLimits {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            min_samples_leaf: params.min_samples_leaf,
            max_features: params.max_features.resolve(n_features),
        };

        let mut rng = StdRng::seed_from_u64(seed);
        let mut trees = Vec::with_capacity(params.n_trees);
        let mut importances = vec![0.0; n_features];

        for t in 0..params.n_trees {
            let mut tree_rng = StdRng::seed_from_u64(rng.gen());
            let samples: Vec<usize> = if params.bootstrap {
                (0..n_samples).map(|_| tree_rng.gen_range(0..n_samples)).collect()
            } else {
                (0..n_samples).collect()
            };

            let (tree, raw) = DecisionTree::fit(x, y, &weight, samples, n_classes, limits, &mut tree_rng);

            let total: f64 = raw.iter().sum();
            if total > 0.0 {
                for (acc, r) in importances.iter_mut().zip(&raw) {
                    *acc += r / total;
                }
            }
            if t % 50 == 0 {
                debug!(tree = t, nodes = tree.node_count(), depth = tree.depth(), "grew tree");
            }
            trees.push(tree);
        }

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            importances.iter_mut().for_each(|v| *v /= total);
        }

        Ok(RandomForest {
            params,
            n_features,
            n_classes,
            trees,
            importances,
        })
    }

    fn check_width(&self, row: &[f64]) -> Result<()> {
        if row.len() != self.n_features {
            return Err(CareerError::SchemaMismatch {
                details: format!(
                    "feature vector has {} values, classifier expects {}",
                    row.len(),
                    self.n_features
                ),
            });
        }
        Ok(())
    }

    /// Mean of the trees' leaf distributions.
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>> {
        self.check_width(row)?;
        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (p, d) in proba.iter_mut().zip(tree.distribution(row)) {
                *p += d;
            }
        }
        let n = self.trees.len().max(1) as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        Ok(proba)
    }

    /// Most probable class; ties go to the lower index.
    pub fn predict(&self, row: &[f64]) -> Result<usize> {
        let proba = self.predict_proba(row)?;
        Ok(argmax(&proba))
    }

    pub fn predict_batch(&self, x: &Array2<f64>) -> Result<Vec<usize>> {
        x.rows()
            .into_iter()
            .map(|row| match row.as_slice() {
                Some(slice) => self.predict(slice),
                None => self.predict(&row.to_vec()),
            })
            .collect()
    }

    /// Mean decrease in impurity per feature, summing to one.
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    /// Structural check for forests read back from disk.
    pub fn is_consistent(&self) -> bool {
        !self.trees.is_empty()
            && self.importances.len() == self.n_features
            && self
                .trees
                .iter()
                .all(|t| t.is_consistent(self.n_features, self.n_classes))
    }
}

fn sample_weights(y: &[usize], n_classes: usize, class_weight: ClassWeight) -> Vec<f64> {
    match class_weight {
        ClassWeight::Uniform => vec![1.0; y.len()],
        ClassWeight::Balanced => {
            let mut counts = vec![0usize; n_classes];
            for &c in y {
                counts[c] += 1;
            }
            let n = y.len() as f64;
            y.iter()
                .map(|&c| n / (n_classes as f64 * counts[c] as f64))
                .collect()
        }
    }
}

pub(crate) fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &v)| if v > bv { (i, v) } else { (bi, bv) })
        .0
}
