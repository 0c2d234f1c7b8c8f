//! CART decision tree over weighted samples.
//! Splits minimise weighted Gini impurity on `feature <= threshold`.

use ndarray::Array2;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Leaf {
        /// Class probabilities, sums to one.
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Growth limits shared by every tree in a forest.
#[derive(Debug, Clone, Copy)]
pub struct TreeLimits {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

/// Training view shared by the recursive builder.
struct Fitting<'a, R: Rng> {
    x: &'a Array2<f64>,
    y: &'a [usize],
    weight: &'a [f64],
    n_classes: usize,
    limits: TreeLimits,
    rng: &'a mut R,
    nodes: Vec<Node>,
    importances: Vec<f64>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

fn gini(counts: &[f64], total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    1.0 - counts.iter().map(|c| (c / total).powi(2)).sum::<f64>()
}

impl DecisionTree {
    /// Grow a tree on the rows in `samples` (duplicates allowed, as produced
    /// by bootstrap draws). Returns the tree and its raw impurity decrease per
    /// feature.
    pub fn fit<R: Rng>(
        x: &Array2<f64>,
        y: &[usize],
        weight: &[f64],
        samples: Vec<usize>,
        n_classes: usize,
        limits: TreeLimits,
        rng: &mut R,
    ) -> (Self, Vec<f64>) {
        let mut fitting = Fitting {
            x,
            y,
            weight,
            n_classes,
            limits,
            rng,
            nodes: Vec::new(),
            importances: vec![0.0; x.ncols()],
        };
        fitting.grow(samples, 0);
        (
            DecisionTree {
                nodes: fitting.nodes,
            },
            fitting.importances,
        )
    }

    /// Class distribution of the leaf `row` falls into.
    pub fn distribution(&self, row: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: usize) -> usize {
            match &nodes[idx] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    /// Structural check used after deserialization.
    pub fn is_consistent(&self, n_features: usize, n_classes: usize) -> bool {
        !self.nodes.is_empty()
            && self.nodes.iter().enumerate().all(|(idx, node)| match node {
                Node::Leaf { distribution } => distribution.len() == n_classes,
                Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    *feature < n_features
                        && *left > idx
                        && *right > idx
                        && *left < self.nodes.len()
                        && *right < self.nodes.len()
                }
            })
    }
}

impl<'a, R: Rng> Fitting<'a, R> {
    fn class_weights(&self, samples: &[usize]) -> (Vec<f64>, f64) {
        let mut counts = vec![0.0; self.n_classes];
        for &s in samples {
            counts[self.y[s]] += self.weight[s];
        }
        let total = counts.iter().sum();
        (counts, total)
    }

    /// Append a node for `samples` and return its index. Children are always
    /// placed after their parent.
    fn grow(&mut self, samples: Vec<usize>, depth: usize) -> usize {
        let (counts, total) = self.class_weights(&samples);
        let impurity = gini(&counts, total);

        let depth_reached = self.limits.max_depth.is_some_and(|max| depth >= max);
        let split = if depth_reached
            || samples.len() < self.limits.min_samples_split
            || impurity <= 0.0
        {
            None
        } else {
            self.best_split(&samples, &counts, total, impurity)
        };

        let Some(split) = split else {
            return self.leaf(counts, total);
        };

        let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
            .iter()
            .partition(|&&s| self.x[[s, split.feature]] <= split.threshold);

        self.importances[split.feature] += split.gain;

        let idx = self.nodes.len();
        // placeholder until both children exist
        self.nodes.push(Node::Leaf {
            distribution: Vec::new(),
        });
        let left = self.grow(left_samples, depth + 1);
        let right = self.grow(right_samples, depth + 1);
        self.nodes[idx] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        idx
    }

    fn leaf(&mut self, counts: Vec<f64>, total: f64) -> usize {
        let distribution = if total > 0.0 {
            counts.iter().map(|c| c / total).collect()
        } else {
            vec![1.0 / self.n_classes as f64; self.n_classes]
        };
        self.nodes.push(Node::Leaf { distribution });
        self.nodes.len() - 1
    }

    fn best_split(
        &mut self,
        samples: &[usize],
        parent_counts: &[f64],
        parent_total: f64,
        parent_impurity: f64,
    ) -> Option<BestSplit> {
        let n_features = self.x.ncols();
        let candidates = index::sample(&mut *self.rng, n_features, self.limits.max_features.min(n_features));
        let min_leaf = self.limits.min_samples_leaf.max(1);

        let mut best: Option<BestSplit> = None;
        let mut order: Vec<usize> = samples.to_vec();

        for feature in candidates.iter() {
            order.sort_by(|&a, &b| self.x[[a, feature]].total_cmp(&self.x[[b, feature]]));

            let mut left = vec![0.0; self.n_classes];
            let mut left_total = 0.0;

            for i in 0..order.len() - 1 {
                let s = order[i];
                left[self.y[s]] += self.weight[s];
                left_total += self.weight[s];

                let here = self.x[[s, feature]];
                let next = self.x[[order[i + 1], feature]];
                if here == next {
                    continue;
                }
                let n_left = i + 1;
                if n_left < min_leaf || order.len() - n_left < min_leaf {
                    continue;
                }

                let right: Vec<f64> = parent_counts.iter().zip(&left).map(|(p, l)| p - l).collect();
                let right_total = parent_total - left_total;
                let child = gini(&left, left_total) * left_total + gini(&right, right_total) * right_total;
                let gain = parent_impurity * parent_total - child;

                if gain > 1e-12 && best.as_ref().map_or(true, |b| gain > b.gain) {
                    best = Some(BestSplit {
                        feature,
                        threshold: (here + next) / 2.0,
                        gain,
                    });
                }
            }
        }
        best
    }
}
