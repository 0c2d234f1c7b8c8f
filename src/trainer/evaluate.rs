//! Model evaluation and results reporting.

use serde::{Deserialize, Serialize};

use super::train::TrainingReport;

/// One feature's share of the forest's impurity decrease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Fraction of predictions equal to the truth. Empty input scores zero.
pub fn accuracy(predictions: &[usize], truth: &[usize]) -> f64 {
    if truth.is_empty() {
        return 0.0;
    }
    let correct = predictions.iter().zip(truth).filter(|(p, t)| p == t).count();
    correct as f64 / truth.len() as f64
}

/// The `k` most important features, highest first. Ties keep column order.
pub fn top_importances(names: &[String], importances: &[f64], k: usize) -> Vec<FeatureImportance> {
    let mut ranked: Vec<FeatureImportance> = names
        .iter()
        .zip(importances)
        .map(|(name, &importance)| FeatureImportance {
            feature: name.clone(),
            importance,
        })
        .collect();
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    ranked.truncate(k);
    ranked
}

/// Print formatted training results.
pub fn print_report(report: &TrainingReport) {
    println!("===================================================================\n");
    println!("Training Results ({:?})\n", report.variant);
    println!("  Rows:    {} ({} train / {} test)", report.rows, report.train_rows, report.test_rows);
    println!("  Labels:  {}", report.labels);
    if let Some(summary) = &report.expansion {
        println!(
            "  Expanded from {} rows / {} labels (+{} derived, +{} synthetic)",
            summary.original_rows, summary.original_labels, summary.derived_rows, summary.synthetic_rows
        );
    }
    println!();

    println!("+--------------------------------------------+----------+");
    println!("| Split                                      | Accuracy |");
    println!("+--------------------------------------------+----------+");
    println!("| Training set                               | {:>6.2}%  |", report.train_accuracy * 100.0);
    println!("| Test set                                   | {:>6.2}%  |", report.test_accuracy * 100.0);
    println!("+--------------------------------------------+----------+\n");

    if !report.top_importances.is_empty() {
        println!("Top {} features:", report.top_importances.len());
        for (rank, item) in report.top_importances.iter().enumerate() {
            println!("  {:>2}. {:<45} {:.4}", rank + 1, item.feature, item.importance);
        }
        println!();
    }

    println!("✓ Artifacts saved:");
    println!("  - {}", report.artifacts.classifier.display());
    println!("  - {}", report.artifacts.schema.display());
    println!("  - {}", report.artifacts.labels.display());
    println!("  - {}", report.artifacts.manifest.display());
    println!("\n===================================================================\n");
}
