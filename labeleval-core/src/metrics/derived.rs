//! Ratios derived from a single set of confusion counts.
//!
//! Degenerate denominators are not errors: accuracy falls back to 1.0, everything else to 0.0.

use super::ConfusionCounts;

fn divide(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 {
        fallback
    } else {
        numerator / denominator
    }
}

pub fn accuracy(counts: &ConfusionCounts) -> f64 {
    divide((counts.tp + counts.tn) as f64, counts.total() as f64, 1.0)
}

pub fn precision(counts: &ConfusionCounts) -> f64 {
    divide(counts.tp as f64, (counts.tp + counts.fp) as f64, 0.0)
}

pub fn recall(counts: &ConfusionCounts) -> f64 {
    divide(counts.tp as f64, (counts.tp + counts.fn_) as f64, 0.0)
}

pub fn f1(counts: &ConfusionCounts) -> f64 {
    f1_from(precision(counts), recall(counts))
}

pub(crate) fn f1_from(precision: f64, recall: f64) -> f64 {
    divide(2.0 * precision * recall, precision + recall, 0.0)
}

/// 1 - unweighted mean of the per-class recalls.
pub fn balanced_error_rate(per_class: &[ConfusionCounts]) -> f64 {
    1.0 - super::aggregate::macro_average(per_class, recall)
}
