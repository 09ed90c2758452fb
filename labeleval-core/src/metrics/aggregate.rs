use super::{derived, ConfusionCounts, ConfusionTable};

/// Sums the counts of every class into one pooled set.
pub fn micro_counts(per_class: &[ConfusionCounts]) -> ConfusionCounts {
    per_class.iter().sum()
}

/// Unweighted mean of `metric` over all classes. Zero-support classes are included.
pub fn macro_average<F>(per_class: &[ConfusionCounts], metric: F) -> f64
where
    F: Fn(&ConfusionCounts) -> f64,
{
    if per_class.is_empty() {
        return 0.0;
    }
    per_class.iter().map(metric).sum::<f64>() / per_class.len() as f64
}

/// Fraction of all predictions that were correct, 1.0 on an empty set.
///
/// This is what the micro target reports for accuracy. Pooling one-vs-rest TN over every
/// class would count each correct prediction |domain| - 1 times as a negative.
pub fn overall_accuracy(table: &ConfusionTable) -> f64 {
    if table.total() == 0 {
        1.0
    } else {
        table.correct() as f64 / table.total() as f64
    }
}

pub fn micro_precision(table: &ConfusionTable) -> f64 {
    derived::precision(&micro_counts(table.counts()))
}

pub fn micro_recall(table: &ConfusionTable) -> f64 {
    derived::recall(&micro_counts(table.counts()))
}

pub fn micro_f1(table: &ConfusionTable) -> f64 {
    derived::f1(&micro_counts(table.counts()))
}
