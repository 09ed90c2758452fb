use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;

use crate::types::LabelDomain;

use super::{MetricId, MetricKind, MetricTarget};

pub static METRIC_REGISTRY: Lazy<BTreeMap<&'static str, MetricKind>> = Lazy::new(|| {
    MetricKind::CONFUSION_KINDS
        .iter()
        .chain(MetricKind::PROBABILITY_KINDS.iter())
        .chain([MetricKind::BalancedErrorRate].iter())
        .map(|kind| (kind.name(), *kind))
        .collect()
});

pub fn get_metric(name: &str) -> Option<MetricKind> {
    METRIC_REGISTRY.get(name).copied()
}

pub fn metric_names() -> impl Iterator<Item = &'static str> {
    METRIC_REGISTRY.keys().copied()
}

/// Every metric an evaluation of a model with this domain has to produce.
///
/// The set is ordered by kind, then by target with labels before the micro and macro averages.
/// Probability metrics are only included when the model generates probabilities.
pub fn create_metrics(domain: &LabelDomain, generates_probabilities: bool) -> BTreeSet<MetricId> {
    let mut metrics = BTreeSet::new();

    for label in domain.iter() {
        let target = MetricTarget::Label(label.clone());
        for kind in MetricKind::CONFUSION_KINDS {
            metrics.insert(MetricId::new(kind, target.clone()));
        }
        if generates_probabilities {
            for kind in MetricKind::PROBABILITY_KINDS {
                metrics.insert(MetricId::new(kind, target.clone()));
            }
        }
    }

    for target in [MetricTarget::MicroAverage, MetricTarget::MacroAverage] {
        for kind in MetricKind::CONFUSION_KINDS {
            metrics.insert(MetricId::new(kind, target.clone()));
        }
    }

    // Balanced error rate is the macro average of recalls, so it only exists for that target.
    metrics.insert(MetricId::new(
        MetricKind::BalancedErrorRate,
        MetricTarget::MacroAverage,
    ));

    metrics
}
