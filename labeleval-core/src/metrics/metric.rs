use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Label;

use super::{aggregate, derived, ranking, ConfusionCounts, MetricContext};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    #[serde(rename = "tp")]
    TruePositives,
    #[serde(rename = "fp")]
    FalsePositives,
    #[serde(rename = "tn")]
    TrueNegatives,
    #[serde(rename = "fn")]
    FalseNegatives,
    Precision,
    Recall,
    F1,
    Accuracy,
    BalancedErrorRate,
    AucRoc,
    AveragePrecision,
}

impl MetricKind {
    /// The kinds computed from confusion counts, valid for every target.
    pub const CONFUSION_KINDS: [MetricKind; 8] = [
        MetricKind::TruePositives,
        MetricKind::FalsePositives,
        MetricKind::TrueNegatives,
        MetricKind::FalseNegatives,
        MetricKind::Precision,
        MetricKind::Recall,
        MetricKind::F1,
        MetricKind::Accuracy,
    ];

    pub const PROBABILITY_KINDS: [MetricKind; 2] =
        [MetricKind::AucRoc, MetricKind::AveragePrecision];

    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::TruePositives => "tp",
            MetricKind::FalsePositives => "fp",
            MetricKind::TrueNegatives => "tn",
            MetricKind::FalseNegatives => "fn",
            MetricKind::Precision => "precision",
            MetricKind::Recall => "recall",
            MetricKind::F1 => "f1",
            MetricKind::Accuracy => "accuracy",
            MetricKind::BalancedErrorRate => "balanced-error-rate",
            MetricKind::AucRoc => "auc-roc",
            MetricKind::AveragePrecision => "average-precision",
        }
    }

    pub fn requires_probabilities(&self) -> bool {
        matches!(self, MetricKind::AucRoc | MetricKind::AveragePrecision)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a metric is computed for: one class, or an average over the whole domain.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
#[serde(rename_all = "camelCase")]
pub enum MetricTarget {
    Label(Label),
    MicroAverage,
    MacroAverage,
}

impl MetricTarget {
    pub fn label(&self) -> Option<&Label> {
        match self {
            MetricTarget::Label(label) => Some(label),
            _ => None,
        }
    }
}

impl From<Label> for MetricTarget {
    fn from(label: Label) -> Self {
        MetricTarget::Label(label)
    }
}

impl From<&str> for MetricTarget {
    fn from(label: &str) -> Self {
        MetricTarget::Label(label.into())
    }
}

impl fmt::Display for MetricTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricTarget::Label(label) => write!(f, "{}", label),
            MetricTarget::MicroAverage => f.write_str("average.micro"),
            MetricTarget::MacroAverage => f.write_str("average.macro"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct MetricId {
    pub kind: MetricKind,
    pub target: MetricTarget,
}

impl MetricId {
    pub fn new(kind: MetricKind, target: MetricTarget) -> Self {
        MetricId { kind, target }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind, self.target)
    }
}

pub trait Metric {
    fn compute(&self, context: &MetricContext) -> Result<f64>;
    fn get_name(&self) -> String;
}

impl Metric for MetricId {
    fn compute(&self, context: &MetricContext) -> Result<f64> {
        match self.kind {
            MetricKind::BalancedErrorRate => {
                Ok(derived::balanced_error_rate(context.confusion().counts()))
            }
            MetricKind::AucRoc => ranking::roc_auc(context.scored_outcomes(&self.target)?),
            MetricKind::AveragePrecision => {
                ranking::average_precision(context.scored_outcomes(&self.target)?)
            }
            kind => compute_confusion_metric(kind, &self.target, context),
        }
    }

    fn get_name(&self) -> String {
        self.to_string()
    }
}

fn count_metric(kind: MetricKind) -> fn(&ConfusionCounts) -> f64 {
    match kind {
        MetricKind::TruePositives => |c| c.tp as f64,
        MetricKind::FalsePositives => |c| c.fp as f64,
        MetricKind::TrueNegatives => |c| c.tn as f64,
        MetricKind::FalseNegatives => |c| c.fn_ as f64,
        MetricKind::Precision => derived::precision,
        MetricKind::Recall => derived::recall,
        MetricKind::F1 => derived::f1,
        _ => derived::accuracy,
    }
}

fn compute_confusion_metric(
    kind: MetricKind,
    target: &MetricTarget,
    context: &MetricContext,
) -> Result<f64> {
    let table = context.confusion();
    let metric = count_metric(kind);
    match target {
        MetricTarget::Label(label) => {
            let class = context.domain().index_of(label).ok_or_else(|| {
                Error::InvalidInput(format!("Label \"{}\" is not part of the domain", label))
            })?;
            Ok(metric(table.get(class)))
        }
        MetricTarget::MicroAverage => Ok(match kind {
            MetricKind::Accuracy => aggregate::overall_accuracy(table),
            _ => metric(&aggregate::micro_counts(table.counts())),
        }),
        MetricTarget::MacroAverage => Ok(aggregate::macro_average(table.counts(), metric)),
    }
}
