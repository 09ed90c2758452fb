use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;

use crate::error::{Error, Result};
use crate::metrics::{
    ranking::{self, PrecisionRecallCurve, RocCurve},
    ConfusionMatrix, MetricId, MetricKind, MetricTarget,
};
use crate::types::{Label, LabelDomain};

/// Result of evaluating one set of predictions. Built once by the evaluator and never mutated.
///
/// Ranking metrics that could not be computed for a class are stored as NaN and listed in
/// [`LabelEvaluation::undefined`] together with the reason.
#[derive(Debug, Clone)]
pub struct LabelEvaluation {
    domain: LabelDomain,
    values: BTreeMap<MetricId, f64>,
    undefined: BTreeMap<MetricId, String>,
    confusion_matrix: ConfusionMatrix,
    scored_outcomes: Option<Vec<Vec<(f64, bool)>>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricRecord<'a> {
    metric: MetricKind,
    target: String,
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    undefined_reason: Option<&'a str>,
}

impl LabelEvaluation {
    pub(crate) fn new(
        domain: LabelDomain,
        values: BTreeMap<MetricId, f64>,
        undefined: BTreeMap<MetricId, String>,
        confusion_matrix: ConfusionMatrix,
        scored_outcomes: Option<Vec<Vec<(f64, bool)>>>,
    ) -> Self {
        LabelEvaluation {
            domain,
            values,
            undefined,
            confusion_matrix,
            scored_outcomes,
        }
    }

    pub fn domain(&self) -> &LabelDomain {
        &self.domain
    }

    pub fn values(&self) -> &BTreeMap<MetricId, f64> {
        &self.values
    }

    pub fn undefined(&self) -> &BTreeMap<MetricId, String> {
        &self.undefined
    }

    pub fn get(&self, id: &MetricId) -> Option<f64> {
        self.values.get(id).copied()
    }

    pub fn get_metric(&self, kind: MetricKind, target: MetricTarget) -> Option<f64> {
        self.get(&MetricId::new(kind, target))
    }

    pub fn is_undefined(&self, id: &MetricId) -> bool {
        self.undefined.contains_key(id)
    }

    pub fn confusion_matrix(&self) -> &ConfusionMatrix {
        &self.confusion_matrix
    }

    pub fn generates_probabilities(&self) -> bool {
        self.scored_outcomes.is_some()
    }

    /// Fraction of predictions that were correct.
    pub fn accuracy(&self) -> Option<f64> {
        self.get_metric(MetricKind::Accuracy, MetricTarget::MicroAverage)
    }

    pub fn accuracy_for(&self, label: &Label) -> Option<f64> {
        self.get_metric(MetricKind::Accuracy, label.clone().into())
    }

    pub fn precision(&self, label: &Label) -> Option<f64> {
        self.get_metric(MetricKind::Precision, label.clone().into())
    }

    pub fn recall(&self, label: &Label) -> Option<f64> {
        self.get_metric(MetricKind::Recall, label.clone().into())
    }

    pub fn f1(&self, label: &Label) -> Option<f64> {
        self.get_metric(MetricKind::F1, label.clone().into())
    }

    pub fn micro_averaged_precision(&self) -> Option<f64> {
        self.get_metric(MetricKind::Precision, MetricTarget::MicroAverage)
    }

    pub fn micro_averaged_recall(&self) -> Option<f64> {
        self.get_metric(MetricKind::Recall, MetricTarget::MicroAverage)
    }

    pub fn micro_averaged_f1(&self) -> Option<f64> {
        self.get_metric(MetricKind::F1, MetricTarget::MicroAverage)
    }

    pub fn macro_averaged_precision(&self) -> Option<f64> {
        self.get_metric(MetricKind::Precision, MetricTarget::MacroAverage)
    }

    pub fn macro_averaged_recall(&self) -> Option<f64> {
        self.get_metric(MetricKind::Recall, MetricTarget::MacroAverage)
    }

    pub fn macro_averaged_f1(&self) -> Option<f64> {
        self.get_metric(MetricKind::F1, MetricTarget::MacroAverage)
    }

    pub fn balanced_error_rate(&self) -> Option<f64> {
        self.get_metric(MetricKind::BalancedErrorRate, MetricTarget::MacroAverage)
    }

    /// `None` when the model does not generate probabilities or the value is undefined.
    pub fn auc_roc(&self, label: &Label) -> Option<f64> {
        self.get_metric(MetricKind::AucRoc, label.clone().into())
            .filter(|v| !v.is_nan())
    }

    pub fn average_precision(&self, label: &Label) -> Option<f64> {
        self.get_metric(MetricKind::AveragePrecision, label.clone().into())
            .filter(|v| !v.is_nan())
    }

    /// Mean ROC-AUC over the classes where it is defined, optionally weighted by class support.
    pub fn average_auc_roc(&self, weighted: bool) -> Option<f64> {
        let (sum, weight) = self
            .domain
            .iter()
            .filter_map(|label| {
                let auc = self.auc_roc(label)?;
                let weight = if weighted {
                    self.confusion_matrix.support(label) as f64
                } else {
                    1.0
                };
                Some((auc * weight, weight))
            })
            .fold((0.0, 0.0), |(s, w), (a, b)| (s + a, w + b));

        if weight == 0.0 {
            None
        } else {
            Some(sum / weight)
        }
    }

    fn outcomes_for(&self, label: &Label) -> Result<&[(f64, bool)]> {
        let class = self.domain.require_index(label)?;
        let outcomes = self.scored_outcomes.as_ref().ok_or_else(|| {
            Error::InvalidInput("The model does not generate probabilities".to_owned())
        })?;
        Ok(&outcomes[*class])
    }

    pub fn roc_curve(&self, label: &Label) -> Result<RocCurve> {
        ranking::roc_curve(self.outcomes_for(label)?)
    }

    pub fn precision_recall_curve(&self, label: &Label) -> Result<PrecisionRecallCurve> {
        ranking::precision_recall_curve(self.outcomes_for(label)?)
    }

    pub fn to_json(&self) -> serde_json::Value {
        let metrics: Vec<MetricRecord> = self
            .values
            .iter()
            .map(|(id, value)| MetricRecord {
                metric: id.kind,
                target: id.target.to_string(),
                value: *value,
                undefined_reason: self.undefined.get(id).map(String::as_str),
            })
            .collect();
        let undefined: Vec<String> = self.undefined.keys().map(MetricId::to_string).collect();
        json!({
            "domain": self.domain.labels(),
            "metrics": metrics,
            "undefined": undefined,
        })
    }
}
