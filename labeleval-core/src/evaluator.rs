use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::evaluation::LabelEvaluation;
use crate::evaluation_config::EvaluationConfig;
use crate::metrics::{create_metrics, ConfusionMatrix, Metric, MetricContext};
use crate::types::{LabelDomain, Prediction};

/// Computes every metric [`create_metrics`] asks for over a set of predictions.
///
/// Holds no state, so one evaluator can be shared between threads evaluating different
/// prediction sets.
#[derive(Default, Clone, Copy, Debug)]
pub struct LabelEvaluator;

impl LabelEvaluator {
    pub fn new() -> Self {
        LabelEvaluator
    }

    pub fn evaluate(
        &self,
        config: &EvaluationConfig,
        predictions: &[Prediction],
    ) -> Result<LabelEvaluation> {
        let domain = config.label_domain()?;
        self.evaluate_with_domain(&domain, config.generates_probabilities(), predictions)
    }

    /// Fails as a whole on malformed input. A ranking metric that is undefined for one class
    /// is recorded for that class only and does not affect the others.
    pub fn evaluate_with_domain(
        &self,
        domain: &LabelDomain,
        generates_probabilities: bool,
        predictions: &[Prediction],
    ) -> Result<LabelEvaluation> {
        let context = MetricContext::new(domain, predictions, generates_probabilities)?;
        let metrics = create_metrics(domain, generates_probabilities);

        let mut values = BTreeMap::new();
        let mut undefined = BTreeMap::new();
        for id in metrics {
            match id.compute(&context) {
                Ok(value) => {
                    values.insert(id, value);
                }
                Err(Error::UndefinedMetric(reason)) => {
                    log::warn!("{} is undefined: {}", id, reason);
                    undefined.insert(id.clone(), reason);
                    values.insert(id, f64::NAN);
                }
                Err(e) => return Err(e),
            }
        }

        log::debug!(
            "Evaluated {} metrics over {} predictions and {} labels ({} undefined)",
            values.len(),
            predictions.len(),
            domain.len(),
            undefined.len()
        );

        let confusion_matrix = ConfusionMatrix::from_predictions(domain, predictions)?;
        Ok(LabelEvaluation::new(
            domain.clone(),
            values,
            undefined,
            confusion_matrix,
            context.into_scored_outcomes(),
        ))
    }
}
