use crate::error::{Error, Result};
use crate::types::{LabelDomain, Prediction};

use super::{ConfusionAccumulator, ConfusionTable, MetricTarget};

/// Everything a metric needs, derived once per evaluation from the predictions.
pub struct MetricContext<'a> {
    domain: &'a LabelDomain,
    confusion: ConfusionTable,
    // Indexed by class, one (score, is_positive) pair per prediction.
    scored_outcomes: Option<Vec<Vec<(f64, bool)>>>,
}

impl<'a> MetricContext<'a> {
    pub fn new(
        domain: &'a LabelDomain,
        predictions: &[Prediction],
        generates_probabilities: bool,
    ) -> Result<MetricContext<'a>> {
        let confusion = ConfusionAccumulator::accumulate(domain, predictions)?;
        let scored_outcomes = if generates_probabilities {
            Some(collect_scored_outcomes(domain, predictions)?)
        } else {
            None
        };

        Ok(MetricContext {
            domain,
            confusion,
            scored_outcomes,
        })
    }

    pub fn domain(&self) -> &LabelDomain {
        self.domain
    }

    pub fn confusion(&self) -> &ConfusionTable {
        &self.confusion
    }

    pub fn has_scores(&self) -> bool {
        self.scored_outcomes.is_some()
    }

    pub fn into_scored_outcomes(self) -> Option<Vec<Vec<(f64, bool)>>> {
        self.scored_outcomes
    }

    pub fn scored_outcomes(&self, target: &MetricTarget) -> Result<&[(f64, bool)]> {
        let label = target.label().ok_or_else(|| {
            Error::InvalidInput(format!(
                "Probability metrics are only computed per label, not for {}",
                target
            ))
        })?;
        let class = self.domain.require_index(label)?;
        let outcomes = self.scored_outcomes.as_ref().ok_or_else(|| {
            Error::InvalidInput("The model does not generate probabilities".to_owned())
        })?;
        Ok(&outcomes[*class])
    }
}

fn collect_scored_outcomes(
    domain: &LabelDomain,
    predictions: &[Prediction],
) -> Result<Vec<Vec<(f64, bool)>>> {
    let mut outcomes = vec![Vec::with_capacity(predictions.len()); domain.len()];

    for (i, prediction) in predictions.iter().enumerate() {
        let scores = prediction.scores.as_ref().ok_or_else(|| {
            Error::InvalidInput(format!("Prediction {} has no scores", i))
        })?;
        if let Some(foreign) = scores.keys().find(|label| !domain.contains(label)) {
            return Err(Error::InvalidInput(format!(
                "Prediction {} has a score for label \"{}\" which is not part of the domain",
                i, foreign
            )));
        }

        for (class, label) in domain.iter().enumerate() {
            let score = *scores.get(label).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "Prediction {} is missing a score for label \"{}\"",
                    i, label
                ))
            })?;
            if !score.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "Prediction {} has a non-finite score for label \"{}\"",
                    i, label
                )));
            }
            outcomes[class].push((score, &prediction.true_label == label));
        }
    }
    Ok(outcomes)
}
