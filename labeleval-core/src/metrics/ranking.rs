//! Probability based metrics for a single class in the one-vs-rest view.
//!
//! Input is one `(score, is_positive)` pair per prediction, where `score` is the probability the
//! model assigned to the class and `is_positive` says whether the true label is that class.
//! Equal scores are treated as one threshold, so the result does not depend on the input order.

use itertools::Itertools;
use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RocCurve {
    pub false_positive_rate: Vec<f64>,
    pub true_positive_rate: Vec<f64>,
    /// `thresholds[i]` is the lowest score counted as positive at point `i`. The first point is
    /// the origin and uses +inf.
    pub thresholds: Vec<f64>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PrecisionRecallCurve {
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
    pub thresholds: Vec<f64>,
}

/// Cumulative counts after including every instance scored at or above `threshold`.
struct Step {
    threshold: f64,
    tp: u64,
    fp: u64,
}

struct Sweep {
    steps: Vec<Step>,
    positives: u64,
    negatives: u64,
}

fn sweep(outcomes: &[(f64, bool)]) -> Result<Sweep> {
    if let Some((score, _)) = outcomes.iter().find(|(score, _)| !score.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "Scores must be finite, found {}",
            score
        )));
    }

    let mut sorted = outcomes.to_vec();
    sorted.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut steps = Vec::new();
    let (mut tp, mut fp) = (0, 0);
    for (threshold, group) in &sorted.iter().group_by(|(score, _)| *score) {
        for (_, positive) in group {
            if *positive {
                tp += 1;
            } else {
                fp += 1;
            }
        }
        steps.push(Step { threshold, tp, fp });
    }

    Ok(Sweep {
        steps,
        positives: tp,
        negatives: fp,
    })
}

fn require_both_classes(sweep: &Sweep, metric: &str) -> Result<()> {
    match (sweep.positives, sweep.negatives) {
        (0, _) => Err(Error::UndefinedMetric(format!(
            "{} requires at least one positive instance",
            metric
        ))),
        (_, 0) => Err(Error::UndefinedMetric(format!(
            "{} requires at least one negative instance",
            metric
        ))),
        _ => Ok(()),
    }
}

pub fn roc_curve(outcomes: &[(f64, bool)]) -> Result<RocCurve> {
    let sweep = sweep(outcomes)?;
    require_both_classes(&sweep, "ROC curve")?;

    let positives = sweep.positives as f64;
    let negatives = sweep.negatives as f64;

    let mut curve = RocCurve {
        false_positive_rate: Vec::with_capacity(sweep.steps.len() + 1),
        true_positive_rate: Vec::with_capacity(sweep.steps.len() + 1),
        thresholds: Vec::with_capacity(sweep.steps.len() + 1),
    };
    curve.false_positive_rate.push(0.0);
    curve.true_positive_rate.push(0.0);
    curve.thresholds.push(f64::INFINITY);
    for step in sweep.steps {
        curve.false_positive_rate.push(step.fp as f64 / negatives);
        curve.true_positive_rate.push(step.tp as f64 / positives);
        curve.thresholds.push(step.threshold);
    }
    Ok(curve)
}

/// Trapezoidal area under the ROC curve.
pub fn roc_auc(outcomes: &[(f64, bool)]) -> Result<f64> {
    let curve = roc_curve(outcomes)?;
    Ok(trapezoid(&curve.false_positive_rate, &curve.true_positive_rate))
}

fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    x.iter()
        .zip(y.iter())
        .tuple_windows()
        .map(|((x0, y0), (x1, y1))| (x1 - x0) * (y0 + y1) / 2.0)
        .sum()
}

pub fn precision_recall_curve(outcomes: &[(f64, bool)]) -> Result<PrecisionRecallCurve> {
    let sweep = sweep(outcomes)?;
    if sweep.positives == 0 {
        return Err(Error::UndefinedMetric(
            "Precision-recall curve requires at least one positive instance".to_owned(),
        ));
    }

    let positives = sweep.positives as f64;
    let mut curve = PrecisionRecallCurve {
        precision: Vec::with_capacity(sweep.steps.len()),
        recall: Vec::with_capacity(sweep.steps.len()),
        thresholds: Vec::with_capacity(sweep.steps.len()),
    };
    for step in sweep.steps {
        curve
            .precision
            .push(step.tp as f64 / (step.tp + step.fp) as f64);
        curve.recall.push(step.tp as f64 / positives);
        curve.thresholds.push(step.threshold);
    }
    Ok(curve)
}

/// Step-interpolated area under the precision-recall curve: the precision at each threshold
/// weighted by the recall gained there. Without ties this is the mean precision at the rank of
/// every positive.
pub fn average_precision(outcomes: &[(f64, bool)]) -> Result<f64> {
    let sweep = sweep(outcomes)?;
    require_both_classes(&sweep, "Average precision")?;

    let positives = sweep.positives as f64;
    let mut previous_tp = 0;
    let mut total = 0.0;
    for step in &sweep.steps {
        if step.tp > previous_tp {
            let precision = step.tp as f64 / (step.tp + step.fp) as f64;
            total += (step.tp - previous_tp) as f64 / positives * precision;
            previous_tp = step.tp;
        }
    }
    Ok(total)
}
