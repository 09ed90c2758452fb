use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::error::Result;
use crate::types::{ClassIndex, Label, LabelDomain, Prediction};

/// One-vs-rest counts for a single class, or pooled over several classes.
#[derive(Serialize, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub tp: u64,
    pub fp: u64,
    pub tn: u64,
    #[serde(rename = "fn")]
    pub fn_: u64,
}

impl ConfusionCounts {
    pub fn new(tp: u64, fp: u64, tn: u64, fn_: u64) -> Self {
        ConfusionCounts { tp, fp, tn, fn_ }
    }

    pub fn total(&self) -> u64 {
        self.tp + self.fp + self.tn + self.fn_
    }

    /// Number of instances whose true label is this class.
    pub fn support(&self) -> u64 {
        self.tp + self.fn_
    }
}

impl Add for ConfusionCounts {
    type Output = ConfusionCounts;

    fn add(self, rhs: Self) -> Self::Output {
        ConfusionCounts {
            tp: self.tp + rhs.tp,
            fp: self.fp + rhs.fp,
            tn: self.tn + rhs.tn,
            fn_: self.fn_ + rhs.fn_,
        }
    }
}

impl AddAssign for ConfusionCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<'a> Sum<&'a ConfusionCounts> for ConfusionCounts {
    fn sum<I: Iterator<Item = &'a ConfusionCounts>>(iter: I) -> Self {
        iter.fold(ConfusionCounts::default(), |acc, c| acc + *c)
    }
}

/// Per-class confusion counts, indexed by [`ClassIndex`] in domain order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfusionTable {
    counts: Vec<ConfusionCounts>,
    total: u64,
    correct: u64,
}

impl ConfusionTable {
    pub fn counts(&self) -> &[ConfusionCounts] {
        &self.counts
    }

    pub fn get(&self, class: ClassIndex) -> &ConfusionCounts {
        &self.counts[*class]
    }

    /// Number of predictions the table was built from.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of predictions where the predicted label equals the true label.
    pub fn correct(&self) -> u64 {
        self.correct
    }

    pub fn num_classes(&self) -> usize {
        self.counts.len()
    }
}

pub struct ConfusionAccumulator<'a> {
    domain: &'a LabelDomain,
    tp: Vec<u64>,
    predicted: Vec<u64>,
    actual: Vec<u64>,
    total: u64,
}

impl<'a> ConfusionAccumulator<'a> {
    pub fn new(domain: &'a LabelDomain) -> ConfusionAccumulator<'a> {
        ConfusionAccumulator {
            domain,
            tp: vec![0; domain.len()],
            predicted: vec![0; domain.len()],
            actual: vec![0; domain.len()],
            total: 0,
        }
    }

    /// Builds the table for a whole prediction set. Any label outside the domain fails the call.
    pub fn accumulate(domain: &LabelDomain, predictions: &[Prediction]) -> Result<ConfusionTable> {
        let mut accumulator = ConfusionAccumulator::new(domain);
        for prediction in predictions {
            accumulator.add_point(prediction)?;
        }
        Ok(accumulator.finish())
    }

    pub fn add_point(&mut self, prediction: &Prediction) -> Result<()> {
        // Validate both before touching any counter.
        let truth = self.domain.require_index(&prediction.true_label)?;
        let predicted = self.domain.require_index(&prediction.predicted_label)?;

        self.actual[*truth] += 1;
        self.predicted[*predicted] += 1;
        if truth == predicted {
            self.tp[*truth] += 1;
        }
        self.total += 1;
        Ok(())
    }

    /// TN_c = total - TP_c - FP_c - FN_c, so no per-class work is needed per prediction.
    pub fn finish(self) -> ConfusionTable {
        let total = self.total;
        let counts: Vec<ConfusionCounts> = (0..self.domain.len())
            .map(|c| {
                let tp = self.tp[c];
                let fp = self.predicted[c] - tp;
                let fn_ = self.actual[c] - tp;
                ConfusionCounts::new(tp, fp, total - tp - fp - fn_, fn_)
            })
            .collect();
        let correct = self.tp.iter().sum();

        ConfusionTable {
            counts,
            total,
            correct,
        }
    }
}

/// Sparse (true, predicted) cell counts. Only cells that were observed are stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfusionMatrix {
    domain: LabelDomain,
    cells: BTreeMap<(ClassIndex, ClassIndex), u64>,
}

impl ConfusionMatrix {
    pub fn from_predictions(domain: &LabelDomain, predictions: &[Prediction]) -> Result<Self> {
        let mut cells = BTreeMap::new();
        for prediction in predictions {
            let truth = domain.require_index(&prediction.true_label)?;
            let predicted = domain.require_index(&prediction.predicted_label)?;
            *cells.entry((truth, predicted)).or_insert(0) += 1;
        }
        Ok(ConfusionMatrix {
            domain: domain.clone(),
            cells,
        })
    }

    pub fn domain(&self) -> &LabelDomain {
        &self.domain
    }

    /// Number of instances of `truth` that were predicted as `predicted`.
    pub fn confusion(&self, predicted: &Label, truth: &Label) -> u64 {
        match (self.domain.index_of(truth), self.domain.index_of(predicted)) {
            (Some(t), Some(p)) => self.cells.get(&(t, p)).copied().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn support(&self, label: &Label) -> u64 {
        match self.domain.index_of(label) {
            Some(t) => self
                .cells
                .range((t, ClassIndex::from(0))..=(t, ClassIndex::from(usize::MAX)))
                .map(|(_, count)| count)
                .sum(),
            None => 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.cells.values().sum()
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .domain
            .iter()
            .map(|l| l.len())
            .chain(self.cells.values().map(|c| c.to_string().len()))
            .max()
            .unwrap_or(1)
            + 2;

        write!(f, "{:>width$}", "", width = width)?;
        for label in self.domain.iter() {
            write!(f, "{:>width$}", label.as_str(), width = width)?;
        }
        writeln!(f)?;

        for truth in self.domain.iter() {
            write!(f, "{:>width$}", truth.as_str(), width = width)?;
            for predicted in self.domain.iter() {
                write!(
                    f,
                    "{:>width$}",
                    self.confusion(predicted, truth),
                    width = width
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn predictions(pairs: &[(&str, &str)]) -> Vec<Prediction> {
        pairs.iter().map(|(t, p)| Prediction::new(*t, *p)).collect()
    }

    #[test]
    fn test_counts_sum_to_total() {
        let domain = LabelDomain::new(["a", "b", "c"]).unwrap();
        let preds = predictions(&[
            ("a", "a"),
            ("a", "b"),
            ("b", "b"),
            ("c", "a"),
            ("c", "c"),
            ("b", "c"),
        ]);
        let table = ConfusionAccumulator::accumulate(&domain, &preds).unwrap();
        for counts in table.counts() {
            assert_eq!(counts.total(), 6);
        }
        let tp_sum: u64 = table.counts().iter().map(|c| c.tp).sum();
        assert_eq!(tp_sum, table.correct());
        assert_eq!(table.correct(), 3);

        // class a: tp=1 (a,a); fp=1 (c,a); fn=1 (a,b)
        assert_eq!(*table.get(0.into()), ConfusionCounts::new(1, 1, 3, 1));
    }

    #[test]
    fn test_tn_excludes_true_and_predicted() {
        let domain = LabelDomain::new(["a", "b", "c"]).unwrap();
        let preds = predictions(&[("a", "b"), ("c", "c")]);
        let table = ConfusionAccumulator::accumulate(&domain, &preds).unwrap();
        // (a,b) is not a TN for a or b but is for c; (c,c) is a TN for a and b.
        assert_eq!(table.get(0.into()).tn, 1);
        assert_eq!(table.get(1.into()).tn, 1);
        assert_eq!(table.get(2.into()).tn, 1);
    }

    #[test]
    fn test_zero_support_class() {
        let domain = LabelDomain::new(["a", "b", "unseen"]).unwrap();
        let preds = predictions(&[("a", "a"), ("b", "a"), ("b", "b")]);
        let table = ConfusionAccumulator::accumulate(&domain, &preds).unwrap();
        assert_eq!(*table.get(2.into()), ConfusionCounts::new(0, 0, 3, 0));
    }

    #[test]
    fn test_label_outside_domain_fails() {
        let domain = LabelDomain::new(["a", "b"]).unwrap();
        let preds = predictions(&[("a", "a"), ("a", "z")]);
        let result = ConfusionAccumulator::accumulate(&domain, &preds);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_empty_predictions() {
        let domain = LabelDomain::new(["a", "b"]).unwrap();
        let table = ConfusionAccumulator::accumulate(&domain, &[]).unwrap();
        assert_eq!(table.total(), 0);
        assert!(table.counts().iter().all(|c| *c == ConfusionCounts::default()));
    }

    #[test]
    fn test_pooled_counts() {
        let counts = [ConfusionCounts::new(1, 2, 3, 4), ConfusionCounts::new(5, 6, 7, 8)];
        let pooled: ConfusionCounts = counts.iter().sum();
        assert_eq!(pooled, ConfusionCounts::new(6, 8, 10, 12));
    }

    #[test]
    fn test_confusion_matrix() {
        let domain = LabelDomain::new(["a", "b", "c"]).unwrap();
        let preds = predictions(&[("a", "a"), ("a", "b"), ("a", "b"), ("c", "a")]);
        let matrix = ConfusionMatrix::from_predictions(&domain, &preds).unwrap();
        assert_eq!(matrix.confusion(&"b".into(), &"a".into()), 2);
        assert_eq!(matrix.confusion(&"a".into(), &"c".into()), 1);
        assert_eq!(matrix.confusion(&"c".into(), &"c".into()), 0);
        assert_eq!(matrix.support(&"a".into()), 3);
        assert_eq!(matrix.support(&"b".into()), 0);
        assert_eq!(matrix.total(), 4);

        let rendered = matrix.to_string();
        assert_eq!(rendered.lines().count(), 4);
    }
}
