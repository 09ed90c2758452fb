use std::collections::{BTreeMap, HashMap};
use std::ops::Deref;

use derive_more::Display;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

macro_rules! impl_extra_traits {
    ($structname: ident, $inner_type: ident ) => {
        impl From<$inner_type> for $structname {
            fn from(value: $inner_type) -> Self {
                $structname(value)
            }
        }

        impl Deref for $structname {
            type Target = $inner_type;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<$structname> for $inner_type {
            fn from(value: $structname) -> Self {
                value.0
            }
        }
    };
}

/// Class identifier as known to the model.
#[derive(
    Serialize, Deserialize, JsonSchema, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Debug,
)]
#[serde(transparent)]
pub struct Label(String);
impl_extra_traits!(Label, String);

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label(value.to_owned())
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Position of a label inside its [`LabelDomain`].
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct ClassIndex(usize);
impl_extra_traits!(ClassIndex, usize);

/// Ordered set of distinct labels. Iteration order is the order the labels were supplied in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelDomain {
    labels: Vec<Label>,
    index: HashMap<Label, ClassIndex>,
}

impl LabelDomain {
    pub fn new<I, L>(labels: I) -> Result<LabelDomain>
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        let mut domain = LabelDomain {
            labels: Vec::new(),
            index: HashMap::new(),
        };
        for label in labels {
            let label = label.into();
            if domain.index.contains_key(&label) {
                return Err(Error::InvalidInput(format!(
                    "Label \"{}\" appears more than once in the domain",
                    label
                )));
            }
            domain
                .index
                .insert(label.clone(), domain.labels.len().into());
            domain.labels.push(label);
        }

        if domain.labels.is_empty() {
            return Err(Error::InvalidInput(
                "Label domain must contain at least one label".to_owned(),
            ));
        }
        Ok(domain)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    pub fn contains(&self, label: &Label) -> bool {
        self.index.contains_key(label)
    }

    pub fn index_of(&self, label: &Label) -> Option<ClassIndex> {
        self.index.get(label).copied()
    }

    /// Like [`LabelDomain::index_of`] but treats a foreign label as invalid input.
    pub fn require_index(&self, label: &Label) -> Result<ClassIndex> {
        self.index_of(label).ok_or_else(|| {
            Error::InvalidInput(format!("Label \"{}\" is not part of the domain", label))
        })
    }

    pub fn label(&self, index: ClassIndex) -> &Label {
        &self.labels[*index]
    }
}

/// A single materialized prediction. `scores` maps each label of the domain to the
/// probability the model assigned to it and is only consulted for probability metrics.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Prediction {
    pub true_label: Label,
    pub predicted_label: Label,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<BTreeMap<Label, f64>>,
}

impl Prediction {
    pub fn new<T: Into<Label>, P: Into<Label>>(true_label: T, predicted_label: P) -> Self {
        Prediction {
            true_label: true_label.into(),
            predicted_label: predicted_label.into(),
            scores: None,
        }
    }

    pub fn with_scores<I, L>(mut self, scores: I) -> Self
    where
        I: IntoIterator<Item = (L, f64)>,
        L: Into<Label>,
    {
        self.scores = Some(scores.into_iter().map(|(l, s)| (l.into(), s)).collect());
        self
    }

    pub fn is_correct(&self) -> bool {
        self.true_label == self.predicted_label
    }
}
