use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Label, LabelDomain};

/// What the evaluator needs to know about the model that produced the predictions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct EvaluationConfig {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    _schema: Option<String>,
    domain: Vec<Label>,
    #[serde(default)]
    generates_probabilities: bool,
}

impl EvaluationConfig {
    pub fn new<I, L>(domain: I, generates_probabilities: bool) -> EvaluationConfig
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        EvaluationConfig {
            _schema: None,
            domain: domain.into_iter().map(Into::into).collect(),
            generates_probabilities,
        }
    }

    pub fn create_from_json(json: &str) -> Result<EvaluationConfig> {
        let config: EvaluationConfig = serde_json::from_str(json).map_err(|e| {
            Error::InvalidConfiguration(format!("Failed to parse configuration: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn create_from_yaml(yaml: &str) -> Result<EvaluationConfig> {
        let json_from_yaml = serde_yaml::from_str::<serde_json::Value>(yaml)
            .map_err(|e| Error::InvalidConfiguration(format!("Failed to parse yaml: {e}")))?;
        let config: EvaluationConfig = serde_json::from_value(json_from_yaml).map_err(|e| {
            Error::InvalidConfiguration(format!("Failed to parse configuration: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.label_domain()
            .map(|_| ())
            .map_err(|e| Error::InvalidConfiguration(format!("Invalid domain: {e}")))
    }

    pub fn label_domain(&self) -> Result<LabelDomain> {
        LabelDomain::new(self.domain.iter().cloned())
    }

    pub fn generates_probabilities(&self) -> bool {
        self.generates_probabilities
    }
}
