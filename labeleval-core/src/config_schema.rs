use schemars::{
    schema::{RootSchema, SchemaObject},
    schema_for,
};

use crate::{evaluation_config::EvaluationConfig, types::Prediction};

pub struct ConfigSchema {
    schema: RootSchema,
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSchema {
    pub fn new() -> Self {
        let mut schema = schema_for!(EvaluationConfig);

        // Allow $schema to be set to anything
        let mut schema_schema: SchemaObject = SchemaObject::default();
        schema_schema.string().pattern = Some(".*".to_owned());
        schema
            .schema
            .object()
            .properties
            .insert("$schema".to_owned(), schema_schema.into());

        Self { schema }
    }

    pub fn schema(&self) -> &RootSchema {
        &self.schema
    }
}

/// Schema of a single line of a predictions file.
pub fn prediction_schema() -> RootSchema {
    schema_for!(Prediction)
}
