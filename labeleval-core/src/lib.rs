pub mod config_schema;
pub mod error;
pub mod evaluation;
pub mod evaluation_config;
pub mod evaluator;
pub mod metrics;
pub mod parsers;
pub mod types;

pub use evaluation::LabelEvaluation;
pub use evaluator::LabelEvaluator;
pub use types::*;
