use clap::Args;
use labeleval_core::config_schema::{prediction_schema, ConfigSchema};

use crate::command::Command;

use anyhow::Result;

#[derive(Args)]
pub(crate) struct GenSchemaArgs {
    /// Emit the schema of a predictions line instead of the model description
    #[arg(long)]
    predictions: bool,
}

pub(crate) struct GenSchemaCommand;

impl Command for GenSchemaCommand {
    type Args = GenSchemaArgs;
    fn execute(args: &GenSchemaArgs, _quiet: bool) -> Result<()> {
        let json = if args.predictions {
            serde_json::to_string_pretty(&prediction_schema())?
        } else {
            serde_json::to_string_pretty(ConfigSchema::new().schema())?
        };
        println!("{}", json);
        Ok(())
    }
}
