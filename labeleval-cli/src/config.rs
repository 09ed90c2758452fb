use clap::Args;
use labeleval_core::evaluation_config::EvaluationConfig;

use crate::{command::Command, ConfigFormat};

use anyhow::{Context, Result};

use clap::Subcommand;

#[derive(Args)]
pub(crate) struct ConfigCheckArgs {
    config: String,
}

#[derive(Args)]
pub(crate) struct ConfigNewArgs {
    /// Labels of the model's domain, in order
    #[arg(short, long, value_delimiter = ',', required = true)]
    labels: Vec<String>,

    /// The model emits a probability for every label
    #[arg(long)]
    probabilities: bool,

    #[arg(long, default_value = "json")]
    format: ConfigFormat,
}

#[derive(Subcommand)]
enum ConfigSubCommand {
    /// Check a model description for validity.
    Check(ConfigCheckArgs),
    /// Emit a model description for the given labels.
    New(ConfigNewArgs),
}

#[derive(Args)]
pub(crate) struct ConfigArgs {
    #[command(subcommand)]
    subcommand: ConfigSubCommand,
}

pub(crate) fn load_config(path: &str) -> Result<EvaluationConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path))?;
    let config = match ConfigFormat::from_path(path) {
        ConfigFormat::Json => EvaluationConfig::create_from_json(&contents),
        ConfigFormat::Yaml => EvaluationConfig::create_from_yaml(&contents),
    }
    .with_context(|| format!("Failed to parse configuration file {}", path))?;
    Ok(config)
}

pub(crate) struct ConfigCommand;

impl Command for ConfigCommand {
    type Args = ConfigArgs;
    fn execute(args: &ConfigArgs, quiet: bool) -> Result<()> {
        match &args.subcommand {
            ConfigSubCommand::Check(args) => {
                let config = load_config(&args.config)?;
                log::info!(
                    "{} labels, generates probabilities: {}",
                    config.label_domain()?.len(),
                    config.generates_probabilities()
                );
                if !quiet {
                    println!("ok");
                }
                Ok(())
            }
            ConfigSubCommand::New(args) => {
                let config = EvaluationConfig::new(args.labels.iter().cloned(), args.probabilities);
                // Catch duplicates before emitting something that would fail the check.
                config.label_domain()?;
                let text = match args.format {
                    ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
                    ConfigFormat::Yaml => serde_yaml::to_string(&config)?,
                };
                println!("{}", text);
                Ok(())
            }
        }
    }
}
