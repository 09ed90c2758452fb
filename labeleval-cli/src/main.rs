use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::command::Command;

mod command;
mod config;
mod evaluate;
mod gen_completions;
mod gen_schema;
mod logger;
mod report;

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Silence all output
    #[arg(long, default_value = "false", global = true)]
    quiet: bool,

    /// Increase log verbosity, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    fn from_path(path: &str) -> ConfigFormat {
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            ConfigFormat::Yaml
        } else {
            ConfigFormat::Json
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a predictions file against a model description
    Evaluate(evaluate::EvaluateArgs),
    /// Check or generate a model description
    Config(config::ConfigArgs),
    /// Generate JSON schema for the model description or predictions
    GenSchema(gen_schema::GenSchemaArgs),
    /// Generate shell completions
    GenCompletions(gen_completions::GenCompletionsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_log(logger::level_from_flags(cli.quiet, cli.verbose))?;
    match &cli.command {
        Commands::Evaluate(args) => evaluate::EvaluateCommand::execute(args, cli.quiet),
        Commands::Config(args) => config::ConfigCommand::execute(args, cli.quiet),
        Commands::GenSchema(args) => gen_schema::GenSchemaCommand::execute(args, cli.quiet),
        Commands::GenCompletions(args) => {
            gen_completions::GenCompletionsCommand::execute(args, cli.quiet)
        }
    }
}
