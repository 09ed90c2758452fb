use std::{fs::File, io};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use labeleval_core::{
    metrics::{get_metric, metric_names, MetricKind},
    parsers::{read_predictions, JsonLinesParser},
    LabelEvaluator,
};
use owo_colors::OwoColorize;

use crate::{command::Command, config::load_config, report};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

#[derive(Args)]
pub(crate) struct EvaluateArgs {
    /// Model description (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long)]
    config: String,

    /// Predictions in JSON lines format
    #[arg(short, long)]
    data: String,

    #[arg(long)]
    #[arg(default_value = "table")]
    format: OutputFormat,

    /// Metrics to show, by name. Defaults to all of them
    #[arg(short, long, value_delimiter = ',')]
    metrics: Option<Vec<String>>,

    /// Also print the confusion matrix
    #[arg(long)]
    confusion_matrix: bool,
}

fn selected_metrics(names: &Option<Vec<String>>) -> Result<Option<Vec<MetricKind>>> {
    let names = match names {
        Some(names) => names,
        None => return Ok(None),
    };
    let mut kinds = Vec::with_capacity(names.len());
    for name in names {
        match get_metric(name) {
            Some(kind) => kinds.push(kind),
            None => bail!(
                "Metric \"{}\" does not exist. Available metrics are: {}",
                name,
                metric_names().collect::<Vec<_>>().join(", ")
            ),
        }
    }
    Ok(Some(kinds))
}

pub(crate) struct EvaluateCommand;

impl Command for EvaluateCommand {
    type Args = EvaluateArgs;
    fn execute(args: &EvaluateArgs, quiet: bool) -> Result<()> {
        let kinds = selected_metrics(&args.metrics)?;
        let config = load_config(&args.config)?;

        let file = File::open(&args.data)
            .with_context(|| format!("Failed to open predictions file {}", args.data))?;
        let mut input = io::BufReader::new(file);
        let predictions = read_predictions(&JsonLinesParser, &mut input)
            .with_context(|| format!("Failed to read predictions file {}", args.data))?;
        log::info!("Read {} predictions from {}", predictions.len(), args.data);

        let evaluation = LabelEvaluator::new()
            .evaluate(&config, &predictions)
            .context("Evaluation failed")?;

        if !quiet && !evaluation.undefined().is_empty() {
            eprintln!(
                "{}: {} metrics are undefined, see the log for details",
                "warning".yellow().bold(),
                evaluation.undefined().len()
            );
        }

        match args.format {
            OutputFormat::Table => {
                print!("{}", report::metrics_table(&evaluation, kinds.as_deref()));
                if let Some(ber) = evaluation.balanced_error_rate() {
                    let show = kinds
                        .as_ref()
                        .map_or(true, |k| k.contains(&MetricKind::BalancedErrorRate));
                    if show {
                        println!();
                        println!("Balanced error rate: {:.4}", ber);
                    }
                }
                if args.confusion_matrix {
                    println!();
                    print!("{}", report::confusion_table(evaluation.confusion_matrix()));
                }
            }
            OutputFormat::Json => {
                let mut json = report::filter_json(evaluation.to_json(), kinds.as_deref());
                if args.confusion_matrix {
                    json["confusionMatrix"] = report::confusion_json(evaluation.confusion_matrix());
                }
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
        Ok(())
    }
}
