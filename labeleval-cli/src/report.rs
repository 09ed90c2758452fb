use labeleval_core::{
    metrics::{ConfusionMatrix, MetricKind, MetricTarget},
    LabelEvaluation,
};
use prettytable::{format, Cell, Row, Table};
use serde_json::{json, Value};

fn is_count(kind: MetricKind) -> bool {
    matches!(
        kind,
        MetricKind::TruePositives
            | MetricKind::FalsePositives
            | MetricKind::TrueNegatives
            | MetricKind::FalseNegatives
    )
}

fn format_value(kind: MetricKind, target: &MetricTarget, value: f64) -> String {
    if value.is_nan() {
        "undefined".to_owned()
    } else if is_count(kind) && *target != MetricTarget::MacroAverage {
        format!("{}", value as u64)
    } else {
        format!("{:.4}", value)
    }
}

/// One row per label followed by the micro and macro averages, one column per metric kind.
/// Balanced error rate is not part of the table since it has a single value.
pub(crate) fn metrics_table(evaluation: &LabelEvaluation, kinds: Option<&[MetricKind]>) -> Table {
    let mut columns: Vec<MetricKind> = MetricKind::CONFUSION_KINDS.to_vec();
    if evaluation.generates_probabilities() {
        columns.extend(MetricKind::PROBABILITY_KINDS);
    }
    if let Some(kinds) = kinds {
        columns.retain(|k| kinds.contains(k));
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(
        std::iter::once(Cell::new("target"))
            .chain(columns.iter().map(|k| Cell::new(k.name())))
            .collect(),
    ));

    let targets = evaluation
        .domain()
        .iter()
        .map(|l| MetricTarget::Label(l.clone()))
        .chain([MetricTarget::MicroAverage, MetricTarget::MacroAverage]);
    for target in targets {
        let mut cells = vec![Cell::new(&target.to_string())];
        for kind in &columns {
            let text = match evaluation.get_metric(*kind, target.clone()) {
                Some(value) => format_value(*kind, &target, value),
                None => String::new(),
            };
            cells.push(Cell::new(&text));
        }
        table.add_row(Row::new(cells));
    }
    table
}

pub(crate) fn confusion_table(matrix: &ConfusionMatrix) -> Table {
    let domain = matrix.domain();
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(
        std::iter::once(Cell::new("truth \\ predicted"))
            .chain(domain.iter().map(|l| Cell::new(l.as_str())))
            .collect(),
    ));
    for truth in domain.iter() {
        let mut cells = vec![Cell::new(truth.as_str())];
        for predicted in domain.iter() {
            cells.push(Cell::new(&matrix.confusion(predicted, truth).to_string()));
        }
        table.add_row(Row::new(cells));
    }
    table
}

pub(crate) fn confusion_json(matrix: &ConfusionMatrix) -> Value {
    let domain = matrix.domain();
    let rows: Vec<Vec<u64>> = domain
        .iter()
        .map(|truth| {
            domain
                .iter()
                .map(|predicted| matrix.confusion(predicted, truth))
                .collect()
        })
        .collect();
    json!({
        "labels": domain.labels(),
        "rows": rows,
    })
}

pub(crate) fn filter_json(mut json: Value, kinds: Option<&[MetricKind]>) -> Value {
    if let Some(kinds) = kinds {
        let names: Vec<&str> = kinds.iter().map(|k| k.name()).collect();
        if let Some(metrics) = json["metrics"].as_array_mut() {
            metrics.retain(|m| m["metric"].as_str().map_or(false, |n| names.contains(&n)));
        }
    }
    json
}
