use assert_cmd::prelude::*;
use assert_fs::prelude::*;
// Add methods on commands
use predicates::prelude::*; // Used for writing assertions
use std::process::Command; // Run programs

const CONFIG: &str = r#"{"domain": ["cat", "dog", "fish"]}"#;

const PREDICTIONS: &str = r#"{"trueLabel": "cat", "predictedLabel": "cat"}
{"trueLabel": "cat", "predictedLabel": "dog"}

{"trueLabel": "dog", "predictedLabel": "dog"}
{"trueLabel": "fish", "predictedLabel": "fish"}
{"trueLabel": "fish", "predictedLabel": "cat"}
"#;

fn write_inputs(
    dir: &assert_fs::TempDir,
    config: &str,
    predictions: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    dir.child("config.json").write_str(config)?;
    dir.child("predictions.jsonl").write_str(predictions)?;
    Ok(())
}

#[test]
fn invalid_config_fails_check() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("leval")?;

    let file = assert_fs::NamedTempFile::new("config.json")?;
    file.write_str("{}")?;

    cmd.arg("config").arg("check").arg(file.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration"));
    Ok(())
}

#[test]
fn duplicate_labels_fail_check() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("leval")?;

    let file = assert_fs::NamedTempFile::new("config.json")?;
    file.write_str(r#"{"domain": ["a", "b", "a"]}"#)?;

    cmd.arg("config").arg("check").arg(file.path());
    cmd.assert().failure();
    Ok(())
}

#[test]
fn valid_yaml_config_passes_check() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("leval")?;

    let file = assert_fs::NamedTempFile::new("config.yaml")?;
    file.write_str("domain:\n  - spam\n  - ham\ngeneratesProbabilities: true\n")?;

    cmd.arg("config").arg("check").arg(file.path());
    cmd.assert().success().stdout(predicate::str::contains("ok"));
    Ok(())
}

#[test]
fn new_config_round_trips_through_check() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::cargo_bin("leval")?
        .args(["config", "new", "--labels", "a,b,c", "--probabilities"])
        .output()?;
    assert!(output.status.success());

    let file = assert_fs::NamedTempFile::new("config.json")?;
    file.write_binary(&output.stdout)?;

    Command::cargo_bin("leval")?
        .arg("config")
        .arg("check")
        .arg(file.path())
        .assert()
        .success();
    Ok(())
}

#[test]
fn generated_config_matches_schema() -> Result<(), Box<dyn std::error::Error>> {
    let schema_output = Command::cargo_bin("leval")?.arg("gen-schema").output()?;
    assert!(schema_output.status.success());
    let schema: serde_json::Value = serde_json::from_slice(&schema_output.stdout)?;

    let mut scope = valico::json_schema::Scope::new();
    let schema = scope
        .compile_and_return(schema, false)
        .expect("schema should compile");

    let valid: serde_json::Value =
        serde_json::from_str(r#"{"domain": ["a", "b"], "generatesProbabilities": true}"#)?;
    assert!(schema.validate(&valid).is_valid());

    let missing_domain: serde_json::Value =
        serde_json::from_str(r#"{"generatesProbabilities": true}"#)?;
    assert!(!schema.validate(&missing_domain).is_valid());
    Ok(())
}

#[test]
fn evaluate_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    write_inputs(&dir, CONFIG, PREDICTIONS)?;

    let output = Command::cargo_bin("leval")?
        .arg("evaluate")
        .arg("--config")
        .arg(dir.child("config.json").path())
        .arg("--data")
        .arg(dir.child("predictions.jsonl").path())
        .args(["--format", "json", "--confusion-matrix"])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let accuracy = json["metrics"]
        .as_array()
        .expect("metrics array")
        .iter()
        .find(|m| m["metric"] == "accuracy" && m["target"] == "average.micro")
        .expect("micro accuracy present");
    approx::assert_abs_diff_eq!(accuracy["value"].as_f64().unwrap(), 0.6);

    assert_eq!(json["confusionMatrix"]["rows"][0][0], 1);
    assert_eq!(json["confusionMatrix"]["rows"][0][1], 1);
    assert_eq!(json["confusionMatrix"]["rows"][2][0], 1);
    Ok(())
}

#[test]
fn evaluate_filters_metrics() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    write_inputs(&dir, CONFIG, PREDICTIONS)?;

    let output = Command::cargo_bin("leval")?
        .arg("evaluate")
        .arg("-c")
        .arg(dir.child("config.json").path())
        .arg("-d")
        .arg(dir.child("predictions.jsonl").path())
        .args(["--format", "json", "--metrics", "recall"])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let metrics = json["metrics"].as_array().expect("metrics array");
    // One per label plus micro and macro
    assert_eq!(metrics.len(), 5);
    assert!(metrics.iter().all(|m| m["metric"] == "recall"));
    Ok(())
}

#[test]
fn evaluate_table_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    write_inputs(&dir, CONFIG, PREDICTIONS)?;

    Command::cargo_bin("leval")?
        .arg("evaluate")
        .arg("-c")
        .arg(dir.child("config.json").path())
        .arg("-d")
        .arg(dir.child("predictions.jsonl").path())
        .assert()
        .success()
        .stdout(predicate::str::contains("average.macro"))
        .stdout(predicate::str::contains("Balanced error rate"));
    Ok(())
}

#[test]
fn evaluate_unknown_metric_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    write_inputs(&dir, CONFIG, PREDICTIONS)?;

    Command::cargo_bin("leval")?
        .arg("evaluate")
        .arg("-c")
        .arg(dir.child("config.json").path())
        .arg("-d")
        .arg(dir.child("predictions.jsonl").path())
        .args(["--metrics", "kappa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Metric \"kappa\" does not exist"));
    Ok(())
}

#[test]
fn evaluate_rejects_label_outside_domain() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    write_inputs(
        &dir,
        CONFIG,
        r#"{"trueLabel": "cat", "predictedLabel": "horse"}"#,
    )?;

    Command::cargo_bin("leval")?
        .arg("evaluate")
        .arg("-c")
        .arg(dir.child("config.json").path())
        .arg("-d")
        .arg(dir.child("predictions.jsonl").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Evaluation failed"));
    Ok(())
}

#[test]
fn evaluate_reports_malformed_line() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    write_inputs(
        &dir,
        CONFIG,
        "{\"trueLabel\": \"cat\", \"predictedLabel\": \"cat\"}\n{not json}\n",
    )?;

    Command::cargo_bin("leval")?
        .arg("evaluate")
        .arg("-c")
        .arg(dir.child("config.json").path())
        .arg("-d")
        .arg(dir.child("predictions.jsonl").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
    Ok(())
}
