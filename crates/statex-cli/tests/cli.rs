use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STATEMENT: &str = "CONSOLIDATED STATEMENTS OF OPERATIONS
Total revenues $1,234,567
Cost of revenues $800,000
Income from operations $434,567
";

/// Command isolated from any user configuration.
fn statex(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("statex").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home).env("HOME", config_home);
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_extract_json_with_default_period() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "statement.txt", STATEMENT);

    statex(dir.path())
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"period_end_date":"2024-12-31","results":{"revenue":"1234567","cos":"800000","operating_income":"434567"}}"#,
        ));
}

#[test]
fn test_extract_with_period_and_partial_results() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "partial.txt",
        "Total revenues $1,234,567\nCost of revenues $800,000\n",
    );

    statex(dir.path())
        .args(["extract", "--period-end-date", "2023-09-30"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""period_end_date":"2023-09-30""#))
        .stdout(predicate::str::contains(r#""operating_income":"""#));
}

#[test]
fn test_extract_rejects_bad_period() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "statement.txt", STATEMENT);

    statex(dir.path())
        .args(["extract", "--period-end-date", "12/31/2024"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_extract_rejects_unsupported_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "statement.docx", STATEMENT);

    statex(dir.path())
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File must be a PDF"));
}

#[test]
fn test_extract_missing_file() {
    let dir = TempDir::new().unwrap();

    statex(dir.path())
        .args(["extract", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_extract_invalid_pdf() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "broken.pdf", "Mock PDF content");

    statex(dir.path())
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse PDF"));
}

#[test]
fn test_extract_csv_output() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "statement.txt", STATEMENT);

    statex(dir.path())
        .args(["extract", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "period_end_date,revenue,cos,operating_income\n2024-12-31,1234567,800000,434567",
        ));
}

#[test]
fn test_batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), STATEMENT).unwrap();
    fs::write(inputs.join("b.txt"), "Net sales $2,000,000\nOperating income $800,000\n").unwrap();
    let out = dir.path().join("out");

    statex(dir.path())
        .arg("batch")
        .arg(format!("{}/*.txt", inputs.display()))
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .args(["-j", "2"])
        .assert()
        .success();

    let a = fs::read_to_string(out.join("a.json")).unwrap();
    assert!(a.contains(r#""revenue":"1234567""#));

    let b = fs::read_to_string(out.join("b.json")).unwrap();
    assert!(b.contains(r#""revenue":"2000000""#));
    assert!(b.contains(r#""cos":"""#));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(
        lines[0],
        "filename,status,period_end_date,revenue,cos,operating_income,processing_time_ms,error"
    );
    assert!(lines[1].starts_with("a.txt,success,2024-12-31,1234567,800000,434567,"));
    assert!(lines[2].starts_with("b.txt,success,2024-12-31,2000000,,800000,"));
}

#[test]
fn test_batch_no_matches() {
    let dir = TempDir::new().unwrap();

    statex(dir.path())
        .arg("batch")
        .arg(format!("{}/*.pdf", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn test_inspect_lists_candidates() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "statement.txt", "Revenue: $500\nTotal revenues $1,234,567\n");

    statex(dir.path())
        .args(["inspect", "--field", "revenue"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("result: 1234567"))
        .stdout(predicate::str::contains("\"1,234,567\""));
}

#[test]
fn test_config_init_and_get() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("statex.json");

    statex(dir.path())
        .args(["config", "init", "--output"])
        .arg(&config_path)
        .assert()
        .success();

    statex(dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["config", "set", "report.default_period_end_date", "2025-03-31"])
        .assert()
        .success();

    statex(dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["config", "get", "report.default_period_end_date"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"2025-03-31\""));

    let input = write(&dir, "statement.txt", STATEMENT);
    statex(dir.path())
        .arg("--config")
        .arg(&config_path)
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""period_end_date":"2025-03-31""#));
}

#[test]
fn test_config_set_rejects_invalid_period() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("statex.json");

    statex(dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["config", "set", "report.default_period_end_date", "soon"])
        .assert()
        .failure();

    assert!(!config_path.exists());
}
