use predicates::prelude::*;
use tempfile::tempdir;

mod test_helpers;
use test_helpers::base_moodlens_command;

/// JSON logs go to stderr, one object per line, inside the root span.
#[test]
fn test_json_logs_carry_correlation_id() {
    let dir = tempdir().unwrap();
    let output = base_moodlens_command(dir.path())
        .args([
            "--log-format",
            "json",
            "--log-level",
            "info",
            "checkin",
            "--routine",
            "consistent",
            "--stress",
            "2",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    let lines: Vec<serde_json::Value> = stderr
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("log line is JSON"))
        .collect();

    assert!(!lines.is_empty());
    for line in &lines {
        assert_eq!(line["span"]["name"], "app_invocation");
        assert!(line["span"]["correlation_id"].is_string());
    }
    assert!(lines
        .iter()
        .any(|line| line["fields"]["message"] == "Stored check-in"));
}

/// User-facing output stays on stdout regardless of the log format.
#[test]
fn test_logs_stay_off_stdout() {
    let dir = tempdir().unwrap();
    base_moodlens_command(dir.path())
        .args(["--log-level", "debug", "insights"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not enough check-ins"))
        .stdout(predicate::str::contains("DEBUG").not());
}

/// Errors are logged once at the application boundary.
#[test]
fn test_single_error_log_for_config_failure() {
    let dir = tempdir().unwrap();
    let output = base_moodlens_command(dir.path())
        .env("MOODLENS_DB", "relative/moodlens.db")
        .args(["--log-format", "json", "insights"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    let error_lines = stderr
        .lines()
        .filter(|line| line.contains("\"level\":\"ERROR\""))
        .count();
    assert_eq!(error_lines, 1);
}
