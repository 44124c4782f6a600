//! school-report 的 stdout 只包含报表

use std::process::Command;

fn run_report(format: &str) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_school-report"))
        .env("APP_ENV", "production")
        .env("RUST_LOG", "info")
        .env("DATABASE_URL", "sqlite::memory:")
        .env("SCHOOL__REPORT__FORMAT", format)
        .output()
        .expect("school-report should start")
}

#[test]
fn test_json_report_stdout_is_pure_json() {
    let output = run_report("json");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be a single JSON document");
    assert!(value["overall_average"].is_null());
    assert_eq!(value["top_students"], serde_json::json!([]));

    // 日志仍然输出，只是走 stderr
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_unknown_format_fails_without_stdout() {
    let output = run_report("csv");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown report format"));
}
