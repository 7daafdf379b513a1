//! Subcommand behavior that does not need a fixture directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn denylint_cmd() -> Command {
    Command::cargo_bin("denylint").unwrap()
}

fn write(dir: &Path, name: &str, text: &str) {
    std::fs::write(dir.join(name), text).expect("write file");
}

fn check(dir: &Path, extra: &[&str]) -> (i32, Value) {
    let output = denylint_cmd()
        .current_dir(dir)
        .args(extra)
        .args(["check", "--report-out", "out/report.json"])
        .output()
        .expect("run denylint");
    let text = std::fs::read_to_string(dir.join("out/report.json")).expect("read report");
    (
        output.status.code().unwrap_or(-1),
        serde_json::from_str(&text).expect("parse report"),
    )
}

#[test]
fn missing_policy_writes_runtime_error_report() {
    let tmp = TempDir::new().expect("temp dir");
    let (code, report) = check(tmp.path(), &["--policy", "nope.toml"]);

    assert_eq!(code, 1);
    assert_eq!(report["verdict"], "fail");
    assert_eq!(report["findings"][0]["check_id"], "tool.runtime");
    assert_eq!(report["findings"][0]["code"], "runtime_error");
    assert!(
        report["findings"][0]["message"]
            .as_str()
            .unwrap()
            .contains("nope.toml")
    );
}

#[test]
fn invalid_config_is_a_runtime_error() {
    let tmp = TempDir::new().expect("temp dir");
    write(tmp.path(), "deny.toml", "[licenses]\nallow = [\"MIT\"]\n");
    write(tmp.path(), "denylint.toml", "profile = \"lenient\"\n");

    let (code, report) = check(tmp.path(), &[]);
    assert_eq!(code, 1);
    assert!(
        report["findings"][0]["message"]
            .as_str()
            .unwrap()
            .contains("lenient")
    );
}

#[test]
fn cli_overrides_beat_config() {
    let tmp = TempDir::new().expect("temp dir");
    write(tmp.path(), "deny.toml", "[licenses]\nallow = [\"MIT\", \"MIT\"]\n");
    write(tmp.path(), "denylint.toml", "profile = \"strict\"\n");

    let (code, report) = check(tmp.path(), &[]);
    assert_eq!(code, 2);
    assert_eq!(report["verdict"], "fail");

    let (code, report) = check(tmp.path(), &["--profile", "warn", "--fail-on", "error"]);
    assert_eq!(code, 0);
    assert_eq!(report["verdict"], "warn");
    assert_eq!(report["data"]["profile"], "warn");
}

#[test]
fn max_findings_truncates() {
    let tmp = TempDir::new().expect("temp dir");
    write(
        tmp.path(),
        "deny.toml",
        "[licenses]\nallow = [\"a b\", \"c d\", \"e f\"]\n",
    );

    let (_, report) = check(tmp.path(), &["--max-findings", "1"]);
    assert_eq!(report["findings"].as_array().unwrap().len(), 1);
    assert_eq!(report["data"]["findings_total"], 3);
    assert_eq!(
        report["data"]["truncated_reason"],
        "findings truncated to max_findings=1"
    );
    assert_eq!(report["counts"]["error"], 3);
}

#[test]
fn zero_max_findings_still_fails() {
    let tmp = TempDir::new().expect("temp dir");
    write(tmp.path(), "deny.toml", "[licenses]\nallow = [\"not a license\"]\n");

    let (code, report) = check(tmp.path(), &["--max-findings", "0"]);
    assert_eq!(code, 2);
    assert_eq!(report["verdict"], "fail");
    assert_eq!(report["findings"].as_array().unwrap().len(), 0);
    assert_eq!(report["counts"]["error"], 1);
}

#[test]
fn deeply_nested_clarify_expression_is_reported() {
    let tmp = TempDir::new().expect("temp dir");
    let expression = format!("{}MIT{}", "(".repeat(100_000), ")".repeat(100_000));
    write(
        tmp.path(),
        "deny.toml",
        &format!(
            "[[licenses.clarify]]\nname = \"ring\"\nexpression = \"{expression}\"\n\
             license-files = [{{ path = \"LICENSE\", hash = 1 }}]\n"
        ),
    );

    let (code, report) = check(tmp.path(), &[]);
    assert_eq!(code, 2);
    assert_eq!(report["findings"][0]["code"], "invalid_expression");
    assert!(
        report["findings"][0]["message"]
            .as_str()
            .unwrap()
            .contains("nest deeper than 64")
    );
}

#[test]
fn check_writes_markdown_and_md_renders_report() {
    let tmp = TempDir::new().expect("temp dir");
    write(tmp.path(), "deny.toml", "[bans]\nskip = [{ version = \"1\" }]\n");

    denylint_cmd()
        .current_dir(tmp.path())
        .args([
            "check",
            "--report-out",
            "out/report.json",
            "--write-markdown",
            "--markdown-out",
            "out/comment.md",
        ])
        .assert()
        .code(2);

    let md = std::fs::read_to_string(tmp.path().join("out/comment.md")).expect("read markdown");
    assert!(md.starts_with("# Denylint report"));
    assert!(md.contains("`bans.skip` / `missing_name`"));

    denylint_cmd()
        .current_dir(tmp.path())
        .args(["md", "--report", "out/report.json"])
        .assert()
        .success()
        .stdout(predicate::str::diff(md));
}

#[test]
fn annotations_render_from_report() {
    let tmp = TempDir::new().expect("temp dir");
    write(
        tmp.path(),
        "deny.toml",
        "[licenses]\nallow = [\"a b\", \"c d\"]\n",
    );
    check(tmp.path(), &[]);

    denylint_cmd()
        .current_dir(tmp.path())
        .args(["annotations", "--report", "out/report.json", "--max", "1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "::error file=deny.toml,line=2,title=licenses.allow_identifiers::",
        ))
        .stdout(predicate::str::contains("c d").not());
}

#[test]
fn md_rejects_foreign_report() {
    let tmp = TempDir::new().expect("temp dir");
    write(tmp.path(), "report.json", "{\"schema\": \"other.report.v1\"}");

    denylint_cmd()
        .current_dir(tmp.path())
        .args(["md", "--report", "report.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown report schema"));
}

#[test]
fn explain_known_and_unknown() {
    denylint_cmd()
        .args(["explain", "licenses.clarify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remediation"))
        .stdout(predicate::str::contains("```toml"));

    denylint_cmd()
        .args(["explain", "licenses.no_such_check"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown check_id or code: licenses.no_such_check"))
        .stderr(predicate::str::contains("bans.skip"));
}

#[test]
fn schema_prints_json() {
    let output = denylint_cmd().args(["schema"]).output().expect("run");
    assert!(output.status.success());
    let schema: Value = serde_json::from_slice(&output.stdout).expect("config schema json");
    assert!(schema["properties"]["checks"].is_object());

    let output = denylint_cmd().args(["schema", "report"]).output().expect("run");
    let schema: Value = serde_json::from_slice(&output.stdout).expect("report schema json");
    assert!(schema["properties"]["findings"].is_object());
}

#[test]
fn logs_go_to_stderr() {
    let tmp = TempDir::new().expect("temp dir");
    write(tmp.path(), "deny.toml", "");

    denylint_cmd()
        .current_dir(tmp.path())
        .args(["--log-level", "debug", "check", "--report-out", "r.json"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("config file not found"));
}
