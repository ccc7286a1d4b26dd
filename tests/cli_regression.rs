// Regression tests for the design-lint binary: exit codes, JSON output and
// miette-rendered errors.
// Requires: assert_cmd, predicates, tempfile in [dev-dependencies]

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

const TOKENS: &str = "tests/fixtures/design-tokens.json";

fn design_lint() -> Command {
    let mut cmd = Command::cargo_bin("design-lint").unwrap();
    cmd.env_remove("DESIGN_TOKENS_PATH")
        .env_remove("ALLOWED_PATHS")
        .env_remove("MAX_FILE_SIZE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn compliant_stylesheet_exits_zero() {
    design_lint()
        .args(["--tokens", TOKENS, "validate", "tests/fixtures/css/compliant.css"])
        .args(["--component", "Button"])
        .assert()
        .success()
        .stdout(contains("Button").and(contains("fully compliant with design tokens")));
}

#[test]
fn violations_exit_one_with_a_json_report() {
    let output = design_lint()
        .args(["--tokens", TOKENS, "validate", "--json"])
        .arg("tests/fixtures/css/noncompliant.css")
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["component"], "Unknown");
    assert_eq!(report["is_compliant"], false);
    assert_eq!(report["total_issues"], 12);
    assert_eq!(
        report["validation_results"]["color"]["issues"][0],
        "unapproved color '#FF0000' is used"
    );
}

#[test]
fn stylesheet_can_be_piped_through_stdin() {
    design_lint()
        .args(["--tokens", TOKENS, "validate", "-", "--json"])
        .write_stdin(".a { color: #0017c1; padding: 16px; }")
        .assert()
        .success()
        .stdout(contains("\"total_issues\": 0"));
}

#[test]
fn tokens_path_is_read_from_the_environment() {
    let mut cmd = Command::cargo_bin("design-lint").unwrap();
    cmd.env("DESIGN_TOKENS_PATH", TOKENS)
        .args(["tokens", "spacing"])
        .assert()
        .success()
        .stdout(contains("\"massive\": \"120px\""));
}

#[test]
fn missing_tokens_file_is_a_miette_diagnostic() {
    design_lint()
        .args(["--tokens", "tests/fixtures/no-such-tokens.json"])
        .args(["validate", "tests/fixtures/css/compliant.css"])
        .assert()
        .code(2)
        .stderr(contains("design_lint::io").and(contains("no-such-tokens.json")));
}

#[test]
fn malformed_tokens_file_reports_the_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("tokens.json");
    fs::write(&bad, "{\n  \"colors\": {\n    \"primary\": \n}").unwrap();

    design_lint()
        .arg("--tokens")
        .arg(&bad)
        .args(["tokens", "colors"])
        .assert()
        .code(2)
        .stderr(contains("design_lint::tokens::parse"));
}

#[test]
fn unknown_token_section_is_rejected() {
    design_lint()
        .args(["--tokens", TOKENS, "tokens", "shadows"])
        .assert()
        .code(2)
        .stderr(contains("design_lint::tokens::section").or(contains("shadows")));
}

#[test]
fn layout_section_combines_breakpoints_and_grid() {
    let output = design_lint()
        .args(["--tokens", TOKENS, "tokens", "layout"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let layout: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(layout["breakpoints"]["tablet"], "1024px");
    assert_eq!(layout["grid"]["columns"]["mobile"], 4);
}

#[test]
fn accessibility_checks_pass_and_fail() {
    design_lint()
        .args(["a11y", "tests/fixtures/accessible.html"])
        .assert()
        .success()
        .stdout(contains("meets the basic accessibility checks"));

    design_lint()
        .args(["a11y", "-", "--json"])
        .write_stdin("<h1>Title</h1><h3>Skipped</h3><img src=\"x.png\">")
        .assert()
        .code(1)
        .stdout(contains("\"is_accessible\": false"));
}

#[test]
fn analyze_reports_component_files() {
    let root = tempfile::tempdir().unwrap();
    let component = root.path().join("Button");
    fs::create_dir(&component).unwrap();
    fs::write(component.join("Button.tsx"), "export {}").unwrap();
    fs::write(component.join("Button.module.css"), ".button {}").unwrap();
    fs::write(component.join("Button.test.tsx"), "").unwrap();

    let output = design_lint()
        .arg("analyze")
        .arg(&component)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let analysis: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(analysis["completeness"], 50.0);
    assert_eq!(analysis["structure"]["has_styles"], true);
    assert_eq!(analysis["structure"]["has_stories"], false);
    assert_eq!(analysis["files"].as_array().unwrap().len(), 3);
}

#[test]
fn analyze_missing_directory_fails() {
    design_lint()
        .args(["analyze", "tests/fixtures/NoSuchComponent"])
        .assert()
        .code(2)
        .stderr(contains("design_lint::analysis::not_found"));
}

#[test]
fn serve_answers_json_rpc_over_stdio() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"health_check","arguments":{}}}"#,
        "\n",
    );

    let output = design_lint()
        .args(["--tokens", TOKENS, "serve"])
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let replies: Vec<serde_json::Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(replies[1]["id"], 2);
    assert!(replies[1]["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("\"status\": \"ok\""));
}

#[test]
fn serve_applies_allowed_paths_and_size_limit() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir(root.path().join("Card")).unwrap();
    let card = root.path().join("Card");
    let input = format!(
        "{}\n{}\n",
        serde_json::json!({
            "jsonrpc": "2.0", "id": 1, "method": "tools/call",
            "params": {"name": "analyze_component_structure", "arguments": {"component_path": card}},
        }),
        serde_json::json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/call",
            "params": {"name": "validate_design_tokens", "arguments": {"css_content": "x".repeat(2000)}},
        }),
    );

    let output = design_lint()
        .args(["--tokens", TOKENS, "serve", "--max-file-size", "1000"])
        .env("ALLOWED_PATHS", root.path())
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let replies: Vec<serde_json::Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert!(replies[0]["result"].get("isError").is_none());
    assert_eq!(replies[1]["result"]["isError"], true);
}
