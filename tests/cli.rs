use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

#[test]
fn cnf_from_stdin() {
    let mut cmd = Command::cargo_bin("cfg-normal-form").unwrap();
    cmd.arg("cnf").write_stdin("S → AB\nA → a\nB → b\n");
    cmd.assert().success().stdout("S → AB\nA → a\nB → b\n");
}

#[test]
fn several_outputs_in_order() {
    let mut cmd = Command::cargo_bin("cfg-normal-form").unwrap();
    cmd.args(["prod", "simplified"]).write_stdin("S → aSb | ε");
    cmd.assert()
        .success()
        .stdout("S → aSb | ε\nS → aSb | ab\n")
        .stderr(contains("ε dropped"));
}

#[test]
fn keep_empty_flag() {
    let mut cmd = Command::cargo_bin("cfg-normal-form").unwrap();
    cmd.args(["simplified", "-k"]).write_stdin("S → aSb | ε");
    cmd.assert()
        .success()
        .stdout("S → aSb | ab | ε\n")
        .stderr(contains("ε kept on start symbol S"));
}

#[test]
fn unit_cycle_is_a_warning() {
    let mut cmd = Command::cargo_bin("cfg-normal-form").unwrap();
    cmd.arg("gnf").write_stdin("S → A | a\nA → S | b");
    cmd.assert()
        .success()
        .stdout("S → b | a\n")
        .stderr(contains("warning: unit cycle detected"));
}

#[test]
fn json_output() {
    let mut cmd = Command::cargo_bin("cfg-normal-form").unwrap();
    cmd.args(["gnf", "-j"]).write_stdin("S → aSa | b");
    cmd.assert()
        .success()
        .stdout(contains(r#""empty_string":"not_derived""#));
}

#[test]
fn malformed_grammar_fails() {
    let mut cmd = Command::cargo_bin("cfg-normal-form").unwrap();
    cmd.arg("cnf").write_stdin("S → a\nA -> b");
    cmd.assert()
        .failure()
        .stderr(contains("invalid grammar").and(contains("line 2")));
}

#[test]
fn missing_file_fails() {
    let mut cmd = Command::cargo_bin("cfg-normal-form").unwrap();
    cmd.args(["prod", "--file", "tests/no_such_grammar.txt"]);
    cmd.assert().failure().stderr(contains("failed to read"));
}
