//! End-to-end tests driving the `squeak` binary itself, covering the
//! documented scenarios and boundary behaviors of the language pipeline.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn script(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

fn squeak() -> Command {
    Command::cargo_bin("squeak").unwrap()
}

#[test]
fn scenario_1_arithmetic_precedence() {
    let file = script("var x = 5 + 5 * 2; print(x);");
    squeak()
        .arg("run")
        .arg(file.path())
        .assert()
        .success()
        .stdout("15");
}

#[test]
fn scenario_2_string_concatenation() {
    let file = script(r#"var s = "hello" + " " + "world"; print(s);"#);
    squeak()
        .arg("run")
        .arg(file.path())
        .assert()
        .success()
        .stdout("hello world");
}

#[test]
fn scenario_3_function_call() {
    let file = script("function add(a,b){ return a+b; } print(add(40,2));");
    squeak().arg("run").arg(file.path()).assert().success().stdout("42");
}

#[test]
fn scenario_4_nested_closures() {
    let file = script(
        "function make(n){ function add(a){ return n+a; } return add; } print(make(100)(7));",
    );
    squeak().arg("run").arg(file.path()).assert().success().stdout("107");
}

#[test]
fn scenario_5_break_and_continue() {
    let file = script(
        "var i=0; while i<3 { if i==1 { i=i+1; continue; } print(i); i=i+1; }",
    );
    squeak().arg("run").arg(file.path()).assert().success().stdout("02");
}

#[test]
fn scenario_6_implicit_nil_return() {
    let file = script("function f(){ return; } print(f());");
    squeak().arg("run").arg(file.path()).assert().success().stdout("nil");
}

#[test]
fn scenario_7_export_survives_to_the_export_table() {
    let file = script("function greet(){ return \"hi\"; } export greet as g;");
    squeak()
        .arg("run")
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("g = <function greet>"));
}

#[test]
fn scenario_8_division_by_zero_is_a_runtime_fault() {
    let file = script("1/0;");
    squeak()
        .arg("run")
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("illegal argument"));
}

#[test]
fn check_reports_syntax_errors_without_executing() {
    let file = script("var x = ;");
    squeak()
        .arg("check")
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("syntax error"));
}

#[test]
fn tokens_prints_one_token_per_line() {
    let file = script("var x;");
    squeak()
        .arg("tokens")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Var"))
        .stdout(predicate::str::contains("Semicolon"));
}

#[test]
fn run_reads_script_from_stdin() {
    squeak()
        .arg("run")
        .arg("-")
        .write_stdin("print(1 + 1);")
        .assert()
        .success()
        .stdout("2");
}

#[test]
fn missing_file_is_a_usage_error() {
    squeak()
        .arg("run")
        .arg("/nonexistent/path/to/a/script.sqk")
        .assert()
        .code(3);
}

#[test]
fn buffer_size_of_one_parses_the_same_program_as_the_default() {
    let file = script("print(1 + 2 * 3 - 4 / 2);");
    squeak()
        .arg("--buffer-size")
        .arg("1")
        .arg("run")
        .arg(file.path())
        .assert()
        .success()
        .stdout("5");
}
