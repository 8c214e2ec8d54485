// Regression tests for the turtille binary: exit codes, diagnostics and frame output.
// Requires: assert_cmd, predicates, tempfile crates in [dev-dependencies]

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::tempdir;

fn turtille() -> Command {
    let mut cmd = Command::cargo_bin("turtille").unwrap();
    cmd.arg("--no-load").arg("--fps").arg("0");
    cmd
}

#[test]
fn quit_exits_cleanly() {
    turtille().arg("-c").arg("f q").assert().success();
}

#[test]
fn unknown_commands_are_reported_but_do_not_fail() {
    turtille()
        .arg("-c")
        .arg("bogus1 f 10 bogus2")
        .assert()
        .success()
        .stderr(
            contains("Unknown command: bogus1, bogus2")
                .or(contains("turtille::runtime::unknown_command")),
        );
}

#[test]
fn syntax_errors_are_rendered_with_diagnostics() {
    turtille()
        .arg("-c")
        .arg("f 10 ) r")
        .assert()
        .success()
        .stderr(contains("turtille::parse::syntax").or(contains("cannot parse")));
}

#[test]
fn missing_turfile_fails() {
    turtille()
        .arg("does/not/exist.tur")
        .assert()
        .failure()
        .stderr(contains("Failed to read"));
}

#[test]
fn print_flag_dumps_the_final_frame() {
    turtille()
        .arg("--print")
        .arg("-c")
        .arg("f 10")
        .assert()
        .success()
        .stdout(contains("\u{2809}"));
}

#[test]
fn turfile_definitions_are_registered_before_running() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("shape.tur");
    fs::write(&file, "line\nline -> f 10\nprint\n").unwrap();

    turtille()
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("\u{2809}"));
}

#[test]
fn piped_repl_runs_lines_until_quit() {
    turtille()
        .write_stdin("sq -> f 10\nsq\nq\nnever -> f\n")
        .assert()
        .success()
        .stdout(contains("\u{2809}").and(contains("Hi, I am Turtille!").not()));
}
