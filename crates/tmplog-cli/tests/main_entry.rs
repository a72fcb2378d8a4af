//! Integration tests for the `tmplog` binary entry point.
//!
//! Drives the compiled binary over piped stdin and checks the single stdout
//! response, the stderr diagnostics and the exit status.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn create_log_file_succeeds() {
    let mut command = cargo_bin_cmd!("tmplog");
    command.write_stdin("1\nmylog");
    command
        .assert()
        .success()
        .stdout("SUCCESS: Log file created.\n")
        .stderr("");
}

#[test]
fn unrecognised_selector_is_rejected() {
    let mut command = cargo_bin_cmd!("tmplog");
    command.write_stdin("2");
    command
        .assert()
        .success()
        .stdout("Sorry, choice 2 is not accepted\n");
}

#[test]
fn negative_selector_is_rejected_verbatim() {
    let mut command = cargo_bin_cmd!("tmplog");
    command.write_stdin("-7\n");
    command
        .assert()
        .success()
        .stdout("Sorry, choice -7 is not accepted\n");
}

#[test]
fn non_numeric_selector_exits_with_failure() {
    let mut command = cargo_bin_cmd!("tmplog");
    command.write_stdin("abc");
    command
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(contains("malformed command selector"));
}

#[test]
fn long_selector_line_is_not_truncated() {
    let mut command = cargo_bin_cmd!("tmplog");
    command.write_stdin(format!("1{}garbage\n", " ".repeat(63)));
    command
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(contains("command selector line exceeds 64 bytes"))
        .stderr(contains("request failed"))
        .stderr(contains("selector_too_long"));
}

#[test]
fn missing_identifier_exits_with_failure() {
    let mut command = cargo_bin_cmd!("tmplog");
    command.write_stdin("1\n");
    command
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(contains("end of input while reading the log identifier"));
}

#[test]
fn arguments_are_ignored() {
    let mut command = cargo_bin_cmd!("tmplog");
    command.arg("--help").write_stdin("5\n");
    command
        .assert()
        .success()
        .stdout("Sorry, choice 5 is not accepted\n");
}
