use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn test_server_list_and_nist_are_exclusive() {
    let mut cmd = Command::cargo_bin("ntpgroup").unwrap();
    cmd.args(["--nocolor", "-s", "a.example", "b.example", "--nist"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("cannot be used with"));
}

#[test]
fn test_invalid_input_no_servers() {
    let mut cmd = Command::cargo_bin("ntpgroup").unwrap();
    cmd.arg("--nocolor")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("required"));
}

#[test]
fn test_ntp_version_out_of_range() {
    let mut cmd = Command::cargo_bin("ntpgroup").unwrap();
    cmd.args(["--ntp-version", "7", "-s", "a.example"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_non_positive_timeout_rejected() {
    let mut cmd = Command::cargo_bin("ntpgroup").unwrap();
    cmd.args(["--nocolor", "--timeout", "0", "-s", "a.example"])
        .assert()
        .failure()
        .code(2)
        .stdout(contains("Error:"));
}

#[test]
fn test_help_lists_flags() {
    let mut cmd = Command::cargo_bin("ntpgroup").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("--server-list"))
        .stdout(contains("--nist"))
        .stdout(contains("--allow-partial"));
}

#[test]
fn test_oversized_timeout_rejected() {
    let mut cmd = Command::cargo_bin("ntpgroup").unwrap();
    cmd.args(["--nocolor", "--timeout", "1e20", "-s", "127.0.0.1"])
        .assert()
        .failure()
        .code(2)
        .stdout(contains("Error: --timeout"));
}

#[test]
fn test_refused_server_aborts_report() {
    let mut cmd = Command::cargo_bin("ntpgroup").unwrap();
    cmd.args(["--nocolor", "--timeout", "2", "-s", "127.0.0.1"])
        .assert()
        .failure()
        .code(1)
        .stdout(contains("Error: 127.0.0.1: network:"))
        .stdout(contains("Remote").not());
}

#[test]
fn test_allow_partial_renders_error_row() {
    let mut cmd = Command::cargo_bin("ntpgroup").unwrap();
    cmd.args([
        "--nocolor",
        "--allow-partial",
        "--timeout",
        "2",
        "-s",
        "127.0.0.1",
    ])
    .assert()
    .success()
    .stdout(contains("Adjusted Time"))
    .stdout(contains("| 127.0.0.1"))
    .stdout(contains("error: network:"));
}

#[cfg(feature = "network-tests")]
#[test]
fn test_nist_table() {
    let mut cmd = Command::cargo_bin("ntpgroup").unwrap();
    cmd.args(["--nocolor", "--allow-partial", "--nist"])
        .assert()
        .success()
        .stdout(contains("| Remote"))
        .stdout(contains("time-a-g.nist.gov"));
}
