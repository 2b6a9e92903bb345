use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const SIGNUPS: &str = "\
Email,Team
ada@x,eng
bo@x,ops
cy@x,eng
di@x,ops
ed@x,eng
fi@x,ops
";

fn lunchtag() -> Command {
    Command::cargo_bin("lunchtag").expect("binary")
}

#[test]
fn assign_writes_groups_and_report() {
    let dir = tempdir().expect("tempdir");
    let signups = dir.path().join("signups.csv");
    fs::write(&signups, SIGNUPS).unwrap();
    let out = dir.path().join("rounds/round_1.csv");
    let report = dir.path().join("report.json");

    lunchtag()
        .args(["assign", "--id", "Email", "--stratify-by", "Team", "--group-size", "2"])
        .args(["--seed", "7", "--signups"])
        .arg(&signups)
        .arg("--out")
        .arg(&out)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("@x,"));

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("IDs\n"));
    assert_eq!(written.lines().count(), 4);

    let value: serde_json::Value = serde_json::from_slice(&fs::read(&report).unwrap()).unwrap();
    assert_eq!(value["status"], "accepted");
    assert_eq!(value["provenance"]["seed"], 7);
    assert_eq!(value["group_sizes"], serde_json::json!([2, 2, 2]));
}

#[test]
fn duplicate_signups_fail_before_sampling() {
    let dir = tempdir().expect("tempdir");
    let signups = dir.path().join("signups.csv");
    fs::write(&signups, "Email\na@x\na@x\nb@x\n").unwrap();

    lunchtag()
        .args(["assign", "--id", "Email", "--signups"])
        .arg(&signups)
        .arg("--out")
        .arg(dir.path().join("out.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate-signup"));
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn check_flags_repeated_pairs() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("round_1.csv"), "IDs\n\"a,b,c\"\n").unwrap();
    let candidate = dir.path().join("candidate.csv");
    fs::write(&candidate, "IDs\n\"a,b,d\"\n\"c,e\"\n").unwrap();
    let pattern = dir.path().join("round_*.csv").display().to_string();

    lunchtag()
        .args(["check", "--history", &pattern, "--assignment"])
        .arg(&candidate)
        .assert()
        .failure()
        .stdout(predicate::str::contains("group 0 repeats history group 0: {a,b}"));
}

#[test]
fn check_ignores_the_checked_file_in_history() {
    let dir = tempdir().expect("tempdir");
    let round = dir.path().join("round_1.csv");
    fs::write(&round, "IDs\n\"a,b\"\n").unwrap();
    let pattern = dir.path().join("round_*.csv").display().to_string();

    lunchtag()
        .args(["check", "--history", &pattern, "--assignment"])
        .arg(&round)
        .assert()
        .success()
        .stdout(predicate::str::contains("no repeats"));
}
