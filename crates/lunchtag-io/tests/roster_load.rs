use std::fs;

use lunchtag_core::LunchError;
use lunchtag_io::{load_roster, read_roster, RosterColumns};
use tempfile::tempdir;

const SIGNUPS: &str = "\
Timestamp,Email,Team,Dietary
2024-01-01,ada@example.com,eng,none
2024-01-02, bo@example.com ,ops,vegan
2024-01-03,cy@example.com,eng,
";

#[test]
fn roster_keeps_id_and_stratum_only() {
    let columns = RosterColumns::new("Email").with_stratum("Team");
    let roster = read_roster(SIGNUPS.as_bytes(), &columns).expect("roster");

    assert_eq!(roster.len(), 3);
    assert_eq!(roster.stratum_key(), Some("Team"));
    let participants = roster.participants();
    assert_eq!(participants[1].id.as_str(), "bo@example.com");
    assert_eq!(participants[1].stratum.as_deref(), Some("ops"));
}

#[test]
fn roster_without_stratum_column() {
    let roster = read_roster(SIGNUPS.as_bytes(), &RosterColumns::new("Email")).expect("roster");
    assert_eq!(roster.stratum_key(), None);
    assert!(roster.participants().iter().all(|p| p.stratum.is_none()));
}

#[test]
fn empty_stratum_cells_become_none() {
    let data = "id,team\na,eng\nb,\n";
    let roster =
        read_roster(data.as_bytes(), &RosterColumns::new("id").with_stratum("team")).unwrap();
    assert_eq!(roster.participants()[1].stratum, None);
}

#[test]
fn missing_id_column_is_reported() {
    let err = read_roster(SIGNUPS.as_bytes(), &RosterColumns::new("email")).unwrap_err();
    match err {
        LunchError::MissingColumn(info) => {
            assert_eq!(info.context.get("column").map(String::as_str), Some("email"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_stratum_column_is_reported() {
    let columns = RosterColumns::new("Email").with_stratum("Office");
    let err = read_roster(SIGNUPS.as_bytes(), &columns).unwrap_err();
    assert!(matches!(err, LunchError::MissingColumn(_)));
}

#[test]
fn duplicate_signups_are_rejected_with_path() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("signups.csv");
    fs::write(&path, "Email\nada@x\nbo@x\nada@x\n").expect("write");

    let err = load_roster(&path, &RosterColumns::new("Email")).unwrap_err();
    match err {
        LunchError::DuplicateIdentifier(info) => {
            assert_eq!(info.context.get("ids").map(String::as_str), Some("ada@x"));
            assert!(info.context.contains_key("path"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn blank_identifier_reports_its_row() {
    let err = read_roster("id\na\n\"  \"\n".as_bytes(), &RosterColumns::new("id")).unwrap_err();
    match err {
        LunchError::Record(info) => {
            assert_eq!(info.code, "empty-identifier");
            assert_eq!(info.context.get("row").map(String::as_str), Some("2"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = load_roster(&dir.path().join("absent.csv"), &RosterColumns::new("id")).unwrap_err();
    assert!(matches!(err, LunchError::Io(_)));
}
