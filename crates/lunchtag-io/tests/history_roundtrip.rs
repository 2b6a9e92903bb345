use std::fs;

use lunchtag_core::{Group, LunchError, ParticipantId};
use lunchtag_io::{
    load_history, read_assignment, read_assignment_file, save_assignment, write_assignment,
};
use proptest::prelude::*;
use tempfile::tempdir;

fn group(ids: &[&str]) -> Group {
    ids.iter().map(|raw| ParticipantId::new(*raw).unwrap()).collect()
}

fn sorted(mut groups: Vec<Group>) -> Vec<Group> {
    groups.sort();
    groups
}

#[test]
fn assignment_file_has_one_quoted_row_per_group() {
    let mut bytes = Vec::new();
    write_assignment(&mut bytes, &[group(&["b", "a"]), group(&["c"])]).expect("write");
    assert_eq!(String::from_utf8(bytes).unwrap(), "IDs\n\"a,b\"\nc\n");
}

#[test]
fn saved_assignment_reads_back() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("rounds/2024-01.csv");
    let groups = vec![group(&["ada", "bo", "cy"]), group(&["di", "ed"])];

    save_assignment(&path, &groups).expect("save");
    let restored = read_assignment_file(&path).expect("read");

    assert_eq!(sorted(restored), sorted(groups));
}

#[test]
fn history_collects_every_matching_file_in_order() {
    let dir = tempdir().expect("tempdir");
    save_assignment(&dir.path().join("round_2.csv"), &[group(&["c", "d"])]).unwrap();
    save_assignment(&dir.path().join("round_1.csv"), &[group(&["a", "b"])]).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let pattern = dir.path().join("round_*.csv").display().to_string();
    let history = load_history(&[pattern.clone(), pattern]).expect("history");

    assert_eq!(history.files.len(), 2);
    assert!(history.files[0].ends_with("round_1.csv"));
    assert_eq!(history.groups, vec![group(&["a", "b"]), group(&["c", "d"])]);
    assert_eq!(history.unique_participants(), 4);
}

#[test]
fn excluding_a_file_drops_only_its_groups() {
    let dir = tempdir().expect("tempdir");
    let first = dir.path().join("round_1.csv");
    let second = dir.path().join("round_2.csv");
    save_assignment(&first, &[group(&["a", "b"]), group(&["e", "f"])]).unwrap();
    save_assignment(&second, &[group(&["c", "d"])]).unwrap();
    let pattern = dir.path().join("round_*.csv").display().to_string();

    let history = load_history(&[pattern]).expect("history").excluding(&first);

    assert_eq!(history.files, vec![second]);
    assert_eq!(history.groups, vec![group(&["c", "d"])]);
    assert_eq!(history.group_counts, vec![1]);
}

#[test]
fn unmatched_pattern_is_empty_history() {
    let dir = tempdir().expect("tempdir");
    let pattern = dir.path().join("nothing_*.csv").display().to_string();
    let history = load_history(&[pattern]).expect("history");
    assert!(history.groups.is_empty());
    assert!(history.files.is_empty());
}

#[test]
fn invalid_pattern_is_an_io_error() {
    let err = load_history(&["[".to_string()]).unwrap_err();
    assert_eq!(err.info().code, "history-pattern");
}

#[test]
fn history_file_without_ids_column_is_rejected() {
    let err = read_assignment("Members\n\"a,b\"\n".as_bytes()).unwrap_err();
    assert!(matches!(err, LunchError::MissingColumn(_)));
}

proptest! {
    #[test]
    fn write_then_read_preserves_groups(
        raw in proptest::collection::vec(
            proptest::collection::btree_set("[a-z][a-z0-9@.]{0,8}", 1..5),
            0..8,
        )
    ) {
        let groups: Vec<Group> = raw
            .iter()
            .map(|ids| ids.iter().map(|id| ParticipantId::new(id.as_str()).unwrap()).collect())
            .collect();
        let mut bytes = Vec::new();
        write_assignment(&mut bytes, &groups).unwrap();
        let restored = read_assignment(bytes.as_slice()).unwrap();
        prop_assert_eq!(sorted(restored), sorted(groups));
    }
}
