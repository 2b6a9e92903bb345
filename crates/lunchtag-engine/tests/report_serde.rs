mod common;

use common::{group, roster, seeded};
use lunchtag_core::RunProvenance;
use lunchtag_engine::{assign, AssignEvent, AssignmentReport};

#[test]
fn exhausted_report_carries_repeats_and_seed() {
    let roster = roster(&["A", "B"]);
    let history = vec![group(&["A", "B"])];
    let mut config = seeded(2, 31);
    config.max_attempts = 3;
    config.seed_policy.label = Some("round-4".into());
    let outcome = assign(&roster, &history, &config).unwrap();

    let report = AssignmentReport::new(&outcome, &config, RunProvenance::default());

    assert!(!report.is_accepted());
    assert_eq!(report.provenance.seed, 31);
    assert_eq!(report.attempts, 3);
    assert_eq!(report.group_sizes, vec![2]);
    assert_eq!(report.assigned, 2);
    let json = serde_json::to_value(&report).expect("serialize");
    assert_eq!(json["status"], "exhausted");
    assert_eq!(json["seed_label"], "round-4");
    assert_eq!(json["repeats"][0]["shared"], serde_json::json!(["A", "B"]));
    let decoded: AssignmentReport = serde_json::from_value(json).expect("deserialize");
    assert_eq!(decoded, report);
}

#[test]
fn events_serialize_with_kebab_tags() {
    let event = AssignEvent::AttemptRejected {
        attempt: 4,
        violations: 2,
    };
    let json = serde_json::to_value(&event).expect("serialize");
    assert_eq!(json["event"], "attempt-rejected");
    assert_eq!(json["attempt"], 4);
}
