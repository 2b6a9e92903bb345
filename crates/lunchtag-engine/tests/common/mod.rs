#![allow(dead_code)]

use lunchtag_core::{Group, Participant, ParticipantId, Roster};
use lunchtag_engine::AssignConfig;

pub fn pid(raw: &str) -> ParticipantId {
    ParticipantId::new(raw).unwrap()
}

pub fn group(ids: &[&str]) -> Group {
    ids.iter().map(|raw| pid(raw)).collect()
}

pub fn roster(ids: &[&str]) -> Roster {
    Roster::from_ids(ids.iter().copied()).unwrap()
}

/// Roster stratified on "team", built from `(id, team)` pairs.
pub fn team_roster(members: &[(&str, &str)]) -> Roster {
    Roster::new(
        Some("team".into()),
        members
            .iter()
            .map(|(id, team)| Participant::with_stratum(pid(id), *team))
            .collect(),
    )
    .unwrap()
}

pub fn seeded(group_size: usize, seed: u64) -> AssignConfig {
    let mut config = AssignConfig::with_group_size(group_size);
    config.seed_policy.master_seed = Some(seed);
    config
}

/// Asserts every roster member is in exactly one group or in leftover.
pub fn assert_partition(roster: &Roster, groups: &[Group], leftover: &[ParticipantId]) {
    for id in roster.ids() {
        let in_groups = groups.iter().filter(|g| g.contains(id)).count();
        let in_leftover = leftover.iter().filter(|l| *l == id).count();
        assert_eq!(in_groups + in_leftover, 1, "participant {id} placed {} times", in_groups + in_leftover);
    }
    let placed: usize = groups.iter().map(Group::len).sum::<usize>() + leftover.len();
    assert_eq!(placed, roster.len());
}
