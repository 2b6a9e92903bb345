mod common;

use common::pid;
use lunchtag_core::{LunchError, ParticipantId, RngHandle};
use lunchtag_engine::shuffle_and_group;

fn members(count: usize) -> Vec<ParticipantId> {
    (0..count).map(|i| pid(&format!("m{i}"))).collect()
}

#[test]
fn exact_fit_has_no_overflow() {
    let mut rng = RngHandle::from_seed(1);
    let draw = shuffle_and_group(&members(6), 3, 2, true, &mut rng).unwrap();
    assert_eq!(draw.subgroups.len(), 3);
    assert!(draw.subgroups.iter().all(|g| g.len() == 2));
    assert!(draw.leftover.is_empty());
}

#[test]
fn large_overflow_wraps_round_robin() {
    let mut rng = RngHandle::from_seed(2);
    let draw = shuffle_and_group(&members(9), 2, 2, true, &mut rng).unwrap();
    let sizes: Vec<usize> = draw.subgroups.iter().map(|g| g.len()).collect();
    assert_eq!(sizes, vec![5, 4]);
}

#[test]
fn overflow_disallowed_keeps_remainder_in_shuffled_order() {
    let mut rng = RngHandle::from_seed(3);
    let draw = shuffle_and_group(&members(7), 2, 3, false, &mut rng).unwrap();
    assert!(draw.subgroups.iter().all(|g| g.len() == 3));
    assert_eq!(draw.leftover.len(), 1);
    assert!(draw.subgroups.iter().all(|g| !g.contains(&draw.leftover[0])));
}

#[test]
fn too_few_members_is_a_precondition_violation() {
    let mut rng = RngHandle::from_seed(4);
    let err = shuffle_and_group(&members(3), 2, 2, true, &mut rng).unwrap_err();
    match err {
        LunchError::Precondition(info) => assert_eq!(info.code, "stratum-underflow"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn fresh_rng_streams_give_different_permutations() {
    let pool = members(20);
    let draws: Vec<_> = (0..5)
        .map(|seed| {
            let mut rng = RngHandle::from_seed(seed);
            shuffle_and_group(&pool, 10, 2, true, &mut rng).unwrap().subgroups
        })
        .collect();
    assert!(draws.windows(2).any(|pair| pair[0] != pair[1]));
}
