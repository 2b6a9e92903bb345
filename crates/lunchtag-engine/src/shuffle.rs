use lunchtag_core::errors::ErrorInfo;
use lunchtag_core::{Group, LunchError, ParticipantId, RngHandle};
use rand::seq::SliceRandom;

/// One stratum's contribution to a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StratumDraw {
    /// Exactly `num_groups` subgroups, each of at least `subgroup_size` members.
    pub subgroups: Vec<Group>,
    /// Members left out because the stratum disallows overflow.
    pub leftover: Vec<ParticipantId>,
}

/// Shuffles `members` and cuts the permutation into `num_groups` subgroups of
/// exactly `subgroup_size`.
///
/// Members past `num_groups * subgroup_size` go round-robin into the
/// subgroups in shuffled order when `allow_overflow` is set, and into
/// `leftover` otherwise.
pub fn shuffle_and_group(
    members: &[ParticipantId],
    num_groups: usize,
    subgroup_size: usize,
    allow_overflow: bool,
    rng: &mut RngHandle,
) -> Result<StratumDraw, LunchError> {
    let required = num_groups * subgroup_size;
    if members.len() < required {
        return Err(LunchError::Precondition(
            ErrorInfo::new(
                "stratum-underflow",
                "stratum cannot fill the requested number of groups",
            )
            .with_context("members", members.len().to_string())
            .with_context("required", required.to_string()),
        ));
    }
    if num_groups == 0 && !members.is_empty() && allow_overflow {
        return Err(LunchError::precondition(
            "no-groups",
            "cannot redistribute overflow into zero groups",
        ));
    }

    let mut shuffled = members.to_vec();
    shuffled.shuffle(rng.inner_mut());
    let overflow = shuffled.split_off(required);

    let mut subgroups: Vec<Group> = shuffled
        .chunks(subgroup_size.max(1))
        .map(|chunk| chunk.iter().cloned().collect())
        .collect();
    subgroups.resize_with(num_groups, Group::new);

    let mut leftover = Vec::new();
    if allow_overflow {
        for (slot, id) in overflow.into_iter().enumerate() {
            subgroups[slot % num_groups].insert(id);
        }
    } else {
        leftover = overflow;
    }
    Ok(StratumDraw {
        subgroups,
        leftover,
    })
}
