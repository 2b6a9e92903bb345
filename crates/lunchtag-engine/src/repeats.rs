use std::collections::BTreeSet;
use std::fmt::{self, Display};

use lunchtag_core::{Group, ParticipantId};
use serde::{Deserialize, Serialize};

/// Smallest overlap with a prior group that counts as a repeat.
pub const REPEAT_THRESHOLD: usize = 2;

/// A proposed group that re-unites two or more members of a prior group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatViolation {
    /// Index of the offending group within the proposal.
    pub group_index: usize,
    /// Index of the prior group within the history.
    pub history_index: usize,
    /// Members the two groups have in common.
    pub shared: BTreeSet<ParticipantId>,
}

impl Display for RepeatViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared: Vec<&str> = self.shared.iter().map(ParticipantId::as_str).collect();
        write!(
            f,
            "group {} repeats history group {}: {{{}}}",
            self.group_index,
            self.history_index,
            shared.join(",")
        )
    }
}

/// Lists every (proposed, prior) group pair sharing at least
/// [`REPEAT_THRESHOLD`] members, ordered by proposal then history index.
///
/// An empty result means the proposal is acceptable.
pub fn find_repeats(proposal: &[Group], history: &[Group]) -> Vec<RepeatViolation> {
    let mut out = Vec::new();
    for (group_index, group) in proposal.iter().enumerate() {
        for (history_index, prior) in history.iter().enumerate() {
            let shared = group.shared_with(prior);
            if shared.len() >= REPEAT_THRESHOLD {
                out.push(RepeatViolation {
                    group_index,
                    history_index,
                    shared,
                });
            }
        }
    }
    out
}
