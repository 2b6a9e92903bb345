use lunchtag_core::errors::ErrorInfo;
use lunchtag_core::{fresh_master_seed, Group, LunchError, ParticipantId, RngHandle, Roster};
use serde::{Deserialize, Serialize};

use crate::config::AssignConfig;
use crate::determinism;
use crate::events::{AssignEvent, AssignObserver, TracingObserver};
use crate::repeats::{find_repeats, RepeatViolation};
use crate::shuffle::shuffle_and_group;
use crate::strata::{self, Stratum};

/// Whether the returned proposal avoided every prior pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    /// No group repeats a prior pairing.
    Accepted,
    /// Attempts ran out; the last proposal is returned with its repeats.
    Exhausted,
}

/// Result of one assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    /// Accepted (or last attempted) proposal.
    pub groups: Vec<Group>,
    /// Participants excluded from every group.
    pub leftover: Vec<ParticipantId>,
    /// Attempts used.
    pub attempts: usize,
    /// Acceptance status.
    pub status: AssignmentStatus,
    /// Repeats remaining in `groups`; empty when accepted.
    pub repeats: Vec<RepeatViolation>,
    /// Master seed the run drew from.
    pub seed: u64,
}

impl AssignmentOutcome {
    /// Whether the proposal avoided every prior pairing.
    pub fn is_accepted(&self) -> bool {
        self.status == AssignmentStatus::Accepted
    }

    /// Number of participants placed in a group.
    pub fn assigned_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }
}

/// A candidate grouping produced by one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    /// Groups merged across strata by index.
    pub groups: Vec<Group>,
    /// Leftover of every stratum, concatenated in stratum order.
    pub leftover: Vec<ParticipantId>,
}

/// Validated sampling plan shared by every attempt.
#[derive(Debug, Clone)]
pub struct Plan {
    strata: Vec<Stratum>,
    overflow: Vec<bool>,
    num_groups: usize,
    subgroup_size: usize,
}

impl Plan {
    /// Checks every precondition and fixes the group layout.
    pub fn new(roster: &Roster, config: &AssignConfig) -> Result<Self, LunchError> {
        if config.group_size == 0 {
            return Err(LunchError::precondition(
                "group-size-zero",
                "group size must be at least 1",
            ));
        }
        if config.group_size > roster.len() {
            return Err(LunchError::Precondition(
                ErrorInfo::new("group-size-too-large", "group size exceeds the roster size")
                    .with_context("group_size", config.group_size.to_string())
                    .with_context("roster", roster.len().to_string()),
            ));
        }
        if config.max_attempts == 0 {
            return Err(LunchError::precondition(
                "max-attempts-zero",
                "at least one sampling attempt is required",
            ));
        }

        let strata = strata::partition(roster, config.stratify_by.as_deref())?;
        if config.group_size % strata.len() != 0 {
            return Err(LunchError::Precondition(
                ErrorInfo::new(
                    "group-size-indivisible",
                    "group size must be divisible by the number of strata",
                )
                .with_context("group_size", config.group_size.to_string())
                .with_context("strata", strata.len().to_string())
                .with_hint("only one-to-one mixing across strata is supported"),
            ));
        }
        let names: Vec<&str> = strata.iter().map(|stratum| stratum.name.as_str()).collect();
        let overflow = config.overflow.resolve(&names)?;

        let subgroup_size = config.group_size / strata.len();
        let smallest = strata.iter().map(Stratum::len).min().unwrap_or(0);
        let num_groups = smallest / subgroup_size;
        if num_groups == 0 {
            return Err(LunchError::Precondition(
                ErrorInfo::new(
                    "stratum-too-small",
                    "smallest stratum cannot supply a single subgroup",
                )
                .with_context("smallest", smallest.to_string())
                .with_context("subgroup_size", subgroup_size.to_string()),
            ));
        }

        Ok(Self {
            strata,
            overflow,
            num_groups,
            subgroup_size,
        })
    }

    /// Number of groups in every proposal.
    pub fn num_groups(&self) -> usize {
        self.num_groups
    }

    /// Members contributed by each stratum to each group (before overflow).
    pub fn subgroup_size(&self) -> usize {
        self.subgroup_size
    }

    /// Strata in name order.
    pub fn strata(&self) -> &[Stratum] {
        &self.strata
    }

    /// Draws one proposal for `attempt` from `master_seed`.
    pub fn propose(&self, master_seed: u64, attempt: usize) -> Result<Proposal, LunchError> {
        let mut groups = vec![Group::new(); self.num_groups];
        let mut leftover = Vec::new();
        for (index, (stratum, &allow_overflow)) in
            self.strata.iter().zip(&self.overflow).enumerate()
        {
            let mut rng =
                RngHandle::from_seed(determinism::shuffle_seed(master_seed, attempt, index));
            let draw = shuffle_and_group(
                &stratum.members,
                self.num_groups,
                self.subgroup_size,
                allow_overflow,
                &mut rng,
            )?;
            for (group, subgroup) in groups.iter_mut().zip(draw.subgroups) {
                group.absorb(subgroup);
            }
            leftover.extend(draw.leftover);
        }
        Ok(Proposal { groups, leftover })
    }
}

/// Runs the rejection sampler, reporting progress through `tracing`.
pub fn assign(
    roster: &Roster,
    history: &[Group],
    config: &AssignConfig,
) -> Result<AssignmentOutcome, LunchError> {
    assign_with_observer(roster, history, config, &mut TracingObserver)
}

/// Runs the rejection sampler, reporting progress to `observer`.
///
/// Proposals are drawn until one shares at most one member with every prior
/// group, or `max_attempts` is spent. Exhaustion is not an error: the last
/// proposal comes back flagged [`AssignmentStatus::Exhausted`] together with
/// its violations.
pub fn assign_with_observer<O: AssignObserver + ?Sized>(
    roster: &Roster,
    history: &[Group],
    config: &AssignConfig,
    observer: &mut O,
) -> Result<AssignmentOutcome, LunchError> {
    let plan = Plan::new(roster, config)?;
    let seed = config
        .seed_policy
        .master_seed
        .unwrap_or_else(fresh_master_seed);
    observer.observe(&AssignEvent::Started {
        participants: roster.len(),
        strata: plan.strata.len(),
        groups: plan.num_groups,
        subgroup_size: plan.subgroup_size,
        max_attempts: config.max_attempts,
        seed,
    });

    let mut attempt = 0;
    let (proposal, repeats) = loop {
        attempt += 1;
        let proposal = plan.propose(seed, attempt)?;
        let repeats = find_repeats(&proposal.groups, history);
        if repeats.is_empty() || attempt == config.max_attempts {
            break (proposal, repeats);
        }
        observer.observe(&AssignEvent::AttemptRejected {
            attempt,
            violations: repeats.len(),
        });
    };

    let status = if repeats.is_empty() {
        observer.observe(&AssignEvent::Accepted { attempts: attempt });
        AssignmentStatus::Accepted
    } else {
        observer.observe(&AssignEvent::Exhausted {
            attempts: attempt,
            repeats: repeats.clone(),
        });
        AssignmentStatus::Exhausted
    };
    if !proposal.leftover.is_empty() {
        observer.observe(&AssignEvent::Leftover {
            participants: proposal.leftover.clone(),
        });
    }

    Ok(AssignmentOutcome {
        groups: proposal.groups,
        leftover: proposal.leftover,
        attempts: attempt,
        status,
        repeats,
        seed,
    })
}
