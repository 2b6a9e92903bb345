use lunchtag_core::ParticipantId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::repeats::RepeatViolation;

/// Progress notifications emitted while sampling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum AssignEvent {
    /// Preconditions passed and sampling is about to begin.
    Started {
        /// Roster size.
        participants: usize,
        /// Number of strata.
        strata: usize,
        /// Number of groups every proposal will contain.
        groups: usize,
        /// Members drawn from each stratum per group.
        subgroup_size: usize,
        /// Attempt budget.
        max_attempts: usize,
        /// Master seed in effect.
        seed: u64,
    },
    /// A proposal repeated prior pairings and was discarded.
    AttemptRejected {
        /// One-based attempt number.
        attempt: usize,
        /// Number of repeat violations found.
        violations: usize,
    },
    /// A proposal without repeats was found.
    Accepted {
        /// Attempts used, including the accepted one.
        attempts: usize,
    },
    /// Every attempt repeated prior pairings; the last proposal is kept.
    Exhausted {
        /// Attempts used.
        attempts: usize,
        /// Violations of the proposal that was kept.
        repeats: Vec<RepeatViolation>,
    },
    /// Participants were left out of every group.
    Leftover {
        /// Excluded participants.
        participants: Vec<ParticipantId>,
    },
}

/// Sink for [`AssignEvent`]s.
pub trait AssignObserver {
    /// Receives one event.
    fn observe(&mut self, event: &AssignEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl AssignObserver for TracingObserver {
    fn observe(&mut self, event: &AssignEvent) {
        match event {
            AssignEvent::Started {
                participants,
                strata,
                groups,
                subgroup_size,
                max_attempts,
                seed,
            } => info!(
                participants,
                strata, groups, subgroup_size, max_attempts, seed, "sampling assignments"
            ),
            AssignEvent::AttemptRejected {
                attempt,
                violations,
            } => debug!(attempt, violations, "proposal repeats prior groups"),
            AssignEvent::Accepted { attempts } => {
                let noun = if *attempts == 1 { "try" } else { "tries" };
                info!(attempts, "made assignments in {attempts} {noun}");
            }
            AssignEvent::Exhausted { attempts, repeats } => {
                let listed: Vec<String> = repeats.iter().map(ToString::to_string).collect();
                warn!(
                    attempts,
                    repeats = repeats.len(),
                    "failed to avoid repeats after {attempts} tries: {}",
                    listed.join("; ")
                );
            }
            AssignEvent::Leftover { participants } => {
                let ids: Vec<&str> = participants.iter().map(ParticipantId::as_str).collect();
                warn!(
                    leftover = participants.len(),
                    "participants not assigned to a group: {}",
                    ids.join(",")
                );
            }
        }
    }
}

/// Records every event in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventLog(pub Vec<AssignEvent>);

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events.
    pub fn events(&self) -> &[AssignEvent] {
        &self.0
    }
}

impl AssignObserver for EventLog {
    fn observe(&mut self, event: &AssignEvent) {
        self.0.push(event.clone());
    }
}

impl<O: AssignObserver + ?Sized> AssignObserver for &mut O {
    fn observe(&mut self, event: &AssignEvent) {
        (**self).observe(event);
    }
}
