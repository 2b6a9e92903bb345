use lunchtag_core::{Group, ParticipantId, RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::config::AssignConfig;
use crate::engine::{AssignmentOutcome, AssignmentStatus};
use crate::repeats::RepeatViolation;

/// Schema of [`AssignmentReport`] payloads.
pub const REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializable summary of an assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentReport {
    pub schema_version: SchemaVersion,
    pub provenance: RunProvenance,
    pub status: AssignmentStatus,
    pub attempts: usize,
    pub max_attempts: usize,
    pub group_size: usize,
    pub stratify_by: Option<String>,
    pub seed_label: Option<String>,
    pub groups: Vec<Group>,
    pub group_sizes: Vec<usize>,
    pub assigned: usize,
    pub leftover: Vec<ParticipantId>,
    pub repeats: Vec<RepeatViolation>,
}

impl AssignmentReport {
    /// Builds the report for `outcome`; the outcome's seed overrides the
    /// provenance seed.
    pub fn new(
        outcome: &AssignmentOutcome,
        config: &AssignConfig,
        mut provenance: RunProvenance,
    ) -> Self {
        provenance.seed = outcome.seed;
        Self {
            schema_version: REPORT_SCHEMA,
            provenance,
            status: outcome.status,
            attempts: outcome.attempts,
            max_attempts: config.max_attempts,
            group_size: config.group_size,
            stratify_by: config.stratify_by.clone(),
            seed_label: config.seed_policy.label.clone(),
            groups: outcome.groups.clone(),
            group_sizes: outcome.groups.iter().map(Group::len).collect(),
            assigned: outcome.assigned_count(),
            leftover: outcome.leftover.clone(),
            repeats: outcome.repeats.clone(),
        }
    }

    /// Whether the run avoided every prior pairing.
    pub fn is_accepted(&self) -> bool {
        self.status == AssignmentStatus::Accepted
    }
}
