#![doc = "Rejection-sampling assignment of participants into repeat-free groups."]

//! Each attempt shuffles every stratum independently, cuts the permutation
//! into equal subgroups, merges the subgroups by index and checks the result
//! against the assignment history. The first proposal in which no group
//! shares two or more members with a prior group wins.

/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Sampling loop and public `assign` entry points.
pub mod engine;
/// Progress events and observers.
pub mod events;
/// Repeat detection against the history.
pub mod repeats;
/// Serializable run summaries.
pub mod report;
/// Per-stratum shuffle-and-group helper.
pub mod shuffle;
/// Roster partitioning into strata.
pub mod strata;

pub use config::{AssignConfig, OverflowPolicy, SeedPolicy, UNSTRATIFIED};
pub use engine::{
    assign, assign_with_observer, AssignmentOutcome, AssignmentStatus, Plan, Proposal,
};
pub use events::{AssignEvent, AssignObserver, EventLog, TracingObserver};
pub use repeats::{find_repeats, RepeatViolation, REPEAT_THRESHOLD};
pub use report::AssignmentReport;
pub use shuffle::{shuffle_and_group, StratumDraw};
pub use strata::{partition, Stratum};
