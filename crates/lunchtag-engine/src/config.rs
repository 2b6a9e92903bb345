use std::collections::{BTreeMap, BTreeSet};

use lunchtag_core::errors::ErrorInfo;
use lunchtag_core::LunchError;
use serde::{Deserialize, Serialize};

/// Name of the single stratum used when no stratification is requested.
pub const UNSTRATIFIED: &str = "all";

/// YAML-configurable parameters governing one assignment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignConfig {
    /// Requested group size. With overflow enabled this is the minimum size.
    pub group_size: usize,
    /// Roster attribute to balance groups across, if any.
    #[serde(default)]
    pub stratify_by: Option<String>,
    /// Whether leftover participants are folded into existing groups.
    #[serde(default)]
    pub overflow: OverflowPolicy,
    /// Upper bound on sampling attempts.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Master seed and labelling policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_max_attempts() -> usize {
    5000
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            group_size: 2,
            stratify_by: None,
            overflow: OverflowPolicy::default(),
            max_attempts: default_max_attempts(),
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl AssignConfig {
    /// Creates an unstratified configuration with default overflow and attempts.
    pub fn with_group_size(group_size: usize) -> Self {
        Self {
            group_size,
            ..Self::default()
        }
    }

    /// Parses a configuration from YAML bytes.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, LunchError> {
        serde_yaml::from_slice(data).map_err(|err| {
            LunchError::Serde(ErrorInfo::new("config-parse", err.to_string()))
        })
    }
}

/// Overflow policy, either uniform or per stratum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverflowPolicy {
    /// One flag applied to every stratum.
    Uniform(bool),
    /// Explicit flag per stratum name; keys must match the strata exactly.
    PerStratum(BTreeMap<String, bool>),
}

impl Default for OverflowPolicy {
    fn default() -> Self {
        OverflowPolicy::Uniform(true)
    }
}

impl OverflowPolicy {
    /// Resolves one flag per stratum, in the order of `strata`.
    pub fn resolve(&self, strata: &[&str]) -> Result<Vec<bool>, LunchError> {
        match self {
            OverflowPolicy::Uniform(flag) => Ok(vec![*flag; strata.len()]),
            OverflowPolicy::PerStratum(map) => {
                let expected: BTreeSet<&str> = strata.iter().copied().collect();
                let given: BTreeSet<&str> = map.keys().map(String::as_str).collect();
                if expected != given {
                    return Err(LunchError::Precondition(
                        ErrorInfo::new(
                            "overflow-strata-mismatch",
                            "overflow policy must name exactly the strata of the roster",
                        )
                        .with_context("strata", join(&expected))
                        .with_context("overflow_keys", join(&given)),
                    ));
                }
                Ok(strata.iter().map(|name| map[*name]).collect())
            }
        }
    }
}

fn join(names: &BTreeSet<&str>) -> String {
    names.iter().copied().collect::<Vec<_>>().join(",")
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed for the run. A fresh one is drawn when absent.
    #[serde(default)]
    pub master_seed: Option<u64>,
    /// Optional label carried into reports.
    #[serde(default)]
    pub label: Option<String>,
}
