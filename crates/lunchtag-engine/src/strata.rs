use std::collections::BTreeMap;

use lunchtag_core::errors::ErrorInfo;
use lunchtag_core::{LunchError, ParticipantId, Roster};

use crate::config::UNSTRATIFIED;

/// Participants sharing one stratum value, in roster order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stratum {
    /// Stratum value (or [`UNSTRATIFIED`]).
    pub name: String,
    /// Member identifiers.
    pub members: Vec<ParticipantId>,
}

impl Stratum {
    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the stratum has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Splits the roster into strata ordered by name.
///
/// Without `stratify_by` the whole roster forms the single [`UNSTRATIFIED`]
/// stratum. With it, the roster must have been loaded with the same key and
/// every participant must carry a value.
pub fn partition(roster: &Roster, stratify_by: Option<&str>) -> Result<Vec<Stratum>, LunchError> {
    let Some(key) = stratify_by else {
        return Ok(vec![Stratum {
            name: UNSTRATIFIED.to_string(),
            members: roster.ids().cloned().collect(),
        }]);
    };
    if roster.stratum_key() != Some(key) {
        return Err(LunchError::Precondition(
            ErrorInfo::new(
                "stratum-key-mismatch",
                format!("roster was not loaded with stratification attribute '{key}'"),
            )
            .with_context("requested", key)
            .with_context("roster", roster.stratum_key().unwrap_or("<none>")),
        ));
    }
    let mut by_name: BTreeMap<&str, Vec<ParticipantId>> = BTreeMap::new();
    for participant in roster.participants() {
        let Some(value) = participant.stratum.as_deref() else {
            return Err(LunchError::Precondition(
                ErrorInfo::new(
                    "missing-stratum",
                    format!("participant has no value for '{key}'"),
                )
                .with_context("id", participant.id.as_str()),
            ));
        };
        by_name
            .entry(value)
            .or_default()
            .push(participant.id.clone());
    }
    Ok(by_name
        .into_iter()
        .map(|(name, members)| Stratum {
            name: name.to_string(),
            members,
        })
        .collect())
}
