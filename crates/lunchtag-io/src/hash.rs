use lunchtag_core::{Group, LunchError, Roster};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::serde::to_canonical_json_bytes;

/// Computes a stable hexadecimal hash for the provided serializable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, LunchError> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(hex::encode(Sha256::digest(bytes)))
}

/// Hash of the roster's identifiers and stratum values, independent of row order.
pub fn roster_hash(roster: &Roster) -> Result<String, LunchError> {
    let mut rows: Vec<(&str, Option<&str>)> = roster
        .participants()
        .iter()
        .map(|p| (p.id.as_str(), p.stratum.as_deref()))
        .collect();
    rows.sort_unstable();
    stable_hash_string(&(roster.stratum_key(), rows))
}

/// Hash of the history as a multiset of groups.
pub fn history_hash(history: &[Group]) -> Result<String, LunchError> {
    let mut groups: Vec<&Group> = history.iter().collect();
    groups.sort_unstable();
    stable_hash_string(&groups)
}
