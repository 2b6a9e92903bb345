use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, LunchError};

/// Delimiter used when a group is written as a single record cell.
pub const ID_DELIMITER: char = ',';

/// Unique identifier of a participant (typically an email address).
///
/// Never empty and never contains [`ID_DELIMITER`], so a group can always be
/// joined into one cell and split back without loss.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Validates and wraps a raw identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, LunchError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(LunchError::Record(ErrorInfo::new(
                "empty-identifier",
                "participant identifiers must not be empty",
            )));
        }
        if raw.contains(ID_DELIMITER) {
            return Err(LunchError::Record(
                ErrorInfo::new(
                    "identifier-delimiter",
                    format!("participant identifier contains '{ID_DELIMITER}'"),
                )
                .with_context("id", raw)
                .with_hint("identifiers are joined with commas in assignment files"),
            ));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ParticipantId {
    type Err = LunchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = LunchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ParticipantId> for String {
    fn from(value: ParticipantId) -> Self {
        value.0
    }
}

/// A signup: an identifier plus the optional stratum value used for mixing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier.
    pub id: ParticipantId,
    /// Value of the stratification attribute, when one was loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stratum: Option<String>,
}

impl Participant {
    /// Creates a participant without a stratum value.
    pub fn new(id: ParticipantId) -> Self {
        Self { id, stratum: None }
    }

    /// Creates a participant tagged with a stratum value.
    pub fn with_stratum(id: ParticipantId, stratum: impl Into<String>) -> Self {
        Self {
            id,
            stratum: Some(stratum.into()),
        }
    }
}

/// Ordered, de-duplicated collection of participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    stratum_key: Option<String>,
    participants: Vec<Participant>,
}

impl Roster {
    /// Builds a roster, rejecting duplicate identifiers.
    ///
    /// `stratum_key` names the attribute the participants' stratum values were
    /// read from; stratified assignment must request the same key.
    pub fn new(
        stratum_key: Option<String>,
        participants: Vec<Participant>,
    ) -> Result<Self, LunchError> {
        let mut counts: IndexMap<&ParticipantId, usize> = IndexMap::new();
        for participant in &participants {
            *counts.entry(&participant.id).or_insert(0) += 1;
        }
        let duplicates: Vec<&str> = counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(id, _)| id.as_str())
            .collect();
        if !duplicates.is_empty() {
            return Err(LunchError::DuplicateIdentifier(
                ErrorInfo::new(
                    "duplicate-signup",
                    format!("{} identifier(s) appear more than once", duplicates.len()),
                )
                .with_context("ids", duplicates.join(","))
                .with_hint("fix the duplicated rows in the signups file"),
            ));
        }
        Ok(Self {
            stratum_key,
            participants,
        })
    }

    /// Builds an unstratified roster from raw identifiers.
    pub fn from_ids<I, S>(ids: I) -> Result<Self, LunchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let participants = ids
            .into_iter()
            .map(|raw| ParticipantId::new(raw).map(Participant::new))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(None, participants)
    }

    /// Name of the attribute stratum values were taken from, if any.
    pub fn stratum_key(&self) -> Option<&str> {
        self.stratum_key.as_deref()
    }

    /// Participants in load order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Iterates over identifiers in load order.
    pub fn ids(&self) -> impl Iterator<Item = &ParticipantId> + '_ {
        self.participants.iter().map(|participant| &participant.id)
    }
}

/// One realized or proposed group: an unordered set of participant ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group(BTreeSet<ParticipantId>);

impl Group {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member, returning whether it was newly inserted.
    pub fn insert(&mut self, id: ParticipantId) -> bool {
        self.0.insert(id)
    }

    /// Merges every member of `other` into this group.
    pub fn absorb(&mut self, other: Group) {
        self.0.extend(other.0);
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `id` is a member.
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.0.contains(id)
    }

    /// Members in identifier order.
    pub fn iter(&self) -> btree_set::Iter<'_, ParticipantId> {
        self.0.iter()
    }

    /// Members shared with `other`.
    pub fn shared_with(&self, other: &Group) -> BTreeSet<ParticipantId> {
        self.0.intersection(&other.0).cloned().collect()
    }

    /// Members joined with [`ID_DELIMITER`], in identifier order.
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(ParticipantId::as_str)
            .collect::<Vec<_>>()
            .join(&ID_DELIMITER.to_string())
    }

    /// Splits a delimited cell back into a group.
    pub fn parse_joined(cell: &str) -> Result<Self, LunchError> {
        cell.split(ID_DELIMITER)
            .map(|raw| ParticipantId::new(raw.trim()))
            .collect()
    }
}

impl FromIterator<ParticipantId> for Group {
    fn from_iter<T: IntoIterator<Item = ParticipantId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Group {
    type Item = &'a ParticipantId;
    type IntoIter = btree_set::Iter<'a, ParticipantId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Group {
    type Item = ParticipantId;
    type IntoIter = btree_set::IntoIter<ParticipantId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.joined())
    }
}
