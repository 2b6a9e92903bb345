use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use lunchtag_core::errors::{ErrorInfo, LunchError};
use lunchtag_core::{Participant, ParticipantId, Roster};
use tracing::info;

/// Columns to pick out of a signup file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterColumns {
    /// Column holding each participant's unique identifier.
    pub id: String,
    /// Column holding the stratification attribute, if any.
    pub stratum: Option<String>,
}

impl RosterColumns {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            stratum: None,
        }
    }

    pub fn with_stratum(mut self, column: impl Into<String>) -> Self {
        self.stratum = Some(column.into());
        self
    }
}

/// Loads a de-duplicated roster from a CSV signup file with a header row.
pub fn load_roster(path: &Path, columns: &RosterColumns) -> Result<Roster, LunchError> {
    let file = File::open(path).map_err(|err| {
        LunchError::Io(
            ErrorInfo::new("signups-open", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let roster = read_roster(file, columns).map_err(|err| with_path(err, path))?;
    info!(
        signups = roster.len(),
        path = %path.display(),
        "considering {} signups for this draw",
        roster.len()
    );
    Ok(roster)
}

/// Reads a roster from CSV data with a header row.
///
/// Cells are trimmed. Empty stratum cells become `None`; every other column
/// is ignored.
pub fn read_roster<R: Read>(reader: R, columns: &RosterColumns) -> Result<Roster, LunchError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers().map_err(record_error)?.clone();
    let id_index = column_index(&headers, &columns.id)?;
    let stratum_index = columns
        .stratum
        .as_deref()
        .map(|name| column_index(&headers, name))
        .transpose()?;

    let mut participants = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record.map_err(record_error)?;
        let raw_id = record.get(id_index).unwrap_or_default();
        let id = ParticipantId::new(raw_id).map_err(|err| at_row(err, row))?;
        let stratum = stratum_index
            .and_then(|index| record.get(index))
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        participants.push(Participant { id, stratum });
    }
    Roster::new(columns.stratum.clone(), participants)
}

pub(crate) fn column_index(headers: &StringRecord, name: &str) -> Result<usize, LunchError> {
    headers.iter().position(|header| header == name).ok_or_else(|| {
        LunchError::MissingColumn(
            ErrorInfo::new("missing-column", format!("column \"{name}\" not found"))
                .with_context("column", name)
                .with_context("available", headers.iter().collect::<Vec<_>>().join(",")),
        )
    })
}

pub(crate) fn record_error(err: csv::Error) -> LunchError {
    let mut info = ErrorInfo::new("csv-parse", err.to_string());
    if let Some(position) = err.position() {
        info = info.with_context("line", position.line().to_string());
    }
    LunchError::Record(info)
}

/// Data rows are one-based and follow the header line.
fn at_row(err: LunchError, row: usize) -> LunchError {
    match err {
        LunchError::Record(info) => {
            LunchError::Record(info.with_context("row", (row + 1).to_string()))
        }
        other => other,
    }
}

pub(crate) fn with_path(err: LunchError, path: &Path) -> LunchError {
    let path = path.display().to_string();
    match err {
        LunchError::MissingColumn(info) => LunchError::MissingColumn(info.with_context("path", path)),
        LunchError::DuplicateIdentifier(info) => {
            LunchError::DuplicateIdentifier(info.with_context("path", path))
        }
        LunchError::Record(info) => LunchError::Record(info.with_context("path", path)),
        other => other,
    }
}
