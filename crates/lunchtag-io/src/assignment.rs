use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use lunchtag_core::errors::{ErrorInfo, LunchError};
use lunchtag_core::Group;
use tracing::info;

use crate::roster::{column_index, record_error, with_path};

/// Header of the single column in assignment files.
pub const IDS_COLUMN: &str = "IDs";

fn io_error(code: &str, err: impl ToString, path: &Path) -> LunchError {
    LunchError::Io(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

/// Writes one row per group to `path`, creating parent directories.
pub fn save_assignment(path: &Path, groups: &[Group]) -> Result<(), LunchError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| io_error("assignment-mkdir", err, parent))?;
    }
    let file = File::create(path).map_err(|err| io_error("assignment-create", err, path))?;
    write_assignment(file, groups).map_err(|err| with_path(err, path))?;
    info!(
        participants = groups.iter().map(Group::len).sum::<usize>(),
        groups = groups.len(),
        path = %path.display(),
        "wrote assignment"
    );
    Ok(())
}

/// Writes the `IDs` header followed by each group's comma-joined members.
pub fn write_assignment<W: Write>(writer: W, groups: &[Group]) -> Result<(), LunchError> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record([IDS_COLUMN]).map_err(write_error)?;
    for group in groups {
        wtr.write_record([group.joined()]).map_err(write_error)?;
    }
    wtr.flush()
        .map_err(|err| LunchError::Io(ErrorInfo::new("assignment-flush", err.to_string())))
}

/// Reads one assignment file.
pub fn read_assignment_file(path: &Path) -> Result<Vec<Group>, LunchError> {
    let file = File::open(path).map_err(|err| io_error("assignment-open", err, path))?;
    read_assignment(file).map_err(|err| with_path(err, path))
}

/// Parses assignment rows back into groups.
pub fn read_assignment<R: Read>(reader: R) -> Result<Vec<Group>, LunchError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers().map_err(record_error)?.clone();
    let ids_index = column_index(&headers, IDS_COLUMN)?;
    let mut groups = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(record_error)?;
        let cell = record.get(ids_index).unwrap_or_default();
        groups.push(Group::parse_joined(cell)?);
    }
    Ok(groups)
}

fn write_error(err: csv::Error) -> LunchError {
    LunchError::Io(ErrorInfo::new("assignment-write", err.to_string()))
}
