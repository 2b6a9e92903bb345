use std::fs;
use std::path::Path;

use lunchtag_core::errors::{ErrorInfo, LunchError};
use lunchtag_engine::AssignmentReport;

use crate::serde::{from_json_slice, to_canonical_json_bytes};

/// Writes the report as canonical JSON, creating parent directories.
pub fn write_report(path: &Path, report: &AssignmentReport) -> Result<(), LunchError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            LunchError::Io(
                ErrorInfo::new("report-mkdir", err.to_string())
                    .with_context("path", parent.display().to_string()),
            )
        })?;
    }
    let bytes = to_canonical_json_bytes(report)?;
    fs::write(path, bytes).map_err(|err| {
        LunchError::Io(
            ErrorInfo::new("report-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

/// Loads a report written by [`write_report`].
pub fn load_report(path: &Path) -> Result<AssignmentReport, LunchError> {
    let bytes = fs::read(path).map_err(|err| {
        LunchError::Io(
            ErrorInfo::new("report-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    from_json_slice(&bytes)
}
