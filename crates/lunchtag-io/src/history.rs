use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use glob::glob;
use lunchtag_core::errors::{ErrorInfo, LunchError};
use lunchtag_core::Group;
use tracing::info;

use crate::assignment::read_assignment_file;

/// Groups realized in earlier rounds, with the files they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    /// Every prior group, file by file in load order.
    pub groups: Vec<Group>,
    /// Files read.
    pub files: Vec<PathBuf>,
    /// Number of groups contributed by each file, parallel to `files`.
    pub group_counts: Vec<usize>,
}

impl History {
    /// Number of distinct participants appearing anywhere in the history.
    pub fn unique_participants(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|group| group.iter())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Drops the groups read from `path` (compared after canonicalization).
    pub fn excluding(&self, path: &Path) -> History {
        let target = path.canonicalize().ok();
        let mut out = History::default();
        let mut offset = 0;
        for (file, &count) in self.files.iter().zip(&self.group_counts) {
            let same = target.is_some() && file.canonicalize().ok() == target;
            if !same {
                out.groups.extend_from_slice(&self.groups[offset..offset + count]);
                out.files.push(file.clone());
                out.group_counts.push(count);
            }
            offset += count;
        }
        out
    }
}

/// Expands each glob pattern and reads every matching assignment file.
///
/// Paths are sorted per pattern; a path matched by several patterns is read
/// once. A pattern matching nothing contributes nothing.
pub fn load_history(patterns: &[String]) -> Result<History, LunchError> {
    let mut files: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        let entries = glob(pattern).map_err(|err| {
            LunchError::Io(
                ErrorInfo::new("history-pattern", err.to_string())
                    .with_context("pattern", pattern.as_str()),
            )
        })?;
        let mut matched = Vec::new();
        for entry in entries {
            let path = entry.map_err(|err| {
                LunchError::Io(
                    ErrorInfo::new("history-glob", err.to_string())
                        .with_context("pattern", pattern.as_str()),
                )
            })?;
            if path.is_file() && !files.contains(&path) {
                matched.push(path);
            }
        }
        matched.sort();
        files.extend(matched);
    }

    let mut groups = Vec::new();
    let mut group_counts = Vec::with_capacity(files.len());
    for path in &files {
        let round = read_assignment_file(path)?;
        group_counts.push(round.len());
        groups.extend(round);
    }
    let history = History {
        groups,
        files,
        group_counts,
    };
    let names: Vec<String> = history
        .files
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    info!(
        groups = history.groups.len(),
        participants = history.unique_participants(),
        files = history.files.len(),
        "read {} prior groups of {} unique participants from {} file(s): [{}]",
        history.groups.len(),
        history.unique_participants(),
        history.files.len(),
        names.join(", ")
    );
    Ok(history)
}
