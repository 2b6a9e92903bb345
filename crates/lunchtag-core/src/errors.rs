//! Structured error types shared across lunchtag crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`LunchError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (identifiers, sizes, paths, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for lunchtag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum LunchError {
    /// Invalid assignment configuration, detected before any sampling.
    #[error("precondition violated: {0}")]
    Precondition(ErrorInfo),
    /// A required column is absent from a tabular record file.
    #[error("missing column: {0}")]
    MissingColumn(ErrorInfo),
    /// Two or more signups share one identifier.
    #[error("duplicate identifier: {0}")]
    DuplicateIdentifier(ErrorInfo),
    /// Malformed row or cell inside a record file.
    #[error("record error: {0}")]
    Record(ErrorInfo),
    /// File system and path pattern failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl LunchError {
    /// Shorthand for a [`LunchError::Precondition`] with the given code and message.
    pub fn precondition(code: impl Into<String>, message: impl Into<String>) -> Self {
        LunchError::Precondition(ErrorInfo::new(code, message))
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            LunchError::Precondition(info)
            | LunchError::MissingColumn(info)
            | LunchError::DuplicateIdentifier(info)
            | LunchError::Record(info)
            | LunchError::Io(info)
            | LunchError::Serde(info) => info,
        }
    }

    /// Whether the error is a configuration problem rather than a data problem.
    pub fn is_precondition(&self) -> bool {
        matches!(self, LunchError::Precondition(_))
    }
}
