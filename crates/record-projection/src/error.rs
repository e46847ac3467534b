//! Failures that abort a projection or comparison.
//!
//! Per-field and per-cell read failures never appear here: those are
//! absorbed into the document as inline `{label, error}` entries. What
//! remains is the caller-visible taxonomy, each variant with a stable
//! wire code.

use crate::source::SourceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure of a whole single-record projection.
#[derive(Debug, Clone, Error)]
pub enum ProjectionError {
    /// Caller-fixable argument problem; raised before any host call.
    #[error("{message}")]
    Validation { message: String },

    /// The record could not be opened at all (missing, inaccessible, or
    /// a host-side exception during load).
    #[error("failed to load {record_type} {record_id}: {message}")]
    Load {
        record_type: String,
        record_id: String,
        message: String,
        /// Host stack trace split into lines, when available.
        stack: Vec<String>,
    },
}

impl ProjectionError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn load(record_type: &str, record_id: &str, source: SourceError) -> Self {
        Self::Load {
            record_type: record_type.to_string(),
            record_id: record_id.to_string(),
            message: source.to_string(),
            stack: source.stack().to_vec(),
        }
    }

    /// Stable wire code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Load { .. } => "LOAD_ERROR",
        }
    }
}

/// Which record of a comparison a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSide {
    Record1,
    Record2,
}

impl fmt::Display for ComparisonSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record1 => write!(f, "record 1"),
            Self::Record2 => write!(f, "record 2"),
        }
    }
}

/// Failure of a whole comparison. Either side failing aborts the run;
/// no partial diff survives.
#[derive(Debug, Clone, Error)]
pub enum ComparisonError {
    #[error("{message}")]
    Validation { message: String },

    #[error("comparison aborted: {side} ({record_id}) failed: {source}")]
    Load {
        side: ComparisonSide,
        record_id: String,
        source: ProjectionError,
    },
}

impl ComparisonError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn load(side: ComparisonSide, record_id: &str, source: ProjectionError) -> Self {
        Self::Load {
            side,
            record_id: record_id.to_string(),
            source,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Load { .. } => "COMPARISON_LOAD_ERROR",
        }
    }
}

/// Wire shape of a top-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    /// Stack trace lines from the host, when the load failure carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl From<&ProjectionError> for ErrorBody {
    fn from(error: &ProjectionError) -> Self {
        let details = match error {
            ProjectionError::Load { stack, .. } if !stack.is_empty() => Some(stack.clone()),
            _ => None,
        };
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

impl From<&ComparisonError> for ErrorBody {
    fn from(error: &ComparisonError) -> Self {
        let details = match error {
            ComparisonError::Load {
                source: ProjectionError::Load { stack, .. },
                ..
            } if !stack.is_empty() => Some(stack.clone()),
            _ => None,
        };
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}
