//! Discriminated response envelopes.
//!
//! Callers always receive a `{success, ...}` shape; errors never escape
//! the projection boundary as panics or bare `Err`s on the wire.

use crate::compare::DiffResult;
use crate::error::{ComparisonError, ErrorBody, ProjectionError};
use crate::model::Document;
use crate::perf::PerformanceTrace;
use serde::{Deserialize, Serialize};

/// Result of a single-record projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    pub performance: PerformanceTrace,
}

impl ProjectionResponse {
    pub fn ok(document: Document, performance: PerformanceTrace) -> Self {
        Self {
            success: true,
            data: Some(document),
            error: None,
            performance,
        }
    }

    pub fn failed(error: &ProjectionError, performance: PerformanceTrace) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody::from(error)),
            performance,
        }
    }

    /// The document, when the projection succeeded.
    pub fn document(&self) -> Option<&Document> {
        self.data.as_ref()
    }
}

/// Result of a two-record comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DiffResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    pub performance: PerformanceTrace,
}

impl ComparisonResponse {
    pub fn ok(diff: DiffResult, performance: PerformanceTrace) -> Self {
        Self {
            success: true,
            data: Some(diff),
            error: None,
            performance,
        }
    }

    pub fn failed(error: &ComparisonError, performance: PerformanceTrace) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody::from(error)),
            performance,
        }
    }

    /// The diff, when both projections succeeded.
    pub fn diff(&self) -> Option<&DiffResult> {
        self.data.as_ref()
    }
}
