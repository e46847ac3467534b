//! The portable projection document.
//!
//! Everything here is pure data with serde derives; the wire key names
//! (camelCase, `type`, `_lineNumber`) are the shape consumers see. A
//! `Document` is created fresh per invocation and never mutated after.

use crate::ordered::OrderedMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One projected body field.
///
/// A field that could not be read at all degrades to the inline failure
/// shape instead of aborting the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldProjection {
    Ok(FieldData),
    Failed(FieldFailure),
}

impl FieldProjection {
    /// Raw value, when the field was readable.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Ok(data) => Some(&data.value),
            Self::Failed(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Ok(data) => &data.label,
            Self::Failed(failure) => &failure.label,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldData {
    pub field_id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub value: Value,
    /// Display text, present only when it differs from `value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub is_mandatory: bool,
    pub is_display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFailure {
    pub field_id: String,
    pub label: String,
    pub error: String,
}

/// One projected sublist cell; same shape as a body field minus the
/// mandatory/display flags and the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellProjection {
    Ok(CellData),
    Failed(CellFailure),
}

impl CellProjection {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Ok(data) => Some(&data.value),
            Self::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellData {
    pub label: String,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellFailure {
    pub label: String,
    pub error: String,
}

/// One sublist line: the 1-based original position plus one cell per
/// column, flattened into the same JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineProjection {
    /// Original 1-based line number; stable even when truncation drops
    /// later lines (no renumbering).
    #[serde(rename = "_lineNumber")]
    pub line_number: usize,
    #[serde(flatten)]
    pub cells: OrderedMap<CellProjection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SublistProjection {
    pub lines: Vec<LineProjection>,
    pub metadata: SublistMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SublistMetadata {
    /// True underlying line count reported by the host.
    pub line_count: usize,
    pub truncated: bool,
    /// Present only when the cap dropped lines; equals `lines.len()`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayed_lines: Option<usize>,
}

/// A full record snapshot: fields plus sublists plus load metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type")]
    pub record_type: String,
    pub id: String,
    pub metadata: DocumentMetadata,
    pub fields: OrderedMap<FieldProjection>,
    pub sublists: OrderedMap<SublistProjection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub loaded_at: DateTime<Utc>,
    pub loaded_by: String,
}
