//! The host record store, as consumed by the projector.
//!
//! The hosting platform owns record storage and permissioning; this crate
//! only ever reads through these traits. Accessors return `Result` because
//! the host's record objects support capabilities inconsistently — text
//! and metadata resolution fail for some field kinds, and value reads can
//! fail per field without the record itself being unreadable.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Why a host-side read failed.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("permission violation: {0}")]
    Forbidden(String),

    #[error("operation not supported: {0}")]
    Unsupported(String),

    /// Host-side exception with an optional stack trace, one frame per line.
    #[error("{message}")]
    Host { message: String, stack: Vec<String> },
}

impl SourceError {
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
            stack: Vec::new(),
        }
    }

    /// Stack frames for display; empty when the host supplied none.
    pub fn stack(&self) -> &[String] {
        match self {
            Self::Host { stack, .. } => stack,
            _ => &[],
        }
    }
}

/// Metadata the host resolves per field or sublist column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeta {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default)]
    pub is_display: bool,
}

/// A loaded record.
///
/// Enumerations are infallible; value, text and metadata reads are not.
/// Sublist accessors take a 0-based line index.
pub trait RecordHandle {
    fn field_ids(&self) -> Vec<String>;
    fn value(&self, field_id: &str) -> Result<Value, SourceError>;
    fn text(&self, field_id: &str) -> Result<String, SourceError>;
    fn field_meta(&self, field_id: &str) -> Result<FieldMeta, SourceError>;

    fn sublist_ids(&self) -> Vec<String>;
    fn line_count(&self, sublist_id: &str) -> usize;
    fn sublist_columns(&self, sublist_id: &str) -> Vec<String>;
    fn sublist_value(
        &self,
        sublist_id: &str,
        column_id: &str,
        line: usize,
    ) -> Result<Value, SourceError>;
    fn sublist_text(
        &self,
        sublist_id: &str,
        column_id: &str,
        line: usize,
    ) -> Result<String, SourceError>;
    fn sublist_field_meta(
        &self,
        sublist_id: &str,
        column_id: &str,
        line: usize,
    ) -> Result<FieldMeta, SourceError>;
}

/// The host record store capability.
pub trait RecordSource {
    /// Open a record for reading. This is the only host call allowed to
    /// fail a whole projection (missing record, missing permission).
    fn load(
        &self,
        record_type: &str,
        record_id: &str,
    ) -> Result<Box<dyn RecordHandle + '_>, SourceError>;

    /// Identifier of the user the host is executing as.
    fn current_user_id(&self) -> String;
}
