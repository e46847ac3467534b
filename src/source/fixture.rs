//! JSON-fixture-backed stand-in for the host record store.
//!
//! Serves canned records from a fixture file so the inspector can be
//! exercised without the hosting platform. Fixtures can simulate the
//! host's partial-capability behavior: a field without `text` fails the
//! text read (the projector omits it), a field without `label`/`type`
//! fails the metadata read, and a `failure` message fails the value read
//! so the degradation paths are reachable end to end.
//!
//! Fixture shape:
//!
//! ```json
//! {
//!   "user": "dev",
//!   "records": {
//!     "customer": {
//!       "42": {
//!         "fields": {
//!           "email": {"value": "ap@acme.example", "text": "ap@acme.example",
//!                      "label": "Email", "type": "email", "isMandatory": true},
//!           "secret": {"failure": "insufficient permissions"}
//!         },
//!         "sublists": {
//!           "addressbook": {
//!             "columns": ["city"],
//!             "lines": [{"city": {"value": "Oslo", "label": "City"}}]
//!           }
//!         }
//!       }
//!     }
//!   }
//! }
//! ```

use record_projection::{FieldMeta, OrderedMap, RecordHandle, RecordSource, SourceError};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct FixtureFile {
    #[serde(default = "default_user")]
    user: String,
    #[serde(default)]
    records: BTreeMap<String, BTreeMap<String, FixtureRecord>>,
}

fn default_user() -> String {
    "fixture".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
struct FixtureRecord {
    #[serde(default)]
    fields: OrderedMap<FixtureField>,
    #[serde(default)]
    sublists: OrderedMap<FixtureSublist>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct FixtureField {
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(rename = "type", default)]
    field_type: Option<String>,
    #[serde(rename = "isMandatory", default)]
    is_mandatory: bool,
    #[serde(rename = "isDisplay", default)]
    is_display: bool,
    /// Simulated value-read failure message.
    #[serde(default)]
    failure: Option<String>,
}

impl FixtureField {
    fn read_value(&self) -> Result<Value, SourceError> {
        match &self.failure {
            Some(message) => Err(SourceError::host(message.clone())),
            None => Ok(self.value.clone().unwrap_or(Value::Null)),
        }
    }

    fn read_text(&self) -> Result<String, SourceError> {
        self.text
            .clone()
            .ok_or_else(|| SourceError::Unsupported("no text representation".to_string()))
    }

    fn read_meta(&self, field_id: &str) -> Result<FieldMeta, SourceError> {
        if self.label.is_none() && self.field_type.is_none() {
            return Err(SourceError::Unsupported(format!(
                "no metadata for {field_id}"
            )));
        }
        Ok(FieldMeta {
            label: self.label.clone().unwrap_or_else(|| field_id.to_string()),
            field_type: self.field_type.clone().unwrap_or_default(),
            is_mandatory: self.is_mandatory,
            is_display: self.is_display,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
struct FixtureSublist {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    lines: Vec<OrderedMap<FixtureField>>,
}

/// Read-only record source backed by a fixture document.
#[derive(Debug, Clone)]
pub struct FixtureRecordSource {
    file: FixtureFile,
}

impl FixtureRecordSource {
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let file = serde_json::from_str(json)?;
        Ok(Self { file })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn record_count(&self) -> usize {
        self.file.records.values().map(BTreeMap::len).sum()
    }
}

impl RecordSource for FixtureRecordSource {
    fn load(
        &self,
        record_type: &str,
        record_id: &str,
    ) -> Result<Box<dyn RecordHandle + '_>, SourceError> {
        let record = self
            .file
            .records
            .get(record_type)
            .and_then(|by_id| by_id.get(record_id))
            .ok_or_else(|| SourceError::NotFound(format!("{record_type} {record_id}")))?;
        Ok(Box::new(FixtureHandle { record }))
    }

    fn current_user_id(&self) -> String {
        self.file.user.clone()
    }
}

struct FixtureHandle<'a> {
    record: &'a FixtureRecord,
}

impl FixtureHandle<'_> {
    fn field(&self, field_id: &str) -> Result<&FixtureField, SourceError> {
        self.record
            .fields
            .get(field_id)
            .ok_or_else(|| SourceError::Unsupported(format!("no field {field_id}")))
    }

    fn cell(
        &self,
        sublist_id: &str,
        column_id: &str,
        line: usize,
    ) -> Result<Option<&FixtureField>, SourceError> {
        let sublist = self
            .record
            .sublists
            .get(sublist_id)
            .ok_or_else(|| SourceError::Unsupported(format!("no sublist {sublist_id}")))?;
        let cells = sublist
            .lines
            .get(line)
            .ok_or_else(|| SourceError::Unsupported(format!("no line {line} in {sublist_id}")))?;
        Ok(cells.get(column_id))
    }
}

impl RecordHandle for FixtureHandle<'_> {
    fn field_ids(&self) -> Vec<String> {
        self.record.fields.keys().map(String::from).collect()
    }

    fn value(&self, field_id: &str) -> Result<Value, SourceError> {
        self.field(field_id)?.read_value()
    }

    fn text(&self, field_id: &str) -> Result<String, SourceError> {
        self.field(field_id)?.read_text()
    }

    fn field_meta(&self, field_id: &str) -> Result<FieldMeta, SourceError> {
        self.field(field_id)?.read_meta(field_id)
    }

    fn sublist_ids(&self) -> Vec<String> {
        self.record.sublists.keys().map(String::from).collect()
    }

    fn line_count(&self, sublist_id: &str) -> usize {
        self.record
            .sublists
            .get(sublist_id)
            .map_or(0, |sublist| sublist.lines.len())
    }

    fn sublist_columns(&self, sublist_id: &str) -> Vec<String> {
        self.record
            .sublists
            .get(sublist_id)
            .map_or_else(Vec::new, |sublist| sublist.columns.clone())
    }

    fn sublist_value(
        &self,
        sublist_id: &str,
        column_id: &str,
        line: usize,
    ) -> Result<Value, SourceError> {
        match self.cell(sublist_id, column_id, line)? {
            // A line without an entry for this column is an empty cell,
            // not a read failure.
            None => Ok(Value::Null),
            Some(cell) => cell.read_value(),
        }
    }

    fn sublist_text(
        &self,
        sublist_id: &str,
        column_id: &str,
        line: usize,
    ) -> Result<String, SourceError> {
        match self.cell(sublist_id, column_id, line)? {
            None => Err(SourceError::Unsupported(
                "no text representation".to_string(),
            )),
            Some(cell) => cell.read_text(),
        }
    }

    fn sublist_field_meta(
        &self,
        sublist_id: &str,
        column_id: &str,
        line: usize,
    ) -> Result<FieldMeta, SourceError> {
        match self.cell(sublist_id, column_id, line)? {
            None => Err(SourceError::Unsupported("no metadata".to_string())),
            Some(cell) => cell.read_meta(column_id),
        }
    }
}
