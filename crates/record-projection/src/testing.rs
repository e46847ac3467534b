//! In-memory record source for unit tests.
//!
//! Builder-style canned records with per-field failure injection, plus a
//! host-call counter so tests can prove validation fires before any host
//! interaction.

use crate::source::{FieldMeta, RecordHandle, RecordSource, SourceError};
use serde_json::Value;
use std::cell::Cell;

#[derive(Debug, Clone, Default)]
pub(crate) struct MockField {
    value: Option<Value>,
    failure: Option<String>,
    text: Option<String>,
    meta: Option<FieldMeta>,
}

impl MockField {
    pub fn value(value: Value) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// A field whose value read fails with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn meta(mut self, label: &str, field_type: &str, mandatory: bool, display: bool) -> Self {
        self.meta = Some(FieldMeta {
            label: label.to_string(),
            field_type: field_type.to_string(),
            is_mandatory: mandatory,
            is_display: display,
        });
        self
    }

    pub fn meta_label(self, label: &str) -> Self {
        self.meta(label, "", false, false)
    }

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

    fn read_meta(&self) -> Result<FieldMeta, SourceError> {
        self.meta
            .clone()
            .ok_or_else(|| SourceError::Unsupported("no field metadata".to_string()))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MockSublist {
    columns: Vec<String>,
    lines: Vec<Vec<MockField>>,
}

impl MockSublist {
    /// Generate `line_count` lines, one field per column, from a closure
    /// of (0-based line index, column id).
    pub fn generated(
        line_count: usize,
        columns: &[&str],
        mut cell: impl FnMut(usize, &str) -> MockField,
    ) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        let lines = (0..line_count)
            .map(|line| columns.iter().map(|column| cell(line, column)).collect())
            .collect();
        Self { columns, lines }
    }

    fn cell(&self, column_id: &str, line: usize) -> Result<&MockField, SourceError> {
        let column = self
            .columns
            .iter()
            .position(|c| c == column_id)
            .ok_or_else(|| SourceError::Unsupported(format!("no column {column_id}")))?;
        self.lines
            .get(line)
            .and_then(|cells| cells.get(column))
            .ok_or_else(|| SourceError::Unsupported(format!("no line {line}")))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MockRecord {
    record_type: String,
    id: String,
    fields: Vec<(String, MockField)>,
    sublists: Vec<(String, MockSublist)>,
}

impl MockRecord {
    pub fn new(record_type: &str, id: &str) -> Self {
        Self {
            record_type: record_type.to_string(),
            id: id.to_string(),
            fields: Vec::new(),
            sublists: Vec::new(),
        }
    }

    pub fn field(mut self, field_id: &str, field: MockField) -> Self {
        self.fields.push((field_id.to_string(), field));
        self
    }

    pub fn sublist(mut self, sublist_id: &str, sublist: MockSublist) -> Self {
        self.sublists.push((sublist_id.to_string(), sublist));
        self
    }

    fn find_field(&self, field_id: &str) -> Result<&MockField, SourceError> {
        self.fields
            .iter()
            .find_map(|(id, field)| (id == field_id).then_some(field))
            .ok_or_else(|| SourceError::Unsupported(format!("no field {field_id}")))
    }

    fn find_sublist(&self, sublist_id: &str) -> Option<&MockSublist> {
        self.sublists
            .iter()
            .find_map(|(id, sublist)| (id == sublist_id).then_some(sublist))
    }
}

#[derive(Debug, Default)]
pub(crate) struct MockSource {
    records: Vec<MockRecord>,
    load_error: Option<SourceError>,
    load_calls: Cell<usize>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(mut self, record: MockRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Make every load fail with the given error.
    pub fn failing_load(mut self, error: SourceError) -> Self {
        self.load_error = Some(error);
        self
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.get()
    }
}

impl RecordSource for MockSource {
    fn load(
        &self,
        record_type: &str,
        record_id: &str,
    ) -> Result<Box<dyn RecordHandle + '_>, SourceError> {
        self.load_calls.set(self.load_calls.get() + 1);
        if let Some(error) = &self.load_error {
            return Err(error.clone());
        }
        self.records
            .iter()
            .find(|record| record.record_type == record_type && record.id == record_id)
            .map(|record| Box::new(MockHandle { record }) as Box<dyn RecordHandle + '_>)
            .ok_or_else(|| SourceError::NotFound(format!("{record_type} {record_id}")))
    }

    fn current_user_id(&self) -> String {
        "tester".to_string()
    }
}

struct MockHandle<'a> {
    record: &'a MockRecord,
}

impl RecordHandle for MockHandle<'_> {
    fn field_ids(&self) -> Vec<String> {
        self.record.fields.iter().map(|(id, _)| id.clone()).collect()
    }

    fn value(&self, field_id: &str) -> Result<Value, SourceError> {
        self.record.find_field(field_id)?.read_value()
    }

    fn text(&self, field_id: &str) -> Result<String, SourceError> {
        self.record.find_field(field_id)?.read_text()
    }

    fn field_meta(&self, field_id: &str) -> Result<FieldMeta, SourceError> {
        self.record.find_field(field_id)?.read_meta()
    }

    fn sublist_ids(&self) -> Vec<String> {
        self.record
            .sublists
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn line_count(&self, sublist_id: &str) -> usize {
        self.record
            .find_sublist(sublist_id)
            .map_or(0, |sublist| sublist.lines.len())
    }

    fn sublist_columns(&self, sublist_id: &str) -> Vec<String> {
        self.record
            .find_sublist(sublist_id)
            .map_or_else(Vec::new, |sublist| sublist.columns.clone())
    }

    fn sublist_value(
        &self,
        sublist_id: &str,
        column_id: &str,
        line: usize,
    ) -> Result<Value, SourceError> {
        let sublist = self
            .record
            .find_sublist(sublist_id)
            .ok_or_else(|| SourceError::Unsupported(format!("no sublist {sublist_id}")))?;
        sublist.cell(column_id, line)?.read_value()
    }

    fn sublist_text(
        &self,
        sublist_id: &str,
        column_id: &str,
        line: usize,
    ) -> Result<String, SourceError> {
        let sublist = self
            .record
            .find_sublist(sublist_id)
            .ok_or_else(|| SourceError::Unsupported(format!("no sublist {sublist_id}")))?;
        sublist.cell(column_id, line)?.read_text()
    }

    fn sublist_field_meta(
        &self,
        sublist_id: &str,
        column_id: &str,
        line: usize,
    ) -> Result<FieldMeta, SourceError> {
        let sublist = self
            .record
            .find_sublist(sublist_id)
            .ok_or_else(|| SourceError::Unsupported(format!("no sublist {sublist_id}")))?;
        sublist.cell(column_id, line)?.read_meta()
    }
}
