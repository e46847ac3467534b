//! Structural comparison of two projected documents.
//!
//! The diff is sparse: a field or sublist that is equal on both sides is
//! simply absent from the result. Field comparison looks at raw values
//! only (strict equality, no coercion; label and text differences do not
//! count). Sublist comparison is deliberately shallow — displayed line
//! counts only, never cell contents.

use crate::envelope::ComparisonResponse;
use crate::error::{ComparisonError, ComparisonSide};
use crate::model::{Document, FieldProjection};
use crate::ordered::OrderedMap;
use crate::perf::Stopwatch;
use crate::project::RecordProjector;
use crate::source::RecordSource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sparse field/sublist difference between two records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiffResult {
    pub fields: OrderedMap<FieldDiff>,
    pub sublists: OrderedMap<SublistDiff>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.sublists.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDiff {
    pub label: String,
    pub record1: DiffSide,
    pub record2: DiffSide,
    pub is_different: bool,
}

/// A field as seen from one side: the full projection when the record
/// has the field, the `{value: null}` marker when it does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiffSide {
    Present(FieldProjection),
    Absent(AbsentField),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsentField {
    pub value: Value,
}

impl DiffSide {
    fn from_field(field: Option<&FieldProjection>) -> Self {
        match field {
            Some(projection) => Self::Present(projection.clone()),
            None => Self::Absent(AbsentField { value: Value::Null }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SublistDiff {
    pub record1_line_count: usize,
    pub record2_line_count: usize,
    pub is_different: bool,
}

impl RecordProjector {
    /// Compare two records of the same type, id by id.
    ///
    /// Both sides must project successfully; either failure aborts the
    /// whole comparison and no partial diff is returned. The caller is
    /// trusted on the type: two ids of genuinely different types degrade
    /// to present/absent field diffs rather than an error.
    pub fn compare<S>(
        &self,
        source: &S,
        record_type: &str,
        record_id1: &str,
        record_id2: &str,
    ) -> ComparisonResponse
    where
        S: RecordSource + ?Sized,
    {
        let mut watch = Stopwatch::start();
        match self.compare_documents(source, record_type, record_id1, record_id2, &mut watch) {
            Ok(diff) => ComparisonResponse::ok(diff, watch.finish()),
            Err(error) => ComparisonResponse::failed(&error, watch.finish()),
        }
    }

    fn compare_documents<S>(
        &self,
        source: &S,
        record_type: &str,
        record_id1: &str,
        record_id2: &str,
        watch: &mut Stopwatch,
    ) -> Result<DiffResult, ComparisonError>
    where
        S: RecordSource + ?Sized,
    {
        if record_type.is_empty() || record_id1.is_empty() || record_id2.is_empty() {
            return Err(ComparisonError::validation(
                "record type and both record ids are required",
            ));
        }

        watch.mark("record1_start");
        let record1 = self
            .project_document(source, record_type, record_id1, &mut Stopwatch::start())
            .map_err(|error| ComparisonError::load(ComparisonSide::Record1, record_id1, error))?;
        watch.mark("record1_end");

        watch.mark("record2_start");
        let record2 = self
            .project_document(source, record_type, record_id2, &mut Stopwatch::start())
            .map_err(|error| ComparisonError::load(ComparisonSide::Record2, record_id2, error))?;
        watch.mark("record2_end");

        watch.mark("diff_start");
        let diff = diff_documents(&record1, &record2);
        watch.mark("diff_end");
        Ok(diff)
    }
}

/// Compute the sparse structural diff between two documents.
pub fn diff_documents(record1: &Document, record2: &Document) -> DiffResult {
    let mut fields = OrderedMap::new();
    for field_id in union_keys(record1.fields.keys(), record2.fields.keys()) {
        let left = record1.fields.get(field_id);
        let right = record2.fields.get(field_id);
        if values_equal(left, right) {
            continue;
        }
        let label = left
            .or(right)
            .map(|projection| projection.label().to_string())
            .unwrap_or_else(|| field_id.to_string());
        fields.insert(
            field_id,
            FieldDiff {
                label,
                record1: DiffSide::from_field(left),
                record2: DiffSide::from_field(right),
                is_different: true,
            },
        );
    }

    let mut sublists = OrderedMap::new();
    for sublist_id in union_keys(record1.sublists.keys(), record2.sublists.keys()) {
        let left_lines = record1
            .sublists
            .get(sublist_id)
            .map_or(0, |sublist| sublist.lines.len());
        let right_lines = record2
            .sublists
            .get(sublist_id)
            .map_or(0, |sublist| sublist.lines.len());
        if left_lines == right_lines {
            continue;
        }
        sublists.insert(
            sublist_id,
            SublistDiff {
                record1_line_count: left_lines,
                record2_line_count: right_lines,
                is_different: true,
            },
        );
    }

    DiffResult { fields, sublists }
}

/// Keys of both maps, first map's order first, second map's extras after.
fn union_keys<'a>(
    first: impl Iterator<Item = &'a str>,
    second: impl Iterator<Item = &'a str>,
) -> Vec<&'a str> {
    let mut keys: Vec<&str> = first.collect();
    for key in second {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Raw-value equality. A field that failed to read has no value, which
/// is distinct from an explicit null; two failed reads compare equal.
fn values_equal(left: Option<&FieldProjection>, right: Option<&FieldProjection>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(a), Some(b)) => a.value() == b.value(),
        _ => false,
    }
}
