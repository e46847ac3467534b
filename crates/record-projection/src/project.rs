//! Record-to-document projection.
//!
//! Walks one live record through the `RecordSource` capability and builds
//! an immutable `Document`. The projection is deterministic for a fixed
//! record state: fields in enumeration order, sublist lines in order with
//! stable 1-based numbering, truncation applied per policy.
//!
//! Failure semantics: a field or cell that cannot be read degrades to an
//! inline `{label, error}` entry and never aborts the rest of the walk.
//! Only the initial record load (and argument validation before it) can
//! fail the whole run.

use crate::envelope::ProjectionResponse;
use crate::error::ProjectionError;
use crate::model::{
    CellData, CellFailure, CellProjection, Document, DocumentMetadata, FieldData, FieldFailure,
    FieldProjection, LineProjection, SublistMetadata, SublistProjection,
};
use crate::ordered::OrderedMap;
use crate::perf::Stopwatch;
use crate::policy::ProjectionPolicy;
use crate::source::{RecordHandle, RecordSource};
use crate::value::compact_text;
use chrono::Utc;

/// Projects live records into portable documents under a policy.
#[derive(Debug, Clone, Default)]
pub struct RecordProjector {
    policy: ProjectionPolicy,
}

impl RecordProjector {
    pub fn new(policy: ProjectionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ProjectionPolicy {
        &self.policy
    }

    /// Project one record into a document, with phase timing marks.
    ///
    /// Idempotent and read-only; safe to retry.
    pub fn project<S>(&self, source: &S, record_type: &str, record_id: &str) -> ProjectionResponse
    where
        S: RecordSource + ?Sized,
    {
        let mut watch = Stopwatch::start();
        match self.project_document(source, record_type, record_id, &mut watch) {
            Ok(document) => ProjectionResponse::ok(document, watch.finish()),
            Err(error) => ProjectionResponse::failed(&error, watch.finish()),
        }
    }

    pub(crate) fn project_document<S>(
        &self,
        source: &S,
        record_type: &str,
        record_id: &str,
        watch: &mut Stopwatch,
    ) -> Result<Document, ProjectionError>
    where
        S: RecordSource + ?Sized,
    {
        if record_type.is_empty() || record_id.is_empty() {
            return Err(ProjectionError::validation(
                "record type and record id are required",
            ));
        }

        watch.mark("load_start");
        let handle = source
            .load(record_type, record_id)
            .map_err(|error| ProjectionError::load(record_type, record_id, error))?;
        watch.mark("load_end");

        watch.mark("fields_start");
        let fields = self.project_fields(handle.as_ref());
        watch.mark("fields_end");

        watch.mark("sublists_start");
        let sublists = self.project_sublists(handle.as_ref());
        watch.mark("sublists_end");

        Ok(Document {
            record_type: record_type.to_string(),
            id: record_id.to_string(),
            metadata: DocumentMetadata {
                loaded_at: Utc::now(),
                loaded_by: source.current_user_id(),
            },
            fields,
            sublists,
        })
    }

    fn project_fields(&self, handle: &dyn RecordHandle) -> OrderedMap<FieldProjection> {
        let field_ids = handle.field_ids();
        let mut fields = OrderedMap::with_capacity(field_ids.len());
        for field_id in field_ids {
            if !self.policy.admits_field(&field_id) {
                continue;
            }
            let projection = project_field(handle, &field_id);
            fields.insert(field_id, projection);
        }
        fields
    }

    fn project_sublists(&self, handle: &dyn RecordHandle) -> OrderedMap<SublistProjection> {
        let mut sublists = OrderedMap::new();
        for sublist_id in handle.sublist_ids() {
            if !self.policy.admits_sublist(&sublist_id) {
                continue;
            }
            let projection = self.project_sublist(handle, &sublist_id);
            sublists.insert(sublist_id, projection);
        }
        sublists
    }

    fn project_sublist(&self, handle: &dyn RecordHandle, sublist_id: &str) -> SublistProjection {
        let line_count = handle.line_count(sublist_id);
        let cap = self.policy.max_sublist_lines;
        let truncated = line_count > cap;
        let displayed = line_count.min(cap);

        // The column set is constant per sublist in practice; read once.
        let columns = handle.sublist_columns(sublist_id);

        let mut lines = Vec::with_capacity(displayed);
        for index in 0..displayed {
            let mut cells = OrderedMap::with_capacity(columns.len());
            for column_id in &columns {
                let cell = project_cell(handle, sublist_id, column_id, index);
                cells.insert(column_id.clone(), cell);
            }
            lines.push(LineProjection {
                line_number: index + 1,
                cells,
            });
        }

        SublistProjection {
            lines,
            metadata: SublistMetadata {
                line_count,
                truncated,
                displayed_lines: truncated.then_some(displayed),
            },
        }
    }
}

fn project_field(handle: &dyn RecordHandle, field_id: &str) -> FieldProjection {
    let value = match handle.value(field_id) {
        Ok(value) => value,
        Err(error) => {
            return FieldProjection::Failed(FieldFailure {
                field_id: field_id.to_string(),
                label: field_id.to_string(),
                error: error.to_string(),
            });
        }
    };

    // Text and metadata are independent best-effort reads; either failing
    // degrades that aspect without touching the value.
    let text = handle
        .text(field_id)
        .ok()
        .and_then(|text| compact_text(&value, &text));
    let (label, field_type, is_mandatory, is_display) = match handle.field_meta(field_id) {
        Ok(meta) => (meta.label, meta.field_type, meta.is_mandatory, meta.is_display),
        Err(_) => (field_id.to_string(), String::new(), false, false),
    };

    FieldProjection::Ok(FieldData {
        field_id: field_id.to_string(),
        label,
        field_type,
        value,
        text,
        is_mandatory,
        is_display,
    })
}

fn project_cell(
    handle: &dyn RecordHandle,
    sublist_id: &str,
    column_id: &str,
    line: usize,
) -> CellProjection {
    let value = match handle.sublist_value(sublist_id, column_id, line) {
        Ok(value) => value,
        Err(error) => {
            return CellProjection::Failed(CellFailure {
                label: column_id.to_string(),
                error: error.to_string(),
            });
        }
    };

    let text = handle
        .sublist_text(sublist_id, column_id, line)
        .ok()
        .and_then(|text| compact_text(&value, &text));
    let label = match handle.sublist_field_meta(sublist_id, column_id, line) {
        Ok(meta) => meta.label,
        Err(_) => column_id.to_string(),
    };

    CellProjection::Ok(CellData { label, value, text })
}
