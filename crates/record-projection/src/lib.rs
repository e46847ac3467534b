//! Record Projection - record-to-document projection and comparison.
//!
//! This crate walks an opaque, dynamically-typed business record exposed
//! by the hosting platform and converts it into a portable, immutable
//! `Document`, bounded for safety and diffable against another document
//! of the same record type.
//!
//! # Architecture
//!
//! ```text
//! RecordSource (host capability)
//!     │ load(type, id)
//!     ▼
//! RecordProjector ──► Document { type, id, metadata, fields, sublists }
//!     │                   │
//!     │ compare(id1, id2) ▼
//!     └──────────► DiffResult { fields, sublists }   (sparse)
//! ```
//!
//! - Field and cell reads degrade per entry; only the record load can
//!   fail a whole projection.
//! - Sublists are truncated at `ProjectionPolicy::max_sublist_lines`
//!   with the original line numbers kept.
//! - Every run carries a `PerformanceTrace` of phase timing marks.
//!
//! # Example
//!
//! ```
//! use record_projection::{diff_documents, Document};
//!
//! let json = r#"{
//!     "type": "customer",
//!     "id": "42",
//!     "metadata": {"loadedAt": "2026-08-07T00:00:00Z", "loadedBy": "dev"},
//!     "fields": {
//!         "email": {
//!             "fieldId": "email", "label": "Email", "type": "email",
//!             "value": "ap@acme.example", "isMandatory": true, "isDisplay": true
//!         }
//!     },
//!     "sublists": {}
//! }"#;
//!
//! let document: Document = serde_json::from_str(json).unwrap();
//! assert!(diff_documents(&document, &document).is_empty());
//! ```

mod compare;
mod envelope;
mod error;
mod model;
mod ordered;
mod perf;
mod policy;
mod project;
mod source;
#[cfg(test)]
mod testing;
mod value;

pub use compare::{diff_documents, AbsentField, DiffResult, DiffSide, FieldDiff, SublistDiff};
pub use envelope::{ComparisonResponse, ProjectionResponse};
pub use error::{ComparisonError, ComparisonSide, ErrorBody, ProjectionError};
pub use model::{
    CellData, CellFailure, CellProjection, Document, DocumentMetadata, FieldData, FieldFailure,
    FieldProjection, LineProjection, SublistMetadata, SublistProjection,
};
pub use ordered::OrderedMap;
pub use perf::{PerformanceTrace, Stopwatch};
pub use policy::{ProjectionPolicy, DEFAULT_MAX_SUBLIST_LINES};
pub use project::RecordProjector;
pub use source::{FieldMeta, RecordHandle, RecordSource, SourceError};
pub use value::{compact_text, display_text};
