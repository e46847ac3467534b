//! Record Inspector - host glue around the projection engine.
//!
//! The engine itself lives in the `record-projection` crate; this crate
//! adds what an inspection deployment needs around it: request-parameter
//! parsing, the shared inspection entry point, a fixture-backed record
//! source for running without the host platform, and (feature-gated)
//! the HTTP API and CLI surfaces.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use record_inspector::{run_inspection, FixtureRecordSource, InspectionRequest};
//! use record_projection::ProjectionPolicy;
//!
//! let source = FixtureRecordSource::from_path("fixtures/records.json").unwrap();
//! let request = InspectionRequest::new("customer", "42");
//! let outcome = run_inspection(&source, &ProjectionPolicy::default(), &request);
//! assert!(outcome.success());
//! ```

pub mod inspect;
pub mod request;
pub mod source;

#[cfg(feature = "server")]
pub mod api;

pub use inspect::{run_inspection, InspectionOutcome};
pub use request::InspectionRequest;
pub use source::{FixtureError, FixtureRecordSource};

// The engine, re-exported for downstream callers.
pub use record_projection as projection;
