//! Record source adapters.
//!
//! The real record store belongs to the hosting platform; what lives
//! here are the stand-ins this repository can run against.

mod fixture;

pub use fixture::{FixtureError, FixtureRecordSource};
