//! Upstream data retrieval.
//!
//! - `api`: blocking HTTP client for the OpenCovid API + GitHub data files
//! - `catalog`: metric catalog parsing (`values.json`)
//! - `completeness`: per-metric completeness feed parsing
//!
//! Everything here returns plain domain values; the transformation core
//! never performs I/O itself.

pub mod api;
pub mod catalog;
pub mod completeness;

pub use api::*;
pub use catalog::*;
pub use completeness::*;
