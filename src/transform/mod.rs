//! The pure time-series transformation core.
//!
//! Everything in this module is stateless, synchronous, and I/O-free: raw
//! per-date records plus user selections go in, renderer-agnostic series,
//! labels, and annotation markers come out. The HTTP data layer and the
//! chart renderers are collaborators, not part of the core.
//!
//! - label formatting (`labels`)
//! - causal rolling average (`smooth`)
//! - series building with axis policy (`series`)
//! - completeness-date resolution (`completeness`)

pub mod completeness;
pub mod labels;
pub mod series;
pub mod smooth;

pub use completeness::*;
pub use labels::*;
pub use series::*;
pub use smooth::*;

/// A typed core failure.
///
/// None of these are ever coerced into placeholder values: a lookup miss or
/// an unsatisfiable query is reported to the caller, which decides how to
/// degrade (the TUI shows it in the status line, the CLI exits nonzero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Metric id not present in the fixed label table.
    UnknownMetric(String),
    /// Region code not present in the fixed region table.
    UnknownRegion(String),
    /// No date at which every required region had reported.
    NoCompleteDate,
    /// The series builder was handed a zero-length input.
    EmptySeries,
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::UnknownMetric(id) => write!(f, "Unknown metric '{id}'."),
            TransformError::UnknownRegion(code) => write!(f, "Unknown region '{code}'."),
            TransformError::NoCompleteDate => {
                write!(f, "No date on which all required regions had reported.")
            }
            TransformError::EmptySeries => write!(f, "Cannot build series from empty input."),
        }
    }
}

impl std::error::Error for TransformError {}
