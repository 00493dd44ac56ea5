//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input selection enums (`Region`, `AggregationMode`)
//! - raw per-date observations (`RawPoint`)
//! - derived plotting series (`DerivedSeries`, `BuiltSeries`)
//! - chart annotations (`AnnotationMarker`)

pub mod types;

pub use types::*;
