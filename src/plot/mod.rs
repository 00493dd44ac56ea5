//! Terminal chart rendering for one-shot output.

pub mod ascii;

pub use ascii::*;
