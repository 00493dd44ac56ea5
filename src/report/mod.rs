//! Text output: chart titles, data notes, and run summaries.

pub mod format;

pub use format::*;
