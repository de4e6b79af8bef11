//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw source rows (`RawRow`, `RawField`)
//! - normalized records (`Installation`, `Status`, `YearStrategy`)
//! - query outputs (`TimelineRow`, `GroupRow`, `InsightSummary`, `YearAnalysis`)

pub mod types;

pub use types::*;
