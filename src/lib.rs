//! `ai-capacity` library crate.
//!
//! Ingests raw AI computing installation records, normalizes them, and
//! answers aggregation queries (timeline, rollups, insights, year breakdown).
//! The binary (`aicap`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the engine can be embedded behind other front-ends

pub mod app;
pub mod cli;
pub mod data;
pub mod dataset;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod normalize;
pub mod report;

pub use dataset::Dataset;
pub use engine::{CapacityEngine, CapacityReport};
pub use error::AppError;
