//! Input/output helpers.
//!
//! - CSV ingest into raw rows (`ingest`)
//! - result exports (JSON/CSV) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
