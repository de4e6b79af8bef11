//! Raw data acquisition: the CSV source loader and the bundled fallback rows.

pub mod sample;
pub mod source;

pub use sample::bundled_rows;
pub use source::{LoadOrigin, LoadedRows, SourceConfig, SourceLoader, SourceLocation};
