use thiserror::Error;

/// Errors that reach the process boundary.
///
/// Each variant maps to a process exit code so `main` can stay tiny.
/// Per-field data problems never show up here: the normalizer recovers them
/// to defaults.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Bad flags or an export that could not be written.
    #[error("{0}")]
    Usage(String),

    /// Engine input that is not an array of row-like mappings.
    #[error("Invalid dataset input: {0}")]
    InvalidInput(String),

    /// The raw data source could not be read or parsed.
    #[error("Data source error: {0}")]
    Source(String),
}

impl AppError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn data_source(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_) => 2,
            AppError::InvalidInput(_) => 3,
            AppError::Source(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_variant() {
        assert_eq!(AppError::usage("x").exit_code(), 2);
        assert_eq!(AppError::invalid_input("x").exit_code(), 3);
        assert_eq!(AppError::data_source("x").exit_code(), 4);
    }

    #[test]
    fn display_includes_context() {
        let err = AppError::invalid_input("row 3 is not an object");
        assert_eq!(err.to_string(), "Invalid dataset input: row 3 is not an object");
    }
}
