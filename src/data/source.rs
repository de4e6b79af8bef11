//! Raw data source: a local CSV file or a CSV served over HTTP(S).
//!
//! The loader never hands a failure to the engine when it has a fallback: any
//! source error is logged and replaced by the fallback rows the caller supplied.
//! The fallback is a constructor argument, not something the loader (or the
//! engine) knows on its own.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;

use crate::domain::RawRow;
use crate::error::AppError;
use crate::io::ingest::{CsvIngest, RowError, read_rows, read_rows_from_path};

/// Environment variable holding the CSV path or URL.
pub const SOURCE_ENV: &str = "AICAP_SOURCE";

/// Environment variable holding the HTTP timeout in seconds.
pub const TIMEOUT_ENV: &str = "AICAP_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Where the raw CSV lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Path(PathBuf),
    Url(String),
}

impl SourceLocation {
    /// `http://` and `https://` prefixes select a URL; anything else is a path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceLocation::Url(raw.to_string())
        } else {
            SourceLocation::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Path(path) => write!(f, "{}", path.display()),
            SourceLocation::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Resolved loader settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub location: Option<SourceLocation>,
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SourceConfig {
    /// Read settings from the environment (and `.env`, if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let location = lookup(SOURCE_ENV)
            .filter(|s| !s.trim().is_empty())
            .map(|s| SourceLocation::parse(&s));

        let timeout = match lookup(TIMEOUT_ENV) {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(
                        key = TIMEOUT_ENV,
                        value = %raw,
                        default = DEFAULT_TIMEOUT_SECS,
                        "invalid timeout setting; using default"
                    );
                    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
                }
            },
        };

        Self { location, timeout }
    }
}

/// Where the rows of a load came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum LoadOrigin {
    Source { location: String },
    Fallback { reason: String },
}

/// Rows ready for normalization, plus provenance.
#[derive(Debug, Clone)]
pub struct LoadedRows {
    pub rows: Vec<RawRow>,
    pub origin: LoadOrigin,
    pub row_errors: Vec<RowError>,
}

pub struct SourceLoader {
    config: SourceConfig,
    fallback: Option<Vec<RawRow>>,
}

impl SourceLoader {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            config,
            fallback: None,
        }
    }

    /// Rows to substitute when the source is missing or fails.
    pub fn with_fallback(mut self, rows: Vec<RawRow>) -> Self {
        self.fallback = Some(rows);
        self
    }

    /// Fetch and parse the configured source, without any fallback.
    pub fn fetch(&self) -> Result<CsvIngest, AppError> {
        let location = self
            .config
            .location
            .as_ref()
            .ok_or_else(|| AppError::data_source(format!("No data source configured (set {SOURCE_ENV}).")))?;

        match location {
            SourceLocation::Path(path) => read_rows_from_path(path),
            SourceLocation::Url(url) => self.fetch_url(url),
        }
    }

    /// Load rows, substituting the fallback on any source failure.
    ///
    /// Only fails when the source fails and no fallback was supplied.
    pub fn load(self) -> Result<LoadedRows, AppError> {
        match self.fetch() {
            Ok(ingest) => {
                let location = self
                    .config
                    .location
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                tracing::info!(
                    source = %location,
                    rows = ingest.rows.len(),
                    skipped = ingest.row_errors.len(),
                    "loaded source rows"
                );
                Ok(LoadedRows {
                    rows: ingest.rows,
                    origin: LoadOrigin::Source { location },
                    row_errors: ingest.row_errors,
                })
            }
            Err(err) => {
                let Some(rows) = self.fallback else {
                    return Err(err);
                };
                tracing::warn!(error = %err, rows = rows.len(), "source unavailable; using fallback rows");
                Ok(LoadedRows {
                    rows,
                    origin: LoadOrigin::Fallback {
                        reason: err.to_string(),
                    },
                    row_errors: Vec::new(),
                })
            }
        }
    }

    fn fetch_url(&self, url: &str) -> Result<CsvIngest, AppError> {
        let client = Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| AppError::data_source(format!("Failed to build HTTP client: {e}")))?;

        tracing::debug!(url, timeout_secs = self.config.timeout.as_secs(), "fetching CSV");
        let resp = client
            .get(url)
            .send()
            .map_err(|e| AppError::data_source(format!("Request to {url} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::data_source(format!(
                "Request to {url} failed with status {}.",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::data_source(format!("Failed to read response body from {url}: {e}")))?;
        read_rows(body.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawField;

    #[test]
    fn location_parse_distinguishes_urls() {
        assert_eq!(
            SourceLocation::parse("https://example.org/data.csv"),
            SourceLocation::Url("https://example.org/data.csv".to_string())
        );
        assert_eq!(
            SourceLocation::parse(" HTTP://host/x.csv "),
            SourceLocation::Url("HTTP://host/x.csv".to_string())
        );
        assert_eq!(
            SourceLocation::parse("data/ai_supercomputers.csv"),
            SourceLocation::Path(PathBuf::from("data/ai_supercomputers.csv"))
        );
    }

    #[test]
    fn config_from_lookup_reads_both_keys() {
        let config = SourceConfig::from_lookup(|key| match key {
            SOURCE_ENV => Some("data.csv".to_string()),
            TIMEOUT_ENV => Some("30".to_string()),
            _ => None,
        });
        assert_eq!(config.location, Some(SourceLocation::Path(PathBuf::from("data.csv"))));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_falls_back_to_default_timeout() {
        let config = SourceConfig::from_lookup(|key| (key == TIMEOUT_ENV).then(|| "soon".to_string()));
        assert_eq!(config.location, None);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn missing_source_uses_fallback() {
        let fallback = vec![RawRow::default().with(RawField::Capacity, "5")];
        let loaded = SourceLoader::new(SourceConfig::default())
            .with_fallback(fallback.clone())
            .load()
            .unwrap();
        assert_eq!(loaded.rows, fallback);
        assert!(matches!(loaded.origin, LoadOrigin::Fallback { .. }));
    }

    #[test]
    fn missing_source_without_fallback_is_an_error() {
        let err = SourceLoader::new(SourceConfig::default()).load().unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
