//! Shared load pipeline used by every subcommand.
//!
//! source (or bundled sample) -> raw rows -> normalized dataset -> engine
//!
//! Subcommands then only decide which query to run and how to print it.

use std::time::Duration;

use crate::cli::SourceArgs;
use crate::data::{LoadOrigin, LoadedRows, SourceConfig, SourceLoader, SourceLocation, bundled_rows};
use crate::dataset::Dataset;
use crate::engine::CapacityEngine;
use crate::error::AppError;
use crate::normalize::YearPolicy;

/// Everything a subcommand needs after loading.
pub struct RunOutput {
    pub origin: LoadOrigin,
    /// CSV records rejected before normalization.
    pub skipped: usize,
    pub engine: CapacityEngine,
}

/// Resolved pipeline settings: CLI over environment over defaults.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source: SourceConfig,
    pub offline: bool,
    pub policy: YearPolicy,
}

impl PipelineConfig {
    pub fn resolve(args: &SourceArgs, env: SourceConfig) -> Self {
        let mut source = env;
        if let Some(raw) = args.source.as_deref().filter(|s| !s.trim().is_empty()) {
            source.location = Some(SourceLocation::parse(raw));
        }
        if let Some(secs) = args.timeout.filter(|s| *s > 0) {
            source.timeout = Duration::from_secs(secs);
        }

        let mut policy = YearPolicy::default();
        if let Some(year) = args.planned_default_year {
            policy.planned_default = year;
        }

        Self {
            source,
            offline: args.offline,
            policy,
        }
    }
}

/// Load rows and build the engine.
pub fn run_load(config: &PipelineConfig) -> Result<RunOutput, AppError> {
    let loaded = if config.offline {
        tracing::info!("offline mode; using bundled sample");
        LoadedRows {
            rows: bundled_rows(),
            origin: LoadOrigin::Fallback {
                reason: "offline mode".to_string(),
            },
            row_errors: Vec::new(),
        }
    } else {
        SourceLoader::new(config.source.clone())
            .with_fallback(bundled_rows())
            .load()?
    };

    for err in &loaded.row_errors {
        tracing::debug!(line = err.line, message = %err.message, "skipped CSV record");
    }

    let dataset = Dataset::from_rows_with_policy(&loaded.rows, &config.policy);
    Ok(RunOutput {
        origin: loaded.origin,
        skipped: loaded.row_errors.len(),
        engine: CapacityEngine::new(dataset),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_values_override_environment() {
        let env = SourceConfig::from_lookup(|key| match key {
            crate::data::source::SOURCE_ENV => Some("env.csv".to_string()),
            _ => None,
        });
        let args = SourceArgs {
            source: Some("https://example.org/a.csv".to_string()),
            timeout: Some(3),
            offline: false,
            planned_default_year: Some(2027),
        };
        let config = PipelineConfig::resolve(&args, env);
        assert_eq!(
            config.source.location,
            Some(SourceLocation::Url("https://example.org/a.csv".to_string()))
        );
        assert_eq!(config.source.timeout, Duration::from_secs(3));
        assert_eq!(config.policy.planned_default, 2027);
    }

    #[test]
    fn offline_run_uses_bundled_sample() {
        let config = PipelineConfig::resolve(
            &SourceArgs {
                offline: true,
                ..SourceArgs::default()
            },
            SourceConfig::default(),
        );
        let out = run_load(&config).unwrap();
        assert_eq!(out.engine.dataset().len(), 20);
        assert!(matches!(out.origin, LoadOrigin::Fallback { .. }));
    }

    #[test]
    fn unreadable_csv_records_are_counted_as_skipped() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Name,Status,H100 equivalents\na,Existing,10\nb\xff,Planned,20\nc,Planned,0\n")
            .unwrap();

        let config = PipelineConfig::resolve(
            &SourceArgs {
                source: Some(file.path().display().to_string()),
                ..SourceArgs::default()
            },
            SourceConfig::default(),
        );
        let out = run_load(&config).unwrap();
        assert!(matches!(out.origin, LoadOrigin::Source { .. }));
        assert_eq!(out.skipped, 1);
        assert_eq!(out.engine.dataset().rows_read(), 2);
        assert_eq!(out.engine.dataset().rows_dropped(), 1);
    }

    #[test]
    fn planned_default_year_flows_into_normalization() {
        let config = PipelineConfig::resolve(
            &SourceArgs {
                offline: true,
                planned_default_year: Some(2027),
                ..SourceArgs::default()
            },
            SourceConfig::default(),
        );
        let out = run_load(&config).unwrap();
        let g42 = out
            .engine
            .dataset()
            .iter()
            .find(|i| i.owner == "G42")
            .unwrap();
        assert_eq!(g42.operational_year, Some(2027));
    }
}
