//! Command-line parsing for the AI capacity reporter.
//!
//! Argument parsing stays here; dispatch lives in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "aicap",
    version,
    about = "AI computing capacity: ingest installation records and report aggregates"
)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Data source options, shared by every subcommand.
#[derive(Debug, Args, Clone, Default)]
pub struct SourceArgs {
    /// CSV path or http(s) URL (overrides AICAP_SOURCE).
    #[arg(long, global = true, value_name = "PATH|URL")]
    pub source: Option<String>,

    /// HTTP timeout in seconds (overrides AICAP_TIMEOUT_SECS).
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Skip the source and use the bundled sample.
    #[arg(long, global = true)]
    pub offline: bool,

    /// Year assigned to planned systems with no other year evidence.
    #[arg(long, global = true, value_name = "YEAR")]
    pub planned_default_year: Option<i32>,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every section and optionally export results.
    Report(ReportArgs),
    /// Headline metrics.
    Summary {
        /// Target year for the in-year figures.
        #[arg(long, default_value_t = crate::engine::DEFAULT_INSIGHT_YEAR)]
        year: i32,
    },
    /// Cumulative capacity per year.
    Timeline {
        #[arg(long, default_value_t = crate::engine::timeline::DEFAULT_TIMELINE_START)]
        from: i32,
        #[arg(
            long,
            default_value_t = crate::engine::timeline::DEFAULT_TIMELINE_START
                + crate::engine::timeline::DEFAULT_TIMELINE_YEARS
                - 1
        )]
        to: i32,
    },
    /// Capacity rollup by owner.
    Owners {
        #[arg(long, default_value_t = crate::engine::OWNER_LIMIT)]
        top: usize,
    },
    /// Capacity rollup by country.
    Countries {
        #[arg(long, default_value_t = crate::engine::COUNTRY_LIMIT)]
        top: usize,
    },
    /// Systems coming online in one year.
    Year {
        year: i32,

        /// Rows listed per section.
        #[arg(long, default_value_t = crate::report::YEAR_LISTING)]
        top: usize,
    },
}

#[derive(Debug, Args, Clone, Default)]
pub struct ReportArgs {
    /// Target year for the summary and year breakdown.
    #[arg(long, default_value_t = crate::engine::DEFAULT_INSIGHT_YEAR)]
    pub year: i32,

    /// Write all query results as JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Write the timeline as CSV.
    #[arg(long = "export-timeline", value_name = "CSV")]
    pub export_timeline: Option<PathBuf>,
}
