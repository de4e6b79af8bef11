//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging
//! - parses CLI arguments
//! - loads the dataset (source or bundled fallback)
//! - prints the requested report
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, ReportArgs};
use crate::data::SourceConfig;
use crate::domain::GroupKey;
use crate::error::AppError;
use crate::report;

pub mod pipeline;

/// Entry point for the `aicap` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();

    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    let config = pipeline::PipelineConfig::resolve(&cli.source, SourceConfig::from_env());
    let run = pipeline::run_load(&config)?;
    let engine = &run.engine;

    println!("{}", report::format_load_header(&run.origin, engine.dataset(), run.skipped));

    match cli.command {
        Command::Report(args) => handle_report(engine, &args)?,
        Command::Summary { year } => {
            println!("{}", report::format_summary(&engine.summary_for_year(year)));
        }
        Command::Timeline { from, to } => {
            if from > to {
                return Err(AppError::usage(format!(
                    "Invalid year range: --from {from} is after --to {to}."
                )));
            }
            println!("{}", report::format_timeline(&engine.timeline(from..=to)));
        }
        Command::Owners { top } => {
            let rows = engine.rollup(GroupKey::Owner, Some(top));
            println!("{}", report::format_groups("Top owners", &rows));
        }
        Command::Countries { top } => {
            let rows = engine.rollup(GroupKey::Country, Some(top));
            println!("{}", report::format_groups("Top countries", &rows));
        }
        Command::Year { year, top } => {
            println!(
                "{}",
                report::format_year_analysis(&engine.breakdown_for_year(year), top)
            );
        }
    }

    Ok(())
}

fn handle_report(engine: &crate::engine::CapacityEngine, args: &ReportArgs) -> Result<(), AppError> {
    let full = engine.report(args.year, crate::engine::default_years());
    println!("{}", report::format_report(&full));

    if let Some(path) = &args.export_json {
        crate::io::export::write_report_json(path, &full)?;
    }
    if let Some(path) = &args.export_timeline {
        crate::io::export::write_timeline_csv(path, &full.timeline)?;
    }
    Ok(())
}

/// Logs go to stderr so report output stays pipeable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Rewrite argv so `aicap` defaults to `aicap report`.
///
/// Rules:
/// - `aicap`                       -> `aicap report`
/// - `aicap --offline ...`         -> `aicap report --offline ...`
/// - `aicap --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("report".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    // Any positional (a subcommand, or a typo clap should report) means the
    // user chose a command explicitly.
    if first_positional(&argv[1..]).is_none() {
        argv.insert(1, "report".to_string());
    }
    argv
}

/// Global flags that consume the following token as their value.
const VALUE_FLAGS: [&str; 3] = ["--source", "--timeout", "--planned-default-year"];

/// First token that is neither a flag nor a flag's value.
fn first_positional(args: &[String]) -> Option<&str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with('-') {
            return Some(arg);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_report() {
        assert_eq!(rewrite_args(argv(&["aicap"])), argv(&["aicap", "report"]));
    }

    #[test]
    fn flag_only_invocation_runs_report() {
        assert_eq!(
            rewrite_args(argv(&["aicap", "--offline"])),
            argv(&["aicap", "report", "--offline"])
        );
    }

    #[test]
    fn global_flag_before_subcommand_is_left_alone() {
        let args = argv(&["aicap", "--source", "x.csv", "owners"]);
        assert_eq!(rewrite_args(args.clone()), args);
    }

    #[test]
    fn flag_value_named_like_a_subcommand_is_not_a_subcommand() {
        assert_eq!(
            rewrite_args(argv(&["aicap", "--source", "year"])),
            argv(&["aicap", "report", "--source", "year"])
        );
        assert_eq!(
            rewrite_args(argv(&["aicap", "--timeout", "5", "--source", "owners", "--offline"])),
            argv(&["aicap", "report", "--timeout", "5", "--source", "owners", "--offline"])
        );
    }

    #[test]
    fn inline_flag_value_then_subcommand_is_left_alone() {
        let args = argv(&["aicap", "--source=year", "timeline"]);
        assert_eq!(rewrite_args(args.clone()), args);
    }

    #[test]
    fn help_is_left_alone() {
        let args = argv(&["aicap", "--help"]);
        assert_eq!(rewrite_args(args.clone()), args);
    }
}
