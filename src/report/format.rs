//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the engine stays free of presentation concerns
//! - output changes are localized

use crate::data::LoadOrigin;
use crate::dataset::Dataset;
use crate::domain::{GroupRow, InsightSummary, TimelineRow, YearAnalysis, YearGroup};

/// Header lines describing where the data came from and how much survived.
///
/// `skipped` counts CSV records that could not be parsed at all; they never
/// reach the dataset, so they are reported separately from `dropped`.
pub fn format_load_header(origin: &LoadOrigin, dataset: &Dataset, skipped: usize) -> String {
    let mut out = String::new();
    out.push_str("=== aicap - AI Computing Capacity ===\n");
    match origin {
        LoadOrigin::Source { location } => {
            out.push_str(&format!("Source: {location}\n"));
        }
        LoadOrigin::Fallback { reason } => {
            out.push_str("Source: bundled sample (fallback)\n");
            out.push_str(&format!("  reason: {reason}\n"));
        }
    }
    out.push_str(&format!(
        "Rows: read={} | kept={} | dropped={} | skipped={}\n",
        dataset.rows_read(),
        dataset.len(),
        dataset.rows_dropped(),
        skipped
    ));
    out
}

/// Headline metrics block.
pub fn format_summary(summary: &InsightSummary) -> String {
    let mut out = String::new();
    out.push_str("Key insights:\n");
    out.push_str(&format!(
        "- systems: {} total | {} existing | {} planned\n",
        summary.total_systems, summary.existing_systems, summary.planned_systems
    ));
    out.push_str(&format!(
        "- capacity (H100e): {} existing | {} planned | {} total\n",
        fmt_compact(summary.existing_capacity),
        fmt_compact(summary.planned_capacity),
        fmt_compact(summary.total_capacity)
    ));
    out.push_str(&format!(
        "- planned multiplier: {}\n",
        fmt_ratio(summary.planned_multiplier)
    ));
    out.push_str(&format!(
        "- {}: {} across {} systems ({} existing capacity)\n",
        summary.target_year,
        fmt_compact(summary.capacity_in_year),
        summary.systems_in_year,
        fmt_ratio(summary.inflection_multiplier)
    ));
    out.push_str(&format!(
        "- largest existing: {}\n",
        summary.largest_existing.as_deref().unwrap_or("Unknown")
    ));
    out.push_str(&format!(
        "- largest planned: {}\n",
        summary.largest_planned.as_deref().unwrap_or("Unknown")
    ));
    out.push_str(&format!("- countries: {}\n", summary.countries));
    out
}

/// Timeline table, one line per year.
pub fn format_timeline(rows: &[TimelineRow]) -> String {
    let mut out = String::new();
    out.push_str("Capacity timeline (H100e):\n");
    push_line(
        &mut out,
        format!(
            "{:<6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8}",
            "year", "exist_cum", "plan_cum", "total_cum", "exist_yr", "plan_yr", "total_yr", "growth"
        ),
    );
    push_line(
        &mut out,
        format!(
            "{:-<6} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10} {:-<8}",
            "", "", "", "", "", "", "", ""
        ),
    );
    for r in rows {
        push_line(
            &mut out,
            format!(
                "{:<6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8}",
                r.year,
                fmt_compact(r.existing_cumulative),
                fmt_compact(r.planned_cumulative),
                fmt_compact(r.total_cumulative),
                fmt_compact(r.annual_existing),
                fmt_compact(r.annual_planned),
                fmt_compact(r.annual_total),
                fmt_percent(r.growth_rate),
            ),
        );
    }
    out
}

/// Owner or country rollup table.
pub fn format_groups(title: &str, rows: &[GroupRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{title}:\n"));
    push_line(
        &mut out,
        format!(
            "{:>3} {:<28} {:>10} {:>10} {:>10} {:>8} {:>8}  {:<20}",
            "#", "name", "existing", "planned", "total", "planned%", "systems", "expansion"
        ),
    );
    push_line(
        &mut out,
        format!(
            "{:-<3} {:-<28} {:-<10} {:-<10} {:-<10} {:-<8} {:-<8}  {:-<20}",
            "", "", "", "", "", "", "", ""
        ),
    );
    for (idx, r) in rows.iter().enumerate() {
        push_line(
            &mut out,
            format!(
                "{:>3} {:<28} {:>10} {:>10} {:>10} {:>8} {:>8}  {:<20}",
                idx + 1,
                truncate(display_name(&r.name), 28),
                fmt_compact(r.existing),
                fmt_compact(r.planned),
                fmt_compact(r.total),
                fmt_percent(r.planned_share()),
                r.systems,
                r.expansion_category().display_name(),
            ),
        );
    }
    out
}

/// Single-year breakdown: the `top` largest systems plus owner/country splits.
pub fn format_year_analysis(analysis: &YearAnalysis, top: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Year {}: {} systems, {} H100e\n",
        analysis.year,
        analysis.systems.len(),
        fmt_compact(analysis.total_capacity)
    ));
    if analysis.systems.is_empty() {
        return out;
    }

    out.push_str("\nLargest systems:\n");
    for i in analysis.systems.iter().take(top) {
        push_line(
            &mut out,
            format!(
                "  {:<44} {:>10} {:<20} {:<10}",
                truncate(display_name(&i.name), 44),
                fmt_compact(i.capacity),
                truncate(display_name(&i.owner), 20),
                i.status.display_name(),
            ),
        );
    }

    out.push_str("\nBy owner:\n");
    out.push_str(&format_year_groups(&analysis.companies, top));
    out.push_str("\nBy country:\n");
    out.push_str(&format_year_groups(&analysis.countries, top));
    out
}

fn format_year_groups(groups: &[YearGroup], top: usize) -> String {
    let mut out = String::new();
    for g in groups.iter().take(top) {
        push_line(
            &mut out,
            format!(
                "  {:<32} {:>10} {:>4}",
                truncate(display_name(&g.name), 32),
                fmt_compact(g.capacity),
                g.systems
            ),
        );
    }
    if groups.len() > top {
        out.push_str(&format!("  ... {} more\n", groups.len() - top));
    }
    out
}

/// Compact capacity figure: `20.3M`, `450K`, `999`.
pub fn fmt_compact(v: f64) -> String {
    if !v.is_finite() {
        return "n/a".to_string();
    }
    let abs = v.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.0}K", v / 1_000.0)
    } else {
        format!("{v:.0}")
    }
}

/// Multiplier like `12.3x`; non-finite ratios print as `n/a`.
pub fn fmt_ratio(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.1}x")
    } else {
        "n/a".to_string()
    }
}

fn fmt_percent(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.0}%")
    } else {
        "n/a".to_string()
    }
}

fn display_name(s: &str) -> &str {
    if s.is_empty() { "(unspecified)" } else { s }
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
