//! Lenient numeric and date coercion for raw string fields.
//!
//! Nothing in here fails: unparseable input becomes `0.0` or `None`.

use chrono::NaiveDate;

/// Parse a capacity-like number.
///
/// Thousands separators are stripped and the leading decimal number is used,
/// so `"100,000"` is `100000` and `"450 (est.)"` is `450`. Empty, missing,
/// unparseable and non-finite input all yield `0.0`.
pub fn parse_number(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else { return 0.0 };
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let Some(prefix) = numeric_prefix(cleaned.trim_start()) else {
        return 0.0;
    };
    match prefix.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Longest prefix of `s` that reads as a decimal number (sign, digits,
/// fraction, exponent). Needs at least one mantissa digit.
fn numeric_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = 0usize;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    Some(&s[..end])
}

/// Parse a calendar date, or `None` if the text is not a recognizable date.
///
/// Source exports are mostly ISO (`YYYY-MM-DD`) but hand-edited sheets also
/// carry US-style dates, month names, timestamps and bare years. A bare year
/// or year-month resolves to the first day of that period.
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }

    const FMTS: [&str; 8] = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%d.%m.%Y",
        "%B %d, %Y",
        "%b %d, %Y",
        "%d %B %Y",
        "%d %b %Y",
    ];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // Timestamps: `2024-03-30T12:00:00Z`, `2024-03-30 08:00`.
    if s.len() > 10 && s.is_char_boundary(10) {
        let (date_part, rest) = s.split_at(10);
        if rest.starts_with(['T', ' ']) {
            if let Ok(d) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
                return Some(d);
            }
        }
    }

    // `YYYY-MM`
    if s.len() == 7 && s.as_bytes()[4] == b'-' {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            return Some(d);
        }
    }

    // `YYYY`
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = s.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    None
}
