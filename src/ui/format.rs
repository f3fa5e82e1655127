//! Display formatting for report figures.

const RED: &str = "#dc3545";
const YELLOW: &str = "#ffc107";
const GREEN: &str = "#28a745";
/// Labels with no band of their own.
pub const NEUTRAL: &str = "#6c757d";

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Whole number with thousands separators.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(rounded.abs() as u64))
}

/// Whole US dollars, e.g. `$1,234` or `-$50`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_string();
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "0%".to_string();
    }
    format!("{}%", value.round() as i64)
}

pub fn format_coverage(value: f64) -> String {
    if !value.is_finite() {
        return "0.0x".to_string();
    }
    format!("{value:.1}x")
}

pub fn rag_color(rag: &str) -> &'static str {
    match rag.trim().to_ascii_uppercase().as_str() {
        "GREEN" => GREEN,
        "YELLOW" => YELLOW,
        _ => RED,
    }
}

/// Attainment band: green from 90%, yellow from 70%, red below.
pub fn pct_class(pct: f64) -> &'static str {
    if pct >= 90.0 {
        "green"
    } else if pct >= 70.0 {
        "yellow"
    } else {
        "red"
    }
}

pub fn pct_color(pct: f64) -> &'static str {
    match pct_class(pct) {
        "green" => GREEN,
        "yellow" => YELLOW,
        _ => RED,
    }
}

pub fn gap_color(gap: f64) -> &'static str {
    if gap < 0.0 {
        RED
    } else {
        GREEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_and_rounds() {
        assert_eq!(format_currency(1234.4), "$1,234");
        assert_eq!(format_currency(-1_500_000.0), "-$1,500,000");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(f64::NAN), "$0");
    }

    #[test]
    fn percent_and_coverage() {
        assert_eq!(format_percent(84.6), "85%");
        assert_eq!(format_coverage(2.46), "2.5x");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
    }

    #[test]
    fn colors_follow_thresholds() {
        assert_eq!(pct_class(90.0), "green");
        assert_eq!(pct_class(70.0), "yellow");
        assert_eq!(pct_class(69.9), "red");
        assert_eq!(rag_color("green"), GREEN);
        assert_eq!(rag_color("unknown"), RED);
        assert_eq!(gap_color(-1.0), RED);
        assert_eq!(gap_color(0.0), GREEN);
    }
}
