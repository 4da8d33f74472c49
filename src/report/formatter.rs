// Markdown formatting utilities for briefing generation

/// Build a markdown table from headers and rows
pub fn build_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut table = String::new();

    // Header row
    table.push_str("| ");
    table.push_str(&headers.join(" | "));
    table.push_str(" |\n");

    // Separator row
    table.push('|');
    for _ in headers {
        table.push_str("--------|");
    }
    table.push('\n');

    // Data rows
    for row in rows {
        table.push_str("| ");
        table.push_str(&row.join(" | "));
        table.push_str(" |\n");
    }

    table
}

/// Build a markdown list from items
pub fn build_list(items: &[String], ordered: bool) -> String {
    let mut list = String::new();

    for (i, item) in items.iter().enumerate() {
        if ordered {
            list.push_str(&format!("{}. {}\n", i + 1, item));
        } else {
            list.push_str(&format!("- {}\n", item));
        }
    }

    list
}

/// Build a markdown section header
pub fn build_section_header(title: &str, level: u8) -> String {
    let hashes = "#".repeat(level as usize);
    format!("{} {}\n\n", hashes, title)
}

/// Format a count with thousand separators (space as separator)
///
/// 1139664 -> "1 139 664"
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let chars: Vec<char> = digits.chars().collect();
    let len = chars.len();

    let mut formatted = String::new();
    for (i, ch) in chars.iter().enumerate() {
        formatted.push(*ch);
        if (len - i - 1) % 3 == 0 && i < len - 1 {
            formatted.push(' ');
        }
    }
    formatted
}

/// Format an optional metric value, "—" when the window has no coverage
pub fn format_metric_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format_count(v.max(0.0) as u64),
        Some(v) => format!("{:.1}", v),
        None => "—".to_string(),
    }
}

/// Format a signed delta with its percent, "—" when unavailable
pub fn format_delta(delta: Option<f64>, delta_percent: Option<f64>) -> String {
    match (delta, delta_percent) {
        (Some(d), Some(pct)) => format!("{:+.1} ({:+.1}%)", d, pct),
        (Some(d), None) => format!("{:+.1}", d),
        _ => "—".to_string(),
    }
}

/// Format a percentage value
pub fn format_percentage(value: f64) -> String {
    format!("{:.0}%", value)
}

/// Format a currency value
pub fn format_currency(value: f64, decimals: usize) -> String {
    format!("${:.prec$}", value, prec = decimals)
}

/// Format a timestamp as ISO 8601 UTC
pub fn format_timestamp(millis: i64) -> String {
    use chrono::{TimeZone, Utc};

    match Utc.timestamp_millis_opt(millis) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        _ => format!("{} ms (Unix epoch)", millis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_table() {
        let headers = vec!["Metric", "Value"];
        let rows = vec![
            vec!["Visitors".to_string(), "1 200".to_string()],
            vec!["Enquiries".to_string(), "60".to_string()],
        ];

        let table = build_table(&headers, &rows);
        assert!(table.contains("| Metric | Value |"));
        assert!(table.contains("| Visitors | 1 200 |"));
    }

    #[test]
    fn test_build_list() {
        let items = vec!["First".to_string(), "Second".to_string()];

        let unordered = build_list(&items, false);
        assert!(unordered.contains("- First"));

        let ordered = build_list(&items, true);
        assert!(ordered.contains("1. First"));
    }

    #[test]
    fn test_build_section_header() {
        assert_eq!(build_section_header("Title", 2), "## Title\n\n");
        assert_eq!(build_section_header("Subtitle", 3), "### Subtitle\n\n");
    }

    #[test]
    fn test_format_count_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1200), "1 200");
        assert_eq!(format_count(1_139_664), "1 139 664");
    }

    #[test]
    fn test_format_metric_value_dash_for_missing() {
        assert_eq!(format_metric_value(None), "—");
        assert_eq!(format_metric_value(Some(1200.0)), "1 200");
        assert_eq!(format_metric_value(Some(3.5)), "3.5");
    }
}
