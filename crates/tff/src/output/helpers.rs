//! Common helper functions for output formatting.

use owo_colors::OwoColorize;
use serde_json::Value;

/// Column gap used by every table.
const COLUMN_GAP: usize = 2;

/// Truncates a string to at most `max_len` characters, marking the cut with `...`.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let head: String = s.chars().take(max_len - 3).collect();
    format!("{head}...")
}

/// Formats a boolean as `Yes` / `No`.
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Upper-cases the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Re-indents a JSON body for display.
///
/// # Errors
///
/// Returns an error if the body is not valid JSON.
pub fn pretty_json(body: &[u8]) -> Result<String, serde_json::Error> {
    let value: Value = serde_json::from_slice(body)?;
    serde_json::to_string_pretty(&value)
}

/// Renders rows as left-aligned columns under a header and a dashed rule.
///
/// Every column but the last is padded to its widest cell.
pub fn render_table(headers: &[&str], rows: &[Vec<String>], use_colors: bool) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let rule_cells: Vec<String> = headers.iter().map(|h| "-".repeat(h.chars().count())).collect();

    let mut output = String::new();
    let header = render_row(&header_cells, &widths);
    let rule = render_row(&rule_cells, &widths);
    if use_colors {
        output.push_str(&format!("{}\n{}\n", header.dimmed(), rule.dimmed()));
    } else {
        output.push_str(&format!("{header}\n{rule}\n"));
    }

    for row in rows {
        output.push_str(&render_row(row, &widths));
        output.push('\n');
    }

    output
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    let last = cells.len().saturating_sub(1);
    for (i, cell) in cells.iter().enumerate() {
        line.push_str(cell);
        if i < last {
            let width = widths.get(i).copied().unwrap_or(0);
            let pad = width.saturating_sub(cell.chars().count()) + COLUMN_GAP;
            line.push_str(&" ".repeat(pad));
        }
    }
    line
}

/// Formats a section heading.
pub fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("this is long", 10), "this is...");
        assert_eq!(truncate_str("abcdef", 3), "abc");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        assert_eq!(truncate_str("Zomerfestival Ĳmuiden", 10), "Zomerfe...");
        assert_eq!(truncate_str("café", 4), "café");
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(yes_no(true), "Yes");
        assert_eq!(yes_no(false), "No");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("event group"), "Event group");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_pretty_json() {
        let out = pretty_json(br#"{"a":[1,2]}"#).unwrap();
        assert_eq!(out, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
        assert!(pretty_json(b"not json").is_err());
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let rows = vec![
            vec!["evt-1".to_string(), "Jazz".to_string(), "Yes".to_string()],
            vec!["e2".to_string(), "Open air cinema".to_string(), "No".to_string()],
        ];
        let out = render_table(&["ID", "TITLE", "PUBLISHED"], &rows, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID     TITLE            PUBLISHED");
        assert_eq!(lines[1], "--     -----            ---------");
        assert_eq!(lines[2], "evt-1  Jazz             Yes");
        assert_eq!(lines[3], "e2     Open air cinema  No");
    }
}
