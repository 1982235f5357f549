//! Output formatting helpers for human-readable and JSON output.

use chrono::DateTime;
use todokv::Todo;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Print `value` as one line of JSON.
pub fn print_json(value: &impl serde::Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Render Unix seconds as RFC 3339 in UTC, falling back to the raw number
/// when out of range.
pub fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}

/// Print todos as a table, one row per todo.
pub fn print_todos(todos: &[Todo]) {
    let rows: Vec<Vec<String>> = todos
        .iter()
        .map(|todo| {
            vec![
                todo.id.to_string(),
                if todo.completed { "x" } else { " " }.to_string(),
                todo.title.clone(),
                format_timestamp(todo.last_updated),
            ]
        })
        .collect();
    print_table(&["ID", "DONE", "TITLE", "UPDATED"], &rows);
}

/// Print a table with aligned columns in human-readable format.
///
/// `headers` and each row in `rows` must have the same length.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter().take(col_count)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    println!("{}", render_row(headers.iter().copied(), &widths));
    for row in rows {
        println!("{}", render_row(row.iter().map(String::as_str), &widths));
    }
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    line.join("  ").trim_end().to_string()
}
