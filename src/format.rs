//! Stable plain-text rendering of pipeline results.
//!
//! The strings produced here are embedded verbatim in the prompts handed to
//! the insight collaborator, so their layout is part of the crate's
//! contract: dataset column order for records, period-then-metric order for
//! trend tables, `n/a` for missing values, and plain decimal numbers with
//! no locale separators.

use crate::aggregate::{AggregateTable, BucketValues};
use crate::ingestion::Dataset;
use crate::resolver::ResolvedRecord;
use crate::schema::format_number;
use crate::stats::{ColumnKind, TeamSummary};

/// Renders a resolved record as one `name: value` line per column, in the
/// dataset's column order.
pub fn format_record(dataset: &Dataset, record: &ResolvedRecord) -> String {
    let mut out = String::new();
    for (idx, name) in dataset.columns().iter().enumerate() {
        let value = record
            .row
            .get(idx)
            .map(|v| v.to_text())
            .unwrap_or_else(|| "n/a".to_string());
        out.push_str(name);
        out.push_str(": ");
        out.push_str(&value);
        out.push('\n');
    }
    out
}

/// Renders an aggregate table with fixed-width columns: `period` first,
/// then the metric sums, or a single `records` column for the row-count
/// fallback.
pub fn format_table(table: &AggregateTable) -> String {
    let mut headers: Vec<String> = vec!["period".to_string()];
    if table.metrics.is_empty() {
        headers.push("records".to_string());
    } else {
        headers.extend(table.metrics.iter().cloned());
    }

    let mut grid: Vec<Vec<String>> = vec![headers];
    for bucket in &table.buckets {
        let mut cells = vec![bucket.period.clone()];
        match &bucket.values {
            BucketValues::Metrics(values) => {
                cells.extend(values.iter().map(|v| format_number(*v)));
            }
            BucketValues::RowCount(count) => cells.push(count.to_string()),
        }
        grid.push(cells);
    }

    let widths: Vec<usize> = (0..grid[0].len())
        .map(|col| grid.iter().map(|row| row[col].len()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for row in &grid {
        let mut line = String::new();
        for (col, cell) in row.iter().enumerate() {
            if col > 0 {
                line.push_str("  ");
                // Numbers right-align under their header.
                line.push_str(&" ".repeat(widths[col] - cell.len()));
                line.push_str(cell);
            } else {
                line.push_str(cell);
                line.push_str(&" ".repeat(widths[col] - cell.len()));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Renders the whole-team summary, one line per column in dataset order.
pub fn format_team_summary(summary: &TeamSummary) -> String {
    let mut out = format!("rows: {}\n", summary.rows);
    for column in &summary.columns {
        let stats = match &column.kind {
            ColumnKind::Numeric {
                sum,
                mean,
                min,
                max,
            } => format!(
                "count={} sum={} mean={} min={} max={}",
                column.count,
                format_number(*sum),
                format_number(*mean),
                format_number(*min),
                format_number(*max)
            ),
            ColumnKind::Text { unique } => {
                format!("count={} unique={}", column.count, unique)
            }
            ColumnKind::Date { min, max } => format!(
                "count={} min={} max={}",
                column.count,
                min.format("%Y-%m-%d"),
                max.format("%Y-%m-%d")
            ),
            ColumnKind::Empty => format!("count={}", column.count),
        };
        out.push_str(&format!("{}: {}\n", column.name, stats));
    }
    out
}
