use crate::error::{Result, SalesInsightsError};
use crate::ingestion::Dataset;
use crate::schema::Value;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Column-kind specific statistics for the team summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric {
        sum: f64,
        mean: f64,
        min: f64,
        max: f64,
    },
    Text {
        unique: usize,
    },
    Date {
        min: NaiveDate,
        max: NaiveDate,
    },
    /// Every cell in the column was missing.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    /// Number of non-missing cells.
    pub count: usize,
    pub kind: ColumnKind,
}

/// Whole-team descriptive statistics, one entry per dataset column in
/// dataset column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub rows: usize,
    pub columns: Vec<ColumnStats>,
}

/// Computes per-column statistics across every row of the dataset. A column
/// is treated as numeric, textual, or temporal according to its first
/// non-missing cell; cells of another kind in the same column are ignored
/// for the kind-specific figures but still counted as present.
pub fn team_summary(dataset: &Dataset) -> Result<TeamSummary> {
    if dataset.is_empty() {
        return Err(SalesInsightsError::DatasetUnavailable);
    }

    let columns = dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, name)| column_stats(dataset, idx, name))
        .collect();

    Ok(TeamSummary {
        rows: dataset.rows().len(),
        columns,
    })
}

fn column_stats(dataset: &Dataset, idx: usize, name: &str) -> ColumnStats {
    let cells: Vec<&Value> = dataset
        .rows()
        .iter()
        .filter_map(|row| row.get(idx))
        .filter(|v| !v.is_null())
        .collect();
    let count = cells.len();

    let kind = match cells.first() {
        None => ColumnKind::Empty,
        Some(Value::Number(_)) => {
            let numbers: Vec<f64> = cells.iter().filter_map(|v| v.as_number()).collect();
            let sum: f64 = numbers.iter().sum();
            let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
            let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            ColumnKind::Numeric {
                sum,
                mean: sum / numbers.len() as f64,
                min,
                max,
            }
        }
        Some(Value::Date(_)) => {
            let dates: Vec<NaiveDate> = cells.iter().filter_map(|v| v.as_date()).collect();
            ColumnKind::Date {
                min: dates.iter().copied().min().unwrap_or_default(),
                max: dates.iter().copied().max().unwrap_or_default(),
            }
        }
        Some(_) => {
            let unique: BTreeSet<String> = cells.iter().map(|v| v.to_text()).collect();
            ColumnKind::Text {
                unique: unique.len(),
            }
        }
    };

    ColumnStats {
        name: name.to_string(),
        count,
        kind,
    }
}
