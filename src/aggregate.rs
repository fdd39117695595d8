use crate::error::{Result, SalesInsightsError};
use crate::ingestion::Dataset;
use crate::schema::{Granularity, Value};
use crate::utils::{month_label, week_label};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated values for one period. The row-count fallback is a distinct
/// shape so formatting and callers cannot confuse it with metric sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BucketValues {
    /// Sums aligned with [`AggregateTable::metrics`].
    Metrics(Vec<f64>),
    RowCount(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBucket {
    pub period: String,
    pub values: BucketValues,
}

/// Period buckets in ascending order, covering only periods that have at
/// least one contributing row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTable {
    pub granularity: Granularity,
    /// Metric names being summed, in candidate order. Empty when the table
    /// fell back to row counts.
    pub metrics: Vec<String>,
    pub buckets: Vec<PeriodBucket>,
}

/// Buckets every dated row into calendar weeks or months and sums the
/// metric columns present in the dataset.
///
/// Rows with a missing or unparseable date are excluded from every bucket.
/// A dataset without a date column cannot be aggregated at all; that is a
/// precondition failure, not an empty result.
pub fn aggregate(dataset: &Dataset, granularity: Granularity) -> Result<AggregateTable> {
    if dataset.is_empty() {
        return Err(SalesInsightsError::DatasetUnavailable);
    }
    let date_idx = dataset
        .capabilities()
        .date
        .ok_or(SalesInsightsError::MissingDateColumn)?;

    let metric_columns = &dataset.capabilities().metrics;
    let metrics: Vec<String> = metric_columns.iter().map(|(name, _)| name.clone()).collect();

    if metrics.is_empty() {
        debug!("No known metric columns present; falling back to per-period row counts");
    }

    // BTreeMap keys are the period labels, which sort lexicographically in
    // chronological order for both label forms.
    let mut sums: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for row in dataset.rows() {
        let Some(date) = row.get(date_idx).and_then(Value::as_date) else {
            continue;
        };
        let period = match granularity {
            Granularity::Weekly => week_label(date),
            Granularity::Monthly => month_label(date),
        };

        if metrics.is_empty() {
            *counts.entry(period).or_insert(0) += 1;
        } else {
            let entry = sums
                .entry(period)
                .or_insert_with(|| vec![0.0; metric_columns.len()]);
            for (slot, (_, col)) in entry.iter_mut().zip(metric_columns.iter()) {
                if let Some(n) = row.get(*col).and_then(Value::as_number) {
                    *slot += n;
                }
            }
        }
    }

    let buckets = if metrics.is_empty() {
        counts
            .into_iter()
            .map(|(period, count)| PeriodBucket {
                period,
                values: BucketValues::RowCount(count),
            })
            .collect()
    } else {
        sums.into_iter()
            .map(|(period, values)| PeriodBucket {
                period,
                values: BucketValues::Metrics(values),
            })
            .collect()
    };

    Ok(AggregateTable {
        granularity,
        metrics,
        buckets,
    })
}
