//! # Sales Insights
//!
//! A library for turning a tabular sales-performance dataset into
//! human-readable coaching insights.
//!
//! ## Core Concepts
//!
//! - **Dataset**: the immutable in-memory table loaded once at startup,
//!   with the date column parsed and the derived revenue total computed
//!   during normalization
//! - **Resolution**: mapping a representative identifier to exactly one
//!   canonical record, with deterministic latest-date tie-breaking
//! - **Aggregation**: bucketing dated records into ISO weeks or calendar
//!   months and summing the metric columns present
//! - **Insight Collaborator**: an external text-generation service behind a
//!   narrow `text -> text` interface; when unavailable, requests still
//!   return the structured summary with placeholder commentary
//!
//! ## Example
//!
//! ```rust,ignore
//! use sales_insights::{Dataset, Granularity, SalesInsights};
//!
//! let dataset = Dataset::load_or_empty("sales_performance_data.csv");
//! let pipeline = SalesInsights::new(dataset);
//!
//! let report = pipeline.performance_trends(Granularity::Monthly)?;
//! println!("{}", report.summary);
//! println!("{}", report.commentary);
//! ```

pub mod aggregate;
pub mod error;
pub mod format;
pub mod ingestion;
pub mod llm;
pub mod resolver;
pub mod schema;
pub mod stats;
pub mod utils;

pub use aggregate::{aggregate, AggregateTable, BucketValues, PeriodBucket};
pub use error::{Result, SalesInsightsError};
pub use format::{format_record, format_table, format_team_summary};
pub use ingestion::{Dataset, Row};
pub use llm::{commentary, InsightGenerator, NOT_CONFIGURED_MESSAGE};
pub use resolver::{resolve, MatchColumn, ResolvedRecord};
pub use schema::{Granularity, SchemaCapabilities, Value};
pub use stats::{team_summary, ColumnKind, ColumnStats, TeamSummary};

#[cfg(feature = "gemini")]
pub use llm::GeminiClient;

use llm::prompts;
use log::{debug, info};

/// A structured summary plus the collaborator's commentary on it. The
/// summary is always computed locally; the commentary degrades to
/// explanatory text when the collaborator is unconfigured or failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightReport {
    pub summary: String,
    pub commentary: String,
}

/// The pipeline facade: owns the immutable dataset and an optional insight
/// generator, and exposes the three read operations an API layer would
/// serve. Every operation is a pure function of the dataset, so a shared
/// instance is safe to use across threads.
pub struct SalesInsights {
    dataset: Dataset,
    generator: Option<Box<dyn InsightGenerator + Send + Sync>>,
}

impl SalesInsights {
    pub fn new(dataset: Dataset) -> Self {
        info!(
            "Sales insight pipeline ready: {} rows, {} columns",
            dataset.rows().len(),
            dataset.columns().len()
        );
        Self {
            dataset,
            generator: None,
        }
    }

    pub fn with_generator(
        mut self,
        generator: Box<dyn InsightGenerator + Send + Sync>,
    ) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Coaching insights for one representative. The identifier is trimmed
    /// and rejected when blank before resolution runs.
    pub fn rep_performance(&self, rep_id: &str) -> Result<InsightReport> {
        let rep_id = rep_id.trim();
        if rep_id.is_empty() {
            return Err(SalesInsightsError::EmptyIdentifier);
        }

        let record = resolve(&self.dataset, rep_id)?;
        debug!("Resolved '{}' via {:?}", rep_id, record.matched_by);

        let summary = format_record(&self.dataset, &record);
        let commentary = self.commentary(&prompts::individual_prompt(&summary));
        Ok(InsightReport {
            summary,
            commentary,
        })
    }

    /// Whole-team insights over per-column descriptive statistics.
    pub fn team_performance(&self) -> Result<InsightReport> {
        let summary = format_team_summary(&team_summary(&self.dataset)?);
        let commentary = self.commentary(&prompts::team_prompt(&summary));
        Ok(InsightReport {
            summary,
            commentary,
        })
    }

    /// Trend insights over weekly or monthly aggregates.
    pub fn performance_trends(&self, granularity: Granularity) -> Result<InsightReport> {
        let table = aggregate(&self.dataset, granularity)?;
        let summary = format_table(&table);
        let commentary = self.commentary(&prompts::trends_prompt(&summary, granularity));
        Ok(InsightReport {
            summary,
            commentary,
        })
    }

    fn commentary(&self, prompt: &str) -> String {
        let generator = self
            .generator
            .as_deref()
            .map(|g| g as &dyn InsightGenerator);
        llm::commentary(generator, prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Value;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn sample_dataset() -> Dataset {
        let columns = vec![
            "employee_id".to_string(),
            "dated".to_string(),
            "applications".to_string(),
        ];
        let rows = vec![
            Row::new(vec![text("E42"), text("2024-01-05"), Value::Number(4.0)]),
            Row::new(vec![text("E42"), text("2024-02-10"), Value::Number(6.0)]),
        ];
        Dataset::from_rows(columns, rows)
    }

    struct Echo;

    impl InsightGenerator for Echo {
        fn summarize(&self, prompt: &str) -> Result<String> {
            Ok(format!("analyzed {} bytes", prompt.len()))
        }
    }

    #[test]
    fn test_rep_performance_without_generator() {
        let pipeline = SalesInsights::new(sample_dataset());
        let report = pipeline.rep_performance("E42").unwrap();

        assert!(report.summary.contains("dated: 2024-02-10"));
        assert_eq!(report.commentary, NOT_CONFIGURED_MESSAGE);
    }

    #[test]
    fn test_rep_performance_with_generator() {
        let pipeline = SalesInsights::new(sample_dataset()).with_generator(Box::new(Echo));
        let report = pipeline.rep_performance(" E42 ").unwrap();

        assert!(report.commentary.starts_with("> analyzed"));
    }

    #[test]
    fn test_blank_identifier_is_rejected_before_resolution() {
        let pipeline = SalesInsights::new(sample_dataset());
        let result = pipeline.rep_performance("   ");
        assert!(matches!(result, Err(SalesInsightsError::EmptyIdentifier)));
    }

    #[test]
    fn test_trends_on_empty_dataset_reports_unavailable() {
        let pipeline = SalesInsights::new(Dataset::empty());
        let result = pipeline.performance_trends(Granularity::Monthly);
        assert!(matches!(
            result,
            Err(SalesInsightsError::DatasetUnavailable)
        ));
    }

    #[test]
    fn test_team_performance_summary_shape() {
        let pipeline = SalesInsights::new(sample_dataset());
        let report = pipeline.team_performance().unwrap();

        assert!(report.summary.starts_with("rows: 2\n"));
        assert!(report.summary.contains("applications: count=2 sum=10"));
    }
}
