use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Exact-match identifier column, tried first during resolution.
pub const IDENTIFIER_COLUMN: &str = "employee_id";

/// Case-insensitive fallback column for resolution.
pub const DISPLAY_NAME_COLUMN: &str = "employee_name";

/// The column holding the record date.
pub const DATE_COLUMN: &str = "dated";

pub const REVENUE_CONFIRMED_COLUMN: &str = "revenue_confirmed";
pub const REVENUE_PENDING_COLUMN: &str = "revenue_pending";

/// Derived at load time as `revenue_confirmed + revenue_pending`.
pub const REVENUE_TOTAL_COLUMN: &str = "revenue_total";

/// Metric columns the aggregator sums, in the order they appear in trend
/// tables. Only the ones actually present in a dataset are used.
pub const METRIC_CANDIDATES: [&str; 4] = [
    "lead_taken",
    "tours_booked",
    "applications",
    REVENUE_TOTAL_COLUMN,
];

/// A single cell of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Canonical text form used for identifier matching and formatting.
    /// Whole numbers render without a fractional part, so an
    /// `employee_id` parsed as `183.0` still matches the query `"183"`.
    pub fn to_text(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Null => "n/a".to_string(),
        }
    }
}

/// Plain decimal rendering: no thousands separators, integers without a
/// fraction, everything else to two decimal places.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "n/a".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{:.2}", n)
    }
}

/// Aggregation granularity for performance trends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Weekly,
    Monthly,
}

impl Granularity {
    /// Parses the query-parameter form; unknown strings are rejected so the
    /// caller can report a usable message.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Some(Granularity::Weekly),
            "monthly" => Some(Granularity::Monthly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Monthly
    }
}

/// Which of the known columns a loaded dataset actually has, computed once
/// at load time so later stages never re-scan the header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaCapabilities {
    pub identifier: Option<usize>,
    pub display_name: Option<usize>,
    pub date: Option<usize>,
    /// Present metric candidates as (name, column index), in
    /// `METRIC_CANDIDATES` order.
    pub metrics: Vec<(String, usize)>,
}

impl SchemaCapabilities {
    pub fn from_columns(columns: &[String]) -> Self {
        let index_of = |name: &str| columns.iter().position(|c| c == name);

        SchemaCapabilities {
            identifier: index_of(IDENTIFIER_COLUMN),
            display_name: index_of(DISPLAY_NAME_COLUMN),
            date: index_of(DATE_COLUMN),
            metrics: METRIC_CANDIDATES
                .iter()
                .filter_map(|name| index_of(name).map(|idx| (name.to_string(), idx)))
                .collect(),
        }
    }

    /// True when at least one of the two resolvable columns exists.
    pub fn resolvable(&self) -> bool {
        self.identifier.is_some() || self.display_name.is_some()
    }
}
