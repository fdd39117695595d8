use crate::error::Result;
use crate::schema::{
    SchemaCapabilities, Value, REVENUE_CONFIRMED_COLUMN, REVENUE_PENDING_COLUMN,
    REVENUE_TOTAL_COLUMN,
};
use crate::utils::parse_date;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One record of the dataset. Values are aligned with the owning
/// [`Dataset`]'s column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

/// The immutable in-memory dataset. Built once at process start; every
/// later operation is a pure read over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
    capabilities: SchemaCapabilities,
}

impl Dataset {
    /// Builds a normalized dataset from already-parsed rows. Each row must
    /// have exactly one value per column. Date parsing and the derived
    /// revenue total are applied here, so construction through this path is
    /// equivalent to loading the same data from a file.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut dataset = Dataset {
            capabilities: SchemaCapabilities::from_columns(&columns),
            columns,
            rows,
        };
        dataset.normalize();
        dataset
    }

    /// The empty dataset: zero rows, zero columns. Stands in for a missing
    /// or unreadable source file.
    pub fn empty() -> Self {
        Dataset {
            columns: Vec::new(),
            rows: Vec::new(),
            capabilities: SchemaCapabilities::default(),
        }
    }

    /// Loads and normalizes a CSV file. Cells that parse as numbers become
    /// numeric, cells in the date column are parsed as dates (unparseable
    /// ones become missing rather than failing the load), and everything
    /// else stays text. Empty cells are missing.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let values = record.iter().map(parse_cell).collect();
            rows.push(Row::new(values));
        }

        info!(
            "Loaded sales dataset: {} rows, {} columns",
            rows.len(),
            columns.len()
        );

        Ok(Dataset::from_rows(columns, rows))
    }

    /// Boot-regardless loader: any failure to open or parse the file yields
    /// the empty dataset instead of an error. Callers must check
    /// [`Dataset::is_empty`] before use; every pipeline operation rejects
    /// the empty dataset explicitly.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Dataset {
        match Dataset::load(path.as_ref()) {
            Ok(dataset) => dataset,
            Err(e) => {
                warn!(
                    "Could not load sales dataset from {}: {}. Continuing with an empty dataset.",
                    path.as_ref().display(),
                    e
                );
                Dataset::empty()
            }
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn capabilities(&self) -> &SchemaCapabilities {
        &self.capabilities
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Looks up a cell by column name.
    pub fn value<'a>(&self, row: &'a Row, column: &str) -> Option<&'a Value> {
        self.column_index(column).and_then(|idx| row.get(idx))
    }

    /// Date of a row, if the date column exists and the cell parsed.
    pub fn row_date(&self, row: &Row) -> Option<chrono::NaiveDate> {
        let idx = self.capabilities.date?;
        row.get(idx).and_then(Value::as_date)
    }

    // Parses the date column in place and appends the derived revenue total
    // when both source columns exist. Runs exactly once per dataset.
    fn normalize(&mut self) {
        if let Some(date_idx) = self.capabilities.date {
            for row in &mut self.rows {
                if let Some(cell) = row.values.get_mut(date_idx) {
                    *cell = reparse_as_date(cell);
                }
            }
        }

        let confirmed = self.column_index(REVENUE_CONFIRMED_COLUMN);
        let pending = self.column_index(REVENUE_PENDING_COLUMN);
        let already_present = self.column_index(REVENUE_TOTAL_COLUMN).is_some();

        if let (Some(confirmed), Some(pending)) = (confirmed, pending) {
            if !already_present {
                debug!(
                    "Deriving {} = {} + {}",
                    REVENUE_TOTAL_COLUMN, REVENUE_CONFIRMED_COLUMN, REVENUE_PENDING_COLUMN
                );
                self.columns.push(REVENUE_TOTAL_COLUMN.to_string());
                for row in &mut self.rows {
                    let total = match (
                        row.get(confirmed).and_then(Value::as_number),
                        row.get(pending).and_then(Value::as_number),
                    ) {
                        (Some(a), Some(b)) => Value::Number(a + b),
                        _ => Value::Null,
                    };
                    row.values.push(total);
                }
                self.capabilities = SchemaCapabilities::from_columns(&self.columns);
            }
        }
    }
}

fn parse_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return Value::Number(n);
        }
        return Value::Null;
    }
    Value::Text(trimmed.to_string())
}

fn reparse_as_date(cell: &Value) -> Value {
    match cell {
        Value::Text(s) => match parse_date(s) {
            Some(d) => Value::Date(d),
            None => Value::Null,
        },
        Value::Date(d) => Value::Date(*d),
        // Numeric or empty cells in the date column are not dates.
        _ => Value::Null,
    }
}
