use crate::error::{Result, SalesInsightsError};
use crate::ingestion::{Dataset, Row};
use crate::schema::Value;

/// Which column an identifier query matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchColumn {
    Identifier,
    DisplayName,
}

/// The single row chosen to answer an identifier query.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecord<'a> {
    pub row: &'a Row,
    pub identifier: String,
    pub matched_by: MatchColumn,
}

/// Resolves a representative identifier to exactly one row.
///
/// Matching order: exact match on `employee_id`, then case-insensitive
/// exact match on `employee_name`. The first strategy that matches any row
/// wins. Among multiple matches the row with the latest date is chosen;
/// rows without a parseable date lose to dated rows, and remaining ties go
/// to the earliest row in dataset order.
pub fn resolve<'a>(dataset: &'a Dataset, identifier: &str) -> Result<ResolvedRecord<'a>> {
    if dataset.is_empty() {
        return Err(SalesInsightsError::DatasetUnavailable);
    }

    let caps = dataset.capabilities();

    if let Some(idx) = caps.identifier {
        let matches = rows_where(dataset, idx, |cell| cell.to_text() == identifier);
        if let Some(row) = pick_latest(dataset, &matches) {
            return Ok(ResolvedRecord {
                row,
                identifier: identifier.to_string(),
                matched_by: MatchColumn::Identifier,
            });
        }
    }

    if let Some(idx) = caps.display_name {
        let wanted = identifier.to_lowercase();
        let matches = rows_where(dataset, idx, |cell| {
            cell.to_text().to_lowercase() == wanted
        });
        if let Some(row) = pick_latest(dataset, &matches) {
            return Ok(ResolvedRecord {
                row,
                identifier: identifier.to_string(),
                matched_by: MatchColumn::DisplayName,
            });
        }
    }

    Err(SalesInsightsError::IdentifierNotFound {
        identifier: identifier.to_string(),
    })
}

fn rows_where<'a, F>(dataset: &'a Dataset, column: usize, predicate: F) -> Vec<&'a Row>
where
    F: Fn(&Value) -> bool,
{
    dataset
        .rows()
        .iter()
        .filter(|row| row.get(column).map(&predicate).unwrap_or(false))
        .collect()
}

// Latest date wins; a strictly later date is required to displace the
// current best, so equal dates keep the earlier row in dataset order.
fn pick_latest<'a>(dataset: &Dataset, matches: &[&'a Row]) -> Option<&'a Row> {
    let mut iter = matches.iter();
    let mut best = *iter.next()?;
    let mut best_date = dataset.row_date(best);

    for &row in iter {
        let date = dataset.row_date(row);
        if date > best_date {
            best = row;
            best_date = date;
        }
    }
    Some(best)
}
