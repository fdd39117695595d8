use chrono::{Datelike, NaiveDate};

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

/// Parses a date cell against the accepted formats. Returns `None` for
/// anything unparseable; callers treat that as a missing date, never an
/// error.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Calendar-month label, e.g. `2024-05`. Sorts lexicographically in
/// chronological order.
pub fn month_label(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// ISO 8601 week label, e.g. `2024-W05`. Uses the ISO week-year, so late
/// December days can land in week 1 of the following year. Monday is the
/// week boundary throughout.
pub fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{:04}-W{:02}", iso.year(), iso.week())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(parse_date("2024-01-05"), Some(expected));
        assert_eq!(parse_date("2024/01/05"), Some(expected));
        assert_eq!(parse_date("01/05/2024"), Some(expected));
        assert_eq!(parse_date("05-01-2024"), Some(expected));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("  "), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }

    #[test]
    fn test_month_label() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        assert_eq!(month_label(date), "2024-02");
    }

    #[test]
    fn test_week_label_uses_iso_week_year() {
        // 2024-12-30 is a Monday belonging to ISO week 1 of 2025.
        let date = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        assert_eq!(week_label(date), "2025-W01");

        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(week_label(date), "2024-W01");
    }

    #[test]
    fn test_week_boundary_is_monday() {
        // Sunday 2024-01-07 and Monday 2024-01-08 straddle an ISO week edge.
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert_eq!(week_label(sunday), "2024-W01");
        assert_eq!(week_label(monday), "2024-W02");
    }
}
