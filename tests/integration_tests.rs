use sales_insights::*;
use std::fs;
use std::path::PathBuf;

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn write_temp_csv(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    fs::write(&path, contents).expect("temp csv should be writable");
    path
}

fn full_dataset() -> Dataset {
    let columns = vec![
        "employee_id".to_string(),
        "employee_name".to_string(),
        "dated".to_string(),
        "lead_taken".to_string(),
        "tours_booked".to_string(),
        "applications".to_string(),
        "revenue_confirmed".to_string(),
        "revenue_pending".to_string(),
    ];
    let rows = vec![
        Row::new(vec![
            text("E42"),
            text("Jane Doe"),
            text("2024-01-05"),
            Value::Number(10.0),
            Value::Number(2.0),
            Value::Number(1.0),
            Value::Number(1000.0),
            Value::Number(500.0),
        ]),
        Row::new(vec![
            text("E42"),
            text("Jane Doe"),
            text("2024-02-10"),
            Value::Number(12.0),
            Value::Number(3.0),
            Value::Number(2.0),
            Value::Number(1500.0),
            Value::Number(250.0),
        ]),
        Row::new(vec![
            text("E7"),
            text("John Roe"),
            text("2024-02-20"),
            Value::Number(8.0),
            Value::Number(5.0),
            Value::Number(3.0),
            Value::Number(700.0),
            Value::Number(300.0),
        ]),
        Row::new(vec![
            text("E7"),
            text("John Roe"),
            text("not-a-date"),
            Value::Number(99.0),
            Value::Number(99.0),
            Value::Number(99.0),
            Value::Number(9.0),
            Value::Number(9.0),
        ]),
    ];
    Dataset::from_rows(columns, rows)
}

#[test]
fn test_csv_load_end_to_end() {
    let path = write_temp_csv(
        "sales_insights_it_load.csv",
        "employee_id,employee_name,dated,tours_booked,revenue_confirmed,revenue_pending\n\
         E42,Jane Doe,2024-01-05,2,1000,500\n\
         E42,Jane Doe,2024-02-10,3,1500,250\n",
    );
    let dataset = Dataset::load(&path).expect("csv should load");
    fs::remove_file(&path).ok();

    assert_eq!(dataset.rows().len(), 2);
    assert_eq!(
        dataset.columns().last().map(String::as_str),
        Some("revenue_total")
    );
    assert_eq!(
        dataset.value(&dataset.rows()[0], "revenue_total"),
        Some(&Value::Number(1500.0))
    );

    let pipeline = SalesInsights::new(dataset);
    let report = pipeline.rep_performance("E42").unwrap();
    assert!(report.summary.contains("dated: 2024-02-10"));
    assert!(report.summary.contains("revenue_total: 1750"));
}

#[test]
fn test_resolver_prefers_latest_dated_row() {
    // Two rows for E42 dated 2024-01-05 and 2024-02-10: the Feb row wins.
    let dataset = full_dataset();
    let record = resolve(&dataset, "E42").unwrap();
    assert_eq!(
        dataset.value(record.row, "dated").and_then(Value::as_date),
        chrono::NaiveDate::from_ymd_opt(2024, 2, 10)
    );
}

#[test]
fn test_resolver_display_name_case_insensitive() {
    let dataset = full_dataset();
    let record = resolve(&dataset, "jane doe").unwrap();
    assert_eq!(record.matched_by, MatchColumn::DisplayName);
}

#[test]
fn test_aggregate_without_date_column_fails_precondition() {
    let columns = vec!["employee_id".to_string(), "applications".to_string()];
    let rows = vec![Row::new(vec![text("E1"), Value::Number(3.0)])];
    let dataset = Dataset::from_rows(columns, rows);

    assert!(matches!(
        aggregate(&dataset, Granularity::Monthly),
        Err(SalesInsightsError::MissingDateColumn)
    ));
}

#[test]
fn test_weekly_aggregation_scenario() {
    // tours_booked [2, 3, 5] across weeks [1, 1, 2] yields two buckets of 5.
    let columns = vec!["dated".to_string(), "tours_booked".to_string()];
    let rows = vec![
        Row::new(vec![text("2024-01-02"), Value::Number(2.0)]),
        Row::new(vec![text("2024-01-04"), Value::Number(3.0)]),
        Row::new(vec![text("2024-01-09"), Value::Number(5.0)]),
    ];
    let dataset = Dataset::from_rows(columns, rows);
    let table = aggregate(&dataset, Granularity::Weekly).unwrap();

    assert_eq!(table.buckets.len(), 2);
    assert_eq!(table.buckets[0].values, BucketValues::Metrics(vec![5.0]));
    assert_eq!(table.buckets[1].values, BucketValues::Metrics(vec![5.0]));
}

#[test]
fn test_empty_dataset_resolves_to_unavailable_not_not_found() {
    assert!(matches!(
        resolve(&Dataset::empty(), "E42"),
        Err(SalesInsightsError::DatasetUnavailable)
    ));
}

#[test]
fn test_bucket_periods_are_strictly_ascending_and_unique() {
    let dataset = full_dataset();
    for granularity in [Granularity::Weekly, Granularity::Monthly] {
        let table = aggregate(&dataset, granularity).unwrap();
        let periods: Vec<&String> = table.buckets.iter().map(|b| &b.period).collect();
        for pair in periods.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }
}

#[test]
fn test_bucket_sums_match_dated_row_totals() {
    let dataset = full_dataset();
    let table = aggregate(&dataset, Granularity::Monthly).unwrap();

    let metric_idx = table
        .metrics
        .iter()
        .position(|m| m == "lead_taken")
        .unwrap();
    let bucket_total: f64 = table
        .buckets
        .iter()
        .map(|b| match &b.values {
            BucketValues::Metrics(v) => v[metric_idx],
            BucketValues::RowCount(_) => panic!("metrics expected"),
        })
        .sum();

    // The undated row (lead_taken = 99) is excluded on both sides.
    let dated_total: f64 = dataset
        .rows()
        .iter()
        .filter(|row| dataset.row_date(row).is_some())
        .filter_map(|row| dataset.value(row, "lead_taken").and_then(Value::as_number))
        .sum();

    assert_eq!(bucket_total, dated_total);
    assert_eq!(bucket_total, 30.0);
}

#[test]
fn test_derived_revenue_total_feeds_aggregation() {
    let dataset = full_dataset();
    let table = aggregate(&dataset, Granularity::Monthly).unwrap();

    assert!(table.metrics.contains(&"revenue_total".to_string()));
    let revenue_idx = table
        .metrics
        .iter()
        .position(|m| m == "revenue_total")
        .unwrap();
    let feb = table
        .buckets
        .iter()
        .find(|b| b.period == "2024-02")
        .unwrap();
    match &feb.values {
        BucketValues::Metrics(v) => assert_eq!(v[revenue_idx], 2750.0),
        BucketValues::RowCount(_) => panic!("metrics expected"),
    }
}

#[test]
fn test_record_format_round_trip_follows_column_order() {
    let dataset = full_dataset();
    let record = resolve(&dataset, "E7").unwrap();
    let rendered = format_record(&dataset, &record);

    let rendered_names: Vec<&str> = rendered
        .lines()
        .map(|line| line.split(':').next().unwrap())
        .collect();
    let expected: Vec<&str> = dataset.columns().iter().map(String::as_str).collect();
    assert_eq!(rendered_names, expected);
}

#[test]
fn test_full_pipeline_with_test_double() {
    struct Canned;

    impl InsightGenerator for Canned {
        fn summarize(&self, prompt: &str) -> Result<String> {
            assert!(prompt.contains("TRENDS TABLE (grouped by monthly)"));
            Ok("### Trend Summary\n- steady growth".to_string())
        }
    }

    let pipeline = SalesInsights::new(full_dataset()).with_generator(Box::new(Canned));
    let report = pipeline.performance_trends(Granularity::Monthly).unwrap();

    assert!(report.summary.starts_with("period"));
    assert_eq!(
        report.commentary,
        "> ### Trend Summary\n> - steady growth"
    );
}

#[test]
fn test_team_performance_end_to_end() {
    let pipeline = SalesInsights::new(full_dataset());
    let report = pipeline.team_performance().unwrap();

    assert!(report.summary.starts_with("rows: 4\n"));
    assert!(report.summary.contains("employee_name: count=4 unique=2"));
    assert_eq!(report.commentary, NOT_CONFIGURED_MESSAGE);
}
