use anyhow::Result;
use sales_insights::{Dataset, Granularity, Row, SalesInsights, Value};

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn main() -> Result<()> {
    let columns = vec![
        "employee_id".to_string(),
        "employee_name".to_string(),
        "dated".to_string(),
        "lead_taken".to_string(),
        "tours_booked".to_string(),
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
            Value::Number(1000.0),
            Value::Number(500.0),
        ]),
        Row::new(vec![
            text("E42"),
            text("Jane Doe"),
            text("2024-02-10"),
            Value::Number(12.0),
            Value::Number(3.0),
            Value::Number(1500.0),
            Value::Number(250.0),
        ]),
        Row::new(vec![
            text("E7"),
            text("John Roe"),
            text("2024-02-20"),
            Value::Number(8.0),
            Value::Number(5.0),
            Value::Number(700.0),
            Value::Number(300.0),
        ]),
    ];

    let pipeline = SalesInsights::new(Dataset::from_rows(columns, rows));

    for granularity in [Granularity::Weekly, Granularity::Monthly] {
        let report = pipeline.performance_trends(granularity)?;
        println!("=== {} trends ===", granularity.as_str());
        println!("{}", report.summary);
        println!("{}\n", report.commentary);
    }

    Ok(())
}
