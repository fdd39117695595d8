use anyhow::{Context, Result};
use sales_insights::{Dataset, SalesInsights};

// Usage: rep_lookup <csv-path> <rep-id>
//
// Loads a sales performance CSV and prints the canonical record for one
// representative. With the `gemini` feature enabled and GOOGLE_API_KEY set,
// also prints model commentary.
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args.next().context("missing csv path argument")?;
    let rep_id = args.next().context("missing rep id argument")?;

    let dataset = Dataset::load_or_empty(&path);
    let pipeline = build_pipeline(dataset);

    let report = pipeline.rep_performance(&rep_id)?;
    println!("{}", report.summary);
    println!("{}", report.commentary);

    Ok(())
}

#[cfg(feature = "gemini")]
fn build_pipeline(dataset: Dataset) -> SalesInsights {
    use sales_insights::GeminiClient;

    let pipeline = SalesInsights::new(dataset);
    match std::env::var("GOOGLE_API_KEY") {
        Ok(key) if !key.is_empty() => {
            pipeline.with_generator(Box::new(GeminiClient::new(key)))
        }
        _ => pipeline,
    }
}

#[cfg(not(feature = "gemini"))]
fn build_pipeline(dataset: Dataset) -> SalesInsights {
    SalesInsights::new(dataset)
}
