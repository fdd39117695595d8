//! Prompt builders for the three coaching views. Each prompt embeds a
//! formatted summary verbatim, so the formatter's output layout is part of
//! the prompt contract.

use crate::schema::Granularity;

/// Coaching prompt for a single representative's latest record.
pub fn individual_prompt(record_text: &str) -> String {
    format!(
        "ROLE: Senior Sales Coach\n\
         TASK: Analyze sales representative performance and provide:\n\
         - 2 key strengths\n\
         - 2 critical weaknesses\n\
         - 2 actionable suggestions\n\
         - 1 quick win opportunity\n\
         \n\
         SALES DATA:\n\
         {}\n\
         \n\
         RESPONSE FORMAT:\n\
         ### Strengths\n\
         [bullet points]\n\
         \n\
         ### Weaknesses\n\
         [bullet points]\n\
         \n\
         ### Actionable Suggestions\n\
         [numbered list]\n\
         \n\
         ### Quick Win\n\
         [one short, concrete win]",
        record_text.trim_end()
    )
}

/// Team-wide prompt over the descriptive statistics summary.
pub fn team_prompt(summary_text: &str) -> String {
    format!(
        "ROLE: VP Sales\n\
         TASK: Provide a concise performance summary for the sales team, including:\n\
         - 3 top observations\n\
         - 2 risks\n\
         - 3 recommendations\n\
         \n\
         TEAM SUMMARY (stats or aggregates):\n\
         {}\n\
         \n\
         RESPONSE FORMAT:\n\
         ### Observations\n\
         [bulleted]\n\
         \n\
         ### Risks\n\
         [bulleted]\n\
         \n\
         ### Recommendations\n\
         [numbered]",
        summary_text.trim_end()
    )
}

/// Trend-analysis prompt over a rendered aggregate table.
pub fn trends_prompt(table_text: &str, granularity: Granularity) -> String {
    format!(
        "ROLE: Sales Operations Analyst\n\
         TASK: Analyze historical sales trends and forecast the next period. Keep it crisp.\n\
         \n\
         TRENDS TABLE (grouped by {}):\n\
         {}\n\
         \n\
         RESPONSE FORMAT:\n\
         ### Trend Summary\n\
         [2-3 bullets on key movements]\n\
         \n\
         ### Forecast\n\
         [next-period prediction with a short justification]\n\
         \n\
         ### Growth Opportunities\n\
         [2 short bullets]",
        granularity.as_str(),
        table_text.trim_end()
    )
}
