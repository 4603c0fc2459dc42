use crate::report::SummaryReport;
use anyhow::Result;

pub fn generate_json_report(report: &SummaryReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
