use super::AnalysisReport;
use crate::errors::Result;

pub fn render_json(report: &AnalysisReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}
