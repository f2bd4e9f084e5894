use super::AnalysisReport;
use crate::errors::Result;
use crate::refactoring::to_text_form;

/// Text form of every result, each under a `# NAME` header.
///
/// Failed runs get a header carrying the error and no lines.
pub fn render_plain(report: &AnalysisReport) -> Result<String> {
    let mut out = String::new();
    for result in &report.results {
        match result.error() {
            Some(error) => out.push_str(&format!("# {} failed: {}\n", result.algorithm_name(), error)),
            None => {
                out.push_str(&format!("# {}\n", result.algorithm_name()));
                out.push_str(&to_text_form(result.refactorings())?);
            }
        }
    }
    if let Some(combined) = &report.combined {
        out.push_str("# combined\n");
        out.push_str(&to_text_form(combined)?);
    }
    Ok(out)
}
