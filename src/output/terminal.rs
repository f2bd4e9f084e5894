use super::AnalysisReport;
use crate::algorithm::AlgorithmResult;
use crate::refactoring::Refactoring;
use colored::*;
use std::fmt::Write;

const STRONG_ACCURACY: f64 = 0.5;

pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    for result in &report.results {
        write_result(&mut out, result);
        out.push('\n');
    }
    if let Some(combined) = &report.combined {
        let _ = writeln!(
            out,
            "{}",
            format!("Agreed by all successful algorithms: {}", combined.len()).bold()
        );
        for refactoring in combined {
            write_refactoring(&mut out, refactoring);
        }
    }
    out
}

fn write_result(out: &mut String, result: &AlgorithmResult) {
    let _ = writeln!(
        out,
        "{}",
        format!("Results of {} running", result.algorithm_name()).bright_white().bold()
    );
    let _ = writeln!(out, "  Found {} refactorings", result.refactorings().len());
    let _ = writeln!(out, "  Execution time: {} ms", result.execution_time().as_millis());
    let _ = writeln!(out, "  Threads used: {}", result.threads_used());
    if let Some(error) = result.error() {
        let _ = writeln!(out, "  {}", format!("Failed: {}", error).red());
        return;
    }
    for refactoring in result.refactorings() {
        write_refactoring(out, refactoring);
    }
}

fn write_refactoring(out: &mut String, refactoring: &Refactoring) {
    let accuracy = format!("{:.3}", refactoring.accuracy());
    let accuracy = if refactoring.accuracy() >= STRONG_ACCURACY {
        accuracy.green()
    } else {
        accuracy.yellow()
    };
    let kind = if refactoring.is_field() { "field" } else { "method" };
    let _ = writeln!(
        out,
        "    {} {} {} -> {}",
        accuracy,
        kind.dimmed(),
        refactoring.source(),
        refactoring.target().cyan()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use std::time::Duration;

    #[test]
    fn test_text_report_lists_refactorings_and_failures() {
        colored::control::set_override(false);
        let report = AnalysisReport::new(
            vec![
                AlgorithmResult::success(
                    "ARI",
                    vec![Refactoring::new("p.A.m()", "p.B", 0.75, false)],
                    Duration::from_millis(4),
                    2,
                ),
                AlgorithmResult::failure("MRI", Error::Cancelled, Duration::ZERO, 2),
            ],
            0.0,
            true,
        );

        let text = render_text(&report);
        assert!(text.contains("Results of ARI running\n  Found 1 refactorings\n"));
        assert!(text.contains("    0.750 method p.A.m() -> p.B\n"));
        assert!(text.contains("  Failed: Operation cancelled\n"));
        assert!(text.contains("Agreed by all successful algorithms: 1\n"));
    }
}
