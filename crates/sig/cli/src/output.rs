//! Output formatting

use serde::Serialize;
use sig_reducer::{ReductionOutput, ReductionReport};
use sig_types::SystemId;

use crate::error::CliResult;

/// Outcome of one system, as printed.
#[derive(Debug, Serialize)]
pub struct SystemResult {
    pub system: SystemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReductionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<ReductionOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Print all results as one JSON document.
pub fn print_json(results: &[SystemResult]) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(results)?);
    Ok(())
}

/// Print a human-readable summary.
pub fn print_text(results: &[SystemResult]) {
    for result in results {
        println!("{}", render_text(result));
    }
}

fn render_text(result: &SystemResult) -> String {
    let mut lines = Vec::new();
    match (&result.report, &result.output, &result.error) {
        (Some(report), Some(output), _) => {
            lines.push(format!(
                "{}: {} active, {} removed, {} abnormal ({} rounds, {} exclusions, {} ties)",
                result.system,
                output.active.len(),
                report.removed.len(),
                report.abnormal.len(),
                report.rounds,
                report.exclusions_added,
                report.ties_broken,
            ));
            for inter in &output.active {
                lines.push(format!(
                    "  {} {:<16} grade {} -> {}{}",
                    inter.id,
                    inter.shape.to_string(),
                    inter.grade,
                    inter.contextual_grade,
                    if inter.abnormal { "  [abnormal]" } else { "" }
                ));
            }
        }
        (_, _, Some(error)) => lines.push(format!("{}: failed: {}", result.system, error)),
        _ => lines.push(format!("{}: no result", result.system)),
    }
    lines.join("\n")
}
