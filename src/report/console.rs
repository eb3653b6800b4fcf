use crate::report::report_model::BugReport;

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format a bug report for terminal output.
///
/// Produces output like:
/// ```text
/// === Bug Report: Wikimedia Commons ===
///
/// <report body>
///
/// === Step Trace (2 references) ===
/// ✓ T1 -> 9f2c…
/// ✗ T9 (not in graph)
///
/// === Grounded: 1 of 2 references resolved ===
/// ```
pub fn format_console_report(report: &BugReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Bug Report: {} ===\n\n", report.app));
    out.push_str(report.body.trim_end());
    out.push_str("\n\n");

    out.push_str(&format!(
        "=== Step Trace ({} references) ===\n",
        report.steps.len()
    ));

    for step in &report.steps {
        match &step.hash {
            Some(hash) => out.push_str(&format!("\u{2713} {} -> {}\n", step.transition, hash)),
            None => out.push_str(&format!("\u{2717} {} (not in graph)\n", step.transition)),
        }
    }

    let resolved = report.steps.len() - report.unresolved().count();
    out.push_str(&format!(
        "\n=== Grounded: {} of {} references resolved ({} {}, graph {}) ===\n",
        resolved,
        report.steps.len(),
        report.backend,
        report.model,
        short_fingerprint(&report.graph_fingerprint)
    ));

    out
}

fn short_fingerprint(fingerprint: &str) -> &str {
    fingerprint.get(..12).unwrap_or(fingerprint)
}
