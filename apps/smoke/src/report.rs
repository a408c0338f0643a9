//! Renders a `RunReport` for humans or machines. Formatting lives here so
//! the runner stays free of presentation concerns.

use crate::runner::RunReport;

const SEPARATOR_WIDTH: usize = 50;

/// Human-readable console report.
pub fn render(report: &RunReport) -> String {
    let heavy = "=".repeat(SEPARATOR_WIDTH);
    let light = "-".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();

    out.push_str(&heavy);
    out.push('\n');
    out.push_str("CV Optimizer smoke test\n");
    out.push_str(&heavy);
    out.push('\n');

    for (i, result) in report.results.iter().enumerate() {
        let symbol = if result.success { "✅" } else { "❌" };
        out.push_str(&format!(
            "{}. {symbol} {} ({}ms)\n",
            i + 1,
            result.name,
            result.elapsed_ms
        ));
        out.push_str(&format!("   {}\n", result.message));
        if let Some(path) = &result.artifact {
            out.push_str(&format!("   saved {}\n", path.display()));
        }
    }
    for name in &report.skipped {
        out.push_str(&format!("   skipped: {name}\n"));
    }

    out.push_str(&light);
    out.push('\n');

    let passed = report.results.iter().filter(|r| r.success).count();
    let total = report.results.len() + report.skipped.len();
    out.push_str(&format!("Passed {passed}/{total} probes"));
    if !report.skipped.is_empty() {
        out.push_str(&format!(" ({} skipped)", report.skipped.len()));
    }
    out.push('\n');

    if report.overall_success {
        out.push_str("✅ All smoke tests passed\n");
    } else {
        out.push_str("❌ Smoke test failed\n");
    }

    out
}

/// Machine-readable report for scripting.
pub fn render_json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
