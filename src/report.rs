use std::fmt::Write;

use crate::classify;
use crate::models::HistorySummary;

/// Render a markdown wellness report from an aggregated history. `None`
/// produces an explicit empty-history report rather than an error.
pub fn build_report(user_name: &str, summary: Option<&HistorySummary>) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Wellness History for {user_name}");
    let _ = writeln!(output);

    let Some(summary) = summary else {
        let _ = writeln!(output, "No assessments recorded yet.");
        return output;
    };

    let latest = classify::classify(summary.latest);

    let _ = writeln!(output, "## Summary");
    let _ = writeln!(
        output,
        "- Latest stress level: {}% ({})",
        summary.latest, latest.category
    );
    let _ = writeln!(output, "- Average stress: {}%", summary.average);
    let _ = writeln!(output, "- Highest stress: {}%", summary.maximum);
    let _ = writeln!(output, "- Lowest stress: {}%", summary.minimum);
    let _ = writeln!(output, "- Assessments taken: {}", summary.count);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Guidance");
    for recommendation in latest.recommendations {
        let _ = writeln!(output, "- {recommendation}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Stress Over Time");
    for point in &summary.series {
        let _ = writeln!(
            output,
            "- {}: {}%",
            point.recorded_at.format("%Y-%m-%d %H:%M"),
            point.stress_level
        );
    }

    output
}
