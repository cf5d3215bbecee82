// learning-agent-rs/src/report.rs
// Markdown learning report for operator review.

use crate::model::CategoryStats;
use crate::LearningConfig;

/// Render the per-category statistics as a markdown report: a summary
/// table plus a next-steps section for categories not yet autonomous.
pub fn render(stats: &[CategoryStats], config: &LearningConfig) -> String {
    let mut report = String::from("# Learning Agent Report\n\n");

    report.push_str("## Action Category Statistics\n\n");
    report.push_str("| Category | Approved | Rejected | Autonomous | Confidence | Status |\n");
    report.push_str("|----------|----------|----------|------------|------------|--------|\n");

    for s in stats {
        let eligible = s.total_feedback() >= config.min_samples
            && s.confidence() >= config.autonomy_threshold;
        let status = if eligible { "AUTO" } else { "APPROVAL" };

        report.push_str(&format!(
            "| {} | {} | {} | {} | {:.1}% | {} |\n",
            s.category,
            s.approved_count,
            s.rejected_count,
            s.autonomous_count,
            s.confidence() * 100.0,
            status,
        ));
    }

    report.push_str("\n## Next Steps\n\n");
    for s in stats {
        let eligible = s.total_feedback() >= config.min_samples
            && s.confidence() >= config.autonomy_threshold;

        if eligible {
            report.push_str(&format!(
                "- **{}**: ready for autonomous execution (confidence: {:.1}%)\n",
                s.category,
                s.confidence() * 100.0,
            ));
        } else if s.total_feedback() > 0 {
            let needed = config.min_samples.saturating_sub(s.total_feedback());
            report.push_str(&format!(
                "- **{}**: confidence {:.1}% ({} more samples for autonomy)\n",
                s.category,
                s.confidence() * 100.0,
                needed,
            ));
        }
    }

    report
}
