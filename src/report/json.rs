use crate::pipeline::stage3_report::RiskReport;

pub fn render_assessment_json(report: &RiskReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
