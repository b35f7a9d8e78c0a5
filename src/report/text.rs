use crate::pipeline::stage3_report::RiskReport;
use crate::report::{format_percent, format_score, score_bar};

const GUIDELINES: [&str; 3] = [
    "High risk: Bone scan + pelvic MRI recommended",
    "NCCN risk stratification applies",
    "Consider germline testing for high-risk patients",
];

const DISCLAIMER: [&str; 3] = [
    "For clinical decision support only",
    "Requires validation with clinical assessment",
    "Not for diagnostic purposes",
];

pub fn render_report_text(report: &RiskReport) -> String {
    let mut out = String::new();

    out.push_str("Bone Metastasis Risk Calculator\n");
    out.push_str("===============================\n\n");
    out.push_str(
        "Predicts the risk of bone metastasis in newly diagnosed prostate cancer patients.\n\n",
    );

    out.push_str("1. Patient parameters\n");
    let inputs = &report.inputs;
    out.push_str(&format!(
        "T stage: T{} ({})\n",
        inputs.t_stage(),
        t_stage_legend(inputs.t_stage())
    ));
    out.push_str(&format!(
        "N stage: N{} ({})\n",
        inputs.n_stage(),
        n_stage_legend(inputs.n_stage())
    ));
    out.push_str(&format!("PSA density: {} ng/mL/mL\n", inputs.psa_density()));
    out.push_str(&format!("ALP: {} U/L\n", inputs.alp()));
    out.push_str(&format!("ECOG PS: {}\n\n", inputs.ecog_ps()));

    out.push_str("2. Risk assessment\n");
    out.push_str(&format!(
        "Probability: {}\n",
        format_percent(report.assessment.probability)
    ));
    out.push_str(&format!("Risk category: {}\n", report.assessment.category));
    out.push_str(&format!(
        "Clinical consideration: {}\n\n",
        report.assessment.category.consideration()
    ));

    out.push_str("3. Risk factors\n");
    let d = &report.descriptions;
    out.push_str(&format!("- T stage: {} impact\n", d.t_stage));
    out.push_str(&format!("- N status: {} nodes\n", d.n_status));
    out.push_str(&format!("- PSA density: {}\n", d.psa_density));
    out.push_str(&format!("- ALP: {}\n", d.alp));
    out.push_str(&format!("- ECOG PS: {}\n\n", d.ecog_ps));

    out.push_str("Relative factor levels against clinical reference thresholds\n");
    out.push_str("(visual comparison only, not model feature weights):\n");
    for c in &report.contributions.factors {
        out.push_str(&format!(
            "{:<12} {} {}\n",
            c.factor.name(),
            score_bar(c.score, 20),
            format_score(c.score)
        ));
    }
    out.push('\n');

    out.push_str("Clinical guidelines:\n");
    for line in GUIDELINES {
        out.push_str(&format!("- {line}\n"));
    }
    out.push('\n');

    out.push_str("Disclaimer:\n");
    for (i, line) in DISCLAIMER.iter().enumerate() {
        out.push_str(&format!("{}. {line}\n", i + 1));
    }

    out
}

fn t_stage_legend(t: u8) -> &'static str {
    match t {
        2 => "organ-confined",
        3 => "extracapsular extension",
        4 => "invasion of adjacent structures",
        _ => "unstaged",
    }
}

fn n_stage_legend(n: u8) -> &'static str {
    if n == 0 {
        "no regional lymph node metastasis"
    } else {
        "regional lymph node metastasis"
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
