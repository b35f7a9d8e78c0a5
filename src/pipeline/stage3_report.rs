use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::input::patient::{FeatureVector, RangeError};
use crate::model::thresholds::ThresholdProfile;
use crate::pipeline::stage1_score::{Classifier, InferenceError, RiskAssessment, RiskScorer};
use crate::pipeline::stage2_present::{
    ContributionProfile, FactorDescriptions, assess, contribution_profile, describe_factors,
};
use crate::report::json::render_assessment_json;
use crate::report::text::render_report_text;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    pub tool: ToolMeta,
    pub inputs: FeatureVector,
    pub assessment: RiskAssessment,
    pub contributions: ContributionProfile,
    pub descriptions: FactorDescriptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
    pub model_path: String,
}

/// One full scoring pass. Either every part of the report is produced or
/// the first failure is returned.
pub fn build_report<C: Classifier>(
    scorer: &RiskScorer<C>,
    features: &FeatureVector,
    thresholds: &ThresholdProfile,
    tool: ToolMeta,
) -> Result<RiskReport, ReportError> {
    let probability = scorer.score(features)?;
    let assessment = assess(probability, thresholds);
    let contributions = contribution_profile(features, thresholds);
    let descriptions = describe_factors(features, thresholds)?;
    Ok(RiskReport {
        tool,
        inputs: *features,
        assessment,
        contributions,
        descriptions,
    })
}

pub fn write_reports(report: &RiskReport, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    let report_path = out_dir.join("report.txt");
    write_text(&report_path, &render_report_text(report))?;

    let json_path = out_dir.join("assessment.json");
    write_text(&json_path, &render_assessment_json(report)?)?;

    tracing::info!(out_dir = %out_dir.display(), "reports written");
    Ok(())
}

fn write_text(path: &Path, content: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        w.write_all(b"\n")?;
    }
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_report.rs"]
mod tests;
