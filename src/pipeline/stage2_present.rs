//! Risk category and explanatory factor breakdown.
//!
//! Contribution scores compare each raw input with a fixed clinical
//! reference and are meant for relative visual comparison only. They are not
//! derived from the classifier and do not measure its feature weights.

use serde::Serialize;

use crate::input::patient::{ECOG_PS_RANGE, FeatureVector, RangeError};
use crate::model::categories::{RiskCategory, category_order};
use crate::model::factors::{ECOG_PS_LABELS, Factor, clip01, factor_order};
use crate::model::thresholds::ThresholdProfile;
use crate::pipeline::stage1_score::RiskAssessment;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorContribution {
    pub factor: Factor,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContributionProfile {
    pub factors: Vec<FactorContribution>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorDescriptions {
    pub t_stage: &'static str,
    pub n_status: &'static str,
    pub psa_density: &'static str,
    pub alp: &'static str,
    pub ecog_ps: &'static str,
}

/// `probability` must be a [`RiskScorer`](crate::pipeline::stage1_score::RiskScorer)
/// output, i.e. finite and within [0, 1].
pub fn categorize(probability: f64, thresholds: &ThresholdProfile) -> RiskCategory {
    debug_assert!(
        (0.0..=1.0).contains(&probability),
        "probability {probability} outside [0, 1]"
    );
    for &category in category_order() {
        if probability >= lower_bound(category, thresholds) {
            return category;
        }
    }
    RiskCategory::Low
}

fn lower_bound(category: RiskCategory, thresholds: &ThresholdProfile) -> f64 {
    match category {
        RiskCategory::High => thresholds.high_risk_min,
        RiskCategory::Intermediate => thresholds.intermediate_risk_min,
        RiskCategory::Low => f64::NEG_INFINITY,
    }
}

pub fn assess(probability: f64, thresholds: &ThresholdProfile) -> RiskAssessment {
    RiskAssessment {
        probability,
        category: categorize(probability, thresholds),
    }
}

pub fn contribution_profile(
    features: &FeatureVector,
    thresholds: &ThresholdProfile,
) -> ContributionProfile {
    let factors = factor_order()
        .iter()
        .map(|&factor| FactorContribution {
            factor,
            score: clip01(contribution_raw(factor, features, thresholds)),
        })
        .collect();
    ContributionProfile { factors }
}

fn contribution_raw(factor: Factor, features: &FeatureVector, t: &ThresholdProfile) -> f64 {
    match factor {
        Factor::TStage => features.t_stage() as f64 / t.t_stage_scale,
        Factor::NStatus => features.n_stage() as f64 / t.n_status_scale,
        Factor::PsaDensity => features.psa_density() / t.psa_density_significant,
        Factor::Alp => features.alp() / t.alp_elevated,
        Factor::EcogPs => features.ecog_ps() as f64 / t.ecog_ps_scale,
    }
}

pub fn ecog_label(ecog_ps: u8) -> Result<&'static str, RangeError> {
    ECOG_PS_LABELS
        .get(ecog_ps as usize)
        .copied()
        .ok_or(RangeError {
            field: "ECOG_PS",
            value: ecog_ps as f64,
            min: ECOG_PS_RANGE.0 as f64,
            max: ECOG_PS_RANGE.1 as f64,
        })
}

pub fn describe_factors(
    features: &FeatureVector,
    thresholds: &ThresholdProfile,
) -> Result<FactorDescriptions, RangeError> {
    Ok(FactorDescriptions {
        t_stage: if features.t_stage() > thresholds.t_stage_limited_max {
            "Significant"
        } else {
            "Limited"
        },
        n_status: if features.n_stage() > 0 {
            "Positive"
        } else {
            "Negative"
        },
        psa_density: elevated(features.psa_density() > thresholds.psa_density_significant),
        alp: elevated(features.alp() > thresholds.alp_elevated),
        ecog_ps: ecog_label(features.ecog_ps())?,
    })
}

fn elevated(above: bool) -> &'static str {
    if above { "Elevated" } else { "Normal" }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_present.rs"]
mod tests;
