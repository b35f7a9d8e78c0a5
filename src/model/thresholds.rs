//! Clinical policy constants: risk category cut-offs and the reference
//! thresholds used for factor descriptions and contribution scores.

/// Probability at or above which a patient is categorised as high risk.
pub const HIGH_RISK_MIN: f64 = 0.6;
/// Probability at or above which a patient is categorised as intermediate risk.
pub const INTERMEDIATE_RISK_MIN: f64 = 0.3;

/// PSA density (ng/mL/mL) above which the value is clinically significant.
pub const PSA_DENSITY_SIGNIFICANT: f64 = 0.15;
/// ALP (U/L) above which the value is a clinically significant elevation.
pub const ALP_ELEVATED: f64 = 130.0;

/// T stages above this are reported as significant.
pub const T_STAGE_LIMITED_MAX: u8 = 2;

pub const T_STAGE_SCALE: f64 = 4.0;
// N is 0 or 1 on input but contributions are scaled against N3.
pub const N_STATUS_SCALE: f64 = 3.0;
pub const ECOG_PS_SCALE: f64 = 4.0;

#[derive(Debug, Clone)]
pub struct ThresholdProfile {
    pub high_risk_min: f64,
    pub intermediate_risk_min: f64,
    pub psa_density_significant: f64,
    pub alp_elevated: f64,
    pub t_stage_limited_max: u8,
    pub t_stage_scale: f64,
    pub n_status_scale: f64,
    pub ecog_ps_scale: f64,
}

impl ThresholdProfile {
    pub fn default_v1() -> Self {
        Self {
            high_risk_min: HIGH_RISK_MIN,
            intermediate_risk_min: INTERMEDIATE_RISK_MIN,
            psa_density_significant: PSA_DENSITY_SIGNIFICANT,
            alp_elevated: ALP_ELEVATED,
            t_stage_limited_max: T_STAGE_LIMITED_MAX,
            t_stage_scale: T_STAGE_SCALE,
            n_status_scale: N_STATUS_SCALE,
            ecog_ps_scale: ECOG_PS_SCALE,
        }
    }
}
