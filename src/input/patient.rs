//! Patient feature vector.
//!
//! Fields are held by name. The classifier's column order exists in exactly
//! one place, [`MODEL_COLUMNS`] and [`FeatureVector::to_model_row`], which
//! must change together.

use serde::Serialize;

/// Column order the classifier was trained on.
pub const MODEL_COLUMNS: [&str; 5] = ["N", "ECOG_PS", "ALP", "T", "PSA_density"];

pub const T_STAGE_RANGE: (u8, u8) = (2, 4);
pub const N_STAGE_RANGE: (u8, u8) = (0, 1);
pub const PSA_DENSITY_RANGE: (f64, f64) = (0.0, 50.0);
pub const ALP_RANGE: (f64, f64) = (0.0, 1100.0);
pub const ECOG_PS_RANGE: (u8, u8) = (0, 4);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} = {value} is outside [{min}, {max}]")]
pub struct RangeError {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    #[serde(rename = "T")]
    t_stage: u8,
    #[serde(rename = "N")]
    n_stage: u8,
    #[serde(rename = "PSA_density")]
    psa_density: f64,
    #[serde(rename = "ALP")]
    alp: f64,
    #[serde(rename = "ECOG_PS")]
    ecog_ps: u8,
}

impl FeatureVector {
    /// Rejects out-of-range (and NaN) values instead of clamping them.
    /// Integer fields are taken wide so any raw reading reaches the range check.
    pub fn new(
        t_stage: i64,
        n_stage: i64,
        psa_density: f64,
        alp: f64,
        ecog_ps: i64,
    ) -> Result<Self, RangeError> {
        let t_stage = check_int("T", t_stage, T_STAGE_RANGE)?;
        let n_stage = check_int("N", n_stage, N_STAGE_RANGE)?;
        check_real("PSA_density", psa_density, PSA_DENSITY_RANGE)?;
        check_real("ALP", alp, ALP_RANGE)?;
        let ecog_ps = check_int("ECOG_PS", ecog_ps, ECOG_PS_RANGE)?;
        Ok(Self {
            t_stage,
            n_stage,
            psa_density,
            alp,
            ecog_ps,
        })
    }

    pub fn t_stage(&self) -> u8 {
        self.t_stage
    }

    pub fn n_stage(&self) -> u8 {
        self.n_stage
    }

    pub fn psa_density(&self) -> f64 {
        self.psa_density
    }

    pub fn alp(&self) -> f64 {
        self.alp
    }

    pub fn ecog_ps(&self) -> u8 {
        self.ecog_ps
    }

    /// Row in [`MODEL_COLUMNS`] order.
    pub fn to_model_row(&self) -> [f64; 5] {
        [
            self.n_stage as f64,
            self.ecog_ps as f64,
            self.alp,
            self.t_stage as f64,
            self.psa_density,
        ]
    }
}

fn check_int(field: &'static str, value: i64, (min, max): (u8, u8)) -> Result<u8, RangeError> {
    if value < min as i64 || value > max as i64 {
        return Err(RangeError {
            field,
            value: value as f64,
            min: min as f64,
            max: max as f64,
        });
    }
    Ok(value as u8)
}

fn check_real(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), RangeError> {
    if !(min..=max).contains(&value) {
        return Err(RangeError {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/patient.rs"]
mod tests;
