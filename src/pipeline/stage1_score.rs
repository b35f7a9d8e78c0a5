use serde::Serialize;

use crate::input::patient::FeatureVector;
use crate::model::categories::RiskCategory;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("feature row has {got} values, classifier expects {expected}")]
    FeatureCount { expected: usize, got: usize },
    #[error("classifier returned probability {0} outside [0, 1]")]
    ProbabilityOutOfRange(f64),
}

/// Pre-trained binary classifier. `row` is in the classifier's column order;
/// the result is the probability of the positive class.
pub trait Classifier {
    fn n_features(&self) -> usize;
    fn predict_proba(&self, row: &[f64]) -> Result<f64, InferenceError>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn n_features(&self) -> usize {
        (**self).n_features()
    }

    fn predict_proba(&self, row: &[f64]) -> Result<f64, InferenceError> {
        (**self).predict_proba(row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub probability: f64,
    pub category: RiskCategory,
}

#[derive(Debug, Clone)]
pub struct RiskScorer<C> {
    classifier: C,
}

impl<C: Classifier> RiskScorer<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn score(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let row = features.to_model_row();
        let expected = self.classifier.n_features();
        if row.len() != expected {
            return Err(InferenceError::FeatureCount {
                expected,
                got: row.len(),
            });
        }
        let probability = self.classifier.predict_proba(&row)?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(InferenceError::ProbabilityOutOfRange(probability));
        }
        tracing::debug!(?row, probability, "scored feature vector");
        Ok(probability)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_score.rs"]
mod tests;
