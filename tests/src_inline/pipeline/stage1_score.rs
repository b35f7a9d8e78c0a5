use std::cell::RefCell;

use super::*;
use crate::model::booster::TreeEnsemble;
use crate::model::fixtures::TINY_MODEL_JSON;

struct RecordingClassifier {
    output: f64,
    n_features: usize,
    rows: RefCell<Vec<Vec<f64>>>,
}

impl RecordingClassifier {
    fn new(output: f64) -> Self {
        Self {
            output,
            n_features: 5,
            rows: RefCell::new(Vec::new()),
        }
    }
}

impl Classifier for RecordingClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, row: &[f64]) -> Result<f64, InferenceError> {
        self.rows.borrow_mut().push(row.to_vec());
        Ok(self.output)
    }
}

#[test]
fn test_scorer_passes_model_column_order() {
    let stub = RecordingClassifier::new(0.42);
    let scorer = RiskScorer::new(&stub);
    let fv = FeatureVector::new(3, 1, 0.25, 512.0, 2).unwrap();
    let p = scorer.score(&fv).unwrap();
    assert_eq!(p, 0.42);
    // [N, ECOG_PS, ALP, T, PSA_density]
    assert_eq!(*stub.rows.borrow(), vec![vec![1.0, 2.0, 512.0, 3.0, 0.25]]);
}

#[test]
fn test_scorer_rejects_feature_count_mismatch() {
    let mut stub = RecordingClassifier::new(0.5);
    stub.n_features = 4;
    let scorer = RiskScorer::new(&stub);
    let fv = FeatureVector::new(3, 1, 0.1, 100.0, 1).unwrap();
    let err = scorer.score(&fv).unwrap_err();
    assert_eq!(
        err,
        InferenceError::FeatureCount {
            expected: 4,
            got: 5
        }
    );
    assert!(stub.rows.borrow().is_empty());
}

#[test]
fn test_scorer_rejects_invalid_probability() {
    for bogus in [1.2, -0.1, f64::NAN, f64::INFINITY] {
        let stub = RecordingClassifier::new(bogus);
        let scorer = RiskScorer::new(&stub);
        let fv = FeatureVector::new(3, 1, 0.1, 100.0, 1).unwrap();
        let err = scorer.score(&fv).unwrap_err();
        assert!(matches!(err, InferenceError::ProbabilityOutOfRange(_)));
    }
}

#[test]
fn test_scorer_accepts_probability_bounds() {
    for p in [0.0, 1.0] {
        let scorer = RiskScorer::new(RecordingClassifier::new(p));
        let fv = FeatureVector::new(2, 0, 0.0, 0.0, 0).unwrap();
        assert_eq!(scorer.score(&fv).unwrap(), p);
    }
}

#[test]
fn test_scorer_is_deterministic() {
    let model = TreeEnsemble::from_json_slice(TINY_MODEL_JSON.as_bytes()).unwrap();
    let scorer = RiskScorer::new(model);
    let fv = FeatureVector::new(4, 1, 0.3, 200.0, 3).unwrap();
    let first = scorer.score(&fv).unwrap();
    let second = scorer.score(&fv).unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn test_scorer_with_tree_ensemble_stays_in_unit_interval() {
    let model = TreeEnsemble::from_json_slice(TINY_MODEL_JSON.as_bytes()).unwrap();
    let scorer = RiskScorer::new(model);
    for t in 2..=4i64 {
        for n in 0..=1i64 {
            for ecog in 0..=4i64 {
                for &(psa, alp) in &[(0.0, 0.0), (0.15, 130.0), (50.0, 1100.0)] {
                    let fv = FeatureVector::new(t, n, psa, alp, ecog).unwrap();
                    let p = scorer.score(&fv).unwrap();
                    assert!((0.0..=1.0).contains(&p));
                }
            }
        }
    }
}
