use super::*;
use crate::model::fixtures::{TINY_MODEL_JSON, make_temp_dir, write_file};

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["kira-bonemet"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn assess_args(args: &[&str]) -> AssessArgs {
    match parse(args).command {
        Commands::Assess(a) => a,
        other => panic!("unexpected command {other:?}"),
    }
}

fn write_tiny_model() -> PathBuf {
    let dir = make_temp_dir("main");
    let path = dir.join("xgboost_model.json");
    write_file(&path, TINY_MODEL_JSON.as_bytes());
    path
}

#[test]
fn test_parse_assess_defaults() {
    let args = assess_args(&["assess"]);
    assert_eq!(args.t_stage, 3);
    assert_eq!(args.n_stage, 1);
    assert_eq!(args.psa_density, 0.1);
    assert_eq!(args.alp, 100.0);
    assert_eq!(args.ecog_ps, 1);
    assert!(args.model.model.is_none());
    assert!(args.out.is_none());
    assert!(!args.json);
}

#[test]
fn test_parse_assess_values() {
    let args = assess_args(&[
        "assess",
        "--t-stage",
        "4",
        "--n-stage",
        "0",
        "--psa-density",
        "0.3",
        "--alp",
        "200.5",
        "--ecog-ps",
        "3",
        "--model",
        "m.json",
        "--json",
    ]);
    assert_eq!(args.t_stage, 4);
    assert_eq!(args.n_stage, 0);
    assert_eq!(args.psa_density, 0.3);
    assert_eq!(args.alp, 200.5);
    assert_eq!(args.ecog_ps, 3);
    assert_eq!(args.model.model, Some(PathBuf::from("m.json")));
    assert!(args.json);
}

#[test]
fn test_parse_validate_model() {
    match parse(&["validate-model", "--model", "m.json"]).command {
        Commands::ValidateModel(a) => assert_eq!(a.model, Some(PathBuf::from("m.json"))),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_patient_from_args_rejects_out_of_range() {
    let args = assess_args(&["assess", "--ecog-ps", "5"]);
    let err = patient_from_args(&args).unwrap_err();
    assert_eq!(err.field, "ECOG_PS");
}

#[test]
fn test_missing_model_fails_before_scoring() {
    let dir = make_temp_dir("main_missing");
    let model = dir.join("xgboost_model.json");
    let model = model.to_str().unwrap();
    // out-of-range input is never reached: the load failure comes first
    let args = assess_args(&["assess", "--ecog-ps", "5", "--model", model]);
    let err = run_assess(&args).unwrap_err();
    assert!(matches!(err, AppError::Load(LoadError::Missing(_))), "{err}");
}

#[test]
fn test_assess_with_model_writes_reports() {
    let model = write_tiny_model();
    let out = make_temp_dir("main_out");
    let args = assess_args(&[
        "assess",
        "--model",
        model.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--json",
    ]);
    run_assess(&args).unwrap();
    assert!(out.join("report.txt").is_file());
    assert!(out.join("assessment.json").is_file());
}

#[test]
fn test_assess_rejects_invalid_input_after_load() {
    let model = write_tiny_model();
    let args = assess_args(&["assess", "--t-stage", "1", "--model", model.to_str().unwrap()]);
    let err = run_assess(&args).unwrap_err();
    assert!(matches!(err, AppError::Range(_)), "{err}");
}

#[test]
fn test_validate_model_reports_load_failure() {
    let dir = make_temp_dir("main_validate");
    let path = dir.join("xgboost_model.json");
    write_file(&path, b"not json");
    let args = ModelArgs { model: Some(path) };
    let err = run_validate(&args).unwrap_err();
    assert!(matches!(err, AppError::Load(LoadError::Parse(_))), "{err}");
    let ok = ModelArgs {
        model: Some(write_tiny_model()),
    };
    run_validate(&ok).unwrap();
}

#[test]
fn test_parse_accepts_integers_outside_clinical_range() {
    let args = assess_args(&["assess", "--ecog-ps", "-1", "--t-stage", "300"]);
    assert_eq!(args.ecog_ps, -1);
    assert_eq!(args.t_stage, 300);
}

#[test]
fn test_assess_reports_negative_and_wide_integers_as_range_errors() {
    let model = write_tiny_model();
    let model = model.to_str().unwrap();

    let args = assess_args(&["assess", "--ecog-ps", "-1", "--model", model]);
    match run_assess(&args).unwrap_err() {
        AppError::Range(err) => assert_eq!(err.field, "ECOG_PS"),
        other => panic!("unexpected error {other}"),
    }

    let args = assess_args(&["assess", "--t-stage", "300", "--model", model]);
    match run_assess(&args).unwrap_err() {
        AppError::Range(err) => assert_eq!(err.field, "T"),
        other => panic!("unexpected error {other}"),
    }
}
