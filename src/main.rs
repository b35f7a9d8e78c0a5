mod cli;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{AssessArgs, Cli, Commands, ModelArgs};
use crate::input::{FeatureVector, LoadError, RangeError, load_model, resolve_model_path};
use crate::model::booster::TreeEnsemble;
use crate::model::thresholds::ThresholdProfile;
use crate::pipeline::stage1_score::RiskScorer;
use crate::pipeline::stage3_report::{ReportError, ToolMeta, build_report, write_reports};
use crate::report::json::render_assessment_json;
use crate::report::text::render_report_text;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("failed to load model: {0}")]
    Load(#[from] LoadError),
    #[error("invalid patient parameters: {0}")]
    Range(#[from] RangeError),
    #[error("risk could not be calculated: {0}")]
    Report(#[from] ReportError),
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() {
    logging::init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Assess(args) => run_assess(&args),
        Commands::ValidateModel(args) => run_validate(&args),
    }
}

/// The model is loaded before any input is looked at; a missing or corrupt
/// artifact means no request is served.
fn startup(args: &ModelArgs) -> Result<(PathBuf, TreeEnsemble), AppError> {
    let path = resolve_model_path(args.model.as_deref())?;
    tracing::info!(path = %path.display(), "loading model artifact");
    let ensemble = load_model(&path)?;
    tracing::info!(
        trees = ensemble.n_trees(),
        base_score = ensemble.base_score(),
        objective = ensemble.objective(),
        "model ready"
    );
    Ok((path, ensemble))
}

fn run_assess(args: &AssessArgs) -> Result<(), AppError> {
    let (model_path, ensemble) = startup(&args.model)?;
    let features = patient_from_args(args)?;

    let scorer = RiskScorer::new(ensemble);
    let thresholds = ThresholdProfile::default_v1();
    let tool = ToolMeta {
        name: "kira-bonemet".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_path: model_path.display().to_string(),
    };
    let report = build_report(&scorer, &features, &thresholds, tool)?;
    tracing::info!(
        probability = report.assessment.probability,
        category = %report.assessment.category,
        "risk assessed"
    );

    if args.json {
        println!("{}", render_assessment_json(&report)?);
    } else {
        print!("{}", render_report_text(&report));
    }

    if let Some(out_dir) = &args.out {
        write_reports(&report, out_dir)?;
    }
    Ok(())
}

fn run_validate(args: &ModelArgs) -> Result<(), AppError> {
    let (path, ensemble) = startup(args)?;
    let n_nodes: usize = ensemble.trees().iter().map(|t| t.n_nodes()).sum();
    println!(
        "{}: {} trees, {} nodes, base_score={}, objective={}",
        path.display(),
        ensemble.n_trees(),
        n_nodes,
        ensemble.base_score(),
        ensemble.objective()
    );
    Ok(())
}

fn patient_from_args(args: &AssessArgs) -> Result<FeatureVector, RangeError> {
    FeatureVector::new(
        args.t_stage,
        args.n_stage,
        args.psa_density,
        args.alp,
        args.ecog_ps,
    )
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
