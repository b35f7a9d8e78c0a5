use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "kira-bonemet",
    version,
    about = "Bone metastasis risk calculator for newly diagnosed prostate cancer"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score one patient and print the risk report
    Assess(AssessArgs),
    /// Load the model artifact and print a summary
    ValidateModel(ModelArgs),
}

#[derive(Debug, Args)]
pub struct ModelArgs {
    #[arg(
        long,
        help = "Model artifact (default: xgboost_model.json next to the executable)"
    )]
    pub model: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct AssessArgs {
    #[arg(
        long,
        allow_negative_numbers = true,
        default_value_t = 3,
        help = "T stage: 2 organ-confined, 3 extracapsular extension, 4 invasion of adjacent structures"
    )]
    pub t_stage: i64,

    #[arg(
        long,
        allow_negative_numbers = true,
        default_value_t = 1,
        help = "N stage: 0 no regional lymph node metastasis, 1 regional lymph node metastasis"
    )]
    pub n_stage: i64,

    #[arg(
        long,
        allow_negative_numbers = true,
        default_value_t = 0.1,
        help = "PSA density (ng/mL/mL): serum PSA divided by prostate volume"
    )]
    pub psa_density: f64,

    #[arg(
        long,
        allow_negative_numbers = true,
        default_value_t = 100.0,
        help = "Alkaline phosphatase (U/L)"
    )]
    pub alp: f64,

    #[arg(
        long,
        allow_negative_numbers = true,
        default_value_t = 1,
        help = "ECOG PS: 0 asymptomatic, 1 symptomatic but ambulatory, 2 <50% in bed, 3 >50% in bed, 4 bedbound"
    )]
    pub ecog_ps: i64,

    #[command(flatten)]
    pub model: ModelArgs,

    #[arg(long, help = "Also write report.txt and assessment.json to this directory")]
    pub out: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Print JSON instead of the text report")]
    pub json: bool,
}
