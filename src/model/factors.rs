use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Factor {
    #[serde(rename = "T Stage")]
    TStage,
    #[serde(rename = "N Status")]
    NStatus,
    #[serde(rename = "PSA Density")]
    PsaDensity,
    #[serde(rename = "ALP")]
    Alp,
    #[serde(rename = "ECOG PS")]
    EcogPs,
}

impl Factor {
    pub fn name(self) -> &'static str {
        match self {
            Factor::TStage => "T Stage",
            Factor::NStatus => "N Status",
            Factor::PsaDensity => "PSA Density",
            Factor::Alp => "ALP",
            Factor::EcogPs => "ECOG PS",
        }
    }
}

/// Display order of the contribution profile.
pub fn factor_order() -> &'static [Factor] {
    &[
        Factor::TStage,
        Factor::NStatus,
        Factor::PsaDensity,
        Factor::Alp,
        Factor::EcogPs,
    ]
}

pub const ECOG_PS_LABELS: [&str; 5] = [
    "Asymptomatic (0)",
    "Symptomatic but ambulatory (1)",
    "<50% in bed (2)",
    ">50% in bed (3)",
    "Bedbound (4)",
];

pub fn clip01(x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else {
        x
    }
}
