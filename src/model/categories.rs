use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskCategory {
    Low,
    Intermediate,
    High,
}

impl RiskCategory {
    pub fn name(self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Intermediate => "Intermediate",
            RiskCategory::High => "High",
        }
    }

    pub fn consideration(self) -> &'static str {
        match self {
            RiskCategory::High => "Consider advanced imaging and multidisciplinary evaluation",
            RiskCategory::Intermediate => "Standard treatment protocols",
            RiskCategory::Low => "Active surveillance may be appropriate",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Highest category first; every category is listed exactly once.
pub fn category_order() -> &'static [RiskCategory] {
    &[
        RiskCategory::High,
        RiskCategory::Intermediate,
        RiskCategory::Low,
    ]
}
