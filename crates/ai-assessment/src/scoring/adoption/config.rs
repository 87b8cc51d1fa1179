use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category key → weight. Keys match [`CategoryDefinition::key`].
pub type CategoryWeights = BTreeMap<String, f64>;

pub const ADOPTION_RATE: &str = "adoption_rate";
pub const TIME_SAVINGS: &str = "time_savings";
pub const COST_EFFICIENCY: &str = "cost_efficiency";
pub const PERFORMANCE_IMPROVEMENT: &str = "performance_improvement";
pub const TOOL_SPRAWL_REDUCTION: &str = "tool_sprawl_reduction";

/// One scored dimension of the adoption score and the raw range it is normalized from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDefinition {
    pub key: String,
    pub label: String,
    pub weight: f64,
    pub min: f64,
    pub max: f64,
}

impl CategoryDefinition {
    pub fn new(key: &str, label: &str, weight: f64, min: f64, max: f64) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            weight,
            min,
            max,
        }
    }

    /// Maps a raw input onto [0, 1]; values outside the range saturate.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= f64::EPSILON {
            return if value >= self.max { 1.0 } else { 0.0 };
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Named weight set for an industry or a company stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    pub name: String,
    pub weights: CategoryWeights,
}

impl WeightProfile {
    fn new(name: &str, weights: [f64; 5]) -> Self {
        let keys = [
            ADOPTION_RATE,
            TIME_SAVINGS,
            COST_EFFICIENCY,
            PERFORMANCE_IMPROVEMENT,
            TOOL_SPRAWL_REDUCTION,
        ];
        Self {
            name: name.to_string(),
            weights: keys
                .iter()
                .zip(weights)
                .map(|(key, weight)| (key.to_string(), weight))
                .collect(),
        }
    }
}

/// Additive contextual adjustment. `*` matches any value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentRule {
    pub industry: String,
    pub company_stage: String,
    pub industry_maturity: String,
    pub delta: f64,
}

pub const WILDCARD: &str = "*";

impl AdjustmentRule {
    pub fn new(industry: &str, company_stage: &str, industry_maturity: &str, delta: f64) -> Self {
        Self {
            industry: industry.to_string(),
            company_stage: company_stage.to_string(),
            industry_maturity: industry_maturity.to_string(),
            delta,
        }
    }

    /// Number of non-wildcard fields when the rule applies, `None` otherwise.
    pub fn specificity(
        &self,
        industry: &str,
        company_stage: &str,
        industry_maturity: &str,
    ) -> Option<usize> {
        let fields = [
            (&self.industry, industry),
            (&self.company_stage, company_stage),
            (&self.industry_maturity, industry_maturity),
        ];

        let mut specificity = 0;
        for (pattern, value) in fields {
            let pattern = pattern.trim();
            if pattern == WILDCARD {
                continue;
            }
            if !pattern.eq_ignore_ascii_case(value.trim()) {
                return None;
            }
            specificity += 1;
        }
        Some(specificity)
    }
}

/// Lower bounds of each qualitative band; `poor` covers everything below `below_average`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandThresholds {
    pub below_average: f64,
    pub average: f64,
    pub good: f64,
    pub excellent: f64,
}

impl BandThresholds {
    pub const DEFAULT: Self = Self {
        below_average: 20.0,
        average: 40.0,
        good: 60.0,
        excellent: 80.0,
    };
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Static tables driving the adoption score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionScoringConfig {
    pub categories: Vec<CategoryDefinition>,
    pub industry_profiles: Vec<WeightProfile>,
    pub stage_profiles: Vec<WeightProfile>,
    /// Share of the industry profile when blending with the stage profile.
    pub industry_share: f64,
    pub fallback_industry: String,
    pub fallback_stage: String,
    pub adjustment_rules: Vec<AdjustmentRule>,
    pub max_adjustment: f64,
    pub bands: BandThresholds,
    pub neutral_score: f64,
}

impl AdoptionScoringConfig {
    pub const NEUTRAL_SCORE: f64 = 50.0;
    pub const MAX_ADJUSTMENT: f64 = 15.0;

    pub fn standard() -> Self {
        Self {
            categories: standard_categories(),
            industry_profiles: standard_industry_profiles(),
            stage_profiles: standard_stage_profiles(),
            industry_share: 0.6,
            fallback_industry: "Other".to_string(),
            fallback_stage: "Mature".to_string(),
            adjustment_rules: standard_adjustment_rules(),
            max_adjustment: Self::MAX_ADJUSTMENT,
            bands: BandThresholds::DEFAULT,
            neutral_score: Self::NEUTRAL_SCORE,
        }
    }

    pub fn with_adjustment_rules(mut self, rules: Vec<AdjustmentRule>) -> Self {
        self.adjustment_rules = rules;
        self
    }

    pub fn category(&self, key: &str) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|category| category.key == key)
    }

    pub fn default_weights(&self) -> CategoryWeights {
        self.categories
            .iter()
            .map(|category| (category.key.clone(), category.weight))
            .collect()
    }

    pub(crate) fn industry_profile(&self, industry: &str) -> Option<&WeightProfile> {
        find_profile(&self.industry_profiles, industry)
            .or_else(|| find_profile(&self.industry_profiles, &self.fallback_industry))
    }

    pub(crate) fn stage_profile(&self, company_stage: &str) -> Option<&WeightProfile> {
        find_profile(&self.stage_profiles, company_stage)
            .or_else(|| find_profile(&self.stage_profiles, &self.fallback_stage))
    }
}

impl Default for AdoptionScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn find_profile<'a>(profiles: &'a [WeightProfile], name: &str) -> Option<&'a WeightProfile> {
    let name = name.trim();
    profiles
        .iter()
        .find(|profile| profile.name.eq_ignore_ascii_case(name))
}

fn standard_categories() -> Vec<CategoryDefinition> {
    vec![
        CategoryDefinition::new(ADOPTION_RATE, "Adoption rate (% of target users)", 0.2, 0.0, 100.0),
        CategoryDefinition::new(TIME_SAVINGS, "Time saved (hours per user per week)", 0.3, 0.0, 10.0),
        CategoryDefinition::new(COST_EFFICIENCY, "Cost efficiency (% cost reduction)", 0.2, 0.0, 30.0),
        CategoryDefinition::new(
            PERFORMANCE_IMPROVEMENT,
            "Performance improvement (% KPI gain)",
            0.3,
            0.0,
            50.0,
        ),
        CategoryDefinition::new(
            TOOL_SPRAWL_REDUCTION,
            "Tool sprawl reduction (1-5)",
            0.1,
            1.0,
            5.0,
        ),
    ]
}

// Columns: adoption rate, time savings, cost efficiency, performance improvement, tool sprawl.
fn standard_industry_profiles() -> Vec<WeightProfile> {
    vec![
        WeightProfile::new("Software & Technology", [0.25, 0.20, 0.15, 0.25, 0.05]),
        WeightProfile::new("Finance & Banking", [0.15, 0.15, 0.30, 0.25, 0.15]),
        WeightProfile::new("Healthcare", [0.20, 0.15, 0.20, 0.30, 0.15]),
        WeightProfile::new("Retail & E-commerce", [0.15, 0.15, 0.25, 0.25, 0.20]),
        WeightProfile::new("Manufacturing", [0.15, 0.15, 0.30, 0.25, 0.15]),
        WeightProfile::new("Education", [0.20, 0.30, 0.15, 0.20, 0.15]),
        WeightProfile::new("Professional Services", [0.15, 0.30, 0.20, 0.25, 0.10]),
        WeightProfile::new("Media & Entertainment", [0.20, 0.20, 0.10, 0.30, 0.20]),
        WeightProfile::new("Other", [0.20, 0.30, 0.20, 0.30, 0.10]),
    ]
}

fn standard_stage_profiles() -> Vec<WeightProfile> {
    vec![
        WeightProfile::new("Startup", [0.20, 0.30, 0.10, 0.20, 0.10]),
        WeightProfile::new("Early Growth", [0.20, 0.25, 0.10, 0.20, 0.10]),
        WeightProfile::new("Scaling", [0.15, 0.20, 0.20, 0.15, 0.10]),
        WeightProfile::new("Mature", [0.10, 0.15, 0.30, 0.10, 0.15]),
        WeightProfile::new("Enterprise", [0.10, 0.15, 0.30, 0.10, 0.15]),
    ]
}

fn standard_adjustment_rules() -> Vec<AdjustmentRule> {
    vec![
        AdjustmentRule::new(WILDCARD, "Enterprise", "Mature", 5.0),
        AdjustmentRule::new(WILDCARD, "Mature", "Mature", 5.0),
        AdjustmentRule::new(WILDCARD, "Scaling", "Mature", 2.5),
        AdjustmentRule::new(WILDCARD, "Early Growth", "Immature", -2.5),
        AdjustmentRule::new(WILDCARD, "Startup", "Immature", -5.0),
    ]
}
