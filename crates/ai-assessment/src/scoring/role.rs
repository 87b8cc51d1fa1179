//! Role-level Value Potential / Ease of Implementation scoring.
//!
//! Ratings arrive on a 1-5 scale and are projected linearly onto 20-100 so role scores can be
//! compared directly with the other 0-100 scores in a report.

use serde::{Deserialize, Serialize};

/// Rating used when a criterion was not answered.
pub const NEUTRAL_RATING: u8 = 3;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

const RATING_SCALE: f64 = 20.0;

/// Relative weight of the two groups in the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleScoreWeights {
    pub value_potential: f64,
    pub ease_of_implementation: f64,
}

impl RoleScoreWeights {
    pub const DEFAULT: Self = Self {
        value_potential: 0.6,
        ease_of_implementation: 0.4,
    };

    /// Scales the pair so it sums to one; degenerate pairs fall back to the default split.
    fn normalized(self) -> Self {
        let value = sanitize_weight(self.value_potential);
        let ease = sanitize_weight(self.ease_of_implementation);
        let total = value + ease;
        if total <= f64::EPSILON {
            return Self::DEFAULT;
        }

        Self {
            value_potential: value / total,
            ease_of_implementation: ease / total,
        }
    }
}

impl Default for RoleScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(0.0)
    } else {
        0.0
    }
}

/// Raw wizard ratings for a single role. Any criterion may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleScoreInput {
    #[serde(default)]
    pub time_savings: Option<i32>,
    #[serde(default)]
    pub quality_impact: Option<i32>,
    #[serde(default)]
    pub strategic_alignment: Option<i32>,
    #[serde(default)]
    pub data_readiness: Option<i32>,
    #[serde(default)]
    pub technical_feasibility: Option<i32>,
    #[serde(default)]
    pub adoption_risk: Option<i32>,
}

impl RoleScoreInput {
    pub fn uniform(rating: i32) -> Self {
        Self {
            time_savings: Some(rating),
            quality_impact: Some(rating),
            strategic_alignment: Some(rating),
            data_readiness: Some(rating),
            technical_feasibility: Some(rating),
            adoption_risk: Some(rating),
        }
    }

    /// Fills criteria missing from `self` with the ones present in `fallback`.
    pub fn or(self, fallback: RoleScoreInput) -> Self {
        Self {
            time_savings: self.time_savings.or(fallback.time_savings),
            quality_impact: self.quality_impact.or(fallback.quality_impact),
            strategic_alignment: self.strategic_alignment.or(fallback.strategic_alignment),
            data_readiness: self.data_readiness.or(fallback.data_readiness),
            technical_feasibility: self.technical_feasibility.or(fallback.technical_feasibility),
            adoption_risk: self.adoption_risk.or(fallback.adoption_risk),
        }
    }
}

pub(crate) fn clamp_rating(raw: Option<i32>) -> u8 {
    match raw {
        Some(value) => value.clamp(i32::from(MIN_RATING), i32::from(MAX_RATING)) as u8,
        None => NEUTRAL_RATING,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePotential {
    pub time_savings: u8,
    pub quality_impact: u8,
    pub strategic_alignment: u8,
    pub total: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EaseOfImplementation {
    pub data_readiness: u8,
    pub technical_feasibility: u8,
    pub adoption_risk: u8,
    pub total: u8,
}

/// Qualitative reading of a role's composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleRating {
    Exceptional,
    Strong,
    Good,
    Moderate,
    Future,
    Limited,
    NotRecommended,
}

impl RoleRating {
    pub fn from_total(total: u8) -> Self {
        match total {
            90.. => Self::Exceptional,
            80..=89 => Self::Strong,
            70..=79 => Self::Good,
            60..=69 => Self::Moderate,
            50..=59 => Self::Future,
            40..=49 => Self::Limited,
            _ => Self::NotRecommended,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Exceptional => "Exceptional candidate for AI transformation",
            Self::Strong => "Strong candidate for AI transformation",
            Self::Good => "Good candidate for AI transformation",
            Self::Moderate => "Moderate candidate for AI transformation",
            Self::Future => "Consider for future AI transformation",
            Self::Limited => "Limited potential for AI transformation",
            Self::NotRecommended => "Not recommended for AI transformation at this time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleScoreResult {
    pub value_potential: ValuePotential,
    pub ease_of_implementation: EaseOfImplementation,
    pub total_score: u8,
    pub rating: RoleRating,
}

/// Stateless scorer holding the value/ease split.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleScoreEngine {
    weights: RoleScoreWeights,
}

impl RoleScoreEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: RoleScoreWeights) -> Self {
        Self {
            weights: weights.normalized(),
        }
    }

    pub fn weights(&self) -> RoleScoreWeights {
        self.weights
    }

    pub fn score(&self, input: &RoleScoreInput) -> RoleScoreResult {
        let time_savings = clamp_rating(input.time_savings);
        let quality_impact = clamp_rating(input.quality_impact);
        let strategic_alignment = clamp_rating(input.strategic_alignment);
        let data_readiness = clamp_rating(input.data_readiness);
        let technical_feasibility = clamp_rating(input.technical_feasibility);
        let adoption_risk = clamp_rating(input.adoption_risk);

        let value_total = group_total([time_savings, quality_impact, strategic_alignment]);
        let ease_total = group_total([data_readiness, technical_feasibility, adoption_risk]);

        let composite = f64::from(value_total) * self.weights.value_potential
            + f64::from(ease_total) * self.weights.ease_of_implementation;
        let total_score = composite.round().clamp(0.0, 100.0) as u8;

        RoleScoreResult {
            value_potential: ValuePotential {
                time_savings,
                quality_impact,
                strategic_alignment,
                total: value_total,
            },
            ease_of_implementation: EaseOfImplementation {
                data_readiness,
                technical_feasibility,
                adoption_risk,
                total: ease_total,
            },
            total_score,
            rating: RoleRating::from_total(total_score),
        }
    }
}

fn group_total(ratings: [u8; 3]) -> u8 {
    let sum: u32 = ratings.iter().map(|rating| u32::from(*rating)).sum();
    let mean = f64::from(sum) / ratings.len() as f64;
    (mean * RATING_SCALE).round() as u8
}

/// Scores a role with the default value/ease split.
pub fn calculate_role_score(input: &RoleScoreInput) -> RoleScoreResult {
    RoleScoreEngine::new().score(input)
}
