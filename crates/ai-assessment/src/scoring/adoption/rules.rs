use super::config::{AdjustmentRule, AdoptionScoringConfig, BandThresholds, CategoryWeights};
use super::config::TIME_SAVINGS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const HOURLY_LABOR_COST: f64 = 50.0;
const WORK_WEEKS_PER_YEAR: f64 = 48.0;
const INVESTMENT_PER_USER: f64 = 2_000.0;

/// Raw adoption inputs as captured by the assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionScoreInputs {
    /// Category key → raw value in the category's own unit.
    #[serde(default)]
    pub components: BTreeMap<String, f64>,
    #[serde(default)]
    pub affected_user_count: Option<u32>,
    #[serde(default)]
    pub cost_savings_amount: Option<f64>,
}

impl AdoptionScoreInputs {
    pub fn with_component(mut self, key: &str, value: f64) -> Self {
        self.components.insert(key.to_string(), value);
        self
    }

    fn component(&self, key: &str) -> Option<f64> {
        self.components
            .get(key)
            .copied()
            .filter(|value| value.is_finite())
    }
}

/// Organization context the contextual adjustment is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionContext {
    pub industry: String,
    pub company_stage: String,
    pub industry_maturity: String,
}

impl AdoptionContext {
    pub fn new(industry: &str, company_stage: &str, industry_maturity: &str) -> Self {
        Self {
            industry: industry.to_string(),
            company_stage: company_stage.to_string(),
            industry_maturity: industry_maturity.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QualitativeBand {
    Poor,
    BelowAverage,
    Average,
    Good,
    Excellent,
}

impl QualitativeBand {
    pub fn from_score(score: f64, thresholds: &BandThresholds) -> Self {
        if score >= thresholds.excellent {
            Self::Excellent
        } else if score >= thresholds.good {
            Self::Good
        } else if score >= thresholds.average {
            Self::Average
        } else if score >= thresholds.below_average {
            Self::BelowAverage
        } else {
            Self::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::BelowAverage => "Below average",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }
}

/// Where the weights used for a calculation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    Organization,
    Profile,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryContribution {
    pub input: f64,
    pub normalized_score: f64,
    /// Weight after redistribution across the categories that were supplied.
    pub weight: f64,
    /// Points contributed to the 0-100 base score.
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualAdjustment {
    pub delta: f64,
    pub matched_rule: Option<AdjustmentRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiDetails {
    pub calculated_roi_percentage: f64,
    pub investment_amount: f64,
    pub net_benefit_amount: f64,
    /// `None` when the inputs promise no annual benefit, so the investment never pays back.
    pub payback_period_months: Option<f64>,
    pub assumptions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedAiAdoptionScore {
    pub overall_score: f64,
    pub base_score: f64,
    pub breakdown_by_category: BTreeMap<String, CategoryContribution>,
    pub missing_categories: Vec<String>,
    pub qualitative_band: QualitativeBand,
    pub contextual_adjustment: ContextualAdjustment,
    pub weight_source: WeightSource,
    pub roi: Option<RoiDetails>,
    pub summary: String,
}

/// Pure adoption score over a fully resolved weight set.
pub fn score_with_weights(
    config: &AdoptionScoringConfig,
    inputs: &AdoptionScoreInputs,
    context: &AdoptionContext,
    weights: &CategoryWeights,
    weight_source: WeightSource,
) -> CalculatedAiAdoptionScore {
    let mut present = Vec::new();
    let mut missing_categories = Vec::new();

    for category in &config.categories {
        match inputs.component(&category.key) {
            Some(value) => {
                let weight = sanitize_weight(
                    weights
                        .get(&category.key)
                        .copied()
                        .unwrap_or(category.weight),
                );
                present.push((category, value, weight));
            }
            None => missing_categories.push(category.key.clone()),
        }
    }

    let present_weight: f64 = present.iter().map(|(_, _, weight)| weight).sum();
    let mut breakdown_by_category = BTreeMap::new();

    let base_score = if present_weight <= f64::EPSILON {
        config.neutral_score
    } else {
        let mut base = 0.0;
        for (category, value, weight) in &present {
            let normalized_score = category.normalize(*value);
            let effective_weight = weight / present_weight;
            let contribution = normalized_score * effective_weight * 100.0;
            base += contribution;
            breakdown_by_category.insert(
                category.key.clone(),
                CategoryContribution {
                    input: *value,
                    normalized_score,
                    weight: effective_weight,
                    contribution: round_one_decimal(contribution),
                },
            );
        }
        base.clamp(0.0, 100.0)
    };

    let contextual_adjustment = contextual_adjustment(config, context);
    let overall_score =
        round_one_decimal((base_score + contextual_adjustment.delta).clamp(0.0, 100.0));
    let qualitative_band = QualitativeBand::from_score(overall_score, &config.bands);

    CalculatedAiAdoptionScore {
        overall_score,
        base_score: round_one_decimal(base_score),
        breakdown_by_category,
        missing_categories,
        qualitative_band,
        contextual_adjustment,
        weight_source,
        roi: roi_details(inputs, context),
        summary: summarize(overall_score, qualitative_band, context),
    }
}

/// Picks the most specific matching rule (first wins on ties) and bounds its delta.
pub fn contextual_adjustment(
    config: &AdoptionScoringConfig,
    context: &AdoptionContext,
) -> ContextualAdjustment {
    let mut best: Option<(usize, &AdjustmentRule)> = None;
    for rule in &config.adjustment_rules {
        let Some(specificity) = rule.specificity(
            &context.industry,
            &context.company_stage,
            &context.industry_maturity,
        ) else {
            continue;
        };
        if best.map_or(true, |(current, _)| specificity > current) {
            best = Some((specificity, rule));
        }
    }

    match best {
        Some((_, rule)) if rule.delta.is_finite() => {
            let bound = config.max_adjustment.abs();
            ContextualAdjustment {
                delta: rule.delta.clamp(-bound, bound),
                matched_rule: Some(rule.clone()),
            }
        }
        _ => ContextualAdjustment {
            delta: 0.0,
            matched_rule: None,
        },
    }
}

/// Blends the industry and company-stage profiles; `None` when neither table has an entry.
pub(crate) fn blended_profile_weights(
    config: &AdoptionScoringConfig,
    context: &AdoptionContext,
) -> Option<CategoryWeights> {
    let industry = config.industry_profile(&context.industry);
    let stage = config.stage_profile(&context.company_stage);
    if industry.is_none() && stage.is_none() {
        return None;
    }

    let industry_share = config.industry_share.clamp(0.0, 1.0);
    let stage_share = 1.0 - industry_share;

    let blended = config
        .categories
        .iter()
        .map(|category| {
            let from = |profile: Option<&super::config::WeightProfile>| {
                profile
                    .and_then(|profile| profile.weights.get(&category.key).copied())
                    .unwrap_or(category.weight)
            };
            let weight = from(industry) * industry_share + from(stage) * stage_share;
            (category.key.clone(), weight)
        })
        .collect();

    Some(blended)
}

fn roi_details(inputs: &AdoptionScoreInputs, context: &AdoptionContext) -> Option<RoiDetails> {
    let hours = inputs.component(TIME_SAVINGS)?;
    let users = f64::from(inputs.affected_user_count.filter(|count| *count > 0)?);
    let cost_savings = inputs.cost_savings_amount.filter(|amount| amount.is_finite())?;

    let annual_time_value = hours * users * HOURLY_LABOR_COST * WORK_WEEKS_PER_YEAR;
    let investment_amount = users * INVESTMENT_PER_USER;
    let annual_benefit = annual_time_value + cost_savings;
    let net_benefit_amount = annual_benefit - investment_amount;
    let payback_period_months = (annual_benefit > 0.0)
        .then(|| round_one_decimal(investment_amount / annual_benefit * 12.0));

    Some(RoiDetails {
        calculated_roi_percentage: round_one_decimal(net_benefit_amount / investment_amount * 100.0),
        investment_amount,
        net_benefit_amount,
        payback_period_months,
        assumptions: format!(
            "Calculations assume ${HOURLY_LABOR_COST:.0}/hour fully loaded labor cost, {WORK_WEEKS_PER_YEAR:.0} work weeks per year, and implementation cost of ${INVESTMENT_PER_USER:.0} per affected user. Industry: {}, Company Stage: {}, Industry Maturity: {}.",
            context.industry, context.company_stage, context.industry_maturity
        ),
    })
}

fn summarize(score: f64, band: QualitativeBand, context: &AdoptionContext) -> String {
    let stage = context.company_stage.to_lowercase();
    let industry = context.industry.to_lowercase();
    let (tone, guidance) = match band {
        QualitativeBand::Excellent => (
            "excellent",
            "this indicates strong readiness for advanced AI initiatives with potential for significant competitive advantage",
        ),
        QualitativeBand::Good => (
            "good",
            "this suggests readiness for targeted AI initiatives with proper planning and change management",
        ),
        QualitativeBand::Average => (
            "moderate",
            "this suggests focusing on foundational AI capabilities first, with gradual expansion",
        ),
        QualitativeBand::BelowAverage | QualitativeBand::Poor => (
            "cautious",
            "this suggests starting with small pilot programs and addressing organizational readiness factors",
        ),
    };

    format!(
        "Your organization shows {tone} AI adoption potential ({score:.1}/100). For a {stage} company in the {industry} industry, {guidance}."
    )
}

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(0.0)
    } else {
        0.0
    }
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
