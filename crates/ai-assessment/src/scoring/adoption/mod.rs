//! Organization-level AI Adoption Score.
//!
//! Category inputs are normalized, weighted (organization override, then industry/stage
//! profile blend, then category defaults), shifted by a bounded contextual delta and banded.

mod config;
mod loader;
mod rules;

pub use config::{
    AdjustmentRule, AdoptionScoringConfig, BandThresholds, CategoryDefinition, CategoryWeights,
    WeightProfile, ADOPTION_RATE, COST_EFFICIENCY, PERFORMANCE_IMPROVEMENT,
    TOOL_SPRAWL_REDUCTION, TIME_SAVINGS, WILDCARD,
};
pub use loader::{load_adjustment_rules, load_adjustment_rules_from_path, AdjustmentRulesError};
pub use rules::{
    contextual_adjustment, score_with_weights, AdoptionContext, AdoptionScoreInputs,
    CalculatedAiAdoptionScore, CategoryContribution, ContextualAdjustment, QualitativeBand,
    RoiDetails, WeightSource,
};

use crate::assessment::repository::OrganizationWeightsSource;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Adoption scorer with an injected organization weight lookup.
pub struct AiAdoptionScoreEngine<W> {
    config: Arc<AdoptionScoringConfig>,
    weights: Arc<W>,
    lookup_timeout: Duration,
}

impl<W> Clone for AiAdoptionScoreEngine<W> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            weights: self.weights.clone(),
            lookup_timeout: self.lookup_timeout,
        }
    }
}

impl<W> AiAdoptionScoreEngine<W>
where
    W: OrganizationWeightsSource + 'static,
{
    pub fn new(config: AdoptionScoringConfig, weights: Arc<W>, lookup_timeout: Duration) -> Self {
        Self {
            config: Arc::new(config),
            weights,
            lookup_timeout,
        }
    }

    pub fn config(&self) -> &AdoptionScoringConfig {
        &self.config
    }

    pub async fn calculate(
        &self,
        inputs: &AdoptionScoreInputs,
        industry: &str,
        company_stage: &str,
        industry_maturity: &str,
        organization_id: Option<i64>,
    ) -> CalculatedAiAdoptionScore {
        let context = AdoptionContext::new(industry, company_stage, industry_maturity);
        let (weights, source) = self.resolve_weights(&context, organization_id).await;
        let score = score_with_weights(&self.config, inputs, &context, &weights, source);

        debug!(
            overall_score = score.overall_score,
            band = score.qualitative_band.label(),
            weight_source = ?score.weight_source,
            missing = score.missing_categories.len(),
            "calculated AI adoption score"
        );

        score
    }

    /// Organization override merged over the profile blend; lookup failures never propagate.
    pub async fn resolve_weights(
        &self,
        context: &AdoptionContext,
        organization_id: Option<i64>,
    ) -> (CategoryWeights, WeightSource) {
        let (mut weights, mut source) = match rules::blended_profile_weights(&self.config, context)
        {
            Some(weights) => (weights, WeightSource::Profile),
            None => (self.config.default_weights(), WeightSource::Default),
        };

        let Some(organization_id) = organization_id else {
            return (weights, source);
        };

        let lookup = self.weights.organization_weights(organization_id);
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(Ok(Some(overrides))) if !overrides.is_empty() => {
                for (key, weight) in overrides {
                    if self.config.category(&key).is_some() {
                        weights.insert(key, weight);
                    } else {
                        debug!(organization_id, category = %key, "ignoring unknown weight override");
                    }
                }
                source = WeightSource::Organization;
            }
            Ok(Ok(_)) => {}
            Ok(Err(err)) => {
                warn!(organization_id, error = %err, "organization weight lookup failed; using profile weights");
            }
            Err(_) => {
                warn!(
                    organization_id,
                    timeout_ms = self.lookup_timeout.as_millis() as u64,
                    "organization weight lookup timed out; using profile weights"
                );
            }
        }

        (weights, source)
    }
}
