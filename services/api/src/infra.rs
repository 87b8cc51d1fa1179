use ai_assessment::assessment::narrative::RuleBasedNarrative;
use ai_assessment::assessment::repository::{OrganizationWeightsSource, RepositoryError};
use ai_assessment::config::ScoringConfig;
use ai_assessment::error::AppError;
use ai_assessment::scoring::adoption::{
    load_adjustment_rules_from_path, AdoptionScoringConfig, AiAdoptionScoreEngine,
    CategoryWeights,
};
use ai_assessment::scoring::prioritization::PrioritizationEngine;
use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

pub(crate) type ServiceEngine = PrioritizationEngine<InMemoryOrganizationWeights, RuleBasedNarrative>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryOrganizationWeights {
    records: Arc<Mutex<HashMap<i64, CategoryWeights>>>,
}

impl InMemoryOrganizationWeights {
    pub(crate) fn fetch(&self, organization_id: i64) -> Result<Option<CategoryWeights>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("weights mutex poisoned".to_string()))?;
        Ok(guard.get(&organization_id).cloned())
    }

    pub(crate) fn store(
        &self,
        organization_id: i64,
        weights: CategoryWeights,
    ) -> Result<(), RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("weights mutex poisoned".to_string()))?;
        guard.insert(organization_id, weights);
        Ok(())
    }
}

#[async_trait]
impl OrganizationWeightsSource for InMemoryOrganizationWeights {
    async fn organization_weights(
        &self,
        organization_id: i64,
    ) -> Result<Option<CategoryWeights>, RepositoryError> {
        self.fetch(organization_id)
    }
}

/// Standard adoption tables, with contextual rules replaced from CSV when a path is configured.
pub(crate) fn adoption_config(scoring: &ScoringConfig) -> Result<AdoptionScoringConfig, AppError> {
    let config = AdoptionScoringConfig::standard();
    match &scoring.adjustment_rules_path {
        Some(path) => {
            let rules = load_adjustment_rules_from_path(path)?;
            info!(path = %path.display(), rules = rules.len(), "loaded contextual adjustment rules");
            Ok(config.with_adjustment_rules(rules))
        }
        None => Ok(config),
    }
}

pub(crate) fn build_engine(
    scoring: &ScoringConfig,
    weights: Arc<InMemoryOrganizationWeights>,
) -> Result<ServiceEngine, AppError> {
    let adoption = AiAdoptionScoreEngine::new(adoption_config(scoring)?, weights, scoring.weights_timeout);
    Ok(PrioritizationEngine::new(
        adoption,
        Arc::new(RuleBasedNarrative),
        scoring.narrative_timeout,
    ))
}
