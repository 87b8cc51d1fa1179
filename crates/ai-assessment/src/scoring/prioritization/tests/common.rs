use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::assessment::narrative::{
    NarrativeError, NarrativeService, RoleContext, RoleImpactEstimate, RuleBasedNarrative,
    SummaryContext,
};
use crate::assessment::report::CapabilitySuggestion;
use crate::assessment::repository::NoOrganizationWeights;
use crate::assessment::wizard::{BasicsStep, RolesStep, SelectedRole, WizardStepData};
use crate::scoring::adoption::{AdoptionScoringConfig, AiAdoptionScoreEngine};
use crate::scoring::prioritization::PrioritizationEngine;
use crate::scoring::role::RoleScoreInput;

pub(super) const NARRATIVE_TIMEOUT: Duration = Duration::from_millis(50);

pub(super) fn role(id: i64, title: &str, department: &str) -> SelectedRole {
    SelectedRole {
        id: Some(id),
        title: title.to_string(),
        department: department.to_string(),
        ..SelectedRole::default()
    }
}

/// Four roles with uniform ratings 5, 4, 3 and 1.
pub(super) fn step_data() -> WizardStepData {
    let mut data = WizardStepData {
        basics: Some(BasicsStep {
            company_name: "Northwind".to_string(),
            industry: Some("Technology".to_string()),
            ..BasicsStep::default()
        }),
        roles: Some(RolesStep {
            selected_roles: vec![
                role(4, "Records Clerk", "Operations"),
                role(3, "Financial Analyst", "Finance"),
                role(1, "Customer Support Agent", "Support"),
                role(2, "Sales Representative", "Sales"),
            ],
            ..RolesStep::default()
        }),
        ..WizardStepData::default()
    };
    for (key, rating) in [("1", 5), ("2", 4), ("3", 3), ("4", 1)] {
        data.role_ratings
            .insert(key.to_string(), RoleScoreInput::uniform(rating));
    }
    data
}

pub(super) fn build_engine<N>(narrative: N) -> PrioritizationEngine<NoOrganizationWeights, N>
where
    N: NarrativeService + 'static,
{
    let adoption = AiAdoptionScoreEngine::new(
        AdoptionScoringConfig::standard(),
        Arc::new(NoOrganizationWeights),
        Duration::from_millis(50),
    );
    PrioritizationEngine::new(adoption, Arc::new(narrative), NARRATIVE_TIMEOUT)
}

pub(super) fn offline_engine() -> PrioritizationEngine<NoOrganizationWeights, RuleBasedNarrative> {
    build_engine(RuleBasedNarrative)
}

pub(super) struct FailingNarrative;

#[async_trait]
impl NarrativeService for FailingNarrative {
    async fn executive_summary(&self, _context: &SummaryContext) -> Result<String, NarrativeError> {
        Err(NarrativeError::Unavailable("provider returned 503".to_string()))
    }

    async fn capability_suggestions(
        &self,
        _role: &RoleContext,
    ) -> Result<Vec<CapabilitySuggestion>, NarrativeError> {
        Err(NarrativeError::InvalidResponse("truncated JSON".to_string()))
    }

    async fn performance_impact(
        &self,
        _role: &RoleContext,
    ) -> Result<RoleImpactEstimate, NarrativeError> {
        Err(NarrativeError::Unavailable("provider returned 503".to_string()))
    }
}

/// Answers correctly, but only after a minute.
pub(super) struct SlowNarrative;

impl SlowNarrative {
    async fn stall() {
        tokio::time::sleep(Duration::from_secs(60)).await;
    }
}

#[async_trait]
impl NarrativeService for SlowNarrative {
    async fn executive_summary(&self, context: &SummaryContext) -> Result<String, NarrativeError> {
        Self::stall().await;
        RuleBasedNarrative.executive_summary(context).await
    }

    async fn capability_suggestions(
        &self,
        role: &RoleContext,
    ) -> Result<Vec<CapabilitySuggestion>, NarrativeError> {
        Self::stall().await;
        RuleBasedNarrative.capability_suggestions(role).await
    }

    async fn performance_impact(
        &self,
        role: &RoleContext,
    ) -> Result<RoleImpactEstimate, NarrativeError> {
        Self::stall().await;
        RuleBasedNarrative.performance_impact(role).await
    }
}
