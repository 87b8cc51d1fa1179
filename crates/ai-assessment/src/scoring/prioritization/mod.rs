//! Ranks assessment roles into a priority matrix and assembles the report payload.

mod matrix;
mod ranking;

#[cfg(test)]
mod tests;

pub use matrix::PriorityThresholds;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, info};

use crate::assessment::fallback::{best_effort, Outcome};
use crate::assessment::narrative::{
    template_summary, NarrativeService, RoleContext, RoleImpactEstimate, SummaryContext,
};
use crate::assessment::report::{
    AiSuggestion, HeatmapData, PerformanceImpact, PrioritizationData, PrioritizedItem,
    ReportContent, ReportSection, RoleImpact,
};
use crate::assessment::repository::OrganizationWeightsSource;
use crate::assessment::wizard::WizardStepData;
use crate::scoring::adoption::{
    AdoptionScoreInputs, AiAdoptionScoreEngine, CalculatedAiAdoptionScore,
};
use crate::scoring::role::RoleScoreEngine;

/// Number of top-ranked roles that receive narrative enrichment.
pub const NARRATIVE_ROLE_LIMIT: usize = 3;

const DEFAULT_INDUSTRY: &str = "Other";
const DEFAULT_COMPANY_STAGE: &str = "Startup";
const DEFAULT_INDUSTRY_MATURITY: &str = "Immature";

/// Failures that leave nothing sensible to rank.
#[derive(Debug, thiserror::Error)]
pub enum PrioritizationError {
    #[error("wizard step data is missing the `{0}` section")]
    MissingSection(&'static str),
    #[error("no roles were selected for this assessment")]
    NoRolesSelected,
}

pub struct PrioritizationEngine<W, N> {
    roles: RoleScoreEngine,
    thresholds: PriorityThresholds,
    adoption: AiAdoptionScoreEngine<W>,
    narrative: Arc<N>,
    narrative_timeout: Duration,
}

impl<W, N> PrioritizationEngine<W, N>
where
    W: OrganizationWeightsSource + 'static,
    N: NarrativeService + 'static,
{
    pub fn new(
        adoption: AiAdoptionScoreEngine<W>,
        narrative: Arc<N>,
        narrative_timeout: Duration,
    ) -> Self {
        Self {
            roles: RoleScoreEngine::new(),
            thresholds: PriorityThresholds::DEFAULT,
            adoption,
            narrative,
            narrative_timeout,
        }
    }

    pub fn with_thresholds(mut self, thresholds: PriorityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_role_engine(mut self, roles: RoleScoreEngine) -> Self {
        self.roles = roles;
        self
    }

    pub fn role_engine(&self) -> &RoleScoreEngine {
        &self.roles
    }

    pub fn adoption(&self) -> &AiAdoptionScoreEngine<W> {
        &self.adoption
    }

    pub fn thresholds(&self) -> &PriorityThresholds {
        &self.thresholds
    }

    /// Scores, buckets and ranks every selected role. Pure: identical input, identical order.
    pub fn rank_roles(
        &self,
        step_data: &WizardStepData,
    ) -> Result<Vec<PrioritizedItem>, PrioritizationError> {
        self.rank_selection(step_data).map(|(items, _)| items)
    }

    /// Ranked items plus the keys of duplicate role selections that were not scored.
    fn rank_selection(
        &self,
        step_data: &WizardStepData,
    ) -> Result<(Vec<PrioritizedItem>, Vec<String>), PrioritizationError> {
        if step_data.roles.is_none() {
            return Err(PrioritizationError::MissingSection("roles"));
        }

        let selection = step_data.ordered_roles();
        if selection.ordered.is_empty() {
            return Err(PrioritizationError::NoRolesSelected);
        }

        let mut items: Vec<PrioritizedItem> = selection
            .ordered
            .into_iter()
            .map(|role| {
                let score = self.roles.score(&step_data.ratings_for(role));
                let value_score = score.value_potential.total;
                let effort_score = 100u8.saturating_sub(score.ease_of_implementation.total);

                PrioritizedItem {
                    id: role.key(),
                    name: role.title.clone(),
                    department: role.department.clone(),
                    value_score,
                    effort_score,
                    total_score: score.total_score,
                    priority: self.thresholds.bucket(value_score, effort_score),
                    value_level: self.thresholds.value_level(value_score),
                    effort_level: self.thresholds.effort_level(effort_score),
                    rank: 0,
                }
            })
            .collect();

        ranking::rank(&mut items);
        Ok((items, selection.skipped))
    }

    pub async fn calculate_prioritization(
        &self,
        assessment_id: i64,
        step_data: &WizardStepData,
    ) -> Result<ReportContent, PrioritizationError> {
        info!(assessment_id, "starting prioritization");
        let (prioritized_items, skipped_roles) = self.rank_selection(step_data)?;
        debug!(
            assessment_id,
            roles = prioritized_items.len(),
            top = %prioritized_items[0].name,
            skipped = skipped_roles.len(),
            "ranked roles"
        );

        let top_roles: Vec<RoleContext> = prioritized_items
            .iter()
            .take(NARRATIVE_ROLE_LIMIT)
            .map(|item| RoleContext {
                role_id: item.id.clone(),
                title: item.name.clone(),
                department: item.department.clone(),
                pain_point: step_data.pain_point(&item.id).cloned(),
            })
            .collect();

        let basics = step_data.basics.as_ref();
        let summary_context = SummaryContext {
            assessment_id,
            company_name: basics.map(|basics| basics.company_name.clone()),
            industry: step_data.industry().map(str::to_string),
            prioritized_items: prioritized_items.clone(),
        };

        let summary = best_effort(
            "executive_summary",
            self.narrative_timeout,
            self.narrative.executive_summary(&summary_context),
            || template_summary(&summary_context),
        );
        let suggestions = join_all(top_roles.iter().map(|role| {
            best_effort(
                "capability_suggestions",
                self.narrative_timeout,
                self.narrative.capability_suggestions(role),
                Vec::new,
            )
        }));
        let impacts = join_all(top_roles.iter().map(|role| {
            best_effort(
                "performance_impact",
                self.narrative_timeout,
                self.narrative.performance_impact(role),
                || RoleImpactEstimate {
                    metrics: Vec::new(),
                    estimated_annual_roi: 0.0,
                },
            )
        }));
        let adoption = self.adoption_score(step_data);

        let (summary, suggestions, impacts, ai_adoption_score) =
            tokio::join!(summary, suggestions, impacts, adoption);

        let mut degraded = Vec::new();
        if !skipped_roles.is_empty() {
            degraded.push(ReportSection::PrioritizationData);
        }
        if summary.degraded {
            degraded.push(ReportSection::ExecutiveSummary);
        }
        if suggestions.iter().any(|outcome| outcome.degraded) {
            degraded.push(ReportSection::AiSuggestions);
        }
        if impacts.iter().any(|outcome| outcome.degraded) {
            degraded.push(ReportSection::PerformanceImpact);
        }

        let ai_suggestions = top_roles
            .iter()
            .zip(suggestions)
            .map(|(role, outcome)| AiSuggestion {
                role_id: role.role_id.clone(),
                role_title: role.title.clone(),
                capabilities: outcome.value,
            })
            .collect();

        let performance_impact = assemble_impact(&top_roles, impacts);
        let heatmap = HeatmapData::from_items(&prioritized_items);

        info!(
            assessment_id,
            roles = prioritized_items.len(),
            degraded = degraded.len(),
            "prioritization complete"
        );

        Ok(ReportContent {
            assessment_id,
            executive_summary: summary.value,
            prioritization_data: PrioritizationData {
                prioritized_items,
                heatmap,
                skipped_roles,
            },
            ai_suggestions,
            performance_impact,
            ai_adoption_score,
            degraded,
            generated_at: Utc::now(),
        })
    }

    /// Always scored: absent inputs count as an empty submission and yield the neutral score.
    async fn adoption_score(&self, step_data: &WizardStepData) -> CalculatedAiAdoptionScore {
        let empty = AdoptionScoreInputs::default();
        let inputs = step_data.ai_adoption_score_inputs.as_ref().unwrap_or(&empty);
        let basics = step_data.basics.as_ref();
        let industry = basics
            .and_then(|basics| basics.industry.as_deref())
            .unwrap_or(DEFAULT_INDUSTRY);
        let company_stage = basics
            .and_then(|basics| basics.company_stage.as_deref())
            .unwrap_or(DEFAULT_COMPANY_STAGE);
        let industry_maturity = basics
            .and_then(|basics| basics.industry_maturity.as_deref())
            .unwrap_or(DEFAULT_INDUSTRY_MATURITY);
        let organization_id = basics.and_then(|basics| basics.organization_id);

        self.adoption
            .calculate(
                inputs,
                industry,
                company_stage,
                industry_maturity,
                organization_id,
            )
            .await
    }
}

fn assemble_impact(
    roles: &[RoleContext],
    impacts: Vec<Outcome<RoleImpactEstimate>>,
) -> PerformanceImpact {
    let mut estimated_roi = 0.0;
    let role_impacts = roles
        .iter()
        .zip(impacts)
        .map(|(role, outcome)| {
            let estimate = outcome.value;
            if estimate.estimated_annual_roi.is_finite() {
                estimated_roi += estimate.estimated_annual_roi;
            }
            RoleImpact {
                role_title: role.title.clone(),
                metrics: estimate.metrics,
            }
        })
        .collect();

    PerformanceImpact {
        role_impacts,
        estimated_roi,
    }
}
