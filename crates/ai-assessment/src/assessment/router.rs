use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::narrative::NarrativeService;
use super::repository::OrganizationWeightsSource;
use super::wizard::WizardStepData;
use crate::scoring::adoption::AdoptionScoreInputs;
use crate::scoring::prioritization::PrioritizationEngine;
use crate::scoring::role::RoleScoreInput;

/// Body of `POST /api/v1/ai-adoption-score`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionScoreRequest {
    #[serde(default)]
    pub inputs: AdoptionScoreInputs,
    pub industry: String,
    pub company_stage: String,
    pub industry_maturity: String,
    #[serde(default)]
    pub organization_id: Option<i64>,
}

pub fn assessment_router<W, N>(engine: Arc<PrioritizationEngine<W, N>>) -> Router
where
    W: OrganizationWeightsSource + 'static,
    N: NarrativeService + 'static,
{
    Router::new()
        .route("/api/v1/role-scores", post(role_score_handler::<W, N>))
        .route(
            "/api/v1/ai-adoption-score",
            post(adoption_score_handler::<W, N>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/prioritization",
            post(prioritization_handler::<W, N>),
        )
        .with_state(engine)
}

pub(crate) async fn role_score_handler<W, N>(
    State(engine): State<Arc<PrioritizationEngine<W, N>>>,
    axum::Json(input): axum::Json<RoleScoreInput>,
) -> Response
where
    W: OrganizationWeightsSource + 'static,
    N: NarrativeService + 'static,
{
    let result = engine.role_engine().score(&input);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn adoption_score_handler<W, N>(
    State(engine): State<Arc<PrioritizationEngine<W, N>>>,
    axum::Json(request): axum::Json<AdoptionScoreRequest>,
) -> Response
where
    W: OrganizationWeightsSource + 'static,
    N: NarrativeService + 'static,
{
    let score = engine
        .adoption()
        .calculate(
            &request.inputs,
            &request.industry,
            &request.company_stage,
            &request.industry_maturity,
            request.organization_id,
        )
        .await;
    (StatusCode::OK, axum::Json(score)).into_response()
}

pub(crate) async fn prioritization_handler<W, N>(
    State(engine): State<Arc<PrioritizationEngine<W, N>>>,
    Path(assessment_id): Path<i64>,
    axum::Json(step_data): axum::Json<WizardStepData>,
) -> Response
where
    W: OrganizationWeightsSource + 'static,
    N: NarrativeService + 'static,
{
    match engine
        .calculate_prioritization(assessment_id, &step_data)
        .await
    {
        Ok(report) => {
            info!(
                assessment_id,
                degraded = report.is_degraded(),
                "served prioritization report"
            );
            (StatusCode::OK, axum::Json(report)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
