use crate::infra::{AppState, InMemoryOrganizationWeights, ServiceEngine};
use ai_assessment::assessment::assessment_router;
use ai_assessment::scoring::adoption::CategoryWeights;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct WeightsState {
    pub(crate) store: Arc<InMemoryOrganizationWeights>,
    pub(crate) categories: Arc<BTreeSet<String>>,
}

pub(crate) fn with_service_routes(
    engine: Arc<ServiceEngine>,
    store: Arc<InMemoryOrganizationWeights>,
) -> Router {
    let categories = engine
        .adoption()
        .config()
        .categories
        .iter()
        .map(|category| category.key.clone())
        .collect();
    let weights_state = WeightsState {
        store,
        categories: Arc::new(categories),
    };

    let organization_routes = Router::new()
        .route(
            "/api/v1/organizations/:organization_id/weights",
            get(get_weights_endpoint).put(put_weights_endpoint),
        )
        .with_state(weights_state);

    assessment_router(engine)
        .merge(organization_routes)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn get_weights_endpoint(
    State(state): State<WeightsState>,
    Path(organization_id): Path<i64>,
) -> Response {
    match state.store.fetch(organization_id) {
        Ok(Some(weights)) => (StatusCode::OK, Json(weights)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": "no weights configured for organization" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn put_weights_endpoint(
    State(state): State<WeightsState>,
    Path(organization_id): Path<i64>,
    Json(weights): Json<CategoryWeights>,
) -> Response {
    if let Err(message) = validate_weights(&weights, &state.categories) {
        let payload = json!({ "error": message });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    match state.store.store(organization_id, weights.clone()) {
        Ok(()) => {
            info!(organization_id, categories = weights.len(), "stored organization weights");
            (StatusCode::OK, Json(weights)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn validate_weights(weights: &CategoryWeights, categories: &BTreeSet<String>) -> Result<(), String> {
    if weights.is_empty() {
        return Err("at least one category weight is required".to_string());
    }
    for (key, weight) in weights {
        if !categories.contains(key) {
            return Err(format!("unknown category '{key}'"));
        }
        if !weight.is_finite() || *weight < 0.0 {
            return Err(format!("weight for '{key}' must be a non-negative number"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::build_engine;
    use ai_assessment::config::ScoringConfig;
    use ai_assessment::scoring::adoption::TIME_SAVINGS;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> (Router, Arc<InMemoryOrganizationWeights>) {
        let store = Arc::new(InMemoryOrganizationWeights::default());
        let engine = build_engine(&ScoringConfig::default(), store.clone()).expect("engine builds");
        (with_service_routes(Arc::new(engine), store.clone()), store)
    }

    fn put_json(uri: &str, payload: &Value) -> Request<Body> {
        Request::put(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(payload).expect("serialize")))
            .expect("request")
    }

    fn post_json(uri: &str, payload: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(payload).expect("serialize")))
            .expect("request")
    }

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (router, _) = router();
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_organization_has_no_weights() {
        let (router, _) = router();
        let response = router
            .oneshot(
                Request::get("/api/v1/organizations/5/weights")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn stored_weights_change_adoption_scores() {
        let (router, store) = router();
        let response = router
            .clone()
            .oneshot(put_json(
                "/api/v1/organizations/5/weights",
                &json!({ "adoption_rate": 0.0, "time_savings": 1.0 }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(store.fetch(5).expect("fetch").is_some());

        let payload = json!({
            "inputs": { "components": { "adoption_rate": 100.0, "time_savings": 0.0 } },
            "industry": "Education",
            "companyStage": "Scaling",
            "industryMaturity": "Emerging",
            "organizationId": 5,
        });
        let response = router
            .oneshot(post_json("/api/v1/ai-adoption-score", &payload))
            .await
            .expect("router responds");
        let body = read_json_body(response).await;
        assert_eq!(body["weightSource"], "organization");
        assert_eq!(body["overallScore"], 0.0);
    }

    #[tokio::test]
    async fn unknown_categories_are_rejected() {
        let (router, store) = router();
        let response = router
            .oneshot(put_json(
                "/api/v1/organizations/5/weights",
                &json!({ "morale": 1.0 }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(store.fetch(5).expect("fetch").is_none());
    }

    #[test]
    fn negative_weights_are_invalid() {
        let categories = BTreeSet::from([TIME_SAVINGS.to_string()]);
        let weights = CategoryWeights::from([(TIME_SAVINGS.to_string(), -1.0)]);
        assert!(validate_weights(&weights, &categories).is_err());
    }
}
