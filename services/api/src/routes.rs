use crate::infra::{quote, AppState, QuoteView};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use premium_rating::error::AppError;
use premium_rating::rating::{DriverProfile, DriverProfileInput, RatingEngine};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Router exposing the quoting endpoints over a shared engine.
pub(crate) fn rating_router(engine: Arc<RatingEngine>) -> Router {
    Router::new()
        .route("/api/v1/premium/quote", post(quote_endpoint))
        .route("/api/v1/premium/rates", get(rates_endpoint))
        .with_state(engine)
}

pub(crate) fn with_rating_routes(engine: Arc<RatingEngine>) -> Router {
    rating_router(engine)
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

pub(crate) async fn quote_endpoint(
    State(engine): State<Arc<RatingEngine>>,
    Json(input): Json<DriverProfileInput>,
) -> Result<Json<QuoteView>, AppError> {
    let profile = DriverProfile::try_from(input)?;
    Ok(Json(quote(&engine, &profile)?))
}

pub(crate) async fn rates_endpoint(
    State(engine): State<Arc<RatingEngine>>,
) -> Json<BTreeMap<String, f64>> {
    let rates = engine
        .rates()
        .entries()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    Json(rates)
}
