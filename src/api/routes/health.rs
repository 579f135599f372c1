use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::api::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub services: BTreeMap<&'static str, &'static str>,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Ready while at least one vendor service is configured.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let services: BTreeMap<_, _> = state
        .vendor_services()
        .into_iter()
        .map(|(name, configured)| (name, if configured { "configured" } else { "missing" }))
        .collect();

    let is_ready = services.values().any(|&s| s == "configured");

    let response = ReadinessResponse {
        status: if is_ready { "ready" } else { "not_ready" }.into(),
        services,
    };

    if is_ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
