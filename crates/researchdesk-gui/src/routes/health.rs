use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

pub fn health_router() -> Router<AppState> {
    Router::new()
        .route("/live", get(live))
        .route("/ready", get(ready))
}

async fn live() -> Json<HealthResponse> {
    Json(build_response())
}

// The agent client is lazy and the flow has no warm dependencies, so
// readiness mirrors liveness.
async fn ready() -> Json<HealthResponse> {
    Json(build_response())
}

fn build_response() -> HealthResponse {
    HealthResponse {
        status: "ok",
        service: "researchdesk-gui",
    }
}
