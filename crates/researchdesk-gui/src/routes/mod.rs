mod health;
mod research;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(research::research_router())
        .nest("/health", health::health_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
