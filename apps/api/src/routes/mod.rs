pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::errors::panic_response;
use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/generate-questions",
            post(handlers::handle_generate_questions),
        )
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}
