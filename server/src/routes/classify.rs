use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use classifier_client::task::EndpointId;

use crate::handlers::classify_handlers::{index, predict, predict_mod};
use crate::state::AppState;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn classify_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(EndpointId::Closed.default_path(), post(predict))
        .route(EndpointId::Open.default_path(), post(predict_mod))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
