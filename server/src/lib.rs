pub mod config;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use routes::classify::classify_routes;
use state::AppState;

/// CORS for browser clients. Restricted to `client_url` when given.
pub fn cors_layer(client_url: Option<&str>) -> Result<CorsLayer, header::InvalidHeaderValue> {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);
    Ok(match client_url {
        Some(url) => cors.allow_origin(url.parse::<HeaderValue>()?),
        None => cors.allow_origin(Any),
    })
}

pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new().merge(classify_routes(state)).layer(cors)
}
