use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all catalog endpoints.
///
/// `trending`, `featured` and `type/:type` are static segments and always win
/// over `/api/content/:id`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health_handler))
        .route("/info", get(handler::info_handler))
        .route("/api/content", get(handler::list_content))
        .route("/api/content/trending", get(handler::trending_content))
        .route("/api/content/featured", get(handler::featured_content))
        .route("/api/content/type/:type", get(handler::content_by_type))
        .route("/api/content/:id", get(handler::content_by_id))
        .route("/api/content/:id/categories", get(handler::content_categories))
        .route("/api/categories/:id", get(handler::category_by_id))
        .route("/api/search", get(handler::search_content))
        .fallback(handler::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Read-only CORS policy: any origin, `GET` only.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
}
