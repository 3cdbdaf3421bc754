//! HTTP server for FandomHub.
//!
//! Serves the content catalog as read-only JSON. Ratings and comments are
//! local to each viewer's profile and never reach the server.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::HealthResponse;
pub use server::FandomServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use fh_catalog::InMemoryCatalog;
    use serde_json::Value;
    use tower::util::ServiceExt;

    use super::*;

    fn app() -> Router {
        let catalog = InMemoryCatalog::seeded().unwrap();
        router::build_router(AppState::new(Arc::new(catalog)))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn ids(body: &Value) -> Vec<&str> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn info_endpoint() {
        let (status, body) = get("/info").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "fh-server");
        assert_eq!(body["contents"], 15);
    }

    #[tokio::test]
    async fn list_all_content() {
        let (status, body) = get("/api/content").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 15);
        assert!(body[0].get("categories").is_none());
    }

    #[tokio::test]
    async fn trending_is_not_captured_by_id_route() {
        let (status, body) = get("/api/content/trending").await;
        assert_eq!(status, StatusCode::OK);
        let list = body.as_array().unwrap();
        assert!(!list.is_empty() && list.len() <= 20);
        assert_eq!(list[0]["id"], "the-last-of-us");
    }

    #[tokio::test]
    async fn featured_list() {
        let (status, body) = get("/api/content/featured").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().iter().all(|c| c["featured"] == true));
    }

    #[tokio::test]
    async fn content_by_type() {
        let (status, body) = get("/api/content/type/movie").await;
        assert_eq!(status, StatusCode::OK);
        assert!(ids(&body).contains(&"matrix"));
        assert!(body.as_array().unwrap().iter().all(|c| c["type"] == "movie"));

        let (status, body) = get("/api/content/type/anime").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn content_by_id() {
        let (status, body) = get("/api/content/matrix").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Matrix");
    }

    #[tokio::test]
    async fn unknown_content_is_404_json() {
        let (status, body) = get("/api/content/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Content not found");
    }

    #[tokio::test]
    async fn content_categories_flattened() {
        let (status, body) = get("/api/content/the-last-of-us/categories").await;
        assert_eq!(status, StatusCode::OK);
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0]["type"], "characters");
        assert_eq!(entries[0]["contentId"], "the-last-of-us");

        let (status, body) = get("/api/content/nope/categories").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn category_by_id() {
        let (status, body) = get("/api/categories/revolver").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "weapons");
        assert_eq!(body["data"]["damage"], "Alto");

        let (status, body) = get("/api/categories/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Category not found");
    }

    #[tokio::test]
    async fn search_requires_query() {
        let (status, body) = get("/api/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Search query is required");

        let (status, _) = get("/api/search?q=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_matches() {
        let (status, body) = get("/api/search?q=MATRIX").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec!["matrix"]);
    }

    #[tokio::test]
    async fn unknown_route_is_404_json() {
        let (status, body) = get("/api/nothing-here").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }
}
