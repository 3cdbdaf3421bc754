use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("content not found: {0}")]
    ContentNotFound(String),

    #[error("category not found: {0}")]
    CategoryNotFound(String),

    #[error("search query is required")]
    MissingQuery,

    #[error("catalog error: {0}")]
    Catalog(#[from] fh_catalog::CatalogError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ContentNotFound(_) | Self::CategoryNotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingQuery => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to clients. Internal details stay in the log.
    fn public_message(&self) -> &'static str {
        match self {
            Self::ContentNotFound(_) => "Content not found",
            Self::CategoryNotFound(_) => "Category not found",
            Self::MissingQuery => "Search query is required",
            _ => "Internal server error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
