use std::sync::Arc;

use fh_catalog::{ContentCatalog, InMemoryCatalog};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, cors_layer};
use crate::state::AppState;

/// FandomHub catalog server.
pub struct FandomServer {
    config: ServerConfig,
    catalog: Arc<dyn ContentCatalog>,
}

impl FandomServer {
    /// Load the catalog named by `config`, or the bundled seed.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => InMemoryCatalog::load(path)?,
            None => InMemoryCatalog::seeded()?,
        };
        Ok(Self::with_catalog(config, Arc::new(catalog)))
    }

    pub fn with_catalog(config: ServerConfig, catalog: Arc<dyn ContentCatalog>) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let router = build_router(AppState::new(Arc::clone(&self.catalog)));
        if self.config.allow_any_origin {
            router.layer(cors_layer())
        } else {
            router
        }
    }

    /// Serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("FandomHub server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("FandomHub server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn server_construction() {
        let server = FandomServer::new(ServerConfig::default()).unwrap();
        assert_eq!(server.config().bind_addr, "127.0.0.1:5000".parse().unwrap());
    }

    #[test]
    fn router_builds() {
        let server = FandomServer::new(ServerConfig::default()).unwrap();
        let _router = server.router();
    }

    #[test]
    fn missing_catalog_file_fails() {
        let config = ServerConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/catalog.json")),
            ..ServerConfig::default()
        };
        assert!(matches!(
            FandomServer::new(config),
            Err(ServerError::Catalog(_))
        ));
    }
}
