use std::path::PathBuf;

use fh_types::ContentId;

/// Errors raised while loading a catalog.
///
/// Lookups on a loaded catalog never fail; an unknown id is `None` or an
/// empty list.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("content id {0} appears more than once")]
    DuplicateContent(ContentId),
}

/// Result alias for catalog loading.
pub type CatalogResult<T> = Result<T, CatalogError>;
