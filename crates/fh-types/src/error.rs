use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid vote kind: {0} (expected \"like\" or \"dislike\")")]
    InvalidVoteKind(String),

    #[error("identifier must not be empty")]
    EmptyIdentifier,
}
