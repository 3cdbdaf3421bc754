use fh_types::{ContentId, MessageId};

/// Errors produced by comment thread operations.
#[derive(Debug, thiserror::Error)]
pub enum ThreadError {
    #[error("store error: {0}")]
    Store(#[from] fh_store::StoreError),

    /// No top-level message (or reply under the given parent) has this id.
    #[error("message {message_id} not found in thread {content_id}")]
    MessageNotFound {
        content_id: ContentId,
        message_id: MessageId,
    },

    #[error("author name must not be empty")]
    EmptyAuthor,

    #[error("thread lock poisoned")]
    Poisoned,
}

/// Result alias for thread operations.
pub type ThreadResult<T> = Result<T, ThreadError>;
