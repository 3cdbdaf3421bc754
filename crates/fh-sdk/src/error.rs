use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    /// Posting requires a chat display name on the profile.
    #[error("no display name set for this profile")]
    NoDisplayName,

    #[error("store error: {0}")]
    Store(#[from] fh_store::StoreError),

    #[error("ledger error: {0}")]
    Ledger(#[from] fh_ledger::LedgerError),

    #[error("thread error: {0}")]
    Thread(#[from] fh_threads::ThreadError),
}

pub type SdkResult<T> = Result<T, SdkError>;
