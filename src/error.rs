use thiserror::Error;

/// Errors surfaced by the ledger core and its adapters.
///
/// Storage failures are propagated as-is; nothing in the core retries them.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Invalid transition for {transaction_id}: {from} -> {to}")]
    InvalidTransition {
        transaction_id: String,
        from: String,
        to: String,
    },
    #[error("Transaction id {0} already exists")]
    DuplicateTransaction(String),
    #[error("Could not allocate a unique transaction id after {0} attempts")]
    IdentifierExhausted(u8),
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LedgerError {
    /// HTTP status a transport adapter should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            LedgerError::NotFound(_) => 404,
            LedgerError::InvalidRequest(_) => 400,
            LedgerError::InvalidTransition { .. } => 409,
            _ => 500,
        }
    }

    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        LedgerError::Storage(Box::new(err))
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for LedgerError {
    fn from(err: rocksdb::Error) -> Self {
        LedgerError::Storage(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
