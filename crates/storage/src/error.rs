use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound)
    }

    /// Transport-level failures: the request never produced a backend answer.
    pub fn is_transport(&self) -> bool {
        match self {
            StorageError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            StorageError::Database(sqlx::Error::Io(_))
            | StorageError::Database(sqlx::Error::PoolTimedOut) => true,
            _ => false,
        }
    }
}
