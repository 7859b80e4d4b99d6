use assets_sdk::errors::AssetsError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Asset not found")]
    NotFound,

    #[error("Blob not found")]
    BlobNotFound,

    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Upstream returned not found")]
    UpstreamNotFound,

    #[error("Upstream fetch failed: {0}")]
    Upstream(String),

    #[error("Blob storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl DomainError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn storage(e: impl std::fmt::Display) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<DomainError> for AssetsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound | DomainError::BlobNotFound | DomainError::UpstreamNotFound => {
                Self::not_found()
            }
            DomainError::Validation { field, message } => Self::validation(field, message),
            DomainError::Upstream(_) | DomainError::Storage(_) | DomainError::Database(_) => {
                Self::internal()
            }
        }
    }
}
