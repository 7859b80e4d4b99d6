use user_preferences_sdk::PreferencesError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

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
}

impl From<DomainError> for PreferencesError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { field, message } => Self::validation(field, message),
            DomainError::Database(_) => Self::internal(),
        }
    }
}
